// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session — the loaded document, a page cursor, and the records produced so
// far. Front ends drive translation through this type.

use std::path::{Path, PathBuf};

use honyaku_core::config::ExportConfig;
use honyaku_core::error::{HonyakuError, Result};
use honyaku_core::types::PageResult;
use honyaku_document::{DocumentLoader, EpubExporter, PdfExporter, RasterPage, export_to_file};
use tracing::{info, instrument};

use crate::accumulator::ResultAccumulator;
use crate::processor::PageProcessor;

pub struct Session {
    loader: DocumentLoader,
    processor: PageProcessor,
    export_config: ExportConfig,
    source: Option<PathBuf>,
    pages: Vec<RasterPage>,
    cursor: usize,
    results: ResultAccumulator,
}

impl Session {
    pub fn new(loader: DocumentLoader, processor: PageProcessor, export_config: ExportConfig) -> Self {
        Self {
            loader,
            processor,
            export_config,
            source: None,
            pages: Vec::new(),
            cursor: 0,
            results: ResultAccumulator::new(),
        }
    }

    /// Load a new document.
    ///
    /// On success the pages are replaced, the cursor returns to the first page
    /// and earlier records are dropped. On failure nothing changes.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let pages = self.loader.load(path)?;

        self.pages = pages;
        self.cursor = 0;
        self.results.clear();
        self.source = Some(path.to_path_buf());

        info!(pages = self.pages.len(), "Session document replaced");
        Ok(self.pages.len())
    }

    /// Path of the loaded document.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn current_page(&self) -> Option<&RasterPage> {
        self.pages.get(self.cursor)
    }

    /// Advance the cursor; `false` at the last page.
    pub fn next_page(&mut self) -> bool {
        if self.cursor + 1 < self.pages.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Step the cursor back; `false` at the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Process the current page and append its record.
    #[instrument(skip(self), fields(page = self.cursor))]
    pub fn translate_current(&mut self) -> Result<&PageResult> {
        let page = self
            .pages
            .get(self.cursor)
            .ok_or(HonyakuError::NoDocumentLoaded)?;
        let result = self.processor.process(page);
        self.results.push(result);
        info!(records = self.results.len(), "Record appended");
        self.results.last().ok_or(HonyakuError::NoDocumentLoaded)
    }

    pub fn results(&self) -> &ResultAccumulator {
        &self.results
    }

    pub fn export_pdf(&self, path: impl AsRef<Path>) -> Result<()> {
        export_to_file(
            &PdfExporter::new(&self.export_config),
            self.results.as_slice(),
            path,
        )
    }

    pub fn export_epub(&self, path: impl AsRef<Path>) -> Result<()> {
        export_to_file(
            &EpubExporter::new(&self.export_config),
            self.results.as_slice(),
            path,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use std::sync::Arc;

    use honyaku_core::config::{ProcessorConfig, SourceConfig};
    use honyaku_core::types::{PageField, Sentinel, TargetLanguage, TextFragment};
    use honyaku_document::TextRecognizer;
    use image::{DynamicImage, Rgb, RgbImage};

    use crate::language::LanguageIdentifier;
    use crate::translator::Translator;

    /// Reports the page width as its only fragment, so records identify pages.
    struct WidthRecognizer;

    impl TextRecognizer for WidthRecognizer {
        fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextFragment>> {
            Ok(vec![TextFragment::new(format!("w{}", image.width()), 0.9)])
        }
    }

    struct Always(&'static str);

    impl LanguageIdentifier for Always {
        fn identify(&self, _text: &str) -> Option<String> {
            Some(self.0.to_owned())
        }
    }

    struct Echo;

    impl Translator for Echo {
        fn translate(&self, text: &str, target: TargetLanguage) -> Result<String> {
            Ok(format!("{}({})", target.code(), text))
        }
    }

    fn session(code: &'static str) -> Session {
        let processor = PageProcessor::new(
            Arc::new(WidthRecognizer),
            Arc::new(Always(code)),
            Arc::new(Echo),
            ProcessorConfig::default(),
        );
        Session::new(
            DocumentLoader::new(SourceConfig::default()),
            processor,
            ExportConfig::default(),
        )
    }

    /// A CBZ whose pages are `widths` pixels wide, in order.
    fn write_cbz(path: &Path, widths: &[u32]) {
        let file = std::fs::File::create(path).expect("create cbz");
        let mut writer = zip::ZipWriter::new(file);
        for (i, width) in widths.iter().enumerate() {
            let mut png = Vec::new();
            DynamicImage::ImageRgb8(RgbImage::from_pixel(*width, 10, Rgb([255, 255, 255])))
                .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
                .expect("encode png");
            writer
                .start_file(format!("{:03}.png", i + 1), zip::write::SimpleFileOptions::default())
                .expect("start entry");
            std::io::Write::write_all(&mut writer, &png).expect("write entry");
        }
        writer.finish().expect("finish cbz");
    }

    #[test]
    fn translate_without_document_fails() {
        let mut session = session("en");
        assert!(matches!(
            session.translate_current(),
            Err(HonyakuError::NoDocumentLoaded)
        ));
        assert!(session.results().is_empty());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vol.cbz");
        write_cbz(&path, &[10, 20, 30]);

        let mut session = session("en");
        assert_eq!(session.open(&path).expect("open"), 3);
        assert!(!session.previous_page());
        assert!(session.next_page());
        assert!(session.next_page());
        assert!(!session.next_page());
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.current_page().map(RasterPage::width), Some(30));
        assert!(session.previous_page());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn records_follow_translation_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vol.cbz");
        write_cbz(&path, &[10, 20]);

        let mut session = session("en");
        session.open(&path).expect("open");
        session.next_page();
        session.translate_current().expect("page 2");
        session.previous_page();
        let first = session.translate_current().expect("page 1").clone();
        assert_eq!(first.russian, PageField::text("ru(w10)"));
        session.translate_current().expect("page 1 again");

        let sources: Vec<String> = session
            .results()
            .iter()
            .map(|r| r.source.to_string())
            .collect();
        assert_eq!(sources, vec!["w20", "w10", "w10"]);
        assert!(
            session
                .results()
                .iter()
                .all(|r| r.english == PageField::Sentinel(Sentinel::EnglishSource))
        );
    }

    #[test]
    fn failed_open_keeps_previous_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vol.cbz");
        write_cbz(&path, &[10, 20]);

        let mut session = session("ru");
        session.open(&path).expect("open");
        session.next_page();
        session.translate_current().expect("translate");

        let bad = dir.path().join("notes.txt");
        std::fs::write(&bad, "text").expect("write txt");
        assert!(matches!(
            session.open(&bad),
            Err(HonyakuError::UnsupportedInput(_))
        ));
        assert_eq!(session.page_count(), 2);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.source(), Some(path.as_path()));
    }

    #[test]
    fn reopening_resets_cursor_and_results() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = dir.path().join("a.cbz");
        let second = dir.path().join("b.cbz");
        write_cbz(&first, &[10, 20]);
        write_cbz(&second, &[30]);

        let mut session = session("ru");
        session.open(&first).expect("open first");
        session.next_page();
        session.translate_current().expect("translate");

        session.open(&second).expect("open second");
        assert_eq!(session.page_count(), 1);
        assert_eq!(session.current_index(), 0);
        assert!(session.results().is_empty());
    }

    #[test]
    fn exports_need_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session("en");
        let pdf = dir.path().join("out.pdf");
        let epub = dir.path().join("out.epub");

        assert!(matches!(session.export_pdf(&pdf), Err(HonyakuError::NothingToSave)));
        assert!(matches!(session.export_epub(&epub), Err(HonyakuError::NothingToSave)));
        assert!(!pdf.exists());
        assert!(!epub.exists());
    }

    #[test]
    fn exports_contain_every_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("vol.cbz");
        write_cbz(&input, &[10, 20, 30]);

        let mut session = session("fr");
        session.open(&input).expect("open");
        loop {
            session.translate_current().expect("translate");
            if !session.next_page() {
                break;
            }
        }

        let pdf = dir.path().join("out.pdf");
        session.export_pdf(&pdf).expect("export pdf");
        let doc = lopdf::Document::load(&pdf).expect("parse pdf");
        assert_eq!(doc.get_pages().len(), 3);

        let epub = dir.path().join("out.epub");
        session.export_epub(&epub).expect("export epub");
        let mut archive =
            zip::ZipArchive::new(std::fs::File::open(&epub).expect("open epub")).expect("read epub");
        let chapters = archive
            .file_names()
            .filter(|name| name.starts_with("OEBPS/page_"))
            .count();
        assert_eq!(chapters, 3);

        let mut third = String::new();
        archive
            .by_name("OEBPS/page_3.xhtml")
            .expect("third chapter")
            .read_to_string(&mut third)
            .expect("read chapter");
        assert!(third.contains("w30"));
        assert!(third.contains("language: fr"));
    }

    struct Cyrillic;

    impl TextRecognizer for Cyrillic {
        fn recognize(&self, _image: &DynamicImage) -> Result<Vec<TextFragment>> {
            Ok(vec![TextFragment::new("Привет", 0.9)])
        }
    }

    fn russian_session(export: ExportConfig) -> Session {
        let processor = PageProcessor::new(
            Arc::new(Cyrillic),
            Arc::new(Always("ru")),
            Arc::new(Echo),
            ProcessorConfig::default(),
        );
        Session::new(DocumentLoader::new(SourceConfig::default()), processor, export)
    }

    fn translate_all(session: &mut Session) {
        loop {
            session.translate_current().expect("translate");
            if !session.next_page() {
                break;
            }
        }
    }

    #[test]
    fn cyrillic_pdf_export_needs_a_unicode_font() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("vol.cbz");
        write_cbz(&input, &[10]);

        let mut session = russian_session(ExportConfig::default());
        session.open(&input).expect("open");
        translate_all(&mut session);

        let pdf = dir.path().join("out.pdf");
        assert!(matches!(session.export_pdf(&pdf), Err(HonyakuError::Export(_))));
        assert!(!pdf.exists());

        // EPUB is plain UTF-8 and needs no font.
        let epub = dir.path().join("out.epub");
        session.export_epub(&epub).expect("export epub");
    }

    #[test]
    fn cyrillic_pdf_export_with_embedded_font() {
        let font = concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../honyaku-document/testdata/DejaVuSans.ttf"
        );
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("vol.cbz");
        write_cbz(&input, &[10, 20]);

        let mut session = russian_session(ExportConfig {
            font_path: Some(font.into()),
            ..ExportConfig::default()
        });
        session.open(&input).expect("open");
        translate_all(&mut session);

        let pdf = dir.path().join("out.pdf");
        session.export_pdf(&pdf).expect("export pdf");
        let doc = lopdf::Document::load(&pdf).expect("parse pdf");
        assert_eq!(doc.get_pages().len(), 2);
        let text = doc.extract_text(&[1]).expect("extract");
        assert!(text.contains("Привет"), "got {text:?}");
    }
}
