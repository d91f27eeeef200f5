// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EPUB 3 exporter — one XHTML chapter per record, packed with `zip`.
//
// Entry timestamps are pinned and the book identifier is a SHA-256 of the
// chapter contents, so identical input and modification time give identical
// bytes.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use honyaku_core::config::ExportConfig;
use honyaku_core::error::{HonyakuError, Result};
use honyaku_core::types::PageResult;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{Exporter, labelled_fields, page_heading};

const TOC_LABEL: &str = "Start";

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Whether `c` is in the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// Escape text for XML element content and attribute values.
///
/// Characters XML cannot carry at all become U+FFFD.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if !is_xml_char(c) => out.push(char::REPLACEMENT_CHARACTER),
            _ => out.push(c),
        }
    }
    out
}

fn chapter_file(number: usize) -> String {
    format!("page_{number}.xhtml")
}

/// Writes page translations as an EPUB 3 book.
pub struct EpubExporter {
    title: String,
    author: String,
    language: String,
    /// Fixed `dcterms:modified` value; the current time when unset.
    modified: Option<DateTime<Utc>>,
}

impl EpubExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            title: config.title.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            modified: None,
        }
    }

    /// Pin the modification timestamp, making output reproducible.
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    fn chapter(&self, number: usize, result: &PageResult) -> String {
        let heading = escape_xml(&page_heading(number));
        let mut body = String::new();
        for (label, text) in labelled_fields(result) {
            body.push_str(&format!(
                "    <p><b>{}:</b> {}</p>\n",
                label,
                escape_xml(&text)
            ));
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="{lang}" xml:lang="{lang}">
  <head>
    <title>{heading}</title>
  </head>
  <body>
    <h2>{heading}</h2>
{body}  </body>
</html>
"#,
            lang = escape_xml(&self.language),
        )
    }

    fn package(&self, identifier: &str, modified: &str, chapters: usize) -> String {
        let mut manifest = String::new();
        let mut spine = String::from("    <itemref idref=\"nav\"/>\n");
        for number in 1..=chapters {
            manifest.push_str(&format!(
                "    <item id=\"page_{number}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>\n",
                chapter_file(number)
            ));
            spine.push_str(&format!("    <itemref idref=\"page_{number}\"/>\n"));
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="book-id" xml:lang="{lang}">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="book-id">urn:sha256:{identifier}</dc:identifier>
    <dc:title>{title}</dc:title>
    <dc:creator>{author}</dc:creator>
    <dc:language>{lang}</dc:language>
    <meta property="dcterms:modified">{modified}</meta>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
{manifest}  </manifest>
  <spine toc="ncx">
{spine}  </spine>
</package>
"#,
            lang = escape_xml(&self.language),
            title = escape_xml(&self.title),
            author = escape_xml(&self.author),
        )
    }

    fn nav(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="{lang}" xml:lang="{lang}">
  <head>
    <title>{title}</title>
  </head>
  <body>
    <nav epub:type="toc" id="toc">
      <ol>
        <li><a href="{first}">{label}</a></li>
      </ol>
    </nav>
  </body>
</html>
"#,
            lang = escape_xml(&self.language),
            title = escape_xml(&self.title),
            first = chapter_file(1),
            label = TOC_LABEL,
        )
    }

    fn ncx(&self, identifier: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="urn:sha256:{identifier}"/>
    <meta name="dtb:depth" content="1"/>
  </head>
  <docTitle>
    <text>{title}</text>
  </docTitle>
  <navMap>
    <navPoint id="intro" playOrder="1">
      <navLabel>
        <text>{label}</text>
      </navLabel>
      <content src="{first}"/>
    </navPoint>
  </navMap>
</ncx>
"#,
            title = escape_xml(&self.title),
            first = chapter_file(1),
            label = TOC_LABEL,
        )
    }
}

/// Map a zip error into the export error variant.
fn zip_err(err: zip::result::ZipError) -> HonyakuError {
    HonyakuError::Export(format!("EPUB packaging failed: {}", err))
}

impl Exporter for EpubExporter {
    fn format_name(&self) -> &'static str {
        "epub"
    }

    #[instrument(skip_all, fields(records = results.len()))]
    fn render(&self, results: &[PageResult]) -> Result<Vec<u8>> {
        info!(title = %self.title, "Creating translation EPUB");

        let chapters: Vec<String> = results
            .iter()
            .enumerate()
            .map(|(i, result)| self.chapter(i + 1, result))
            .collect();

        let mut hasher = Sha256::new();
        for chapter in &chapters {
            hasher.update(chapter.as_bytes());
        }
        let identifier = hex::encode(hasher.finalize());
        let modified = self
            .modified
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();

        let stored = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(zip::DateTime::default());
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        // The mimetype entry must come first and be uncompressed.
        writer.start_file("mimetype", stored).map_err(zip_err)?;
        writer.write_all(b"application/epub+zip")?;

        let mut entries: Vec<(String, String)> = vec![
            ("META-INF/container.xml".into(), CONTAINER_XML.into()),
            (
                "OEBPS/content.opf".into(),
                self.package(&identifier, &modified, chapters.len()),
            ),
            ("OEBPS/nav.xhtml".into(), self.nav()),
            ("OEBPS/toc.ncx".into(), self.ncx(&identifier)),
        ];
        entries.extend(
            chapters
                .into_iter()
                .enumerate()
                .map(|(i, chapter)| (format!("OEBPS/{}", chapter_file(i + 1)), chapter)),
        );

        for (name, content) in &entries {
            writer.start_file(name.as_str(), deflated).map_err(zip_err)?;
            writer.write_all(content.as_bytes())?;
        }

        let bytes = writer.finish().map_err(zip_err)?.into_inner();
        debug!(entries = entries.len() + 1, bytes = bytes.len(), "EPUB packed");
        Ok(bytes)
    }
}
