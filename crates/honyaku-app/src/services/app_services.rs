// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — builds the capabilities once at startup and wires
// them into a translation session.

use std::path::Path;
use std::sync::Arc;

use honyaku_core::AppConfig;
use honyaku_core::error::{HonyakuError, Result};
use honyaku_document::{DocumentLoader, OcrEngine};
use honyaku_pipeline::{ChatTranslator, LinguaIdentifier, PageProcessor, Session};
use tracing::info;

use super::config_dir;

/// Export format chosen from the output file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Epub,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some("epub") => Ok(Self::Epub),
            _ => Err(HonyakuError::Export(format!(
                "output must end in .pdf or .epub: {}",
                path.display()
            ))),
        }
    }
}

/// Everything the driver needs, initialised once.
pub struct AppServices {
    session: Session,
}

impl AppServices {
    /// Load configuration and build the OCR, language and translation
    /// capabilities.
    pub fn init() -> Result<Self> {
        let dir = config_dir::config_dir();
        info!(path = %dir.display(), "initialising app services");

        let mut config = config_dir::load_config(&dir);
        config_dir::ensure_export_font(&mut config);
        Self::from_config(config)
    }

    pub fn from_config(config: AppConfig) -> Result<Self> {
        let recognizer = Arc::new(OcrEngine::from_settings(&config.ocr)?);
        let identifier = Arc::new(LinguaIdentifier::new());
        let translator = Arc::new(ChatTranslator::new(&config.translator)?);

        let processor = PageProcessor::new(
            recognizer,
            identifier,
            translator,
            config.processor.clone(),
        );
        let loader = DocumentLoader::new(config.source.clone());

        info!("app services initialised");
        Ok(Self {
            session: Session::new(loader, processor, config.export),
        })
    }

    /// Translate every page of `input` in order and export to `output`.
    ///
    /// Returns the number of records written.
    pub fn translate_document(&mut self, input: &Path, output: &Path) -> Result<usize> {
        let format = OutputFormat::from_path(output)?;
        let pages = self.session.open(input)?;
        info!(pages, "Translating document");

        loop {
            self.session.translate_current()?;
            if !self.session.next_page() {
                break;
            }
        }

        match format {
            OutputFormat::Pdf => self.session.export_pdf(output)?,
            OutputFormat::Epub => self.session.export_epub(output)?,
        }
        Ok(self.session.results().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.PDF")).ok(),
            Some(OutputFormat::Pdf)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("dir/book.epub")).ok(),
            Some(OutputFormat::Epub)
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("out.txt")),
            Err(HonyakuError::Export(_))
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn missing_ocr_models_fail_initialisation() {
        let mut config = AppConfig::default();
        config.ocr.model_dir = Some("/nonexistent/honyaku-models".into());
        assert!(matches!(
            AppServices::from_config(config),
            Err(HonyakuError::OcrError(_))
        ));
    }
}
