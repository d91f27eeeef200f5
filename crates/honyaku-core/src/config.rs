// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{HonyakuError, Result};

/// Persistent application settings.
///
/// Every section falls back to its defaults when missing from the JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub processor: ProcessorConfig,
    pub ocr: OcrSettings,
    pub translator: TranslatorConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.source.pdf_dpi == 0 {
            return Err(HonyakuError::Config("pdf_dpi must be positive".into()));
        }
        if self.processor.max_width == 0 {
            return Err(HonyakuError::Config("max_width must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.processor.min_confidence) {
            return Err(HonyakuError::Config(format!(
                "min_confidence must be within [0, 1], got {}",
                self.processor.min_confidence
            )));
        }
        Ok(())
    }
}

/// Input normalisation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Resolution used when rasterising PDF pages.
    pub pdf_dpi: u32,
    /// Directory holding `libpdfium`; `None` searches the system library path.
    pub pdfium_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pdf_dpi: 120,
            pdfium_dir: None,
        }
    }
}

/// Page processing thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Pages wider than this are downscaled to exactly this width before OCR.
    pub max_width: u32,
    /// Fragments must score strictly above this to be kept.
    pub min_confidence: f32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            min_confidence: 0.1,
        }
    }
}

/// OCR engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Source-language hints for the recogniser.
    pub languages: Vec<String>,
    /// Directory holding the recognition models; `None` uses the engine default.
    pub model_dir: Option<PathBuf>,
    /// Output alphabet of a custom recognition model, in label order. `None`
    /// means the stock Latin-script model.
    pub alphabet: Option<String>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            languages: vec!["ja".into(), "en".into()],
            model_dir: None,
            alphabet: None,
        }
    }
}

/// Translation backend settings (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Base URL, without the `/chat/completions` suffix.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the bearer token.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            timeout_secs: 60,
        }
    }
}

/// Book metadata and layout for the exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub title: String,
    pub author: String,
    /// Book language (BCP 47).
    pub language: String,
    /// TrueType/OpenType font embedded in PDF output.
    pub font_path: Option<PathBuf>,
    pub paper_size: crate::PaperSize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Translated Manga".into(),
            author: "MangaTranslator".into(),
            language: "ru".into(),
            font_path: None,
            paper_size: crate::PaperSize::A4,
        }
    }
}
