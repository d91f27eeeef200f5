// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engine for Honyaku, backed by the `ocrs` crate (a pure-Rust OCR engine
// running neural network models through `rten`).
//
// # Feature Gate
//
// This module is only available when the `ocr` feature is enabled:
//
// ```toml
// honyaku-document = { path = "crates/honyaku-document", features = ["ocr"] }
// ```
//
// # Model Setup
//
// The engine needs `text-detection.rten` and `text-recognition.rten`. Running
// `ocrs-cli` once downloads them to `$XDG_CACHE_HOME/ocrs` (typically
// `~/.cache/ocrs`), which is the default model directory.
//
// The stock recognition model only emits Latin script. Japanese or Cyrillic
// pages need a custom model plus its alphabet; the configured language hints
// are checked against that alphabet when the engine starts.

use std::path::{Path, PathBuf};

use honyaku_core::config::OcrSettings;
use honyaku_core::error::HonyakuError;
use honyaku_core::types::TextFragment;
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument, warn};

use super::TextRecognizer;

/// Well-known filenames for the detection and recognition models.
const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Output alphabet of the stock `ocrs` recognition model.
// The "E" before "ABCDE" stands in for the euro sign, as in `ocrs` itself.
const STOCK_ALPHABET: &str = " 0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~EABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Writing system a language hint needs the recogniser to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Cyrillic,
    Japanese,
}

impl Script {
    /// `None` for languages whose script cannot be checked.
    fn for_language(code: &str) -> Option<Self> {
        match code {
            "ja" => Some(Self::Japanese),
            "ru" | "uk" | "be" | "bg" | "sr" | "mk" | "kk" => Some(Self::Cyrillic),
            "en" | "fr" | "de" | "es" | "it" | "pt" | "nl" | "sv" | "da" | "no" | "nb" | "fi"
            | "pl" | "cs" | "sk" | "hu" | "ro" | "tr" | "id" | "ms" | "vi" => Some(Self::Latin),
            _ => None,
        }
    }

    fn contains(self, c: char) -> bool {
        match self {
            Self::Latin => c.is_ascii_alphabetic(),
            Self::Cyrillic => ('\u{0400}'..='\u{04FF}').contains(&c),
            // Kana and the CJK unified ideographs.
            Self::Japanese => {
                ('\u{3040}'..='\u{30FF}').contains(&c) || ('\u{4E00}'..='\u{9FFF}').contains(&c)
            }
        }
    }
}

/// Confidence reported for every line; `ocrs` drops low-quality lines itself
/// and does not expose a score.
const LINE_CONFIDENCE: f32 = 1.0;

/// Default directory for cached OCR model files.
///
/// `$XDG_CACHE_HOME/ocrs`, falling back to `~/.cache/ocrs`.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Model locations and language hints for an [`OcrEngine`].
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub detection_model_path: PathBuf,
    pub recognition_model_path: PathBuf,
    /// Source-language hints; each must be readable with `alphabet`.
    pub languages: Vec<String>,
    /// Recognition alphabet; `None` is the stock Latin-script model.
    pub alphabet: Option<String>,
}

impl OcrConfig {
    /// Expects `dir` to contain `text-detection.rten` and `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
            languages: OcrSettings::default().languages,
            alphabet: None,
        }
    }

    /// Build from the application settings, using the default cache directory
    /// when none is configured.
    pub fn from_settings(settings: &OcrSettings) -> Self {
        let dir = settings.model_dir.clone().unwrap_or_else(default_model_dir);
        Self {
            languages: settings.languages.clone(),
            alphabet: settings.alphabet.clone(),
            ..Self::from_dir(dir)
        }
    }

    fn effective_alphabet(&self) -> &str {
        self.alphabet.as_deref().unwrap_or(STOCK_ALPHABET)
    }

    /// Language hints whose script the recognition alphabet cannot produce.
    pub fn unsupported_languages(&self) -> Vec<&str> {
        let alphabet = self.effective_alphabet();
        self.languages
            .iter()
            .map(String::as_str)
            .filter(|code| {
                Script::for_language(code)
                    .is_some_and(|script| !alphabet.chars().any(|c| script.contains(c)))
            })
            .collect()
    }

    /// Warn about each language hint the model cannot read; fail when it can
    /// read none of them.
    pub fn check_languages(&self) -> Result<(), HonyakuError> {
        let unsupported = self.unsupported_languages();
        for language in &unsupported {
            warn!(
                language,
                "Recognition model cannot read this language; configure ocr.model_dir \
                 and ocr.alphabet for a model that covers it"
            );
        }
        if !self.languages.is_empty() && unsupported.len() == self.languages.len() {
            return Err(HonyakuError::OcrError(format!(
                "recognition model covers none of the configured languages {:?}",
                self.languages
            )));
        }
        Ok(())
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<(), HonyakuError> {
        for path in [&self.detection_model_path, &self.recognition_model_path] {
            if !path.exists() {
                return Err(HonyakuError::OcrError(format!(
                    "model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

/// Honyaku OCR engine.
///
/// Model loading is the expensive step; build the engine once at startup and
/// share it across pages.
pub struct OcrEngine {
    engine: OcrsEngine,
}

impl OcrEngine {
    /// Load the models named in `config`.
    ///
    /// `ocrs` and `rten` must be compiled in release mode; debug builds are
    /// 10-100x slower.
    #[instrument(skip_all, fields(
        detection = %config.detection_model_path.display(),
        recognition = %config.recognition_model_path.display(),
        languages = ?config.languages,
    ))]
    pub fn new(config: OcrConfig) -> Result<Self, HonyakuError> {
        config.check_languages()?;
        config.validate()?;

        let detection_model = Model::load_file(&config.detection_model_path).map_err(|err| {
            HonyakuError::OcrError(format!(
                "failed to load detection model from {}: {}",
                config.detection_model_path.display(),
                err
            ))
        })?;
        let recognition_model =
            Model::load_file(&config.recognition_model_path).map_err(|err| {
                HonyakuError::OcrError(format!(
                    "failed to load recognition model from {}: {}",
                    config.recognition_model_path.display(),
                    err
                ))
            })?;

        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            alphabet: config.alphabet,
            ..Default::default()
        })
        .map_err(|err| HonyakuError::OcrError(format!("failed to initialise OCR engine: {}", err)))?;

        info!("OCR engine initialised");
        Ok(Self { engine })
    }

    pub fn from_settings(settings: &OcrSettings) -> Result<Self, HonyakuError> {
        Self::new(OcrConfig::from_settings(settings))
    }
}

impl TextRecognizer for OcrEngine {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextFragment>, HonyakuError> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            HonyakuError::OcrError(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;
        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| HonyakuError::OcrError(format!("OCR preprocessing failed: {}", err)))?;

        let word_rects = self
            .engine
            .detect_words(&input)
            .map_err(|err| HonyakuError::OcrError(format!("word detection failed: {}", err)))?;
        let line_rects = self.engine.find_text_lines(&input, &word_rects);
        let lines = self
            .engine
            .recognize_text(&input, &line_rects)
            .map_err(|err| HonyakuError::OcrError(format!("line recognition failed: {}", err)))?;

        let fragments: Vec<TextFragment> = lines
            .iter()
            .flatten()
            .map(|line| line.to_string())
            .filter(|text| !text.trim().is_empty())
            .map(|text| TextFragment::new(text, LINE_CONFIDENCE))
            .collect();

        debug!(
            words = word_rects.len(),
            fragments = fragments.len(),
            "OCR complete"
        );
        Ok(fragments)
    }
}
