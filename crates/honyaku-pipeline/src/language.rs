// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Language identification — ISO 639-1 codes for recognised text, backed by
// `lingua`.

use lingua::{LanguageDetector, LanguageDetectorBuilder};
use tracing::{debug, instrument};

/// Code used when identification yields nothing.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Identifies the language of a text.
pub trait LanguageIdentifier: Send + Sync {
    /// ISO 639-1 code of the most likely language, `None` when undeterminable.
    fn identify(&self, text: &str) -> Option<String>;
}

/// The cascade's view of a detected language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedLanguage {
    Russian,
    English,
    Japanese,
    /// Any other code, including [`UNKNOWN_LANGUAGE`].
    Other(String),
}

impl DetectedLanguage {
    pub fn from_code(code: &str) -> Self {
        match code {
            "ru" => Self::Russian,
            "en" => Self::English,
            "ja" => Self::Japanese,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// [`LanguageIdentifier`] over every language `lingua` knows.
pub struct LinguaIdentifier {
    detector: LanguageDetector,
}

impl LinguaIdentifier {
    pub fn new() -> Self {
        Self {
            detector: LanguageDetectorBuilder::from_all_languages().build(),
        }
    }
}

impl Default for LinguaIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageIdentifier for LinguaIdentifier {
    #[instrument(skip_all, fields(text_len = text.len()))]
    fn identify(&self, text: &str) -> Option<String> {
        let code = self
            .detector
            .detect_language_of(text)
            .map(|language| language.iso_code_639_1().to_string());
        debug!(code = code.as_deref().unwrap_or(UNKNOWN_LANGUAGE), "Language identified");
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_variants() {
        assert_eq!(DetectedLanguage::from_code("ru"), DetectedLanguage::Russian);
        assert_eq!(DetectedLanguage::from_code("en"), DetectedLanguage::English);
        assert_eq!(DetectedLanguage::from_code("ja"), DetectedLanguage::Japanese);
        assert_eq!(
            DetectedLanguage::from_code("fr"),
            DetectedLanguage::Other("fr".into())
        );
        assert_eq!(
            DetectedLanguage::from_code(UNKNOWN_LANGUAGE),
            DetectedLanguage::Other("unknown".into())
        );
    }

    #[test]
    fn lingua_identifies_supported_languages() {
        let identifier = LinguaIdentifier::new();
        assert_eq!(
            identifier.identify("Привет, как у тебя дела? Сегодня очень холодно.").as_deref(),
            Some("ru")
        );
        assert_eq!(
            identifier.identify("Where are you going? The train leaves in an hour.").as_deref(),
            Some("en")
        );
        assert_eq!(
            identifier.identify("どこへ行くの？電車はもうすぐ出発するよ。").as_deref(),
            Some("ja")
        );
    }

    #[test]
    fn lingua_gives_up_on_text_without_letters() {
        let identifier = LinguaIdentifier::new();
        assert_eq!(identifier.identify("1234 !!! ..."), None);
    }
}
