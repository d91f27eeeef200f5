// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the reader-facing front end.
//
// Every technical error is mapped to a short status line with a suggestion.
// Severity drives how the front end presents it.

use crate::error::HonyakuError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip or backend hiccup — trying again may work.
    Transient,
    /// User must do something first (load a file, translate a page).
    ActionRequired,
    /// Retrying will not help — wrong format, damaged file.
    Permanent,
}

/// A human-readable error with a short message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Status line.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

impl HumanError {
    fn new(message: &str, suggestion: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            severity,
        }
    }
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `HonyakuError` into a `HumanError` for the status line.
pub fn humanize_error(err: &HonyakuError) -> HumanError {
    match err {
        // -- Input (all of these mean "conversion failed") --
        HonyakuError::UnsupportedInput(detail) => HumanError::new(
            "Conversion failed.",
            format!("Pick a PNG, JPEG, PDF, or CBZ file. ({detail})"),
            Severity::Permanent,
        ),

        HonyakuError::ImageError(_) | HonyakuError::PdfError(_) | HonyakuError::ArchiveError(_) => {
            HumanError::new(
                "Conversion failed.",
                "The file may be damaged. Try opening it in another viewer first, or pick a different file.",
                Severity::Permanent,
            )
        }

        HonyakuError::NoPages(_) => HumanError::new(
            "Conversion failed.",
            "No pages were found. Archives must contain PNG or JPEG images.",
            Severity::Permanent,
        ),

        // -- Recognition / translation --
        HonyakuError::OcrError(_) => HumanError::new(
            "Text recognition didn't work on this page.",
            "Check that the OCR models are installed, then try again.",
            Severity::Transient,
        ),

        HonyakuError::Translation(_) => HumanError::new(
            "The translation service didn't answer.",
            "Check your network connection and API key, then translate the page again.",
            Severity::Transient,
        ),

        // -- Export --
        HonyakuError::NothingToSave => HumanError::new(
            "Nothing to save.",
            "Translate at least one page first.",
            Severity::ActionRequired,
        ),

        HonyakuError::Export(detail) => HumanError::new(
            "Saving failed.",
            format!("The file could not be written. ({detail})"),
            Severity::Permanent,
        ),

        HonyakuError::NoDocumentLoaded => HumanError::new(
            "No document loaded.",
            "Pick a file to translate first.",
            Severity::ActionRequired,
        ),

        // -- Configuration / persistence --
        HonyakuError::Config(detail) => HumanError::new(
            "The settings file has a problem.",
            format!("Fix or delete the configuration file. ({detail})"),
            Severity::ActionRequired,
        ),

        HonyakuError::Io(io_err) => HumanError::new(
            "A file could not be read or written.",
            format!("Check the path and permissions. ({io_err})"),
            Severity::Permanent,
        ),

        HonyakuError::Serialization(_) => HumanError::new(
            "The settings file has a problem.",
            "It is not valid JSON. Fix or delete it to restore defaults.",
            Severity::ActionRequired,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_failures_read_as_conversion_failed() {
        for err in [
            HonyakuError::UnsupportedInput("notes.txt".into()),
            HonyakuError::ArchiveError("bad zip".into()),
            HonyakuError::NoPages("empty.cbz".into()),
        ] {
            let human = humanize_error(&err);
            assert_eq!(human.message, "Conversion failed.");
            assert_eq!(human.severity, Severity::Permanent);
        }
    }

    #[test]
    fn nothing_to_save_is_action_required() {
        let human = humanize_error(&HonyakuError::NothingToSave);
        assert_eq!(human.message, "Nothing to save.");
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn io_error_keeps_the_cause() {
        let err = HonyakuError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        ));
        let human = humanize_error(&err);
        assert!(human.suggestion.contains("read-only volume"));
    }

    #[test]
    fn translation_is_transient() {
        let human = humanize_error(&HonyakuError::Translation("timeout".into()));
        assert_eq!(human.severity, Severity::Transient);
    }
}
