// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Honyaku page-translation pipeline.

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One span of text detected by the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    /// Recognition confidence in `[0, 1]`.
    pub confidence: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Target of a single translation hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetLanguage {
    English,
    Russian,
}

impl TargetLanguage {
    /// Label handed to the translation backend.
    pub fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Russian => "Russian",
        }
    }

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Russian => "ru",
        }
    }
}

/// Fixed markers standing in for "no data" in a [`PageResult`] column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentinel {
    /// OCR produced nothing above the confidence threshold.
    NoTextFound,
    /// Source text is Russian already (English column).
    AlreadyRussian,
    /// Source text is Russian already (Russian column).
    TranslationNotRequired,
    /// Source text is English (English column).
    EnglishSource,
    /// Detected language code for an unsupported source language.
    Language(String),
    /// Russian column for an unsupported source language.
    UnrecognizedLanguage,
}

impl Sentinel {
    pub fn display_text(&self) -> Cow<'static, str> {
        match self {
            Self::NoTextFound => Cow::Borrowed("no text found"),
            Self::AlreadyRussian => Cow::Borrowed("already in Russian"),
            Self::TranslationNotRequired => Cow::Borrowed("translation not required"),
            Self::EnglishSource => Cow::Borrowed("English text"),
            Self::Language(code) => Cow::Owned(format!("language: {code}")),
            Self::UnrecognizedLanguage => Cow::Borrowed("unrecognized language"),
        }
    }
}

/// One column of a [`PageResult`].
///
/// Columns are never absent: markers and failed hops are tagged so callers can
/// tell a real sentence from a placeholder without comparing strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageField {
    /// Recognised or translated text.
    Text(String),
    Sentinel(Sentinel),
    /// The translation hop into this language failed.
    TranslationFailed(TargetLanguage),
}

impl PageField {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text shown to the user and written to exports.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Sentinel(sentinel) => sentinel.display_text(),
            Self::TranslationFailed(target) => {
                Cow::Owned(format!("translation to {} failed", target.label()))
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::TranslationFailed(_))
    }
}

impl std::fmt::Display for PageField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Translation record for one processed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub source: PageField,
    pub english: PageField,
    pub russian: PageField,
}

impl PageResult {
    pub fn new(source: PageField, english: PageField, russian: PageField) -> Self {
        Self {
            source,
            english,
            russian,
        }
    }

    /// The record produced when a page has no recognisable text.
    pub fn no_text_found() -> Self {
        let field = PageField::Sentinel(Sentinel::NoTextFound);
        Self::new(field.clone(), field.clone(), field)
    }

    /// `(source, english, russian)` display strings.
    pub fn display_triple(&self) -> (Cow<'_, str>, Cow<'_, str>, Cow<'_, str>) {
        (
            self.source.display_text(),
            self.english.display_text(),
            self.russian.display_text(),
        )
    }
}

/// Supported input document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    /// A single PNG or JPEG image.
    Image,
    /// A multi-page PDF, rasterised page by page.
    Pdf,
    /// A zip archive of images (`.cbz`).
    Archive,
}

impl InputKind {
    /// Infer the input kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" => Some(Self::Image),
            "pdf" => Some(Self::Pdf),
            "cbz" | "zip" => Some(Self::Archive),
            _ => None,
        }
    }

    /// Infer the input kind from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Image entry extensions accepted inside archives.
pub const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Standard paper sizes for PDF export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    B5,
    Letter,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::B5 => (176, 250),
            Self::Letter => (216, 279),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}
