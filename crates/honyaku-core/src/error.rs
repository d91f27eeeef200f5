// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Honyaku.

use thiserror::Error;

/// Top-level error type for all Honyaku operations.
#[derive(Debug, Error)]
pub enum HonyakuError {
    // -- Input errors --
    #[error("unsupported input file: {0}")]
    UnsupportedInput(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("archive operation failed: {0}")]
    ArchiveError(String),

    #[error("document contains no pages: {0}")]
    NoPages(String),

    // -- Recognition / translation --
    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("translation failed: {0}")]
    Translation(String),

    // -- Export errors --
    #[error("export failed: {0}")]
    Export(String),

    #[error("nothing to save")]
    NothingToSave,

    // -- Session --
    #[error("no document loaded")]
    NoDocumentLoaded,

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HonyakuError>;
