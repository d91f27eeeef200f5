// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text recognition — the OCR capability consumed by the page processor.

#[cfg(feature = "ocr")]
pub mod ocr;

use honyaku_core::error::Result;
use honyaku_core::types::TextFragment;
use image::DynamicImage;

#[cfg(feature = "ocr")]
pub use ocr::OcrEngine;

/// Detects text in a page image.
///
/// Implementations are built once at startup and shared; `recognize` must not
/// need exclusive access.
pub trait TextRecognizer: Send + Sync {
    /// Return the detected fragments in reading order.
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<TextFragment>>;
}
