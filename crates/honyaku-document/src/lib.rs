// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// honyaku-document — Document handling for the Honyaku manga translator.
//
// Provides page sources (single images, PDFs, CBZ archives) normalised into
// raster pages, the width-bounding resize used before OCR, the OCR capability,
// and the PDF and EPUB exporters for accumulated translations.

pub mod export;
pub mod image;
pub mod scan;
pub mod source;

// Re-export the primary structs so callers can use `honyaku_document::DocumentLoader` etc.
pub use export::epub::EpubExporter;
pub use export::pdf::PdfExporter;
pub use export::{Exporter, export_to_file};
pub use crate::image::processor::ImageProcessor;
pub use scan::TextRecognizer;
pub use source::{DocumentLoader, RasterPage};

#[cfg(feature = "ocr")]
pub use scan::ocr::OcrEngine;
#[cfg(feature = "pdfium")]
pub use source::PdfiumRasterizer;
