// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page sources — normalise an input document (single image, PDF, or CBZ
// archive) into an ordered list of raster pages.

pub mod archive;
pub mod pdf;
#[cfg(feature = "pdfium")]
pub mod pdfium;

use std::path::Path;
use std::sync::Arc;

use honyaku_core::config::SourceConfig;
use honyaku_core::error::{HonyakuError, Result};
use honyaku_core::types::InputKind;
use image::DynamicImage;
use tracing::{info, instrument, warn};

use crate::image::processor::ImageProcessor;

pub use archive::read_archive;
pub use pdf::{EmbeddedImageRasterizer, PdfRasterizer};
#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRasterizer;

/// One decoded page of the loaded document.
#[derive(Debug, Clone)]
pub struct RasterPage {
    /// Zero-based position in the document.
    pub index: usize,
    pub image: DynamicImage,
}

impl RasterPage {
    pub fn new(index: usize, image: DynamicImage) -> Self {
        Self { index, image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Loads input documents into raster pages.
///
/// The PDF renderer is pluggable. With the `pdfium` feature the default
/// renders pages through PDFium and falls back to painting each page from
/// its embedded scan images when the library cannot be bound.
pub struct DocumentLoader {
    config: SourceConfig,
    rasterizer: Arc<dyn PdfRasterizer>,
}

impl DocumentLoader {
    pub fn new(config: SourceConfig) -> Self {
        let rasterizer = default_rasterizer(&config);
        Self::with_rasterizer(config, rasterizer)
    }

    pub fn with_rasterizer(config: SourceConfig, rasterizer: Arc<dyn PdfRasterizer>) -> Self {
        Self { config, rasterizer }
    }

    /// Load every page of the document at `path`, in document order.
    ///
    /// Unsupported extensions, unreadable or corrupt files, and documents
    /// without any page all fail; no partial page list is returned.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<RasterPage>> {
        let path = path.as_ref();
        let result = self.load_pages(path);
        match &result {
            Ok(pages) => info!(pages = pages.len(), "Document loaded"),
            Err(err) => warn!(%err, "Document conversion failed"),
        }
        result
    }

    fn load_pages(&self, path: &Path) -> Result<Vec<RasterPage>> {
        let kind = InputKind::from_path(path).ok_or_else(|| {
            HonyakuError::UnsupportedInput(path.display().to_string())
        })?;

        let images = match kind {
            InputKind::Image => vec![ImageProcessor::open(path)?.into_dynamic()],
            InputKind::Pdf => {
                let data = std::fs::read(path)?;
                self.rasterizer.rasterize(&data, self.config.pdf_dpi)?
            }
            InputKind::Archive => {
                let file = std::fs::File::open(path)?;
                read_archive(file)?
            }
        };

        if images.is_empty() {
            return Err(HonyakuError::NoPages(path.display().to_string()));
        }

        Ok(images
            .into_iter()
            .enumerate()
            .map(|(index, image)| RasterPage::new(index, image))
            .collect())
    }
}

#[cfg(feature = "pdfium")]
fn default_rasterizer(config: &SourceConfig) -> Arc<dyn PdfRasterizer> {
    match PdfiumRasterizer::new(config.pdfium_dir.as_deref()) {
        Ok(rasterizer) => Arc::new(rasterizer),
        Err(err) => {
            warn!(%err, "PDF pages will be painted from their embedded images only");
            Arc::new(EmbeddedImageRasterizer)
        }
    }
}

#[cfg(not(feature = "pdfium"))]
fn default_rasterizer(_config: &SourceConfig) -> Arc<dyn PdfRasterizer> {
    Arc::new(EmbeddedImageRasterizer)
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}
