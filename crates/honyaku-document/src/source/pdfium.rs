// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Full PDF page rendering through the PDFium library (`pdfium-render`).
//
// PDFium keeps global state that must be initialised once per process, so the
// bindings live in a process-wide cell and every rasteriser shares them.

use std::path::Path;
use std::sync::OnceLock;

use honyaku_core::error::{HonyakuError, Result};
use image::DynamicImage;
use pdfium_render::prelude::{PdfRenderConfig, Pdfium, Pixels};
use tracing::{debug, info, instrument};

use super::pdf::{PdfRasterizer, page_pixels};

static PDFIUM: OnceLock<std::result::Result<Pdfium, String>> = OnceLock::new();

/// Bind PDFium on first use. Later calls reuse the first outcome, whatever
/// `library_dir` they pass.
fn pdfium(library_dir: Option<&Path>) -> Result<&'static Pdfium> {
    PDFIUM
        .get_or_init(|| {
            let bindings = match library_dir {
                Some(dir) => {
                    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
                }
                None => Pdfium::bind_to_system_library(),
            };
            bindings.map(Pdfium::new).map_err(|err| err.to_string())
        })
        .as_ref()
        .map_err(|err| HonyakuError::PdfError(format!("PDFium unavailable: {}", err)))
}

/// Rasteriser that renders every page's full content (images, vector art,
/// and text) with PDFium.
pub struct PdfiumRasterizer {
    pdfium: &'static Pdfium,
}

impl PdfiumRasterizer {
    /// Bind to `libpdfium` in `library_dir`, or the system library path when
    /// `None`.
    pub fn new(library_dir: Option<&Path>) -> Result<Self> {
        let pdfium = pdfium(library_dir)?;
        info!("PDFium bound");
        Ok(Self { pdfium })
    }
}

impl PdfRasterizer for PdfiumRasterizer {
    #[instrument(skip(self, data), fields(bytes_len = data.len()))]
    fn rasterize(&self, data: &[u8], dpi: u32) -> Result<Vec<DynamicImage>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|err| HonyakuError::PdfError(format!("failed to load PDF: {}", err)))?;

        let pages = document.pages();
        debug!(pages = pages.len(), "PDF loaded");

        let mut rendered = Vec::with_capacity(pages.len() as usize);
        for (index, page) in pages.iter().enumerate() {
            let page_error =
                |err: String| HonyakuError::PdfError(format!("page {}: {}", index + 1, err));

            // Bounded by the raster limits, so the casts cannot wrap.
            let (width, height) = page_pixels(page.width().value, page.height().value, dpi)
                .map_err(|err| page_error(err.to_string()))?;
            let config =
                PdfRenderConfig::new().set_target_size(width as Pixels, height as Pixels);

            let image = page
                .render_with_config(&config)
                .and_then(|bitmap| bitmap.as_image())
                .map_err(|err| page_error(err.to_string()))?;
            rendered.push(image);
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bogus_library_dir_never_panics() {
        // With a system PDFium already bound the shared cell wins; without
        // one, a bogus directory must surface as a PdfError, never a panic.
        match PdfiumRasterizer::new(Some(Path::new("/nonexistent/honyaku-pdfium"))) {
            Ok(rasterizer) => {
                let result = rasterizer.rasterize(b"not a pdf at all", 72);
                assert!(matches!(result, Err(HonyakuError::PdfError(_))));
            }
            Err(err) => assert!(matches!(err, HonyakuError::PdfError(_))),
        }
    }
}
