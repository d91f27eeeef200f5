// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode pages, bound their width before OCR, and encode
// them back to PNG. Operates on in-memory images using the `image` crate.

use honyaku_core::error::HonyakuError;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};

/// Image processing pipeline operating on a single in-memory page image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, enabling
/// method chaining.
///
/// ```ignore
/// let page = ImageProcessor::open("page-001.jpg")?
///     .fit_to_width(800)
///     .into_dynamic();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// The format is sniffed from the content, not the extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, HonyakuError> {
        let data = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&data).map_err(|err| {
            HonyakuError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        debug!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, HonyakuError> {
        let img = image::load_from_memory(data).map_err(|err| {
            HonyakuError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Downscale so the width is at most `max_width`, preserving aspect ratio.
    ///
    /// Images already within the bound pass through untouched. Wider images
    /// come out exactly `max_width` wide with the height scaled by the same
    /// ratio (truncated, at least one pixel), using Lanczos3 filtering.
    #[instrument(skip(self))]
    pub fn fit_to_width(self, max_width: u32) -> Self {
        let (width, height) = (self.image.width(), self.image.height());
        if width <= max_width {
            return self;
        }

        let new_height = scaled_height(width, height, max_width);
        let resized = self
            .image
            .resize_exact(max_width, new_height, FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Page downscaled for OCR"
        );
        Self { image: resized }
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        if (width, height) == (self.image.width(), self.image.height()) {
            return self;
        }
        let resized = self
            .image
            .resize_exact(width, height, FilterType::Lanczos3);
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, HonyakuError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }
}

/// Height after scaling `width` down to `target_width`.
fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (height as u64 * target_width as u64) / width as u64;
    (scaled as u32).max(1)
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, HonyakuError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| HonyakuError::ImageError(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn blank(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])))
    }

    #[test]
    fn narrow_page_is_untouched() {
        for (w, h) in [(800, 1200), (640, 480), (1, 1)] {
            let out = ImageProcessor::from_dynamic(blank(w, h)).fit_to_width(800);
            assert_eq!((out.width(), out.height()), (w, h));
        }
    }

    #[test]
    fn wide_page_is_scaled_to_exact_width() {
        let out = ImageProcessor::from_dynamic(blank(1600, 2400)).fit_to_width(800);
        assert_eq!((out.width(), out.height()), (800, 1200));
    }

    #[test]
    fn aspect_ratio_preserved_within_rounding() {
        let out = ImageProcessor::from_dynamic(blank(1001, 1500)).fit_to_width(800);
        assert_eq!(out.width(), 800);
        let original = 1500.0 / 1001.0;
        let scaled = out.height() as f64 / out.width() as f64;
        assert!((original - scaled).abs() < 1.0 / 800.0 + 1e-9);
    }

    #[test]
    fn very_flat_page_keeps_one_row() {
        let out = ImageProcessor::from_dynamic(blank(5000, 2)).fit_to_width(800);
        assert_eq!((out.width(), out.height()), (800, 1));
    }

    #[test]
    fn png_round_trip_keeps_dimensions() {
        let bytes = ImageProcessor::from_dynamic(blank(31, 17))
            .to_png_bytes()
            .expect("encode png");
        let decoded = ImageProcessor::from_bytes(&bytes).expect("decode png");
        assert_eq!((decoded.width(), decoded.height()), (31, 17));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let result = ImageProcessor::from_bytes(b"definitely not an image");
        assert!(matches!(result, Err(HonyakuError::ImageError(_))));
    }
}
