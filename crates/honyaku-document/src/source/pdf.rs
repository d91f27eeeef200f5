// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF page rasterisation using the `lopdf` crate.
//
// Scanned comics are distributed as PDFs built from image XObjects.
// `EmbeddedImageRasterizer` walks each page's content stream, tracks the
// transformation matrix, and paints every image into its placement on a white
// page at the requested DPI. Vector and text content is not drawn; the PDFium
// rasteriser covers that when the library is available.

use honyaku_core::error::{HonyakuError, Result};
use image::{DynamicImage, GrayImage, ImageFormat, Rgb, RgbImage, imageops};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, instrument, warn};

use crate::image::processor::ImageProcessor;

/// Page box assumed when a page declares none (A4 in points).
const DEFAULT_MEDIA_BOX: PageBox = PageBox {
    x0: 0.0,
    y0: 0.0,
    width: 595.0,
    height: 842.0,
};

/// Guard against cyclic /Parent chains in malformed files.
const MAX_TREE_DEPTH: usize = 32;

/// Longest raster side accepted for a page or an image placement.
pub const MAX_PAGE_SIDE_PX: u32 = 20_000;

/// Largest raster area accepted for a page or an image placement.
pub const MAX_PAGE_PIXELS: u64 = 100_000_000;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Renders every page of a PDF to a bitmap.
pub trait PdfRasterizer: Send + Sync {
    /// Render all pages, in document order, at `dpi`.
    fn rasterize(&self, data: &[u8], dpi: u32) -> Result<Vec<DynamicImage>>;
}

/// Pixel size of a `width_pt` x `height_pt` page rendered at `dpi`.
///
/// Pages beyond [`MAX_PAGE_SIDE_PX`] or [`MAX_PAGE_PIXELS`] are a
/// `PdfError` rather than an allocation the process cannot survive.
pub fn page_pixels(width_pt: f32, height_pt: f32, dpi: u32) -> Result<(u32, u32)> {
    let scale = dpi as f32 / 72.0;
    let width = (width_pt * scale).round().max(1.0);
    let height = (height_pt * scale).round().max(1.0);
    if !within_raster_limits(width, height) {
        return Err(HonyakuError::PdfError(format!(
            "page of {} x {} pt at {} dpi exceeds the raster limit of {} px per side",
            width_pt, height_pt, dpi, MAX_PAGE_SIDE_PX
        )));
    }
    Ok((width as u32, height as u32))
}

fn within_raster_limits(width: f32, height: f32) -> bool {
    width.is_finite()
        && height.is_finite()
        && width <= MAX_PAGE_SIDE_PX as f32
        && height <= MAX_PAGE_SIDE_PX as f32
        && (width as f64 * height as f64) <= MAX_PAGE_PIXELS as f64
}

/// Rasteriser that paints each page from its embedded scan images.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedImageRasterizer;

impl PdfRasterizer for EmbeddedImageRasterizer {
    #[instrument(skip(self, data), fields(bytes_len = data.len()))]
    fn rasterize(&self, data: &[u8], dpi: u32) -> Result<Vec<DynamicImage>> {
        let document = Document::load_mem(data)
            .map_err(|err| HonyakuError::PdfError(format!("failed to load PDF: {}", err)))?;

        // lopdf keys pages by 1-indexed page number, already in order.
        let pages = document.get_pages();
        debug!(pages = pages.len(), "PDF loaded");

        let mut rendered = Vec::with_capacity(pages.len());
        for (page_number, page_id) in pages {
            let image = render_page(&document, page_id, dpi).map_err(|err| {
                HonyakuError::PdfError(format!("page {}: {}", page_number, err))
            })?;
            rendered.push(image);
        }
        Ok(rendered)
    }
}

/// Affine transform `[a b c d e f]`, as carried by the `cm` operator.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Self = Self([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let values: Vec<f32> = operands.iter().map(number).collect::<Option<_>>()?;
        let values: [f32; 6] = values.try_into().ok()?;
        Some(Self(values))
    }

    /// `self` followed by `outer`.
    fn then(self, outer: Self) -> Self {
        let [a, b, c, d, e, f] = self.0;
        let [ta, tb, tc, td, te, tf] = outer.0;
        Self([
            a * ta + b * tc,
            a * tb + b * td,
            c * ta + d * tc,
            c * tb + d * td,
            e * ta + f * tc + te,
            e * tb + f * td + tf,
        ])
    }

    fn apply(self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }
}

/// Page rectangle in user-space points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageBox {
    x0: f32,
    y0: f32,
    width: f32,
    height: f32,
}

fn render_page(doc: &Document, page_id: ObjectId, dpi: u32) -> Result<DynamicImage> {
    let page_box = media_box(doc, page_id);
    let (width, height) = page_pixels(page_box.width, page_box.height, dpi)?;
    let scale = dpi as f32 / 72.0;
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);

    let xobjects = xobjects(doc, page_id)?;
    let content = doc
        .get_and_decode_page_content(page_id)
        .map_err(|err| HonyakuError::PdfError(format!("unreadable content stream: {}", err)))?;

    let mut ctm = Matrix::IDENTITY;
    let mut saved = Vec::new();
    let mut painted = 0usize;
    for operation in &content.operations {
        match operation.operator.as_str() {
            "q" => saved.push(ctm),
            "Q" => ctm = saved.pop().unwrap_or(Matrix::IDENTITY),
            "cm" => {
                if let Some(matrix) = Matrix::from_operands(&operation.operands) {
                    ctm = matrix.then(ctm);
                }
            }
            "Do" => {
                let Some(xobject) = operation.operands.first().and_then(name) else {
                    continue;
                };
                let Some(stream) = image_xobject(doc, xobjects, xobject)? else {
                    debug!(
                        xobject = %String::from_utf8_lossy(xobject),
                        "Skipping non-image XObject"
                    );
                    continue;
                };
                let image = decode_image(doc, stream)?;
                if paint(&mut canvas, image, ctm, page_box, scale) {
                    painted += 1;
                }
            }
            _ => {}
        }
    }

    if painted == 0 {
        warn!(?page_id, "Page has no embedded image, rendering blank");
    }
    Ok(DynamicImage::ImageRgb8(canvas))
}

/// Paint `image` into the unit square mapped by `ctm`.
///
/// Rotated or skewed placements are drawn into their bounding box. Returns
/// false when the placement is degenerate or too large to raster.
fn paint(
    canvas: &mut RgbImage,
    image: DynamicImage,
    ctm: Matrix,
    page: PageBox,
    scale: f32,
) -> bool {
    let corners = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)].map(|(x, y)| ctm.apply(x, y));
    let (min_x, max_x, min_y, max_y) = corners.iter().fold(
        (f32::INFINITY, f32::NEG_INFINITY, f32::INFINITY, f32::NEG_INFINITY),
        |(lo_x, hi_x, lo_y, hi_y), &(x, y)| (lo_x.min(x), hi_x.max(x), lo_y.min(y), hi_y.max(y)),
    );

    // Device space has its origin at the top-left corner.
    let top_edge = page.y0 + page.height;
    let left = ((min_x - page.x0) * scale).round();
    let right = ((max_x - page.x0) * scale).round();
    let top = ((top_edge - max_y) * scale).round();
    let bottom = ((top_edge - min_y) * scale).round();
    let (width, height) = (right - left, bottom - top);

    if !(width >= 1.0 && height >= 1.0) || !within_raster_limits(width, height) {
        debug!(width, height, "Skipping image placement outside raster bounds");
        return false;
    }

    let mut placed = ImageProcessor::from_dynamic(image)
        .resize_exact(width as u32, height as u32)
        .into_dynamic();
    let [a, _, _, d, _, _] = ctm.0;
    if a < 0.0 {
        placed = placed.fliph();
    }
    if d < 0.0 {
        placed = placed.flipv();
    }
    imageops::overlay(canvas, &placed.to_rgb8(), left as i64, top as i64);
    true
}

// -- Page tree helpers --------------------------------------------------------

/// Follow one level of indirection.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).map_err(|err| {
            HonyakuError::PdfError(format!("dangling reference {:?}: {}", id, err))
        }),
        other => Ok(other),
    }
}

/// Look up a page attribute, walking up the /Parent chain for inherited values.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value as f32),
        _ => None,
    }
}

fn integer(dict: &Dictionary, key: &[u8]) -> Option<i64> {
    match dict.get(key).ok()? {
        Object::Integer(value) => Some(*value),
        _ => None,
    }
}

fn name(object: &Object) -> Option<&[u8]> {
    match object {
        Object::Name(name) => Some(name.as_slice()),
        _ => None,
    }
}

/// Page rectangle in points.
fn media_box(doc: &Document, page_id: ObjectId) -> PageBox {
    let corners: Option<Vec<f32>> = inherited(doc, page_id, b"MediaBox")
        .and_then(|object| resolve(doc, object).ok())
        .and_then(|object| match object {
            Object::Array(values) => values.iter().map(number).collect(),
            _ => None,
        });

    match corners.as_deref() {
        Some(&[x0, y0, x1, y1]) => PageBox {
            x0: x0.min(x1),
            y0: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        },
        _ => DEFAULT_MEDIA_BOX,
    }
}

/// The page's /XObject resource dictionary, if any.
fn xobjects(doc: &Document, page_id: ObjectId) -> Result<Option<&Dictionary>> {
    let Some(resources) = inherited(doc, page_id, b"Resources") else {
        return Ok(None);
    };
    let Ok(resources) = resolve(doc, resources)?.as_dict() else {
        return Ok(None);
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return Ok(None);
    };
    Ok(resolve(doc, xobjects)?.as_dict().ok())
}

/// Resolve a `Do` operand to an image XObject stream.
fn image_xobject<'a>(
    doc: &'a Document,
    xobjects: Option<&'a Dictionary>,
    key: &[u8],
) -> Result<Option<&'a Stream>> {
    let Some(value) = xobjects.and_then(|dict| dict.get(key).ok()) else {
        return Ok(None);
    };
    let Ok(stream) = resolve(doc, value)?.as_stream() else {
        return Ok(None);
    };
    let is_image = stream.dict.get(b"Subtype").ok().and_then(name) == Some(b"Image".as_slice());
    Ok(is_image.then_some(stream))
}

// -- Image decoding -----------------------------------------------------------

fn filters(doc: &Document, dict: &Dictionary) -> Result<Vec<Vec<u8>>> {
    let Ok(filter) = dict.get(b"Filter") else {
        return Ok(Vec::new());
    };
    match resolve(doc, filter)? {
        Object::Name(single) => Ok(vec![single.clone()]),
        Object::Array(list) => Ok(list
            .iter()
            .filter_map(|item| name(item).map(<[u8]>::to_vec))
            .collect()),
        _ => Err(HonyakuError::PdfError("malformed /Filter".into())),
    }
}

/// Number of colour components for an image colour space.
fn colour_components(doc: &Document, dict: &Dictionary) -> Result<usize> {
    let space = dict
        .get(b"ColorSpace")
        .map_err(|_| HonyakuError::PdfError("image has no /ColorSpace".into()))?;

    match resolve(doc, space)? {
        Object::Name(space) => match space.as_slice() {
            b"DeviceGray" | b"CalGray" => Ok(1),
            b"DeviceRGB" | b"CalRGB" => Ok(3),
            b"DeviceCMYK" => Ok(4),
            other => Err(HonyakuError::PdfError(format!(
                "unsupported colour space {}",
                String::from_utf8_lossy(other)
            ))),
        },
        Object::Array(parts) if parts.first().and_then(name) == Some(b"ICCBased".as_slice()) => {
            let profile = parts
                .get(1)
                .ok_or_else(|| HonyakuError::PdfError("ICCBased without profile".into()))?;
            let profile = resolve(doc, profile)?
                .as_stream()
                .map_err(|_| HonyakuError::PdfError("ICC profile is not a stream".into()))?;
            match integer(&profile.dict, b"N") {
                Some(n @ (1 | 3 | 4)) => Ok(n as usize),
                other => Err(HonyakuError::PdfError(format!(
                    "unsupported ICC component count {:?}",
                    other
                ))),
            }
        }
        _ => Err(HonyakuError::PdfError("unsupported colour space".into())),
    }
}

fn decode_image(doc: &Document, stream: &Stream) -> Result<DynamicImage> {
    let filters = filters(doc, &stream.dict)?;

    match filters.as_slice() {
        [only] if only == b"DCTDecode" => {
            return image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg)
                .map_err(|err| HonyakuError::ImageError(format!("embedded JPEG: {}", err)));
        }
        [.., last] if last != b"FlateDecode" => {
            return Err(HonyakuError::PdfError(format!(
                "unsupported image filter {}",
                String::from_utf8_lossy(last)
            )));
        }
        _ => {}
    }

    let width = integer(&stream.dict, b"Width").unwrap_or(0) as u32;
    let height = integer(&stream.dict, b"Height").unwrap_or(0) as u32;
    if width == 0 || height == 0 {
        return Err(HonyakuError::PdfError("image has no dimensions".into()));
    }
    let bits = integer(&stream.dict, b"BitsPerComponent").unwrap_or(8);
    if bits != 8 {
        return Err(HonyakuError::PdfError(format!(
            "unsupported bits per component {}",
            bits
        )));
    }
    let components = colour_components(doc, &stream.dict)?;

    let mut samples = if filters.is_empty() {
        stream.content.clone()
    } else {
        stream
            .decompressed_content()
            .map_err(|err| HonyakuError::PdfError(format!("failed to inflate image: {}", err)))?
    };
    let expected = width as usize * height as usize * components;
    if samples.len() < expected {
        return Err(HonyakuError::PdfError(format!(
            "image data too short: {} of {} bytes",
            samples.len(),
            expected
        )));
    }
    samples.truncate(expected);

    let image = match components {
        1 => GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        _ => RgbImage::from_raw(width, height, cmyk_to_rgb(&samples)).map(DynamicImage::ImageRgb8),
    };
    image.ok_or_else(|| HonyakuError::PdfError("image buffer size mismatch".into()))
}

fn cmyk_to_rgb(samples: &[u8]) -> Vec<u8> {
    samples
        .chunks_exact(4)
        .flat_map(|px| {
            let k = 255 - px[3] as u32;
            let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
            [channel(px[0]), channel(px[1]), channel(px[2])]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    const RED: [u8; 3] = [200, 30, 30];
    const BLUE: [u8; 3] = [20, 40, 210];

    /// Content stream drawing `/Im0` over the whole 72 x 144 pt page.
    const FULL_PAGE: &[u8] = b"q 72 0 0 144 0 0 cm /Im0 Do Q";

    fn rgb_image_stream(width: u32, height: u32, colour: [u8; 3]) -> Stream {
        let samples: Vec<u8> = (0..width * height).flat_map(|_| colour).collect();
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            samples,
        )
    }

    fn jpeg_image_stream(width: u32, height: u32) -> Stream {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, image::Luma([90])));
        let mut jpeg = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .expect("encode jpeg");
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        )
    }

    struct TestPage {
        content: &'static [u8],
        images: Vec<(&'static str, Stream)>,
    }

    /// Build a PDF whose page tree root carries `media_box`, inherited by
    /// every page.
    fn build_pdf_with(media_box: [i64; 4], pages: Vec<TestPage>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::new();

        for page in pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, page.content.to_vec()));
            let mut xobjects = Dictionary::new();
            for (key, stream) in page.images {
                xobjects.set(key, doc.add_object(stream));
            }
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! { "XObject" => xobjects },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> = media_box.iter().map(|&v| v.into()).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => media_box,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialise test PDF");
        bytes
    }

    /// One 72 x 144 pt page per entry, each drawing its image over the
    /// full page; `None` pages carry no image.
    fn build_pdf(pages: Vec<Option<Stream>>) -> Vec<u8> {
        let pages = pages
            .into_iter()
            .map(|image| TestPage {
                content: FULL_PAGE,
                images: image.map(|stream| vec![("Im0", stream)]).unwrap_or_default(),
            })
            .collect();
        build_pdf_with([0, 0, 72, 144], pages)
    }

    fn assert_close(got: [u8; 3], want: [u8; 3]) {
        for (g, w) in got.iter().zip(want) {
            assert!(g.abs_diff(w) <= 2, "expected {want:?}, got {got:?}");
        }
    }

    #[test]
    fn pages_render_at_requested_dpi_in_order() {
        let pdf = build_pdf(vec![
            Some(rgb_image_stream(4, 8, RED)),
            Some(jpeg_image_stream(16, 32)),
        ]);

        let pages = EmbeddedImageRasterizer.rasterize(&pdf, 120).expect("rasterize");
        assert_eq!(pages.len(), 2);
        for page in &pages {
            // 72 x 144 pt at 120 dpi.
            assert_eq!((page.width(), page.height()), (120, 240));
        }

        assert_close(pages[0].to_rgb8().get_pixel(60, 120).0, RED);
        assert_close(pages[1].to_rgb8().get_pixel(60, 120).0, [90, 90, 90]);
    }

    #[test]
    fn page_without_image_is_blank() {
        let pdf = build_pdf(vec![None]);
        let pages = EmbeddedImageRasterizer.rasterize(&pdf, 72).expect("rasterize");
        assert_eq!(pages.len(), 1);
        assert_eq!((pages[0].width(), pages[0].height()), (72, 144));
        assert_eq!(pages[0].to_rgb8().get_pixel(10, 10).0, [255, 255, 255]);
    }

    #[test]
    fn strips_are_placed_by_their_matrices() {
        let pdf = build_pdf_with(
            [0, 0, 72, 144],
            vec![TestPage {
                content: b"q 72 0 0 72 0 72 cm /Top Do Q q 72 0 0 72 0 0 cm /Bottom Do Q",
                images: vec![
                    ("Top", rgb_image_stream(2, 2, RED)),
                    ("Bottom", rgb_image_stream(2, 2, BLUE)),
                ],
            }],
        );

        let pages = EmbeddedImageRasterizer.rasterize(&pdf, 72).expect("rasterize");
        let page = pages[0].to_rgb8();
        assert_eq!(page.dimensions(), (72, 144));
        assert_close(page.get_pixel(36, 10).0, RED);
        assert_close(page.get_pixel(36, 130).0, BLUE);
    }

    #[test]
    fn partial_placement_leaves_rest_of_page_white() {
        let pdf = build_pdf_with(
            [0, 0, 72, 144],
            vec![TestPage {
                content: b"q 36 0 0 36 36 0 cm /Im0 Do Q",
                images: vec![("Im0", rgb_image_stream(2, 2, RED))],
            }],
        );

        let pages = EmbeddedImageRasterizer.rasterize(&pdf, 72).expect("rasterize");
        let page = pages[0].to_rgb8();
        assert_close(page.get_pixel(54, 126).0, RED);
        assert_eq!(page.get_pixel(10, 126).0, [255, 255, 255]);
        assert_eq!(page.get_pixel(54, 10).0, [255, 255, 255]);
    }

    #[test]
    fn oversized_media_box_is_a_pdf_error() {
        let pdf = build_pdf_with(
            [0, 0, 200_000, 200_000],
            vec![TestPage {
                content: b"",
                images: Vec::new(),
            }],
        );
        let result = EmbeddedImageRasterizer.rasterize(&pdf, 120);
        assert!(matches!(result, Err(HonyakuError::PdfError(_))));
    }

    #[test]
    fn garbage_is_a_pdf_error() {
        let result = EmbeddedImageRasterizer.rasterize(b"not a pdf at all", 120);
        assert!(matches!(result, Err(HonyakuError::PdfError(_))));
    }

    #[test]
    fn cmyk_white_and_black() {
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 0, 0, 0, 0, 255]), vec![255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn page_pixels_scale_and_clamp() {
        assert_eq!(page_pixels(72.0, 144.0, 120).ok(), Some((120, 240)));
        assert_eq!(page_pixels(595.0, 842.0, 120).ok(), Some((992, 1403)));
        assert_eq!(page_pixels(0.0, 0.0, 120).ok(), Some((1, 1)));
    }

    #[test]
    fn page_pixels_reject_huge_pages() {
        // One side over the limit.
        assert!(page_pixels(200_000.0, 10.0, 120).is_err());
        // Both sides allowed, area over budget: 15000 x 15000 px.
        assert!(page_pixels(9_000.0, 9_000.0, 120).is_err());
        assert!(page_pixels(f32::INFINITY, 10.0, 72).is_err());
    }

    #[test]
    fn matrices_compose_inner_first() {
        let scale = Matrix([2.0, 0.0, 0.0, 3.0, 0.0, 0.0]);
        let translate = Matrix([1.0, 0.0, 0.0, 1.0, 10.0, 20.0]);
        assert_eq!(scale.then(translate).apply(1.0, 1.0), (12.0, 23.0));
        assert_eq!(translate.then(scale).apply(1.0, 1.0), (22.0, 63.0));
        assert_eq!(Matrix::IDENTITY.then(scale), scale);
    }
}
