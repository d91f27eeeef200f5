// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF exporter — lay out page translations with `printpdf` 0.8.
//
// Every record starts on a new page: a centred "Page N" heading followed by
// the Source, English and Russian lines, wrapped to the usable width. Long
// records continue on further pages.

use std::path::PathBuf;

use honyaku_core::PaperSize;
use honyaku_core::config::ExportConfig;
use honyaku_core::error::{HonyakuError, Result};
use honyaku_core::types::PageResult;
use printpdf::{
    BuiltinFont, FontId, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg,
    Point, Pt, TextItem,
};
use tracing::{debug, info, instrument};

use super::{Exporter, labelled_fields, page_heading};

const MARGIN_MM: f32 = 15.0;
const HEADING_SIZE_PT: f32 = 12.0;
const BODY_SIZE_PT: f32 = 10.0;
/// Baseline-to-baseline distance as a multiple of the font size.
const LINE_SPACING: f32 = 1.4;
/// Extra space between the heading and the first field.
const HEADING_GAP_PT: f32 = 6.0;

/// Approximate advance of `c` in ems.
///
/// CJK and fullwidth forms are square; everything else is treated as an
/// average proportional glyph. Generous enough that nothing runs off the page.
fn char_width_em(c: char) -> f32 {
    if c as u32 >= 0x2E80 { 1.0 } else { 0.55 }
}

fn text_width_em(text: &str) -> f32 {
    text.chars().map(char_width_em).sum()
}

/// Where glyphs come from.
#[derive(Clone)]
enum PdfFont {
    /// Standard 14 font; covers Latin text only.
    Builtin(BuiltinFont),
    /// TrueType/OpenType font embedded in the document.
    Embedded(FontId),
}

impl PdfFont {
    fn ops(&self, text: String, size: f32) -> [Op; 2] {
        match self {
            Self::Builtin(font) => [
                Op::SetFontSizeBuiltinFont {
                    size: Pt(size),
                    font: font.clone(),
                },
                Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text)],
                    font: font.clone(),
                },
            ],
            Self::Embedded(font) => [
                Op::SetFontSize {
                    size: Pt(size),
                    font: font.clone(),
                },
                Op::WriteText {
                    items: vec![TextItem::Text(text)],
                    font: font.clone(),
                },
            ],
        }
    }
}

/// One laid-out line.
struct Line {
    text: String,
    size: f32,
    centred: bool,
    /// Vertical space consumed before this line's baseline.
    advance: f32,
}

/// Writes page translations as a paginated PDF.
pub struct PdfExporter {
    paper_size: PaperSize,
    title: String,
    font_path: Option<PathBuf>,
}

impl PdfExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            paper_size: config.paper_size,
            title: config.title.clone(),
            font_path: config.font_path.clone(),
        }
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    /// Pick the font for `results`.
    ///
    /// Without a configured font only pure-ASCII records can be written, in
    /// built-in Helvetica. A configured font must carry a glyph for every
    /// visible character; anything else would come out as mojibake or blanks.
    fn load_font(&self, doc: &mut PdfDocument, results: &[PageResult]) -> Result<PdfFont> {
        let Some(path) = &self.font_path else {
            if let Some(c) = first_uncovered(results, |c| c.is_ascii()) {
                return Err(HonyakuError::Export(format!(
                    "no Unicode font configured for {:?} (U+{:04X}); set export.font_path \
                     to a TrueType/OpenType font covering Latin, Cyrillic and Japanese",
                    c, c as u32
                )));
            }
            debug!("ASCII-only records, using built-in Helvetica");
            return Ok(PdfFont::Builtin(BuiltinFont::Helvetica));
        };

        let bytes = std::fs::read(path).map_err(|err| {
            HonyakuError::Export(format!("cannot read font {}: {}", path.display(), err))
        })?;
        let mut warnings = Vec::new();
        let font = ParsedFont::from_bytes(&bytes, 0, &mut warnings).ok_or_else(|| {
            HonyakuError::Export(format!("cannot parse font {}", path.display()))
        })?;

        let has_glyph = |c: char| font.lookup_glyph_index(c as u32).is_some_and(|gid| gid != 0);
        if let Some(c) = first_uncovered(results, has_glyph) {
            return Err(HonyakuError::Export(format!(
                "font {} has no glyph for {:?} (U+{:04X})",
                path.display(),
                c,
                c as u32
            )));
        }

        debug!(font = %path.display(), "Embedding font");
        Ok(PdfFont::Embedded(doc.add_font(&font)))
    }

    /// Lines for one record, heading first.
    fn layout_record(number: usize, result: &PageResult, usable_width_pt: f32) -> Vec<Line> {
        let mut lines = vec![Line {
            text: page_heading(number),
            size: HEADING_SIZE_PT,
            centred: true,
            advance: HEADING_SIZE_PT,
        }];

        let max_em = usable_width_pt / BODY_SIZE_PT;
        let mut first = true;
        for (label, text) in labelled_fields(result) {
            for wrapped in wrap_text(&format!("{label}: {text}"), max_em) {
                let advance = if first {
                    first = false;
                    HEADING_SIZE_PT * LINE_SPACING + HEADING_GAP_PT
                } else {
                    BODY_SIZE_PT * LINE_SPACING
                };
                lines.push(Line {
                    text: wrapped,
                    size: BODY_SIZE_PT,
                    centred: false,
                    advance,
                });
            }
        }
        lines
    }
}

impl Exporter for PdfExporter {
    fn format_name(&self) -> &'static str {
        "pdf"
    }

    #[instrument(skip_all, fields(records = results.len()))]
    fn render(&self, results: &[PageResult]) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        info!(paper = ?self.paper_size, title = %self.title, "Creating translation PDF");

        let mut doc = PdfDocument::new(&self.title);
        let font = self.load_font(&mut doc, results)?;

        let margin_pt = Mm(MARGIN_MM).into_pt().0;
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let usable_width_pt = page_w_pt - 2.0 * margin_pt;
        let bottom_pt = margin_pt;

        let mut pages: Vec<PdfPage> = Vec::new();
        for (i, result) in results.iter().enumerate() {
            let mut ops: Vec<Op> = Vec::new();
            let mut y_pt = page_h_pt - margin_pt;

            for line in Self::layout_record(i + 1, result, usable_width_pt) {
                y_pt -= line.advance;
                if y_pt < bottom_pt && !ops.is_empty() {
                    pages.push(PdfPage::new(page_w, page_h, std::mem::take(&mut ops)));
                    y_pt = page_h_pt - margin_pt - line.size;
                }

                let x_pt = if line.centred {
                    let width_pt = text_width_em(&line.text) * line.size;
                    margin_pt + ((usable_width_pt - width_pt) / 2.0).max(0.0)
                } else {
                    margin_pt
                };

                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(x_pt),
                        y: Pt(y_pt),
                    },
                });
                ops.extend(font.ops(line.text, line.size));
                ops.push(Op::EndTextSection);
            }

            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);
        debug!(pages = doc.pages.len(), "Layout complete");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }
}

/// First visible character of any record field that `covered` rejects.
fn first_uncovered(results: &[PageResult], covered: impl Fn(char) -> bool) -> Option<char> {
    for result in results {
        for (_, text) in labelled_fields(result) {
            if let Some(c) = text.chars().find(|&c| !c.is_whitespace() && !covered(c)) {
                return Some(c);
            }
        }
    }
    None
}

// -- Text wrapping helper -----------------------------------------------------

/// Wrap `text` so that no line is wider than `max_em` ems.
///
/// Splits on existing newlines first, then word-wraps each paragraph. Words
/// wider than a line (including unspaced CJK runs) are broken between
/// characters.
fn wrap_text(text: &str, max_em: f32) -> Vec<String> {
    let space = char_width_em(' ');
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_em = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_em = text_width_em(word);

            if !current.is_empty() && current_em + space + word_em <= max_em {
                current.push(' ');
                current.push_str(word);
                current_em += space + word_em;
                continue;
            }
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
                current_em = 0.0;
            }
            if word_em <= max_em {
                current.push_str(word);
                current_em = word_em;
                continue;
            }

            // Force-break the oversized word.
            for c in word.chars() {
                let w = char_width_em(c);
                if current_em + w > max_em && !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                    current_em = 0.0;
                }
                current.push(c);
                current_em += w;
            }
        }

        result.push(current);
    }

    result
}
