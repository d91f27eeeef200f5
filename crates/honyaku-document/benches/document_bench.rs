// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the honyaku-document crate: page downscaling ahead
// of OCR, and EPUB packing of a full volume of records.

use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use honyaku_core::config::ExportConfig;
use honyaku_core::types::{PageField, PageResult, Sentinel};
use honyaku_document::{EpubExporter, Exporter, ImageProcessor};

/// Downscale a 1600x2400 scan (a typical high-resolution manga page) to the
/// 800px OCR width.
fn bench_fit_to_width(c: &mut Criterion) {
    let (width, height) = (1600u32, 2400u32);
    let img = RgbImage::from_fn(width, height, |x, y| {
        if (x / 40 + y / 40) % 2 == 0 {
            Rgb([250, 250, 250])
        } else {
            Rgb([20, 20, 20])
        }
    });
    let dynamic = DynamicImage::ImageRgb8(img);

    c.bench_function("fit_to_width (1600x2400 -> 800)", |b| {
        b.iter(|| {
            let processor = ImageProcessor::from_dynamic(black_box(dynamic.clone()));
            black_box(processor.fit_to_width(800).into_dynamic());
        });
    });
}

/// Pack 200 records into an EPUB.
fn bench_epub_render(c: &mut Criterion) {
    let results: Vec<PageResult> = (0..200)
        .map(|i| {
            PageResult::new(
                PageField::text(format!("ページ {i} のセリフ。どうして?")),
                PageField::text(format!("Line {i} of dialogue. Why?")),
                PageField::Sentinel(Sentinel::TranslationNotRequired),
            )
        })
        .collect();
    let modified = Utc
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    let exporter = EpubExporter::new(&ExportConfig::default()).with_modified(modified);

    c.bench_function("epub_render (200 records)", |b| {
        b.iter(|| black_box(exporter.render(black_box(&results))));
    });
}

criterion_group!(benches, bench_fit_to_width, bench_epub_render);
criterion_main!(benches);
