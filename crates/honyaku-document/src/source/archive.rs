// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CBZ reader — comic archives are plain zip files of page images.

use std::io::{Read, Seek};

use honyaku_core::error::{HonyakuError, Result};
use honyaku_core::types::IMAGE_EXTENSIONS;
use image::DynamicImage;
use tracing::{debug, instrument};
use zip::ZipArchive;

use crate::image::processor::ImageProcessor;

/// Decode every image entry of a zip archive, ordered by entry name.
///
/// Entries whose lowercased name does not end in a supported image extension
/// (and directories) are skipped. Names are compared byte-wise, so
/// `page10.png` sorts before `page2.png`; scanlators zero-pad for this reason.
#[instrument(skip_all)]
pub fn read_archive<R: Read + Seek>(reader: R) -> Result<Vec<DynamicImage>> {
    let mut archive = ZipArchive::new(reader)
        .map_err(|err| HonyakuError::ArchiveError(format!("failed to open archive: {}", err)))?;

    let names = image_entry_names(archive.file_names());
    debug!(entries = archive.len(), images = names.len(), "Archive indexed");

    let mut pages = Vec::with_capacity(names.len());
    for name in &names {
        let mut entry = archive.by_name(name).map_err(|err| {
            HonyakuError::ArchiveError(format!("failed to read entry {}: {}", name, err))
        })?;
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;

        let image = ImageProcessor::from_bytes(&data)
            .map_err(|err| HonyakuError::ImageError(format!("{}: {}", name, err)))?;
        pages.push(image.into_dynamic());
    }

    Ok(pages)
}

/// Filter archive entry names down to images and sort them.
fn image_entry_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut images: Vec<String> = names
        .filter(|name| !name.ends_with('/'))
        .filter(|name| {
            let lower = name.to_lowercase();
            IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        })
        .map(str::to_owned)
        .collect();
    images.sort();
    images
}
