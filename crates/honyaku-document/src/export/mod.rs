// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export module — serialise accumulated page translations to PDF or EPUB.
//
// Exporters render to bytes in memory; `export_to_file` owns the empty-input
// check and the atomic write, so a failed export never leaves a partial file
// at the destination.

pub mod epub;
pub mod pdf;

use std::io::Write;
use std::path::Path;

use honyaku_core::error::{HonyakuError, Result};
use honyaku_core::types::PageResult;
use tempfile::NamedTempFile;
use tracing::{info, instrument};

/// Heading shown above each record.
pub(crate) fn page_heading(number: usize) -> String {
    format!("Page {number}")
}

/// Labels for the three columns of a record, in output order.
pub(crate) const FIELD_LABELS: [&str; 3] = ["Source", "English", "Russian"];

/// `(label, text)` pairs for one record.
pub(crate) fn labelled_fields(result: &PageResult) -> [(&'static str, String); 3] {
    let (source, english, russian) = result.display_triple();
    [
        (FIELD_LABELS[0], source.into_owned()),
        (FIELD_LABELS[1], english.into_owned()),
        (FIELD_LABELS[2], russian.into_owned()),
    ]
}

/// Serialises page translations into one output document.
pub trait Exporter {
    /// Human-readable format name for logs.
    fn format_name(&self) -> &'static str;

    /// Render `results` (non-empty) to the output format.
    fn render(&self, results: &[PageResult]) -> Result<Vec<u8>>;
}

/// Render `results` with `exporter` and write them to `path`.
///
/// Fails with [`HonyakuError::NothingToSave`] before touching the filesystem
/// when `results` is empty. The bytes go to a temporary file in the target
/// directory which is then renamed over `path`.
#[instrument(skip(exporter, results), fields(format = exporter.format_name(), records = results.len(), path = %path.as_ref().display()))]
pub fn export_to_file(
    exporter: &dyn Exporter,
    results: &[PageResult],
    path: impl AsRef<Path>,
) -> Result<()> {
    if results.is_empty() {
        return Err(HonyakuError::NothingToSave);
    }
    let path = path.as_ref();

    let bytes = exporter.render(results)?;
    write_atomically(path, &bytes)?;

    info!(bytes = bytes.len(), "Export written");
    Ok(())
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| HonyakuError::Io(err.error))?;
    Ok(())
}
