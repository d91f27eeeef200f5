// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware configuration lookup and system font discovery.

use std::path::{Path, PathBuf};

use honyaku_core::AppConfig;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "config.json";

/// Fonts tried, in order, when no export font is configured. CJK fonts come
/// first because they also cover Latin and Cyrillic.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
];

/// Return the configuration directory (not created).
pub fn config_dir() -> PathBuf {
    // Try XDG config dir, then fallback to home
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config")
    } else {
        PathBuf::from(".")
    };
    base.join("honyaku")
}

/// Load `config.json` from `dir`.
///
/// A missing file gives the defaults silently; an unreadable or invalid one
/// gives the defaults with a warning.
pub fn load_config(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILE);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No config file; using defaults");
            return AppConfig::default();
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "Config unreadable; using defaults");
            return AppConfig::default();
        }
    };

    match AppConfig::from_json(&data) {
        Ok(config) => {
            info!(path = %path.display(), "Config loaded");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "Config invalid; using defaults");
            AppConfig::default()
        }
    }
}

/// First existing font among `candidates`.
pub fn discover_font<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Fill in the export font from the system when none is configured.
pub fn ensure_export_font(config: &mut AppConfig) {
    if config.export.font_path.is_some() {
        return;
    }
    match discover_font(FONT_CANDIDATES.iter().copied()) {
        Some(path) => {
            info!(font = %path.display(), "Using system font for PDF export");
            config.export.font_path = Some(path);
        }
        None => warn!(
            "No system font found; PDF export accepts ASCII-only records until export.font_path is set"
        ),
    }
}
