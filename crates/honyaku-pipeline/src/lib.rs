// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// honyaku-pipeline — Turns raster pages into translation records.
//
// A page is downscaled, recognised, filtered by confidence, identified by
// language, and routed through the translation cascade. Results are kept in
// order by the accumulator; the session ties a loaded document, the cursor,
// and the exporters together.

pub mod accumulator;
pub mod cascade;
pub mod language;
pub mod processor;
pub mod session;
pub mod translator;

pub use accumulator::ResultAccumulator;
pub use language::{DetectedLanguage, LanguageIdentifier, LinguaIdentifier};
pub use processor::PageProcessor;
pub use session::Session;
pub use translator::{ChatTranslator, Translator};
