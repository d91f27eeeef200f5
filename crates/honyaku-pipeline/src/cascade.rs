// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Translation cascade — route recognised text by detected language into a
// (source, English, Russian) record.
//
// Russian needs nothing, English needs one hop, Japanese goes through English
// to Russian. A failed hop becomes a `TranslationFailed` field and never stops
// the cascade.

use honyaku_core::types::{PageField, PageResult, Sentinel, TargetLanguage};
use tracing::{instrument, warn};

use crate::language::DetectedLanguage;
use crate::translator::Translator;

/// One translation attempt; errors are logged and folded into the field.
fn hop(translator: &dyn Translator, text: &str, target: TargetLanguage) -> PageField {
    match translator.translate(text, target) {
        Ok(translated) => PageField::Text(translated),
        Err(err) => {
            warn!(target_language = target.code(), %err, "Translation hop failed");
            PageField::TranslationFailed(target)
        }
    }
}

fn russian_source(text: &str) -> PageResult {
    PageResult::new(
        PageField::text(text),
        PageField::Sentinel(Sentinel::AlreadyRussian),
        PageField::Sentinel(Sentinel::TranslationNotRequired),
    )
}

fn english_source(translator: &dyn Translator, text: &str) -> PageResult {
    PageResult::new(
        PageField::text(text),
        PageField::Sentinel(Sentinel::EnglishSource),
        hop(translator, text, TargetLanguage::Russian),
    )
}

fn japanese_source(translator: &dyn Translator, text: &str) -> PageResult {
    let english = hop(translator, text, TargetLanguage::English);
    // The second hop always runs, on whatever the first one left behind.
    let russian = hop(translator, &english.display_text(), TargetLanguage::Russian);
    PageResult::new(PageField::text(text), english, russian)
}

fn other_source(text: &str, code: &str) -> PageResult {
    PageResult::new(
        PageField::text(text),
        PageField::Sentinel(Sentinel::Language(code.to_owned())),
        PageField::Sentinel(Sentinel::UnrecognizedLanguage),
    )
}

/// Build the record for non-empty `text` in `language`.
#[instrument(skip(translator, text), fields(text_len = text.len()))]
pub fn run(translator: &dyn Translator, text: &str, language: &DetectedLanguage) -> PageResult {
    match language {
        DetectedLanguage::Russian => russian_source(text),
        DetectedLanguage::English => english_source(translator, text),
        DetectedLanguage::Japanese => japanese_source(translator, text),
        DetectedLanguage::Other(code) => other_source(text, code),
    }
}
