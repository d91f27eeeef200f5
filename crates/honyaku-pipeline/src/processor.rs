// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page processor — one raster page in, one translation record out.

use std::sync::Arc;

use honyaku_core::config::ProcessorConfig;
use honyaku_core::types::{PageResult, TextFragment};
use honyaku_document::{ImageProcessor, RasterPage, TextRecognizer};
use tracing::{debug, info, instrument, warn};

use crate::cascade;
use crate::language::{DetectedLanguage, LanguageIdentifier, UNKNOWN_LANGUAGE};
use crate::translator::Translator;

/// Join the text of every fragment scoring strictly above `min_confidence`,
/// in detection order.
pub fn filter_and_join(fragments: &[TextFragment], min_confidence: f32) -> String {
    fragments
        .iter()
        .filter(|fragment| fragment.confidence > min_confidence)
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the resize → OCR → filter → detect → cascade pipeline.
///
/// Capabilities are built once by the caller and shared; processing a page
/// never fails, every problem ends up in the record.
pub struct PageProcessor {
    recognizer: Arc<dyn TextRecognizer>,
    identifier: Arc<dyn LanguageIdentifier>,
    translator: Arc<dyn Translator>,
    config: ProcessorConfig,
}

impl PageProcessor {
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        identifier: Arc<dyn LanguageIdentifier>,
        translator: Arc<dyn Translator>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            recognizer,
            identifier,
            translator,
            config,
        }
    }

    #[instrument(skip_all, fields(page = page.index, width = page.width(), height = page.height()))]
    pub fn process(&self, page: &RasterPage) -> PageResult {
        let resized = ImageProcessor::from_dynamic(page.image.clone())
            .fit_to_width(self.config.max_width)
            .into_dynamic();

        let fragments = match self.recognizer.recognize(&resized) {
            Ok(fragments) => fragments,
            Err(err) => {
                warn!(%err, "OCR failed; treating page as textless");
                Vec::new()
            }
        };

        let text = filter_and_join(&fragments, self.config.min_confidence);
        debug!(
            fragments = fragments.len(),
            text_len = text.len(),
            "Fragments filtered"
        );
        if text.trim().is_empty() {
            info!("No text found");
            return PageResult::no_text_found();
        }

        let code = self
            .identifier
            .identify(&text)
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_owned());
        info!(language = %code, "Routing page");

        cascade::run(
            self.translator.as_ref(),
            &text,
            &DetectedLanguage::from_code(&code),
        )
    }
}
