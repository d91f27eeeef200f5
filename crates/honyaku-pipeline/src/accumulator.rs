// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result accumulator — translation records in the order they were produced.

use honyaku_core::types::PageResult;

/// Append-only list of records; cleared when a new document is opened.
///
/// Translating the same page twice appends a second record.
#[derive(Debug, Clone, Default)]
pub struct ResultAccumulator {
    results: Vec<PageResult>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: PageResult) {
        self.results.push(result);
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn as_slice(&self) -> &[PageResult] {
        &self.results
    }

    pub fn last(&self) -> Option<&PageResult> {
        self.results.last()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageResult> {
        self.results.iter()
    }
}
