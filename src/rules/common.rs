use crate::decoder::Document;

use super::{Rule, RuleOutcome};

/// Fails on files that are empty or whitespace-only.
pub struct NotEmpty;

impl Rule for NotEmpty {
    fn name(&self) -> &str {
        "not-empty"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        if doc.raw().trim().is_empty() {
            RuleOutcome::fail("file is empty")
        } else {
            RuleOutcome::Pass
        }
    }
}

/// Enforces the per-file size ceiling.
pub struct MaxFileSize {
    limit: u64,
}

impl MaxFileSize {
    #[must_use]
    pub const fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Rule for MaxFileSize {
    fn name(&self) -> &str {
        "max-file-size"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let size = doc.byte_len();
        if size > self.limit {
            RuleOutcome::fail(format!(
                "file is {size} bytes, exceeding the {} byte ceiling",
                self.limit
            ))
        } else {
            RuleOutcome::Pass
        }
    }
}

#[cfg(test)]
#[path = "common_tests.rs"]
mod tests;
