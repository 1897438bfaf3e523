use regex::Regex;

use crate::decoder::Document;

use super::{Rule, RuleOutcome};

/// Checks that the document opens with a heading.
pub struct FirstLineHeading;

impl Rule for FirstLineHeading {
    fn name(&self) -> &str {
        "markdown-first-line-heading"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        match doc.lines().next() {
            Some(first) if first.starts_with('#') => RuleOutcome::Pass,
            Some(_) => RuleOutcome::fail("first line is not a heading"),
            None => RuleOutcome::fail("file is empty"),
        }
    }
}

/// Checks that the document contains at least one ATX heading.
pub struct HasHeadings {
    pattern: Regex,
}

impl HasHeadings {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?m)^#{1,6}\s+.+$").expect("Invalid regex"),
        }
    }
}

impl Default for HasHeadings {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for HasHeadings {
    fn name(&self) -> &str {
        "markdown-has-headings"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        if self.pattern.is_match(doc.raw()) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("document has no headings")
        }
    }
}

/// Checks that ``` code fences open and close in pairs.
pub struct BalancedCodeFences;

impl Rule for BalancedCodeFences {
    fn name(&self) -> &str {
        "markdown-balanced-fences"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let fences = doc.raw().matches("```").count();
        if fences % 2 == 0 {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("unbalanced ``` code fences")
        }
    }
}

/// Checks that single-backtick inline code markers pair up on every line
/// outside fenced blocks.
pub struct BalancedInlineCode;

impl Rule for BalancedInlineCode {
    fn name(&self) -> &str {
        "markdown-balanced-inline-code"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let mut in_fence = false;
        for (index, line) in doc.lines().enumerate() {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            let backticks = line.matches('`').count();
            if backticks % 2 != 0 {
                return RuleOutcome::fail(format!(
                    "line {} has unbalanced inline code backticks",
                    index + 1
                ));
            }
        }
        RuleOutcome::Pass
    }
}

/// Fails on the first line carrying trailing whitespace.
pub struct NoTrailingWhitespace;

impl Rule for NoTrailingWhitespace {
    fn name(&self) -> &str {
        "markdown-no-trailing-whitespace"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        for (index, line) in doc.lines().enumerate() {
            if !line.is_empty() && line != line.trim_end() {
                return RuleOutcome::fail(format!("line {} has trailing whitespace", index + 1));
            }
        }
        RuleOutcome::Pass
    }
}

/// Checks that `[text](url)` links carry non-empty text and targets.
pub struct WellFormedLinks {
    pattern: Regex,
}

impl WellFormedLinks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("Invalid regex"),
        }
    }
}

impl Default for WellFormedLinks {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for WellFormedLinks {
    fn name(&self) -> &str {
        "markdown-well-formed-links"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        for capture in self.pattern.captures_iter(doc.raw()) {
            let text = capture.get(1).map_or("", |m| m.as_str());
            let url = capture.get(2).map_or("", |m| m.as_str());
            if text.trim().is_empty() {
                return RuleOutcome::fail(format!("link to `{url}` has empty text"));
            }
            if url.trim().is_empty() {
                return RuleOutcome::fail(format!("link `{text}` has an empty target"));
            }
        }
        RuleOutcome::Pass
    }
}

/// Checks that one named section appears somewhere in the document.
///
/// Registered once per configured section so each missing section is
/// reported independently.
pub struct RequiredSection {
    section: String,
    name: String,
}

impl RequiredSection {
    #[must_use]
    pub fn new(section: &str) -> Self {
        let slug = slugify(section);
        Self {
            section: section.to_string(),
            name: format!("markdown-section-{slug}"),
        }
    }
}

impl Rule for RequiredSection {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        if doc.raw().contains(&self.section) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail(format!("missing required section `{}`", self.section))
        }
    }
}

/// Checks that one phrase appears somewhere in the document,
/// case-insensitively.
pub struct RequiredPhrase {
    phrase: String,
    name: String,
}

impl RequiredPhrase {
    #[must_use]
    pub fn new(phrase: &str) -> Self {
        let slug = slugify(phrase);
        Self {
            phrase: phrase.to_lowercase(),
            name: format!("markdown-mentions-{slug}"),
        }
    }
}

impl Rule for RequiredPhrase {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        if doc.raw().to_lowercase().contains(&self.phrase) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail(format!("does not mention `{}`", self.phrase))
        }
    }
}

fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
