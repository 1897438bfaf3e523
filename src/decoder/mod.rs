mod json;
mod yaml;

pub use json::{check_duplicate_keys, decode_json};
pub use yaml::decode_yaml;

use std::path::{Path, PathBuf};

/// Declared format of a discovered artifact, taken from the rule bundle
/// that claims its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Markdown,
    Shell,
    Text,
}

impl Format {
    /// Whether decoding produces a structured value rather than raw text.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json | Self::Yaml)
    }

    #[must_use]
    pub const fn decode_rule_name(self) -> &'static str {
        match self {
            Self::Json => "json-decode",
            Self::Yaml => "yaml-decode",
            Self::Markdown | Self::Shell | Self::Text => "text-decode",
        }
    }
}

/// A parse failure carrying the decoder's message. The engine converts this
/// into a single synthesized `Fail` outcome for the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub message: String,
}

impl DecodeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum DocumentContent {
    Json(serde_json::Value),
    Yaml(serde_yaml::Value),
    Text,
}

/// One decoded artifact. Rules see the raw text, a line-split view, and
/// (for JSON/YAML) the decoded value; they never mutate any of it.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    format: Format,
    raw: String,
    content: DocumentContent,
}

impl Document {
    /// Decode raw file bytes according to the declared format.
    ///
    /// # Errors
    /// Returns a `DecodeError` on malformed syntax or non-UTF-8 content.
    pub fn decode(path: &Path, format: Format, bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw = std::str::from_utf8(bytes)
            .map_err(|e| DecodeError::new(format!("not valid UTF-8: {e}")))?
            .to_string();

        let content = match format {
            Format::Json => DocumentContent::Json(decode_json(&raw)?),
            Format::Yaml => DocumentContent::Yaml(decode_yaml(&raw)?),
            Format::Markdown | Format::Shell | Format::Text => DocumentContent::Text,
        };

        Ok(Self {
            path: path.to_path_buf(),
            format,
            raw,
            content,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw.lines()
    }

    #[must_use]
    pub fn byte_len(&self) -> u64 {
        self.raw.len() as u64
    }

    #[must_use]
    pub const fn json(&self) -> Option<&serde_json::Value> {
        match &self.content {
            DocumentContent::Json(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn yaml(&self) -> Option<&serde_yaml::Value> {
        match &self.content {
            DocumentContent::Yaml(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
