use serde_json::Value;

use crate::config::SecretsConfig;
use crate::decoder::{Document, check_duplicate_keys};

use super::{Rule, RuleOutcome};

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fails when the document decoded to JSON `null`.
pub struct JsonNotNull;

impl Rule for JsonNotNull {
    fn name(&self) -> &str {
        "json-not-null"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        match doc.json() {
            Some(Value::Null) => RuleOutcome::fail("document decoded to null"),
            Some(_) => RuleOutcome::Pass,
            None => RuleOutcome::skip("not a JSON document"),
        }
    }
}

/// Fails when a key repeats within one object.
pub struct JsonNoDuplicateKeys;

impl Rule for JsonNoDuplicateKeys {
    fn name(&self) -> &str {
        "json-no-duplicate-keys"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        if doc.json().is_none() {
            return RuleOutcome::skip("not a JSON document");
        }
        match check_duplicate_keys(doc.raw()) {
            Ok(()) => RuleOutcome::Pass,
            Err(reason) => RuleOutcome::fail(reason),
        }
    }
}

/// Fails unless the top-level value is an object.
pub struct JsonObjectRoot;

impl Rule for JsonObjectRoot {
    fn name(&self) -> &str {
        "json-object-root"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        match doc.json() {
            Some(Value::Object(_)) => RuleOutcome::Pass,
            Some(other) => RuleOutcome::fail(format!(
                "top level is {}, expected an object",
                json_type_name(other)
            )),
            None => RuleOutcome::skip("not a JSON document"),
        }
    }
}

/// Fails when a named top-level key is present but not an array.
/// An absent key passes.
pub struct JsonKeyIsArray {
    key: String,
    name: String,
}

impl JsonKeyIsArray {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: format!("{key}-is-array"),
        }
    }
}

impl Rule for JsonKeyIsArray {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let Some(value) = doc.json() else {
            return RuleOutcome::skip("not a JSON document");
        };
        match value.get(&self.key) {
            None => RuleOutcome::Pass,
            Some(Value::Array(_)) => RuleOutcome::Pass,
            Some(other) => RuleOutcome::fail(format!(
                "`{}` is {}, expected an array",
                self.key,
                json_type_name(other)
            )),
        }
    }
}

/// Flags string values under sensitive-looking keys that carry no
/// placeholder marker.
pub struct NoSecretValues {
    keywords: Vec<String>,
    markers: Vec<String>,
    min_value_length: usize,
}

impl NoSecretValues {
    #[must_use]
    pub fn new(config: &SecretsConfig) -> Self {
        Self {
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
            markers: config
                .placeholder_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            min_value_length: config.min_value_length,
        }
    }

    fn key_is_sensitive(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.keywords.iter().any(|k| key.contains(k.as_str()))
    }

    fn value_is_placeholder(&self, value: &str) -> bool {
        if value.len() <= self.min_value_length {
            return true;
        }
        let value = value.to_lowercase();
        self.markers.iter().any(|m| value.contains(m.as_str()))
    }

    fn find_offender<'a>(&self, value: &'a Value) -> Option<&'a str> {
        match value {
            Value::Object(map) => map.iter().find_map(|(key, val)| {
                if let Value::String(s) = val
                    && self.key_is_sensitive(key)
                    && !self.value_is_placeholder(s)
                {
                    return Some(key.as_str());
                }
                self.find_offender(val)
            }),
            Value::Array(items) => items.iter().find_map(|item| self.find_offender(item)),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        }
    }
}

impl Rule for NoSecretValues {
    fn name(&self) -> &str {
        "no-secret-values"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let Some(value) = doc.json() else {
            return RuleOutcome::skip("not a JSON document");
        };
        match self.find_offender(value) {
            Some(key) => RuleOutcome::fail(format!(
                "value of `{key}` looks like a hardcoded secret (no placeholder marker)"
            )),
            None => RuleOutcome::Pass,
        }
    }
}

#[cfg(test)]
#[path = "json_rules_tests.rs"]
mod tests;
