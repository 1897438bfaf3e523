use serde_yaml::Value;

use crate::decoder::Document;

use super::{Rule, RuleOutcome};

/// Fails when the document decoded to YAML null (empty or comments-only).
pub struct YamlNotNull;

impl Rule for YamlNotNull {
    fn name(&self) -> &str {
        "yaml-not-null"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        match doc.yaml() {
            Some(Value::Null) => RuleOutcome::fail("document decoded to null"),
            Some(_) => RuleOutcome::Pass,
            None => RuleOutcome::skip("not a YAML document"),
        }
    }
}

/// Fails unless the top-level value is a mapping.
pub struct YamlMappingRoot;

impl Rule for YamlMappingRoot {
    fn name(&self) -> &str {
        "yaml-mapping-root"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        match doc.yaml() {
            Some(Value::Mapping(_)) => RuleOutcome::Pass,
            Some(_) => RuleOutcome::fail("top level is not a mapping"),
            None => RuleOutcome::skip("not a YAML document"),
        }
    }
}

/// Fails on the first line containing a tab character. YAML indentation
/// must use spaces.
pub struct NoTabs;

impl Rule for NoTabs {
    fn name(&self) -> &str {
        "no-tabs"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        for (index, line) in doc.lines().enumerate() {
            if line.contains('\t') {
                return RuleOutcome::fail(format!("line {} contains a tab character", index + 1));
            }
        }
        RuleOutcome::Pass
    }
}

#[cfg(test)]
#[path = "yaml_rules_tests.rs"]
mod tests;
