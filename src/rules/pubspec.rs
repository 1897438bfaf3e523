use regex::Regex;

use crate::decoder::Document;

use super::{Rule, RuleOutcome};

/// Fails when a required top-level pubspec field is absent.
///
/// Each required field is registered as its own rule instance so one
/// pubspec can report several missing fields independently.
pub struct PubspecHasField {
    field: &'static str,
    name: String,
}

impl PubspecHasField {
    #[must_use]
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            name: format!("pubspec-has-{field}"),
        }
    }
}

impl Rule for PubspecHasField {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let Some(value) = doc.yaml() else {
            return RuleOutcome::skip("not a YAML document");
        };
        if value.get(self.field).is_some() {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail(format!("missing required field `{}`", self.field))
        }
    }
}

/// Checks that `environment` declares an `sdk` constraint. Skips when
/// `environment` itself is absent; that is already reported by the
/// required-field rule.
pub struct PubspecSdkConstraint;

impl Rule for PubspecSdkConstraint {
    fn name(&self) -> &str {
        "pubspec-sdk-constraint"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let Some(value) = doc.yaml() else {
            return RuleOutcome::skip("not a YAML document");
        };
        let Some(environment) = value.get("environment") else {
            return RuleOutcome::skip("`environment` is not present");
        };
        if environment.get("sdk").is_some() {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("`environment` does not declare an `sdk` constraint")
        }
    }
}

/// Checks that the Flutter SDK is listed under `dependencies`.
pub struct PubspecFlutterDependency;

impl Rule for PubspecFlutterDependency {
    fn name(&self) -> &str {
        "pubspec-flutter-dependency"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let Some(value) = doc.yaml() else {
            return RuleOutcome::skip("not a YAML document");
        };
        let Some(dependencies) = value.get("dependencies") else {
            return RuleOutcome::skip("`dependencies` is not present");
        };
        if dependencies.get("flutter").is_some() {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("`dependencies` does not include `flutter`")
        }
    }
}

/// Checks that a test package is listed under `dev_dependencies`.
pub struct PubspecTestDependency;

impl Rule for PubspecTestDependency {
    fn name(&self) -> &str {
        "pubspec-test-dependency"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let Some(value) = doc.yaml() else {
            return RuleOutcome::skip("not a YAML document");
        };
        let Some(dev_dependencies) = value.get("dev_dependencies") else {
            return RuleOutcome::skip("`dev_dependencies` is not present");
        };
        if dev_dependencies.get("test").is_some() || dev_dependencies.get("flutter_test").is_some()
        {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("`dev_dependencies` includes neither `test` nor `flutter_test`")
        }
    }
}

/// Checks that `version` carries a `major.minor.patch` triple.
pub struct PubspecVersionFormat {
    pattern: Regex,
}

impl PubspecVersionFormat {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\d+\.\d+\.\d+").expect("Invalid regex"),
        }
    }
}

impl Default for PubspecVersionFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for PubspecVersionFormat {
    fn name(&self) -> &str {
        "pubspec-version-format"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let Some(value) = doc.yaml() else {
            return RuleOutcome::skip("not a YAML document");
        };
        let Some(version) = value.get("version") else {
            return RuleOutcome::skip("`version` is not present");
        };

        let text = match version {
            serde_yaml::Value::String(s) => s.clone(),
            other => serde_yaml::to_string(other)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
        };

        if self.pattern.is_match(&text) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail(format!(
                "`version` is `{text}`, expected a major.minor.patch triple"
            ))
        }
    }
}

#[cfg(test)]
#[path = "pubspec_tests.rs"]
mod tests;
