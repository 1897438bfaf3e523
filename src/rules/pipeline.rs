use regex::Regex;
use serde_yaml::Value;

use crate::decoder::Document;

use super::{Rule, RuleOutcome};

fn yaml_doc(doc: &Document) -> Result<&Value, RuleOutcome> {
    doc.yaml()
        .ok_or_else(|| RuleOutcome::skip("not a YAML document"))
}

/// Checks that the pipeline declares a strategy matrix covering the three
/// desktop platforms.
pub struct PipelineStrategyMatrix;

impl Rule for PipelineStrategyMatrix {
    fn name(&self) -> &str {
        "pipeline-strategy-matrix"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let value = match yaml_doc(doc) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        let Some(strategy) = value.get("strategy") else {
            return RuleOutcome::fail("no `strategy` section");
        };
        let Some(matrix) = strategy.get("matrix") else {
            return RuleOutcome::fail("`strategy` has no `matrix`");
        };
        for platform in ["linux", "mac", "windows"] {
            if matrix.get(platform).is_none() {
                return RuleOutcome::fail(format!(
                    "`strategy.matrix` is missing the `{platform}` entry"
                ));
            }
        }
        RuleOutcome::Pass
    }
}

/// Checks that the pipeline declares a pool image.
pub struct PipelinePool;

impl Rule for PipelinePool {
    fn name(&self) -> &str {
        "pipeline-pool"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let value = match yaml_doc(doc) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        let Some(pool) = value.get("pool") else {
            return RuleOutcome::fail("no `pool` section");
        };
        if pool.get("vmImage").is_some() {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("`pool` does not declare `vmImage`")
        }
    }
}

/// Checks that the Flutter toolchain variables are pinned.
pub struct PipelineFlutterVariables;

impl Rule for PipelineFlutterVariables {
    fn name(&self) -> &str {
        "pipeline-flutter-variables"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let value = match yaml_doc(doc) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        let Some(variables) = value.get("variables") else {
            return RuleOutcome::fail("no `variables` section");
        };

        let missing: Vec<&str> = ["FLUTTER_CHANNEL", "FLUTTER_VERSION"]
            .into_iter()
            .filter(|name| variables.get(name).is_none())
            .collect();

        if missing.is_empty() {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail(format!("`variables` is missing {}", missing.join(", ")))
        }
    }
}

/// Checks that the pipeline has at least one build step.
pub struct PipelineBuildSteps;

impl Rule for PipelineBuildSteps {
    fn name(&self) -> &str {
        "pipeline-build-steps"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let value = match yaml_doc(doc) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        match value.get("steps").and_then(Value::as_sequence) {
            Some(steps) if !steps.is_empty() => RuleOutcome::Pass,
            Some(_) => RuleOutcome::fail("`steps` is empty"),
            None => RuleOutcome::fail("no `steps` section"),
        }
    }
}

/// Checks that the pipeline declares parameters.
pub struct PipelineParameters;

impl Rule for PipelineParameters {
    fn name(&self) -> &str {
        "pipeline-parameters"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let value = match yaml_doc(doc) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        match value.get("parameters").and_then(Value::as_sequence) {
            Some(parameters) if !parameters.is_empty() => RuleOutcome::Pass,
            Some(_) => RuleOutcome::fail("`parameters` is empty"),
            None => RuleOutcome::fail("no `parameters` section"),
        }
    }
}

/// Validates the `webBuilds` parameter: an object with exactly three
/// defaults covering the Debug, Profile, and Release build types.
pub struct PipelineWebBuilds;

impl PipelineWebBuilds {
    fn build_types(defaults: &[Value]) -> Vec<&str> {
        defaults
            .iter()
            .filter_map(|build| build.get("type").and_then(Value::as_str))
            .collect()
    }
}

impl Rule for PipelineWebBuilds {
    fn name(&self) -> &str {
        "pipeline-web-builds"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let value = match yaml_doc(doc) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        let Some(parameters) = value.get("parameters").and_then(Value::as_sequence) else {
            return RuleOutcome::skip("`parameters` is not present");
        };

        let Some(web_builds) = parameters
            .iter()
            .find(|param| param.get("name").and_then(Value::as_str) == Some("webBuilds"))
        else {
            return RuleOutcome::fail("no `webBuilds` parameter");
        };

        if web_builds.get("type").and_then(Value::as_str) != Some("object") {
            return RuleOutcome::fail("`webBuilds` parameter is not of type `object`");
        }

        let Some(defaults) = web_builds.get("default").and_then(Value::as_sequence) else {
            return RuleOutcome::fail("`webBuilds` parameter has no `default` list");
        };
        if defaults.len() != 3 {
            return RuleOutcome::fail(format!(
                "`webBuilds` declares {} default builds, expected 3",
                defaults.len()
            ));
        }

        let types = Self::build_types(defaults);
        for expected in ["Debug", "Profile", "Release"] {
            if !types.contains(&expected) {
                return RuleOutcome::fail(format!(
                    "`webBuilds` defaults do not cover the `{expected}` build type"
                ));
            }
        }
        RuleOutcome::Pass
    }
}

/// Flags `password:`/`api key:`-shaped assignments whose value is neither a
/// `$(...)` variable reference nor commented out.
pub struct PipelineNoSecrets {
    patterns: Vec<Regex>,
}

impl PipelineNoSecrets {
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: vec![
                Regex::new(r#"password\s*:\s*["']?[^\s'"]+"#).expect("Invalid regex"),
                Regex::new(r#"api[_-]?key\s*:\s*["']?[^\s'"]+"#).expect("Invalid regex"),
            ],
        }
    }
}

impl Default for PipelineNoSecrets {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for PipelineNoSecrets {
    fn name(&self) -> &str {
        "pipeline-no-secrets"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let content = doc.raw().to_lowercase();
        for pattern in &self.patterns {
            for found in pattern.find_iter(&content) {
                let text = found.as_str();
                if !text.contains("$(") && !text.contains('#') {
                    return RuleOutcome::fail(format!(
                        "looks like a hardcoded secret assignment: `{text}`"
                    ));
                }
            }
        }
        RuleOutcome::Pass
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
