use std::path::Path;

use crate::decoder::{Document, Format};

use super::*;

const COMPLETE_PIPELINE: &str = "\
parameters:
  - name: webBuilds
    type: object
    default:
      - type: Debug
      - type: Profile
      - type: Release
strategy:
  matrix:
    linux:
      imageName: ubuntu-latest
    mac:
      imageName: macos-latest
    windows:
      imageName: windows-latest
pool:
  vmImage: ubuntu-latest
variables:
  FLUTTER_CHANNEL: stable
  FLUTTER_VERSION: 3.22.0
steps:
  - script: flutter build web
";

fn pipeline(raw: &str) -> Document {
    Document::decode(Path::new("azure-pipelines.yml"), Format::Yaml, raw.as_bytes()).unwrap()
}

#[test]
fn complete_pipeline_passes_every_rule() {
    let doc = pipeline(COMPLETE_PIPELINE);
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(PipelineStrategyMatrix),
        Box::new(PipelinePool),
        Box::new(PipelineFlutterVariables),
        Box::new(PipelineBuildSteps),
        Box::new(PipelineParameters),
        Box::new(PipelineWebBuilds),
        Box::new(PipelineNoSecrets::new()),
    ];
    for rule in &rules {
        assert!(rule.check(&doc).is_pass(), "{} did not pass", rule.name());
    }
}

#[test]
fn matrix_missing_platform_is_named() {
    let doc = pipeline("strategy:\n  matrix:\n    linux:\n      x: 1\n    mac:\n      x: 1\n");
    let outcome = PipelineStrategyMatrix.check(&doc);
    assert!(outcome.is_fail());
    assert!(outcome.reason().unwrap().contains("`windows`"));
}

#[test]
fn missing_strategy_section_fails() {
    let doc = pipeline("pool:\n  vmImage: ubuntu-latest\n");
    assert_eq!(
        PipelineStrategyMatrix.check(&doc),
        RuleOutcome::fail("no `strategy` section")
    );
}

#[test]
fn pool_without_vm_image_fails() {
    let doc = pipeline("pool:\n  name: selfhosted\n");
    assert!(PipelinePool.check(&doc).is_fail());
}

#[test]
fn missing_flutter_variables_are_listed() {
    let doc = pipeline("variables:\n  FLUTTER_CHANNEL: stable\n");
    let outcome = PipelineFlutterVariables.check(&doc);
    assert!(outcome.is_fail());
    assert!(outcome.reason().unwrap().contains("FLUTTER_VERSION"));
}

#[test]
fn empty_steps_fail() {
    let doc = pipeline("steps: []\n");
    assert_eq!(PipelineBuildSteps.check(&doc), RuleOutcome::fail("`steps` is empty"));
}

#[test]
fn web_builds_skips_without_parameters() {
    let doc = pipeline("steps:\n  - script: echo hi\n");
    assert!(PipelineWebBuilds.check(&doc).is_skip());
}

#[test]
fn web_builds_missing_parameter_fails() {
    let doc = pipeline("parameters:\n  - name: other\n    type: string\n");
    assert_eq!(
        PipelineWebBuilds.check(&doc),
        RuleOutcome::fail("no `webBuilds` parameter")
    );
}

#[test]
fn web_builds_wrong_default_count_fails() {
    let doc = pipeline(
        "parameters:\n  - name: webBuilds\n    type: object\n    default:\n      - type: Debug\n",
    );
    let outcome = PipelineWebBuilds.check(&doc);
    assert!(outcome.is_fail());
    assert!(outcome.reason().unwrap().contains("expected 3"));
}

#[test]
fn web_builds_missing_build_type_is_named() {
    let doc = pipeline(
        "parameters:\n  - name: webBuilds\n    type: object\n    default:\n      - type: Debug\n      - type: Profile\n      - type: Debug\n",
    );
    let outcome = PipelineWebBuilds.check(&doc);
    assert!(outcome.is_fail());
    assert!(outcome.reason().unwrap().contains("`Release`"));
}

#[test]
fn variable_reference_is_not_a_secret() {
    let doc = pipeline("variables:\n  password: $(securePassword)\n");
    assert!(PipelineNoSecrets::new().check(&doc).is_pass());
}

#[test]
fn hardcoded_password_is_flagged() {
    let doc = pipeline("variables:\n  password: hunter2hunter2\n");
    let outcome = PipelineNoSecrets::new().check(&doc);
    assert!(outcome.is_fail());
    assert!(outcome.reason().unwrap().contains("password"));
}

#[test]
fn hardcoded_api_key_is_flagged() {
    let doc = pipeline("variables:\n  api-key: abc123def456\n");
    assert!(PipelineNoSecrets::new().check(&doc).is_fail());
}
