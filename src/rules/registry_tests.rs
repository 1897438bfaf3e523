use std::path::Path;

use crate::config::Config;
use crate::decoder::Format;

use super::*;

fn standard() -> RuleRegistry {
    RuleRegistry::standard(&Config::default()).unwrap()
}

#[test]
fn pubspec_matches_generic_yaml_and_its_own_bundle() {
    let registry = standard();
    let names: Vec<&str> = registry
        .bundles_for(Path::new("pubspec.yaml"))
        .iter()
        .map(|b| b.name())
        .collect();
    assert_eq!(names, vec!["yaml", "pubspec"]);
}

#[test]
fn nested_json_matches_the_generic_bundle() {
    let registry = standard();
    let bundles = registry.bundles_for(Path::new("assets/i18n/en.json"));
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].name(), "json");
}

#[test]
fn ios_contents_files_get_the_object_root_rule() {
    let registry = standard();
    let names: Vec<&str> = registry
        .bundles_for(Path::new("ios/Runner/Assets.xcassets/AppIcon.appiconset/Contents.json"))
        .iter()
        .map(|b| b.name())
        .collect();
    assert_eq!(names, vec!["json", "ios-contents"]);
}

#[test]
fn format_follows_the_first_matching_bundle() {
    let registry = standard();
    assert_eq!(
        registry.format_for(Path::new(".vscode/settings.json")),
        Some(Format::Json)
    );
    assert_eq!(
        registry.format_for(Path::new("azure-pipelines.yml")),
        Some(Format::Yaml)
    );
    assert_eq!(
        registry.format_for(Path::new("run_tests.sh")),
        Some(Format::Shell)
    );
    assert_eq!(registry.format_for(Path::new("lib/main.dart")), None);
}

#[test]
fn whitesource_has_its_own_bundle_despite_no_extension() {
    let registry = standard();
    let bundles = registry.bundles_for(Path::new(".whitesource"));
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].name(), "whitesource");
    assert!(matches!(bundles[0].presence(), Presence::Optional(_)));
}

#[test]
fn pubspec_bundle_is_required() {
    let registry = standard();
    let bundle = registry.get("pubspec").unwrap();
    assert!(matches!(bundle.presence(), Presence::Required(_)));
    assert_eq!(bundle.rules().len(), 10);
}

#[test]
fn markdown_docs_become_required_bundles() {
    let registry = standard();
    let bundle = registry.get("markdown:test/README.md").unwrap();
    assert!(matches!(bundle.presence(), Presence::Required(_)));
    assert!(bundle.matches(Path::new("test/README.md")));
    assert!(!bundle.matches(Path::new("README.md")));
}

#[test]
fn shell_bundles_follow_the_configured_script_list() {
    let mut config = Config::default();
    config.shell.scripts = vec!["deploy.sh".to_string()];
    let registry = RuleRegistry::standard(&config).unwrap();

    assert!(registry.get("shell:deploy.sh").is_some());
    assert!(registry.get("shell:run_tests.sh").is_none());
}

#[test]
fn syntax_check_toggle_drops_the_bash_rule() {
    let mut config = Config::default();
    config.shell.syntax_check = false;
    let registry = RuleRegistry::standard(&config).unwrap();

    let bundle = registry.get("shell:run_tests.sh").unwrap();
    assert!(bundle.rules().iter().all(|r| r.name() != "shell-bash-syntax"));
}

#[test]
fn registration_order_is_stable() {
    let registry = standard();
    let first_two: Vec<&str> = registry.bundles().take(2).map(RuleBundle::name).collect();
    assert_eq!(first_two, vec!["json", "yaml"]);
}

#[test]
fn custom_bundle_with_bad_pattern_errors() {
    let result = RuleBundle::new(
        "broken",
        Format::Text,
        Presence::AnyMatch,
        vec!["[oops".to_string()],
        Vec::new(),
    );
    assert!(result.is_err());
}
