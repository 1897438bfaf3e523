use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::*;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "x").unwrap();
}

fn default_scanner() -> RepoScanner {
    RepoScanner::new(vec!["node_modules".to_string(), ".git".to_string()])
}

#[test]
fn scan_returns_relative_sorted_paths() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "pubspec.yaml");
    touch(dir.path(), "web/manifest.json");
    touch(dir.path(), "analysis_options.yaml");

    let files = default_scanner().scan(dir.path()).unwrap();
    assert_eq!(
        files,
        vec![
            PathBuf::from("analysis_options.yaml"),
            PathBuf::from("pubspec.yaml"),
            PathBuf::from("web/manifest.json"),
        ]
    );
}

#[test]
fn node_modules_subtree_is_never_visited() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "renovate.json");
    touch(dir.path(), "node_modules/pkg/config.json");

    let files = default_scanner().scan(dir.path()).unwrap();
    assert_eq!(files, vec![PathBuf::from("renovate.json")]);
}

#[test]
fn git_directory_is_excluded() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), ".git/config");
    touch(dir.path(), "pubspec.yaml");

    let files = default_scanner().scan(dir.path()).unwrap();
    assert_eq!(files, vec![PathBuf::from("pubspec.yaml")]);
}

#[test]
fn exclusion_is_a_substring_match_not_a_component_match() {
    let dir = TempDir::new().unwrap();
    // Over-exclusion is intentional: the fragment matches anywhere in the
    // relative path, so this legitimate file is dropped too.
    touch(dir.path(), "docs/node_modules_guide.md");
    touch(dir.path(), "docs/setup.md");

    let files = default_scanner().scan(dir.path()).unwrap();
    assert_eq!(files, vec![PathBuf::from("docs/setup.md")]);
}

#[test]
fn scan_twice_is_identical() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "a.yaml");
    touch(dir.path(), "b/c.json");
    touch(dir.path(), "b/a.json");

    let scanner = default_scanner();
    let first = scanner.scan(dir.path()).unwrap();
    let second = scanner.scan(dir.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn no_exclusions_keeps_everything() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "node_modules/pkg/config.json");

    let scanner = RepoScanner::new(Vec::new());
    let files = scanner.scan(dir.path()).unwrap();
    assert_eq!(files, vec![PathBuf::from("node_modules/pkg/config.json")]);
}
