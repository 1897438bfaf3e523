use std::fs;

use tempfile::TempDir;

use super::*;

#[test]
fn load_from_path_parses_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guard.toml");
    fs::write(&path, "[scanner]\nexclude = [\"vendor\"]\n").unwrap();

    let config = FileConfigLoader::new().load_from_path(&path).unwrap();
    assert_eq!(config.scanner.exclude, vec!["vendor".to_string()]);
}

#[test]
fn load_from_missing_path_errors() {
    let dir = TempDir::new().unwrap();
    let result = FileConfigLoader::new().load_from_path(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ArtifactGuardError::Config(_))));
}

#[test]
fn load_from_malformed_toml_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guard.toml");
    fs::write(&path, "[scanner\n").unwrap();

    let result = FileConfigLoader::new().load_from_path(&path);
    assert!(matches!(result, Err(ArtifactGuardError::TomlParse(_))));
}

#[test]
fn empty_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guard.toml");
    fs::write(&path, "").unwrap();

    let config = FileConfigLoader::new().load_from_path(&path).unwrap();
    assert_eq!(config, Config::default());
}
