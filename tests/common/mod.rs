#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the artifact-guard binary.
#[macro_export]
macro_rules! artifact_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("artifact-guard"))
    };
}

/// Creates a temporary repository tree for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates an executable shell script in the temp directory.
    pub fn create_script(&self, relative_path: &str, content: &str) {
        self.create_file(relative_path, content);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let path = self.dir.path().join(relative_path);
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to set script permissions");
        }
    }

    /// Creates an artifact-guard config file.
    pub fn create_config(&self, content: &str) {
        self.create_file(".artifact-guard.toml", content);
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Populates the fixture with a complete repository tree that passes
    /// every default rule.
    pub fn create_passing_repo(&self) {
        self.create_file("pubspec.yaml", COMPLETE_PUBSPEC);
        self.create_file(".github/copilot-instructions.md", COPILOT_INSTRUCTIONS);
        self.create_file("test/README.md", TEST_README);
        self.create_file("test/config_validation/README.md", CONFIG_README);
        self.create_file("azure-pipelines.yml", AZURE_PIPELINE);
        self.create_file("analysis_options.yaml", "include: package:flutter_lints/flutter.yaml\n");
        self.create_file("renovate.json", "{\"extends\": [\"config:base\"]}\n");
        self.create_file(".vscode/settings.json", "{\"editor.formatOnSave\": true}\n");
        self.create_file(
            ".vscode/extensions.json",
            "{\"recommendations\": [\"dart-code.flutter\"]}\n",
        );
        self.create_script("run_tests.sh", "#!/usr/bin/env bash\nset -e\nflutter test\n");
        self.create_script(
            "run_validation_tests.sh",
            "#!/usr/bin/env bash\nset -e\nflutter test test/config_validation\n",
        );
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A pubspec satisfying every pubspec rule.
pub const COMPLETE_PUBSPEC: &str = "\
name: demo_app
description: A demo application
version: 1.0.0+1
environment:
  sdk: '>=3.0.0 <4.0.0'
dependencies:
  flutter:
    sdk: flutter
dev_dependencies:
  flutter_test:
    sdk: flutter
";

/// Copilot instructions carrying every default required section.
pub const COPILOT_INSTRUCTIONS: &str = "\
# Copilot Instructions

## Branch Safety

Never commit to main directly.

## Project Overview

A Flutter application.

## Key Architecture

Widgets all the way down.

## Developer Workflows

Run the scripts.

## Project Conventions

Follow the lints.

## Integration Points

Azure Pipelines.

## Examples

See the test directory.

## References

[Flutter docs](https://docs.flutter.dev)
";

pub const TEST_README: &str = "\
# Tests

Run everything with `flutter test`.
";

/// Config-validation README carrying the default sections and phrases.
pub const CONFIG_README: &str = "\
# Config Validation

## Test Files

- `azure_pipelines_validation_test.dart`
- `copilot_instructions_validation_test.dart`

## Running the Tests

Run `flutter test test/config_validation` from the repository root.

## Test Coverage

Pipeline structure, editor settings, and documentation checks.
";

/// A pipeline satisfying every azure-pipelines rule.
pub const AZURE_PIPELINE: &str = "\
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
