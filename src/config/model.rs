use serde::{Deserialize, Serialize};

/// Effective configuration for a validation run.
///
/// Loaded from `.artifact-guard.toml`; every section and field has a default
/// so a partial file (or no file at all) still yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub secrets: SecretsConfig,
    pub markdown: MarkdownConfig,
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    /// Repository root to validate.
    pub root: String,

    /// Path fragments that remove a file from consideration entirely.
    /// Matched as plain substrings of the repository-relative path, so a
    /// path that merely contains the fragment is also dropped.
    pub exclude: Vec<String>,

    /// Size ceiling per checked file, in bytes.
    pub max_file_size: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            exclude: vec!["node_modules".to_string(), ".git".to_string()],
            max_file_size: 100 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Key substrings that mark a value as potentially sensitive.
    pub keywords: Vec<String>,

    /// Value substrings that mark a suspicious value as a placeholder.
    pub placeholder_markers: Vec<String>,

    /// Values at or below this length are treated as placeholders.
    pub min_value_length: usize,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            keywords: ["password", "secret", "api_key", "apikey", "token"]
                .map(String::from)
                .to_vec(),
            placeholder_markers: ["example", "your_", "todo", "changeme", "$("]
                .map(String::from)
                .to_vec(),
            min_value_length: 10,
        }
    }
}

/// One Markdown document to validate, with its content expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownDoc {
    pub path: String,

    /// Section headings that must appear somewhere in the document.
    pub sections: Vec<String>,

    /// Phrases that must appear somewhere in the document
    /// (matched case-insensitively).
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub docs: Vec<MarkdownDoc>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            docs: vec![
                MarkdownDoc {
                    path: ".github/copilot-instructions.md".to_string(),
                    sections: [
                        "Branch Safety",
                        "Project Overview",
                        "Key Architecture",
                        "Developer Workflows",
                        "Project Conventions",
                        "Integration Points",
                        "Examples",
                        "References",
                    ]
                    .map(String::from)
                    .to_vec(),
                    phrases: vec!["flutter".to_string()],
                },
                MarkdownDoc {
                    path: "test/README.md".to_string(),
                    sections: Vec::new(),
                    phrases: Vec::new(),
                },
                MarkdownDoc {
                    path: "test/config_validation/README.md".to_string(),
                    sections: ["Test Files", "Running the Tests", "Test Coverage"]
                        .map(String::from)
                        .to_vec(),
                    phrases: [
                        "azure_pipelines_validation_test.dart",
                        "copilot_instructions_validation_test.dart",
                        "flutter test",
                    ]
                    .map(String::from)
                    .to_vec(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Root-level shell scripts that must exist and pass the script rules.
    pub scripts: Vec<String>,

    /// Run `bash -n` against each script.
    pub syntax_check: bool,

    /// Wall-clock bound for one `bash -n` invocation, in seconds.
    pub timeout_secs: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            scripts: vec![
                "run_tests.sh".to_string(),
                "run_validation_tests.sh".to_string(),
            ],
            syntax_check: true,
            timeout_secs: 5,
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
