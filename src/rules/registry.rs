use std::path::{Path, PathBuf};
use std::time::Duration;

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;

use crate::config::Config;
use crate::decoder::Format;
use crate::error::{ArtifactGuardError, Result};

use super::{
    BalancedCodeFences, BalancedInlineCode, BashSyntax, ExecutableBit, FirstLineHeading,
    HasCommands, HasHeadings, HasShebang, JsonKeyIsArray, JsonNoDuplicateKeys, JsonNotNull,
    JsonObjectRoot, MaxFileSize, NoSecretValues, NoTabs, NoTrailingWhitespace, NotEmpty,
    PipelineBuildSteps, PipelineFlutterVariables, PipelineNoSecrets, PipelineParameters,
    PipelinePool, PipelineStrategyMatrix, PipelineWebBuilds, PubspecFlutterDependency,
    PubspecHasField, PubspecSdkConstraint, PubspecTestDependency, PubspecVersionFormat,
    RequiredPhrase, RequiredSection, Rule, WellFormedLinks, YamlMappingRoot, YamlNotNull,
};

/// Whether a bundle names a specific artifact, and what its absence means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// The bundle applies only to files that were actually discovered.
    AnyMatch,
    /// The named artifact must exist; absence is a failure.
    Required(PathBuf),
    /// The named artifact may be absent; absence is reported as a skip.
    Optional(PathBuf),
}

impl Presence {
    #[must_use]
    pub fn artifact_path(&self) -> Option<&Path> {
        match self {
            Self::AnyMatch => None,
            Self::Required(path) | Self::Optional(path) => Some(path),
        }
    }
}

/// A named glob pattern set with the ordered rules to apply to its matches.
pub struct RuleBundle {
    name: String,
    format: Format,
    presence: Presence,
    patterns: Vec<String>,
    matcher: GlobSet,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleBundle {
    /// Build a bundle from glob patterns.
    ///
    /// # Errors
    /// Returns an error if any pattern is not a valid glob.
    pub fn new(
        name: &str,
        format: Format,
        presence: Presence,
        patterns: Vec<String>,
        rules: Vec<Box<dyn Rule>>,
    ) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|e| ArtifactGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let matcher = builder
            .build()
            .map_err(|e| ArtifactGuardError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self {
            name: name.to_string(),
            format,
            presence,
            patterns,
            matcher,
            rules,
        })
    }

    /// Build a bundle tied to one named artifact path.
    ///
    /// # Errors
    /// Returns an error if the path is not a valid glob.
    pub fn named(
        name: &str,
        format: Format,
        required: bool,
        path: &str,
        rules: Vec<Box<dyn Rule>>,
    ) -> Result<Self> {
        let presence = if required {
            Presence::Required(PathBuf::from(path))
        } else {
            Presence::Optional(PathBuf::from(path))
        };
        Self::new(name, format, presence, vec![path.to_string()], rules)
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub const fn presence(&self) -> &Presence {
        &self.presence
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[must_use]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}

/// Ordered mapping from bundle name to bundle. Registration order is the
/// evaluation and report order, so a run is deterministic.
#[derive(Default)]
pub struct RuleRegistry {
    bundles: IndexMap<String, RuleBundle>,
}

impl RuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bundles: IndexMap::new(),
        }
    }

    pub fn register(&mut self, bundle: RuleBundle) {
        self.bundles.insert(bundle.name.clone(), bundle);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RuleBundle> {
        self.bundles.get(name)
    }

    pub fn bundles(&self) -> impl Iterator<Item = &RuleBundle> {
        self.bundles.values()
    }

    #[must_use]
    pub fn bundles_for(&self, path: &Path) -> Vec<&RuleBundle> {
        self.bundles
            .values()
            .filter(|bundle| bundle.matches(path))
            .collect()
    }

    /// Declared format for a path: the format of the first bundle that
    /// matches it.
    #[must_use]
    pub fn format_for(&self, path: &Path) -> Option<Format> {
        self.bundles
            .values()
            .find(|bundle| bundle.matches(path))
            .map(RuleBundle::format)
    }

    /// The standard rule table, parameterized by configuration.
    ///
    /// # Errors
    /// Returns an error if a configured path is not a valid glob.
    pub fn standard(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        let size_limit = config.scanner.max_file_size;

        registry.register(RuleBundle::new(
            "json",
            Format::Json,
            Presence::AnyMatch,
            vec!["**/*.json".to_string()],
            vec![
                Box::new(JsonNotNull),
                Box::new(JsonNoDuplicateKeys),
                Box::new(NoSecretValues::new(&config.secrets)),
                Box::new(MaxFileSize::new(size_limit)),
            ],
        )?);

        registry.register(RuleBundle::new(
            "yaml",
            Format::Yaml,
            Presence::AnyMatch,
            vec!["**/*.yml".to_string(), "**/*.yaml".to_string()],
            vec![
                Box::new(NotEmpty),
                Box::new(YamlNotNull),
                Box::new(NoTabs),
                Box::new(MaxFileSize::new(size_limit)),
            ],
        )?);

        registry.register(RuleBundle::named(
            "pubspec",
            Format::Yaml,
            true,
            "pubspec.yaml",
            vec![
                Box::new(PubspecHasField::new("name")),
                Box::new(PubspecHasField::new("description")),
                Box::new(PubspecHasField::new("version")),
                Box::new(PubspecHasField::new("environment")),
                Box::new(PubspecHasField::new("dependencies")),
                Box::new(PubspecHasField::new("dev_dependencies")),
                Box::new(PubspecSdkConstraint),
                Box::new(PubspecFlutterDependency),
                Box::new(PubspecTestDependency),
                Box::new(PubspecVersionFormat::new()),
            ],
        )?);

        registry.register(RuleBundle::named(
            "azure-pipelines",
            Format::Yaml,
            false,
            "azure-pipelines.yml",
            vec![
                Box::new(PipelineStrategyMatrix),
                Box::new(PipelinePool),
                Box::new(PipelineFlutterVariables),
                Box::new(PipelineBuildSteps),
                Box::new(PipelineParameters),
                Box::new(PipelineWebBuilds),
                Box::new(PipelineNoSecrets::new()),
            ],
        )?);

        registry.register(RuleBundle::named(
            "analysis-options",
            Format::Yaml,
            false,
            "analysis_options.yaml",
            vec![Box::new(YamlMappingRoot)],
        )?);

        registry.register(RuleBundle::named(
            "renovate",
            Format::Json,
            false,
            "renovate.json",
            vec![Box::new(JsonObjectRoot)],
        )?);

        registry.register(RuleBundle::named(
            "vscode-settings",
            Format::Json,
            false,
            ".vscode/settings.json",
            vec![Box::new(JsonObjectRoot)],
        )?);

        registry.register(RuleBundle::named(
            "vscode-extensions",
            Format::Json,
            false,
            ".vscode/extensions.json",
            vec![
                Box::new(JsonObjectRoot),
                Box::new(JsonKeyIsArray::new("recommendations")),
            ],
        )?);

        registry.register(RuleBundle::named(
            "whitesource",
            Format::Json,
            false,
            ".whitesource",
            vec![Box::new(JsonObjectRoot), Box::new(JsonNoDuplicateKeys)],
        )?);

        registry.register(RuleBundle::named(
            "web-manifest",
            Format::Json,
            false,
            "web/manifest.json",
            vec![Box::new(JsonObjectRoot)],
        )?);

        registry.register(RuleBundle::new(
            "ios-contents",
            Format::Json,
            Presence::AnyMatch,
            vec!["ios/**/Contents.json".to_string()],
            vec![Box::new(JsonObjectRoot)],
        )?);

        for doc in &config.markdown.docs {
            let mut rules: Vec<Box<dyn Rule>> = vec![
                Box::new(NotEmpty),
                Box::new(FirstLineHeading),
                Box::new(HasHeadings::new()),
                Box::new(BalancedCodeFences),
                Box::new(BalancedInlineCode),
                Box::new(NoTrailingWhitespace),
                Box::new(WellFormedLinks::new()),
            ];
            for section in &doc.sections {
                rules.push(Box::new(RequiredSection::new(section)));
            }
            for phrase in &doc.phrases {
                rules.push(Box::new(RequiredPhrase::new(phrase)));
            }
            registry.register(RuleBundle::named(
                &format!("markdown:{}", doc.path),
                Format::Markdown,
                true,
                &doc.path,
                rules,
            )?);
        }

        for script in &config.shell.scripts {
            let mut rules: Vec<Box<dyn Rule>> = vec![
                Box::new(HasShebang),
                Box::new(ExecutableBit),
                Box::new(HasCommands),
            ];
            if config.shell.syntax_check {
                rules.push(Box::new(BashSyntax::new(Duration::from_secs(
                    config.shell.timeout_secs,
                ))));
            }
            registry.register(RuleBundle::named(
                &format!("shell:{script}"),
                Format::Shell,
                true,
                script,
                rules,
            )?);
        }

        Ok(registry)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
