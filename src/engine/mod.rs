mod report;

pub use report::{FileReport, OverallStatus, RuleRecord, RunCounts, RunReport};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::decoder::Document;
use crate::error::Result;
use crate::rules::{Presence, RuleBundle, RuleOutcome, RuleRegistry};
use crate::scanner::FileScanner;

/// Record name for the synthesized presence check of named artifacts.
const ARTIFACT_PRESENT: &str = "artifact-present";

/// Orchestrates one validation run: discovery, decoding, rule evaluation,
/// and aggregation into a `RunReport`.
pub struct ValidatorEngine<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> ValidatorEngine<'a> {
    #[must_use]
    pub const fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Run validation over the tree under `root`.
    ///
    /// Files are evaluated independently (in parallel) and collected in
    /// discovery order, so an unchanged tree always yields an identical
    /// report. Named artifacts the walk did not surface are probed directly
    /// and appended last, in registration order: exclusion fragments apply
    /// to pattern discovery only, never to artifacts the rule table names
    /// explicitly (`.github/...` would otherwise be swallowed by the `.git`
    /// fragment).
    ///
    /// # Errors
    /// Returns an error if discovery fails. Per-file read and decode
    /// problems are reported as failures, not errors.
    pub fn run<S: FileScanner>(&self, root: &Path, scanner: &S) -> Result<RunReport> {
        let discovered = scanner.scan(root)?;

        let targets: Vec<(PathBuf, Vec<&RuleBundle>)> = discovered
            .into_iter()
            .filter_map(|path| {
                let bundles = self.registry.bundles_for(&path);
                if bundles.is_empty() {
                    None
                } else {
                    Some((path, bundles))
                }
            })
            .collect();

        let mut reports: Vec<FileReport> = targets
            .par_iter()
            .map(|(path, bundles)| Self::evaluate(root, path, bundles))
            .collect();

        let mut covered: HashSet<&Path> =
            targets.iter().map(|(path, _)| path.as_path()).collect();

        for bundle in self.registry.bundles() {
            let Some(path) = bundle.presence().artifact_path() else {
                continue;
            };
            if !covered.insert(path) {
                continue;
            }

            if root.join(path).is_file() {
                let bundles = self.registry.bundles_for(path);
                reports.push(Self::evaluate(root, path, &bundles));
            } else {
                let outcome = match bundle.presence() {
                    Presence::Required(_) => RuleOutcome::fail("required artifact is missing"),
                    Presence::AnyMatch | Presence::Optional(_) => {
                        RuleOutcome::skip("optional artifact is not present")
                    }
                };
                reports.push(FileReport::new(
                    path.to_path_buf(),
                    vec![RuleRecord {
                        rule: ARTIFACT_PRESENT.to_string(),
                        outcome,
                    }],
                ));
            }
        }

        Ok(RunReport::new(reports))
    }

    /// Evaluate every applicable rule against one discovered file. A decode
    /// failure yields a single synthesized failure record and stops rule
    /// evaluation for the file; rule failures never stop the run.
    fn evaluate(root: &Path, path: &Path, bundles: &[&RuleBundle]) -> FileReport {
        let format = bundles[0].format();
        let absolute = root.join(path);

        let bytes = match fs::read(&absolute) {
            Ok(bytes) => bytes,
            Err(e) => {
                return FileReport::new(
                    path.to_path_buf(),
                    vec![RuleRecord {
                        rule: "read".to_string(),
                        outcome: RuleOutcome::fail(format!("could not read file: {e}")),
                    }],
                );
            }
        };

        let doc = match Document::decode(&absolute, format, &bytes) {
            Ok(doc) => doc,
            Err(e) => {
                return FileReport::new(
                    path.to_path_buf(),
                    vec![RuleRecord {
                        rule: format.decode_rule_name().to_string(),
                        outcome: RuleOutcome::fail(e.message),
                    }],
                );
            }
        };

        let mut records = Vec::new();
        for bundle in bundles {
            if bundle.presence().artifact_path().is_some() {
                records.push(RuleRecord {
                    rule: ARTIFACT_PRESENT.to_string(),
                    outcome: RuleOutcome::Pass,
                });
            }
            for rule in bundle.rules() {
                records.push(RuleRecord {
                    rule: rule.name().to_string(),
                    outcome: rule.check(&doc),
                });
            }
        }

        FileReport::new(path.to_path_buf(), records)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
