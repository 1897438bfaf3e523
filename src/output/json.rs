use serde::Serialize;

use crate::engine::{OverallStatus, RunReport};
use crate::error::Result;
use crate::rules::RuleOutcome;

use super::ReportFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    summary: Summary,
    results: Vec<FileResult>,
}

#[derive(Serialize)]
struct Summary {
    total_files: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
}

#[derive(Serialize)]
struct FileResult {
    path: String,
    status: &'static str,
    checks: Vec<CheckResult>,
}

#[derive(Serialize)]
struct CheckResult {
    rule: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

const fn status_str(status: OverallStatus) -> &'static str {
    match status {
        OverallStatus::Pass => "passed",
        OverallStatus::Fail => "failed",
        OverallStatus::Skip => "skipped",
    }
}

const fn outcome_str(outcome: &RuleOutcome) -> &'static str {
    match outcome {
        RuleOutcome::Pass => "passed",
        RuleOutcome::Fail(_) => "failed",
        RuleOutcome::Skip(_) => "skipped",
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let counts = report.counts();

        let output = JsonOutput {
            summary: Summary {
                total_files: counts.total,
                passed: counts.passed,
                failed: counts.failed,
                skipped: counts.skipped,
            },
            results: report
                .reports()
                .iter()
                .map(|file| FileResult {
                    path: file.path().display().to_string(),
                    status: status_str(file.overall()),
                    checks: file
                        .records()
                        .iter()
                        .map(|record| CheckResult {
                            rule: record.rule.clone(),
                            status: outcome_str(&record.outcome),
                            reason: record.outcome.reason().map(str::to_string),
                        })
                        .collect(),
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
