use std::path::PathBuf;

use crate::rules::RuleOutcome;

/// Aggregated status of one file: `Fail` if any rule failed, else `Pass`
/// if at least one rule passed, else `Skip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    Pass,
    Fail,
    Skip,
}

/// One rule evaluation, by name, against one file.
#[derive(Debug, Clone)]
pub struct RuleRecord {
    pub rule: String,
    pub outcome: RuleOutcome,
}

/// All outcomes collected for one discovered (or expected) file.
#[derive(Debug)]
pub struct FileReport {
    path: PathBuf,
    records: Vec<RuleRecord>,
}

impl FileReport {
    #[must_use]
    pub const fn new(path: PathBuf, records: Vec<RuleRecord>) -> Self {
        Self { path, records }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    #[must_use]
    pub fn records(&self) -> &[RuleRecord] {
        &self.records
    }

    #[must_use]
    pub fn overall(&self) -> OverallStatus {
        if self.records.iter().any(|r| r.outcome.is_fail()) {
            OverallStatus::Fail
        } else if self.records.iter().any(|r| r.outcome.is_pass()) {
            OverallStatus::Pass
        } else {
            OverallStatus::Skip
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleRecord> {
        self.records.iter().filter(|r| r.outcome.is_fail())
    }

    pub fn skips(&self) -> impl Iterator<Item = &RuleRecord> {
        self.records.iter().filter(|r| r.outcome.is_skip())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Ordered sequence of file reports for one validation run.
#[derive(Debug, Default)]
pub struct RunReport {
    reports: Vec<FileReport>,
}

impl RunReport {
    #[must_use]
    pub const fn new(reports: Vec<FileReport>) -> Self {
        Self { reports }
    }

    #[must_use]
    pub fn reports(&self) -> &[FileReport] {
        &self.reports
    }

    #[must_use]
    pub fn counts(&self) -> RunCounts {
        let mut counts = RunCounts {
            total: self.reports.len(),
            ..RunCounts::default()
        };
        for report in &self.reports {
            match report.overall() {
                OverallStatus::Pass => counts.passed += 1,
                OverallStatus::Fail => counts.failed += 1,
                OverallStatus::Skip => counts.skipped += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.reports
            .iter()
            .any(|report| report.overall() == OverallStatus::Fail)
    }

    /// The run's sole machine-readable output.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            crate::EXIT_VALIDATION_FAILED
        } else {
            crate::EXIT_SUCCESS
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
