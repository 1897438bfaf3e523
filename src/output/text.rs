use std::fmt::Write;

use crate::engine::{FileReport, OverallStatus, RunReport};
use crate::error::Result;

use super::ReportFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(status: OverallStatus) -> &'static str {
        match status {
            OverallStatus::Pass => "✓",
            OverallStatus::Fail => "✗",
            OverallStatus::Skip => "○",
        }
    }

    const fn status_label(status: OverallStatus) -> &'static str {
        match status {
            OverallStatus::Pass => "PASSED",
            OverallStatus::Fail => "FAILED",
            OverallStatus::Skip => "SKIPPED",
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_file(&self, report: &FileReport, output: &mut String) {
        let status = report.overall();
        let icon = Self::status_icon(status);
        let color = match status {
            OverallStatus::Pass => ansi::GREEN,
            OverallStatus::Fail => ansi::RED,
            OverallStatus::Skip => ansi::YELLOW,
        };
        let label = self.colorize(Self::status_label(status), color);

        let _ = writeln!(output, "{icon} {label}: {}", report.path().display());

        match status {
            OverallStatus::Fail => {
                for record in report.failures() {
                    let reason = record.outcome.reason().unwrap_or("");
                    let _ = writeln!(output, "   {}: {reason}", record.rule);
                }
            }
            OverallStatus::Skip => {
                for record in report.skips() {
                    let reason = record.outcome.reason().unwrap_or("");
                    let _ = writeln!(output, "   {}: {reason}", record.rule);
                }
            }
            OverallStatus::Pass => {
                if self.verbose >= 2 {
                    for record in report.records() {
                        let _ = writeln!(output, "   {}: ok", record.rule);
                    }
                }
            }
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let mut output = String::new();

        for file in report.reports() {
            match file.overall() {
                OverallStatus::Fail | OverallStatus::Skip => {
                    self.format_file(file, &mut output);
                    output.push('\n');
                }
                OverallStatus::Pass => {
                    // Passed files only appear in verbose mode
                    if self.verbose >= 1 {
                        self.format_file(file, &mut output);
                        output.push('\n');
                    }
                }
            }
        }

        let counts = report.counts();
        let passed = self.colorize(&counts.passed.to_string(), ansi::GREEN);
        let failed = self.colorize(&counts.failed.to_string(), ansi::RED);
        let skipped = self.colorize(&counts.skipped.to_string(), ansi::YELLOW);
        let _ = writeln!(
            output,
            "Summary: {} files checked, {passed} passed, {failed} failed, {skipped} skipped",
            counts.total
        );

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
