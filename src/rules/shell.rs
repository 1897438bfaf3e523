use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::decoder::Document;

use super::{Rule, RuleOutcome};

/// Checks that the script opens with a `#!` interpreter line.
pub struct HasShebang;

impl Rule for HasShebang {
    fn name(&self) -> &str {
        "shell-shebang"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        match doc.lines().next() {
            Some(first) if first.starts_with("#!") => RuleOutcome::Pass,
            Some(_) => RuleOutcome::fail("first line is not a `#!` shebang"),
            None => RuleOutcome::fail("file is empty"),
        }
    }
}

/// Checks that the script has the executable permission bit set.
/// Not meaningful outside unix; reported as a skip there.
pub struct ExecutableBit;

impl Rule for ExecutableBit {
    fn name(&self) -> &str {
        "shell-executable-bit"
    }

    #[cfg(unix)]
    fn check(&self, doc: &Document) -> RuleOutcome {
        use std::os::unix::fs::PermissionsExt;

        match std::fs::metadata(doc.path()) {
            Ok(metadata) => {
                if metadata.permissions().mode() & 0o111 == 0 {
                    RuleOutcome::fail("executable permission bit is not set")
                } else {
                    RuleOutcome::Pass
                }
            }
            Err(e) => RuleOutcome::skip(format!("could not read file metadata: {e}")),
        }
    }

    #[cfg(not(unix))]
    fn check(&self, _doc: &Document) -> RuleOutcome {
        RuleOutcome::skip("executable bits are not tracked on this platform")
    }
}

/// Checks that the script contains at least one executable command beyond
/// the shebang. A comments-only script fails.
pub struct HasCommands;

impl Rule for HasCommands {
    fn name(&self) -> &str {
        "shell-has-commands"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let has_command = doc
            .lines()
            .skip(1)
            .map(str::trim)
            .any(|line| !line.is_empty() && !line.starts_with('#'));

        if has_command {
            RuleOutcome::Pass
        } else {
            RuleOutcome::fail("no executable commands")
        }
    }
}

/// Runs `bash -n` against the script, bounded by a wall-clock timeout.
///
/// The syntax check is best-effort: a missing interpreter or a timeout is
/// reported as a skip, never a failure.
pub struct BashSyntax {
    timeout: Duration,
}

impl BashSyntax {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn wait_bounded(&self, child: &mut std::process::Child) -> std::io::Result<Option<i32>> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status.code().unwrap_or(-1)));
            }
            if Instant::now() >= deadline {
                child.kill().ok();
                child.wait().ok();
                return Ok(None);
            }
            std::thread::sleep(Duration::from_millis(25));
        }
    }
}

impl Rule for BashSyntax {
    fn name(&self) -> &str {
        "shell-bash-syntax"
    }

    fn check(&self, doc: &Document) -> RuleOutcome {
        let spawned = Command::new("bash")
            .arg("-n")
            .arg(doc.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return RuleOutcome::skip("bash interpreter not available");
            }
            Err(e) => return RuleOutcome::skip(format!("could not run bash: {e}")),
        };

        match self.wait_bounded(&mut child) {
            Ok(Some(0)) => RuleOutcome::Pass,
            Ok(Some(_)) => {
                let mut stderr = String::new();
                if let Some(mut pipe) = child.stderr.take() {
                    pipe.read_to_string(&mut stderr).ok();
                }
                let detail = stderr.lines().next().unwrap_or("syntax error");
                RuleOutcome::fail(format!("bash -n reported: {detail}"))
            }
            Ok(None) => RuleOutcome::skip(format!(
                "bash -n did not finish within {}s",
                self.timeout.as_secs()
            )),
            Err(e) => RuleOutcome::skip(format!("could not wait for bash: {e}")),
        }
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
