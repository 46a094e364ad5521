//! External command execution
//!
//! Install steps are opaque strings handed to the platform shell verbatim.
//! They may contain shell operators; manifests are assumed to come from a
//! trusted or reviewed source, so nothing here escapes or sandboxes them.
//!
//! The runner never fails as such: it always returns an outcome, and the
//! decision whether a failed command stops an install belongs to the
//! orchestrator. Version probes are the one time-bounded execution path;
//! install and fetch commands run unbounded since installs can legitimately
//! take a long time.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

/// Bound on version-style probes
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of running one command
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub succeeded: bool,
    /// Combined stdout/stderr, or the dry-run echo
    pub output: String,
}

/// Runs shell commands, with dry-run support.
///
/// In dry-run mode nothing is ever executed; the outcome echoes what would
/// have run and reports success, so callers need no dry-run branches.
#[derive(Debug, Clone, Copy)]
pub struct CommandRunner {
    dry_run: bool,
}

impl CommandRunner {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Run a command string through the platform shell in `working_dir`.
    pub fn run(&self, command: &str, working_dir: &Path) -> RunOutcome {
        if self.dry_run {
            return RunOutcome {
                succeeded: true,
                output: format!("[DRY RUN] would run: {}", command),
            };
        }

        debug!(cwd = %working_dir.display(), "running: {}", command);

        match shell_command(command).current_dir(working_dir).output() {
            Ok(output) => {
                let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr);
                if !stderr.is_empty() {
                    if !combined.is_empty() && !combined.ends_with('\n') {
                        combined.push('\n');
                    }
                    combined.push_str(&stderr);
                }
                RunOutcome {
                    succeeded: output.status.success(),
                    output: combined,
                }
            }
            Err(e) => RunOutcome {
                succeeded: false,
                output: format!("failed to spawn shell: {}", e),
            },
        }
    }

    /// Run a version-style probe with a bounded timeout.
    ///
    /// Returns the trimmed first stdout line on a zero exit (possibly empty
    /// when the program prints nothing). Spawn failure, nonzero exit, or
    /// timeout all resolve to `None`; probes never raise.
    pub fn probe(program: &str, args: &[&str], timeout: Duration) -> Option<String> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    if !status.success() {
                        return None;
                    }
                    let mut output = String::new();
                    if let Some(mut stdout) = child.stdout.take() {
                        stdout.read_to_string(&mut output).ok()?;
                    }
                    return Some(output.lines().next().unwrap_or("").trim().to_string());
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        debug!("probe timed out: {} {:?}", program, args);
                        let _ = child.kill();
                        let _ = child.wait();
                        return None;
                    }
                    std::thread::sleep(Duration::from_millis(50));
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dry_run_executes_nothing() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new(true);

        let outcome = runner.run("echo made > marker.txt", dir.path());
        assert!(outcome.succeeded);
        assert!(outcome.output.contains("[DRY RUN]"));
        assert!(outcome.output.contains("marker.txt"));
        assert!(!dir.path().join("marker.txt").exists());
    }

    #[test]
    fn test_run_captures_output_and_status() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new(false);

        let ok = runner.run("echo hello", dir.path());
        assert!(ok.succeeded);
        assert!(ok.output.contains("hello"));

        let failed = runner.run("exit 3", dir.path());
        assert!(!failed.succeeded);
    }

    #[test]
    fn test_run_supports_shell_operators() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new(false);

        let outcome = runner.run("echo one && echo two", dir.path());
        assert!(outcome.succeeded);
        assert!(outcome.output.contains("one"));
        assert!(outcome.output.contains("two"));
    }

    #[test]
    fn test_run_in_working_dir() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new(false);

        let outcome = runner.run("echo content > made-here.txt", dir.path());
        assert!(outcome.succeeded);
        assert!(dir.path().join("made-here.txt").exists());
    }

    #[test]
    fn test_run_missing_working_dir_is_failure_not_panic() {
        let runner = CommandRunner::new(false);
        let outcome = runner.run("echo hi", Path::new("/nonexistent/toolshed-test"));
        assert!(!outcome.succeeded);
    }

    #[test]
    fn test_probe_missing_binary() {
        assert_eq!(
            CommandRunner::probe("toolshed-no-such-binary", &["--version"], PROBE_TIMEOUT),
            None
        );
    }

    #[test]
    fn test_probe_nonzero_exit() {
        assert_eq!(
            CommandRunner::probe("sh", &["-c", "exit 1"], PROBE_TIMEOUT),
            None
        );
    }

    #[test]
    fn test_probe_first_line() {
        let version = CommandRunner::probe(
            "sh",
            &["-c", "echo line-one; echo line-two"],
            PROBE_TIMEOUT,
        );
        assert_eq!(version.as_deref(), Some("line-one"));
    }

    #[test]
    fn test_probe_timeout_kills_child() {
        let start = Instant::now();
        let result = CommandRunner::probe("sleep", &["30"], Duration::from_millis(300));
        assert_eq!(result, None);
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
