//! Shell-backed process runner.

use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use tracing::debug;

use tilemux_core::error::Result;
use tilemux_core::runner::{ProcessRunner, RunOutput};

/// Default ceiling on how long one command may run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs commands through `sh -c`, capturing stdout and discarding
/// stderr.
///
/// Each call blocks up to the configured ceiling. On timeout the result
/// carries `timed_out` and the child is left to a detached waiter
/// thread, which reaps it whenever it exits; there is no facility to
/// interrupt a running script.
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    /// Create a runner with the default 2 s ceiling.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a runner with a custom ceiling.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<RunOutput> {
        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let (tx, rx) = bounded(1);
        thread::spawn(move || {
            let _ = tx.send(child.wait_with_output());
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(output)) => Ok(RunOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                exit_code: output.status.code().unwrap_or(-1),
                timed_out: false,
            }),
            Ok(Err(e)) => Err(e.into()),
            Err(RecvTimeoutError::Timeout) => {
                debug!(command, timeout_ms = self.timeout.as_millis() as u64, "command timed out");
                Ok(RunOutput {
                    stdout: String::new(),
                    exit_code: -1,
                    timed_out: true,
                })
            }
            Err(RecvTimeoutError::Disconnected) => Ok(RunOutput {
                stdout: String::new(),
                exit_code: -1,
                timed_out: false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let runner = ShellRunner::new();
        let out = runner.run("echo WORLD").ok();
        assert_eq!(
            out,
            Some(RunOutput {
                stdout: "WORLD\n".into(),
                exit_code: 0,
                timed_out: false,
            })
        );
    }

    #[test]
    fn reports_exit_code() {
        let runner = ShellRunner::new();
        let out = runner.run("exit 3").ok();
        assert_eq!(out.map(|o| o.exit_code), Some(3));
    }

    #[test]
    fn stderr_is_discarded() {
        let runner = ShellRunner::new();
        let out = runner.run("echo visible; echo hidden >&2").ok();
        assert_eq!(out.map(|o| o.stdout), Some("visible\n".into()));
    }

    #[test]
    fn shell_features_available() {
        let runner = ShellRunner::new();
        let out = runner.run("printf 'a b' | tr ' ' '\\n'").ok();
        assert_eq!(out.map(|o| o.stdout), Some("a\nb".into()));
    }

    #[test]
    fn timeout_reports_truncation() {
        let runner = ShellRunner::with_timeout(Duration::from_millis(50));
        let out = runner.run("sleep 5").ok();
        assert_eq!(out.map(|o| o.timed_out), Some(true));
    }
}
