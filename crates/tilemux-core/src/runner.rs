//! Process runner contract.
//!
//! The engine never spawns processes itself; it submits shell command
//! strings to a [`ProcessRunner`] and blocks for the captured result.
//! The real shell-backed implementation lives in the application crate;
//! tests substitute stubs.

use crate::error::Result;

/// Captured result of one shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    /// Everything the command wrote to stdout. Stderr is discarded.
    pub stdout: String,
    /// The command's exit code.
    pub exit_code: i32,
    /// True if the runner gave up waiting; `stdout` may be truncated.
    pub timed_out: bool,
}

/// Synchronous shell command execution.
///
/// Commands run in a shell with the engine process's working directory
/// and environment. The call blocks up to the runner's ceiling (default
/// 2 s); on timeout the result carries `timed_out`.
pub trait ProcessRunner {
    /// Run one shell command and capture its output.
    fn run(&self, command: &str) -> Result<RunOutput>;
}
