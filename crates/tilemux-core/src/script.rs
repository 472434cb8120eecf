//! Event-script storage format and execution.
//!
//! A box event's script is one or more shell commands joined with an
//! internal separator. The separator is an opaque storage token; it never
//! appears in user configuration.

use crate::error::{CoreError, Result};
use crate::runner::ProcessRunner;

/// Internal token joining the commands of a stored script.
pub const SCRIPT_SEPARATOR: &str = "____";

/// Join commands into the stored script form.
pub fn join_commands(commands: &[String]) -> String {
    commands.join(SCRIPT_SEPARATOR)
}

/// Split a stored script back into its commands.
pub fn split_script(script: &str) -> Vec<&str> {
    script.split(SCRIPT_SEPARATOR).collect()
}

/// Run a stored script: each command in order, stdouts concatenated with
/// newlines.
///
/// A non-zero exit or a runner timeout aborts the script with
/// [`CoreError::Script`]; callers keep the box's previous body in that
/// case.
pub fn run_script(runner: &dyn ProcessRunner, script: &str) -> Result<String> {
    let mut outputs = Vec::new();
    for command in split_script(script) {
        let result = runner.run(command)?;
        if result.timed_out {
            return Err(CoreError::Script(format!("command timed out: {command}")));
        }
        if result.exit_code != 0 {
            return Err(CoreError::Script(format!(
                "command exited with status {}: {command}",
                result.exit_code
            )));
        }
        outputs.push(result.stdout);
    }
    Ok(outputs.join("\n"))
}
