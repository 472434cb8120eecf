//! Opt-in file logging.
//!
//! Set `TILEMUX_LOG` to any non-empty value to append tracing events to
//! `tilemux.log` in the working directory. Log output never goes to the
//! terminal, which the engine owns while running. `RUST_LOG` filters as
//! usual; the default level is `debug` so script failures are captured.

use std::fs::OpenOptions;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize file logging if `TILEMUX_LOG` is set.
///
/// Returns a guard that must stay alive for the duration of the
/// process; dropping it flushes and closes the log file. Returns `None`
/// (and logs nothing) when the variable is unset or the file cannot be
/// opened.
pub fn init() -> Option<WorkerGuard> {
    if std::env::var("TILEMUX_LOG").unwrap_or_default().is_empty() {
        return None;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("tilemux.log")
        .ok()?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .with_writer(writer)
        .with_ansi(false);

    match subscriber.try_init() {
        Ok(()) => Some(guard),
        // A subscriber is already installed; drop the guard so the
        // writer shuts down.
        Err(_) => None,
    }
}
