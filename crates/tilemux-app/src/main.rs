//! tilemux binary entry point.

use std::process::ExitCode;

use tilemux_core::error::CoreError;

use tilemux_app::app::run_start_layout;
use tilemux_app::cli::{Cli, Command};
use tilemux_app::logging;

fn main() -> ExitCode {
    let _log_guard = logging::init();
    let cli = Cli::parse_args();

    match cli.command {
        Command::StartLayout {
            layout_id,
            config,
            focus_color,
        } => match run_start_layout(&layout_id, &config, &focus_color) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                // The terminal is already restored; fatal errors go to
                // stderr without a stack trace.
                eprintln!("tilemux: {e}");
                match e {
                    CoreError::Config(_) => ExitCode::from(1),
                    _ => ExitCode::from(2),
                }
            }
        },
    }
}
