//! CLI argument parsing for tilemux.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tilemux - shell-command dashboards in the terminal.
#[derive(Parser, Debug)]
#[command(name = "tilemux", version, about)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the configured documents and run the named layout.
    #[command(alias = "start_layout")]
    StartLayout {
        /// Id of the layout to run.
        layout_id: String,

        /// Configuration document(s) to load. Repeatable.
        #[arg(short, long = "config", value_name = "FILE", required = true)]
        config: Vec<PathBuf>,

        /// Border color used to mark the focused box.
        #[arg(long, value_name = "NAME", default_value = "red")]
        focus_color: String,
    },
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
