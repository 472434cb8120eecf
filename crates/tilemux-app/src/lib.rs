//! tilemux-app: the tilemux application.
//!
//! Combines tilemux-core (the box-tree engine) with the external
//! collaborators — YAML flattening, shell execution, signals, logging —
//! into the `tilemux` binary.

pub mod app;
pub mod cli;
pub mod flatten;
pub mod input;
pub mod logging;
pub mod runner;
