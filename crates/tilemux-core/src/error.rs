//! Error types for tilemux-core.

use std::io;

/// Error type for tilemux-core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal operation failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Configuration document is malformed or incomplete.
    #[error("config error: {0}")]
    Config(String),

    /// Geometry is out of range or unresolvable.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Layout store operation failed.
    #[error("store error: {0}")]
    Store(String),

    /// Event script execution failed.
    #[error("script error: {0}")]
    Script(String),
}

/// Result type alias for tilemux-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
