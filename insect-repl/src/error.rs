//! Error types for the REPL

use rustyline::error::ReadlineError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for REPL operations
pub type ReplResult<T> = Result<T, ReplError>;

/// REPL-specific errors
#[derive(Debug, Error)]
pub enum ReplError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Readline error
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),

    /// Malformed command line
    #[error("{0}")]
    Usage(String),

    /// A line of the startup file failed to evaluate
    #[error("{message}")]
    Startup { path: PathBuf, message: String },

    /// Clipboard error
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// History error
    #[error("History error: {0}")]
    History(String),
}
