//! Error types for termflow.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! is [`TermflowError`]. Errors are raised while building stages (bad rule
//! tables, bad patterns, unreadable configuration); once items flow, stages
//! report problems by forwarding `WARN`/`ERR` commands instead.
//!
//! # Examples
//!
//! ```
//! use termflow::error::{Result, TermflowError};
//!
//! fn load() -> Result<()> {
//!     Err(TermflowError::config("rule table is empty"))
//! }
//!
//! assert_eq!(
//!     load().unwrap_err().to_string(),
//!     "Configuration error: rule table is empty"
//! );
//! ```

use std::io;

use thiserror::Error;

/// The main error type for termflow operations.
#[derive(Error, Debug)]
pub enum TermflowError {
    /// I/O errors (reading input or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (empty or malformed rule tables, bad patterns)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The pipeline already observed a fatal command and admits no more input
    #[error("Pipeline halted: {0}")]
    Halted(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors carried with context from the command line layer
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TermflowError.
pub type Result<T> = std::result::Result<T, TermflowError>;

impl TermflowError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TermflowError::Config(msg.into())
    }

    /// Create a new halted error.
    pub fn halted<S: Into<String>>(msg: S) -> Self {
        TermflowError::Halted(msg.into())
    }

    /// Whether this error stems from configuration rather than input.
    pub fn is_config(&self) -> bool {
        matches!(self, TermflowError::Config(_) | TermflowError::Json(_))
    }
}
