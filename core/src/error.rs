//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Drift between contract, registry and implementation is never an error; it is
//! data carried by the report. Only precondition violations end up here.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A primary input document could not be read.
    #[from(ignore)]
    #[display("Cannot read input '{path}': {reason}")]
    MissingInput {
        /// Path that was requested.
        path: String,
        /// Underlying failure.
        reason: String,
    },

    /// Invalid or unparsable configuration.
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
