//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// The input document uses a construct the generator does not support.
    /// Fatal: no partial generation is attempted.
    #[from(ignore)]
    #[display("Unsupported input: {_0}")]
    Unsupported(String),

    /// An internal invariant was broken upstream. This is a bug, not an
    /// input problem.
    #[from(ignore)]
    #[display("Invariant violation: {_0}")]
    Invariant(String),

    /// Incompatible option combination, rejected before any document is read.
    #[from(ignore)]
    #[display("Configuration error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
