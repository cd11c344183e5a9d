//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Load errors (`Io`, `MalformedDocument`, `VersionMismatch`) stop processing
//! before any output exists. `Decode` and `CyclicReference` abort a dump midway.
//! Dangling references and unknown types are not errors at all.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (input file unreadable).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input is not valid JSON/YAML, or its top level is not a document.
    #[from(ignore)]
    #[display("Malformed Document: {_0}")]
    MalformedDocument(String),

    /// The `swagger` field does not carry the supported version.
    #[from(ignore)]
    #[display("Unsupported swagger version: expected \"2.0\", found {_0}")]
    VersionMismatch(String),

    /// A schema node could not be decoded into the shape its consumer expects.
    #[from(ignore)]
    #[display("Decode Error ({context}): {message}")]
    Decode {
        /// What was being decoded, e.g. `parameter` or `path item '/pets'`.
        context: String,
        /// Underlying parser message.
        message: String,
    },

    /// A reference path was entered again while it was still being synthesized.
    #[from(ignore)]
    #[display("Cyclic Reference: {_0}")]
    CyclicReference(String),
}

impl AppError {
    /// Builds a `Decode` error from any displayable cause.
    pub fn decode(context: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        AppError::Decode {
            context: context.into(),
            message: cause.to_string(),
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
