#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use swagger_http_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper (output could not be written).
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Conversion failure reported by the core library.
    #[display("{}", _0)]
    App(AppError),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
