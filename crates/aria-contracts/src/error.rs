//! Error types for loading, parsing and rendering ARIA policy documents.
//!
//! Validation itself never fails: rule violations are collected into a
//! `ValidationResult`. These variants cover everything that happens around
//! validation (reading the document, decoding its format, writing outputs).

use thiserror::Error;

/// The unified error type for ARIA.
#[derive(Debug, Error)]
pub enum AriaError {
    /// The policy document does not exist at the given locator.
    #[error("resource not found: {locator}")]
    NotFound { locator: String },

    /// The document exists but could not be read.
    #[error("failed to read '{locator}': {reason}")]
    ReadFailed { locator: String, reason: String },

    /// The document contents are not valid for the declared format.
    ///
    /// `reason` carries the parser's own message, including line/column
    /// context when the parser provides it.
    #[error("Invalid {format} format: {reason}")]
    ParseFailed { format: String, reason: String },

    /// A format name supplied on the command line is not recognised.
    #[error("unsupported document format '{name}' (expected yaml, toml or json)")]
    UnsupportedFormat { name: String },

    /// A generated artifact (e.g. an IDE rules file) could not be written.
    #[error("failed to write '{target}': {reason}")]
    WriteFailed { target: String, reason: String },
}

/// Convenience alias used throughout the ARIA crates.
pub type AriaResult<T> = Result<T, AriaError>;
