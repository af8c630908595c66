//! The validation result accumulator.
//!
//! Validation never stops at the first problem. Every check appends to a
//! single `ValidationResult` so callers see the full set of errors and
//! warnings from one pass, in the order the checks ran.

use serde_json::{json, Value};

/// Outcome of validating one policy document.
///
/// `valid` starts out `true` and flips to `false` on the first error. It is
/// never reset. Warnings are advisory and do not affect `valid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    /// A fresh, passing result with no messages.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A result carrying exactly one error.
    pub fn from_error(message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.add_error(message);
        result
    }

    /// Record an error. The result is invalid from now on.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    /// Record an advisory warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Snapshot as a plain `{valid, errors, warnings}` mapping for transport.
    pub fn as_dict(&self) -> Value {
        json!({
            "valid": self.valid,
            "errors": self.errors,
            "warnings": self.warnings,
        })
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}
