//! Per-code validation outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::code::FormatError;

/// Why a code did not validate.
///
/// The `Display` text is what ends up in [`ValidationResult::error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// The token is not a well-formed HSN code.
    #[error("Invalid format: {0}")]
    Format(#[from] FormatError),
    /// The code is absent but one of its ancestors exists.
    #[error("Code not found, but parent '{parent}' exists")]
    ParentOnly { parent: String },
    /// Neither the code nor any ancestor exists.
    #[error("Code not found and no valid parent exists")]
    NotFound,
}

/// Result of validating one input token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The token as given (trimmed).
    pub input_code: String,
    /// Whether the code exists in the reference table.
    pub valid: bool,
    /// The code itself when valid, otherwise the nearest existing ancestor.
    pub nearest: Option<String>,
    /// Description of `nearest`.
    pub description: Option<String>,
    /// Human-readable reason when not valid.
    pub error: Option<String>,
}

impl ValidationResult {
    /// A code that exists in the table.
    pub fn found(code: impl Into<String>, description: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            input_code: code.clone(),
            valid: true,
            nearest: Some(code),
            description: Some(description.into()),
            error: None,
        }
    }

    /// A code that failed validation.
    pub fn failed(input: impl Into<String>, error: &CodeError) -> Self {
        Self {
            input_code: input.into(),
            valid: false,
            nearest: None,
            description: None,
            error: Some(error.to_string()),
        }
    }

    /// Attach the nearest existing ancestor.
    pub fn with_nearest(mut self, code: impl Into<String>, description: impl Into<String>) -> Self {
        self.nearest = Some(code.into());
        self.description = Some(description.into());
        self
    }

    /// Whether the token failed the format check.
    pub fn is_format_error(&self) -> bool {
        self.error
            .as_deref()
            .is_some_and(|e| e.starts_with("Invalid format"))
    }
}
