//! The one error type the core hands to its callers.
//!
//! Domain and application errors are wrapped unchanged so callers can still
//! match on them; `suggestions()` and `category()` drive the CLI report.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, ValidationError};

/// Root error type for Stencil Core operations.
#[derive(Debug, Error, Clone)]
pub enum StencilError {
    /// Errors from the domain layer (invalid profiles, rejected answers).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (missing templates, write failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl From<ValidationError> for StencilError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(DomainError::Validation(err))
    }
}

impl StencilError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Try: stencil config path to find the active config file".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn validation_errors_lift_into_domain() {
        let err: StencilError = ValidationError::MissingAuthor.into();
        assert!(matches!(
            err,
            StencilError::Domain(DomainError::Validation(ValidationError::MissingAuthor))
        ));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn missing_template_is_not_found() {
        let err: StencilError = ApplicationError::TemplateMissing {
            template: "gulpfile.js".into(),
            reason: "not in store".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("gulpfile.js")));
    }

    #[test]
    fn write_failure_mentions_path() {
        let err: StencilError = ApplicationError::WriteFailure {
            path: PathBuf::from("out/package.json"),
            reason: "read-only".into(),
        }
        .into();
        assert!(err.to_string().contains("out/package.json"));
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
