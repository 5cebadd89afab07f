// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// An answer was rejected by a question's validator.
///
/// These are always recoverable: the collector reports them and asks the
/// same question again. They never propagate past the collector.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{input}' is not a valid semantic version (expected MAJOR.MINOR.PATCH)")]
    InvalidVersion { input: String },

    #[error("an author is required")]
    MissingAuthor,

    #[error("'{input}' is not in the expected format (e.g. Jane Doe <jane@example.com>)")]
    MalformedAuthor { input: String },

    #[error("'{email}' is not a valid email address")]
    InvalidEmail { email: String },

    #[error("'{input}' is not a valid SPDX license expression")]
    InvalidLicense { input: String, reason: String },
}

impl ValidationError {
    /// One-line hint shown next to the re-asked question.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::InvalidVersion { .. } => "Use a version like 0.1.0, 1.2.3-beta.1 or 2.0.0+build5",
            Self::MissingAuthor | Self::MalformedAuthor { .. } => {
                "Use the format: Name <email@example.com>"
            }
            Self::InvalidEmail { .. } => "The part inside <...> must contain an '@'",
            Self::InvalidLicense { .. } => {
                "Use an SPDX identifier (MIT, Apache-2.0) or expression (MIT OR Apache-2.0)"
            }
        }
    }
}

/// Root domain error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Duplicate output path in manifest: {path}")]
    DuplicatePath { path: String },

    #[error("Duplicate question key: {key}")]
    DuplicateQuestion { key: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Inclusion predicate references '{flag}', which is not a confirm question")]
    UnknownFlag { flag: String },

    #[error("Unknown validator '{name}'")]
    UnknownValidator { name: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(e) => vec![e.hint().into()],
            Self::InvalidProfile(msg) => vec![
                "Check your profile file".into(),
                format!("Details: {}", msg),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two manifest entries write to '{}'", path),
                "Each output path may appear at most once".into(),
            ],
            Self::UnknownFlag { flag } => vec![
                format!("Add a confirm question with key '{}'", flag),
                "Or change the entry's `when` to an existing flag".into(),
            ],
            Self::UnknownValidator { .. } => {
                vec!["Known validators: semver, author, spdx".into()]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::MissingRequiredField { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
