//! Application layer errors.
//!
//! These are the fatal errors of a run. Answer validation failures are
//! `ValidationError`s from `crate::domain` and never reach this layer.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that abort a run.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// An included manifest entry names a template the store does not have.
    #[error("Template '{template}' is missing: {reason}")]
    TemplateMissing { template: String, reason: String },

    /// Template text could not be rendered.
    #[error("Failed to render template '{template}': {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Writing to the destination tree failed.
    #[error("Failed to write {path}: {reason}")]
    WriteFailure { path: PathBuf, reason: String },

    /// The prompt surface could not supply an answer.
    #[error("Could not read an answer for '{question}': {reason}")]
    PromptFailed { question: String, reason: String },

    /// The sticky preference store could not be read or written.
    #[error("Preference store error: {reason}")]
    PreferenceStore { reason: String },

    /// A profile file could not be read or parsed.
    #[error("Failed to load profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    /// A post-generation hook failed.
    #[error("Hook '{hook}' failed: {reason}")]
    HookFailed { hook: String, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateMissing { template, .. } => vec![
                format!("No template named '{}' in the template store", template),
                "Check --templates / templates.dir points at the right directory".into(),
                "Try: stencil list to see which templates the profile needs".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the placeholders in '{}'", template),
                "Placeholders look like {{name}} or {{pascal_case name}}".into(),
            ],
            Self::WriteFailure { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure were left in place".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run in an interactive terminal, or pass --answers FILE".into(),
            ],
            Self::ProfileLoad { path, .. } => vec![
                format!("Check the profile file at {}", path.display()),
                "Try: stencil list --profile FILE to validate it".into(),
            ],
            Self::HookFailed { hook, .. } => vec![
                format!("Run '{}' manually inside the project", hook),
                "Or pass --skip-install".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::ProfileLoad { .. } => ErrorCategory::Configuration,
            Self::PromptFailed { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. }
            | Self::WriteFailure { .. }
            | Self::PreferenceStore { .. }
            | Self::HookFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
