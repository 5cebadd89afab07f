//! Errors surfaced by the `stencil` binary.
//!
//! Core failures arrive as [`StencilError`] and keep their own suggestions;
//! this layer adds the problems only the CLI can have (bad destination,
//! unreadable config, unknown config key) and turns every error into a
//! message on stderr plus an exit status.

use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use stencil_core::error::{ErrorCategory as CoreCategory, StencilError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Destination '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// The config file could not be read, parsed or serialised.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("Unknown config key '{key}'")]
    UnknownConfigKey { key: String },

    /// Anything raised by `stencil-core` or an adapter.
    #[error("Generation failed: {0}")]
    Core(#[from] StencilError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Interactive prompting needs the `interactive` feature.
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

/// How an error is classified for exit status and log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotADirectory { path } => vec![
                format!("'{}' already exists as a file", path.display()),
                "Choose a different destination directory".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Check the config file (default location: {})",
                    crate::config::AppConfig::config_path().display()
                ),
                "Environment overrides look like STENCIL_DEFAULTS__LICENSE=MIT".into(),
                "`stencil init --force` rewrites the file with defaults".into(),
            ],
            Self::UnknownConfigKey { .. } => std::iter::once("Known keys:".to_string())
                .chain(crate::config::KEYS.iter().map(|k| format!("  \u{2022} {k}")))
                .collect(),
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Make sure the parent directory exists".into(),
            ],
            Self::FeatureNotAvailable { feature } => vec![
                format!("Rebuild with `--features {feature}`"),
                "Or answer from a file: stencil new --answers answers.toml".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotADirectory { .. } | Self::UnknownConfigKey { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// 2 user error, 3 not found, 4 configuration, 1 anything else.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// The full stderr report. The cause chain is shown only when `verbose`.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, f: fn(&str) -> String| {
            if color { f(text) } else { text.to_owned() }
        };

        let mut out = String::new();
        let headline = if color {
            format!("{} {}", "\u{2717} Error:".red().bold(), self.to_string().red())
        } else {
            format!("Error: {self}")
        };
        let _ = writeln!(out, "\n{headline}");

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let line = format!("Caused by: {err}");
                let _ = writeln!(out, "  {}", paint(&line, |s| s.dimmed().to_string()));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let title = paint("Suggestions:", |s| s.yellow().bold().to_string());
            let _ = writeln!(out, "\n{title}");
            for suggestion in suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let hint = paint("Use -v / --verbose for more details.", |s| {
                s.dimmed().to_string()
            });
            let _ = writeln!(out, "\n{hint}");
        }
        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(code = self.exit_code(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(code = self.exit_code(), "{self}")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!("caused by: {source}");
        }
    }
}

/// Attach a message to an I/O failure at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use stencil_core::application::ApplicationError;

    fn core(err: ApplicationError) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn unknown_key_lists_known_keys() {
        let err = CliError::UnknownConfigKey {
            key: "defaults.lang".into(),
        };
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("defaults.license")));
        assert!(suggestions.iter().any(|s| s.contains("templates.dir")));
    }

    #[test]
    fn missing_feature_points_at_answers_file() {
        let err = CliError::FeatureNotAvailable {
            feature: "interactive",
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--answers")));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn core_suggestions_pass_through() {
        let err = core(ApplicationError::TemplateMissing {
            template: "_gulpfile.js".into(),
            reason: "not in any store".into(),
        });
        assert!(err.suggestions().iter().any(|s| s.contains("_gulpfile.js")));
    }

    #[test]
    fn exit_codes_follow_categories() {
        let not_a_dir = CliError::NotADirectory {
            path: PathBuf::from("x"),
        };
        assert_eq!(not_a_dir.exit_code(), 2);

        let missing = core(ApplicationError::TemplateMissing {
            template: "_README.md".into(),
            reason: "gone".into(),
        });
        assert_eq!(missing.exit_code(), 3);

        let prompt = core(ApplicationError::PromptFailed {
            question: "author".into(),
            reason: "no answer".into(),
        });
        assert_eq!(prompt.exit_code(), 2);

        let profile = core(ApplicationError::ProfileLoad {
            path: "p.toml".into(),
            reason: "bad".into(),
        });
        assert_eq!(profile.exit_code(), 4);

        let config = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        assert_eq!(config.exit_code(), 4);

        let write = core(ApplicationError::WriteFailure {
            path: "out/package.json".into(),
            reason: "read-only".into(),
        });
        assert_eq!(write.exit_code(), 1);

        let io = CliError::from(io::Error::other("e"));
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn plain_report_has_headline_suggestions_and_hint() {
        let err = CliError::NotADirectory {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.render(false, false);
        assert!(s.contains("Error: Destination '/tmp/x' is not a directory"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_report_shows_cause_and_drops_hint() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.render(true, false);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn with_cli_context_replaces_the_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli = result.with_cli_context(|| "reading config");
        assert!(
            matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config")
        );
    }
}
