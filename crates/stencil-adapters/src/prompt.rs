//! Non-interactive prompter fed from an answers file.
//!
//! ```toml
//! name = "demo"
//! author = "Jane Doe <jane@example.com>"
//! gitlabci = false
//! ```
//!
//! Keys that are absent take the question's default. Answers still pass
//! through the collector's validators; a rejected answer aborts the run
//! because there is nobody to ask again.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use tracing::debug;

use stencil_core::{
    application::{ApplicationError, ports::Prompter},
    domain::{Question, ValidationError},
    error::{StencilError, StencilResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum Scripted {
    Flag(bool),
    Text(String),
}

/// Prompter that answers from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: HashMap<String, Scripted>,
}

impl ScriptedPrompter {
    /// A prompter that takes every default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.answers.insert(key.into(), Scripted::Text(value.into()));
        self
    }

    pub fn flag(mut self, key: impl Into<String>, value: bool) -> Self {
        self.answers.insert(key.into(), Scripted::Flag(value));
        self
    }

    /// Parse a TOML answers table.
    pub fn from_toml_str(raw: &str) -> StencilResult<Self> {
        let answers: HashMap<String, Scripted> =
            toml::from_str(raw).map_err(|e| StencilError::Configuration {
                message: format!("invalid answers file: {e}"),
            })?;
        Ok(Self { answers })
    }

    /// Load a TOML answers file.
    pub fn from_path(path: &Path) -> StencilResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| StencilError::Configuration {
            message: format!("failed to read answers file {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}

fn prompt_failed(question: &Question, reason: impl Into<String>) -> StencilError {
    ApplicationError::PromptFailed {
        question: question.key.clone(),
        reason: reason.into(),
    }
    .into()
}

impl Prompter for ScriptedPrompter {
    fn input(&self, question: &Question, default: Option<&str>) -> StencilResult<String> {
        match self.answers.get(&question.key) {
            Some(Scripted::Text(text)) => Ok(text.clone()),
            Some(Scripted::Flag(_)) => Err(prompt_failed(question, "expected a string answer")),
            None if default.is_some() => {
                debug!(key = %question.key, "No scripted answer, taking default");
                Ok(String::new())
            }
            None => Err(prompt_failed(question, "no answer given and no default")),
        }
    }

    fn confirm(&self, question: &Question, default: bool) -> StencilResult<bool> {
        match self.answers.get(&question.key) {
            Some(Scripted::Flag(flag)) => Ok(*flag),
            Some(Scripted::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" | "true" => Ok(true),
                "n" | "no" | "false" => Ok(false),
                _ => Err(prompt_failed(question, format!("'{text}' is not yes or no"))),
            },
            None => Ok(default),
        }
    }

    fn reject(&self, question: &Question, error: &ValidationError) -> StencilResult<()> {
        Err(prompt_failed(question, error.to_string()))
    }
}
