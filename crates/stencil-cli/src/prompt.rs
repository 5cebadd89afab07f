//! Interactive prompter on top of `dialoguer`.

use console::Term;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use owo_colors::OwoColorize;

use stencil_core::{
    application::{ApplicationError, ports::Prompter},
    domain::{Question, ValidationError},
    error::StencilResult,
};

/// Asks each question on the terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    term: Term,
    color: bool,
}

impl TerminalPrompter {
    pub fn new(color: bool) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
            color,
        }
    }
}

fn prompt_failed(question: &Question, err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::PromptFailed {
        question: question.key.clone(),
        reason: err.to_string(),
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, question: &Question, default: Option<&str>) -> StencilResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(question.message.as_str())
            .allow_empty(true);
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            input = input.default(default.to_string());
        }
        Ok(input
            .interact_text_on(&self.term)
            .map_err(|e| prompt_failed(question, e))?)
    }

    fn confirm(&self, question: &Question, default: bool) -> StencilResult<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(question.message.as_str())
            .default(default)
            .interact_on(&self.term)
            .map_err(|e| prompt_failed(question, e))?)
    }

    fn reject(&self, question: &Question, error: &ValidationError) -> StencilResult<()> {
        let line = if self.color {
            format!("  {} {}", error.to_string().red(), error.hint().dimmed())
        } else {
            format!("  {error} ({})", error.hint())
        };
        self.term
            .write_line(&line)
            .map_err(|e| prompt_failed(question, e))?;
        Ok(())
    }
}
