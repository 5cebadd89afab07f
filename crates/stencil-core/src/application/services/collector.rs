//! Collector - turns a question set into a validated answer set.
//!
//! Questions are asked strictly in order. A text answer is trimmed, an empty
//! answer takes the default, and the result must pass the question's
//! validator; rejected answers are reported through the prompter and the
//! same question is asked again. Validation errors never leave this module.

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::{PreferenceStore, Prompter},
    domain::{
        AnswerSet, AnswerValue, DefaultValue, DomainValidator, Question, QuestionKind,
        QuestionSet,
    },
    error::StencilResult,
};

/// Inputs that shape defaults for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Final path segment of the destination directory.
    pub directory_name: String,
}

impl CollectOptions {
    pub fn new(directory_name: impl Into<String>) -> Self {
        Self {
            directory_name: directory_name.into(),
        }
    }
}

/// Asks questions through a [`Prompter`], remembering sticky flags in a
/// [`PreferenceStore`].
pub struct Collector<'a> {
    prompter: &'a dyn Prompter,
    preferences: &'a dyn PreferenceStore,
}

impl<'a> Collector<'a> {
    pub fn new(prompter: &'a dyn Prompter, preferences: &'a dyn PreferenceStore) -> Self {
        Self {
            prompter,
            preferences,
        }
    }

    /// Ask every question and return the accepted answers.
    #[instrument(skip_all, fields(questions = questions.len()))]
    pub fn collect(
        &self,
        questions: &QuestionSet,
        options: &CollectOptions,
    ) -> StencilResult<AnswerSet> {
        let mut answers = AnswerSet::new();

        for question in questions.iter() {
            let value = match question.kind {
                QuestionKind::Input => AnswerValue::Text(self.ask_text(question, options)?),
                QuestionKind::Confirm => AnswerValue::Flag(self.ask_flag(question)?),
            };
            debug!(key = %question.key, value = %value, "Accepted answer");
            answers.insert(question.key.clone(), value);
        }

        Ok(answers)
    }

    fn ask_text(&self, question: &Question, options: &CollectOptions) -> StencilResult<String> {
        let default = text_default(question, options);

        loop {
            let raw = self.prompter.input(question, default.as_deref())?;
            let trimmed = raw.trim();
            let answer = if trimmed.is_empty() {
                default.clone().unwrap_or_default()
            } else {
                trimmed.to_string()
            };

            let Some(validator) = question.validator else {
                return Ok(answer);
            };

            match DomainValidator::validate_answer(validator, &answer) {
                Ok(()) => return Ok(answer),
                Err(err) => {
                    debug!(key = %question.key, error = %err, "Answer rejected");
                    self.prompter.reject(question, &err)?;
                }
            }
        }
    }

    fn ask_flag(&self, question: &Question) -> StencilResult<bool> {
        let configured = match question.default {
            Some(DefaultValue::Flag(flag)) => flag,
            _ => false,
        };
        let default = if question.sticky {
            self.preferences.get(&question.key).unwrap_or(configured)
        } else {
            configured
        };

        let value = self.prompter.confirm(question, default)?;

        if question.sticky {
            // Losing a remembered default is not worth failing the run.
            if let Err(err) = self.preferences.set(&question.key, value) {
                warn!(key = %question.key, error = %err, "Could not remember answer");
            }
        }
        Ok(value)
    }
}

fn text_default(question: &Question, options: &CollectOptions) -> Option<String> {
    match &question.default {
        Some(DefaultValue::Text(text)) => Some(text.clone()),
        Some(DefaultValue::DirectoryName) => Some(options.directory_name.clone()),
        _ => None,
    }
}
