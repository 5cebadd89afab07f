use std::collections::HashSet;

use crate::domain::{
    error::DomainError,
    value_objects::{AnswerValidator, QuestionKind},
};

/// Where a question's default answer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Text(String),
    Flag(bool),
    /// Final path segment of the directory being generated into.
    DirectoryName,
}

/// One prompt in the question set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub key: String,
    pub message: String,
    pub kind: QuestionKind,
    pub default: Option<DefaultValue>,
    pub validator: Option<AnswerValidator>,
    /// Remember the answer and offer it as the default next time.
    pub sticky: bool,
}

impl Question {
    pub fn input(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            kind: QuestionKind::Input,
            default: None,
            validator: None,
            sticky: false,
        }
    }

    pub fn confirm(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: QuestionKind::Confirm,
            ..Self::input(key, message)
        }
    }

    pub fn default_text(mut self, text: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Text(text.into()));
        self
    }

    pub fn default_flag(mut self, flag: bool) -> Self {
        self.default = Some(DefaultValue::Flag(flag));
        self
    }

    pub fn default_directory_name(mut self) -> Self {
        self.default = Some(DefaultValue::DirectoryName);
        self
    }

    pub fn validator(mut self, validator: AnswerValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    pub fn is_confirm(&self) -> bool {
        self.kind == QuestionKind::Confirm
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.key.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "key" });
        }
        let default_fits = match (&self.kind, &self.default) {
            (_, None) => true,
            (QuestionKind::Confirm, Some(DefaultValue::Flag(_))) => true,
            (QuestionKind::Input, Some(DefaultValue::Text(_) | DefaultValue::DirectoryName)) => {
                true
            }
            _ => false,
        };
        if !default_fits {
            return Err(DomainError::InvalidProfile(format!(
                "question '{}' has a default that does not match its kind ({})",
                self.key, self.kind
            )));
        }
        if self.is_confirm() && self.validator.is_some() {
            return Err(DomainError::InvalidProfile(format!(
                "confirm question '{}' cannot have a validator",
                self.key
            )));
        }
        if self.sticky && !self.is_confirm() {
            return Err(DomainError::InvalidProfile(format!(
                "only confirm questions can be sticky ('{}' is {})",
                self.key, self.kind
            )));
        }
        Ok(())
    }
}

/// Ordered list of questions. Asked front to back, never reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The complete question set: project metadata plus four tooling flags.
    pub fn standard() -> Self {
        let mut set = Self::minimal();
        set.questions.extend([
            Question::confirm("sasslinting", "Do you want to add sass linting tasks?")
                .default_flag(true)
                .sticky(),
            Question::confirm("es6linting", "Do you want to add es6 linting tasks?")
                .default_flag(true)
                .sticky(),
            Question::confirm("gitlabci", "Do you want to add a GitLab CI config?")
                .default_flag(true)
                .sticky(),
            Question::confirm("editorconfig", "Do you want to add an editorconfig?")
                .default_flag(true)
                .sticky(),
        ]);
        set
    }

    /// Project metadata only.
    pub fn minimal() -> Self {
        Self::new(vec![
            Question::input("name", "Project name").default_directory_name(),
            Question::input("version", "Version")
                .default_text("0.1.0")
                .validator(AnswerValidator::Semver),
            Question::input("desc", "Description").default_text(""),
            Question::input("author", "Author").validator(AnswerValidator::Author),
            Question::input("license", "License")
                .default_text("Unlicense")
                .validator(AnswerValidator::Spdx),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.key == key)
    }

    /// Replace the default of an existing question; unknown keys are ignored.
    pub fn set_default(&mut self, key: &str, default: DefaultValue) {
        if let Some(q) = self.questions.iter_mut().find(|q| q.key == key) {
            q.default = Some(default);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Keys of every confirm question, in order.
    pub fn flag_keys(&self) -> impl Iterator<Item = &str> {
        self.questions
            .iter()
            .filter(|q| q.is_confirm())
            .map(|q| q.key.as_str())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for q in &self.questions {
            q.validate()?;
            if !seen.insert(q.key.as_str()) {
                return Err(DomainError::DuplicateQuestion { key: q.key.clone() });
            }
        }
        Ok(())
    }
}
