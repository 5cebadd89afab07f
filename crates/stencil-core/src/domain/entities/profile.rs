use super::{manifest::FileManifest, question::QuestionSet};
use crate::domain::error::DomainError;

/// A command run in the project root after the files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
}

impl HookSpec {
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// The command line as typed in a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Everything one generator variant needs: its questions, its files and
/// what to run afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub questions: QuestionSet,
    pub manifest: FileManifest,
    pub hooks: Vec<HookSpec>,
}

impl Profile {
    pub fn standard() -> Self {
        Self {
            name: "frontend".into(),
            questions: QuestionSet::standard(),
            manifest: FileManifest::standard(),
            hooks: vec![
                HookSpec::new("npm install", "npm", &["install"]),
                HookSpec::new("bower install", "bower", &["install"]),
            ],
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "frontend-minimal".into(),
            questions: QuestionSet::minimal(),
            manifest: FileManifest::minimal(),
            hooks: vec![HookSpec::new("npm install", "npm", &["install"])],
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        self.questions.validate()?;
        self.manifest.validate(&self.questions)
    }
}
