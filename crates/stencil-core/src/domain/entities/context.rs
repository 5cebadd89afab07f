//! Render context and template helpers.
//!
//! ## Lookup paths
//!
//! | Path | Example | Source |
//! |------|---------|--------|
//! | `<answer key>` | `name` → "demo" | AnswerSet |
//! | `author.name` | "Jane Doe" | derived from `author` |
//! | `author.email` | "jane@example.com" | derived from `author` |
//! | `year` | "2026" | system clock |
//!
//! Flags render as `true` / `false`.
//!
//! ## Helpers
//!
//! `pascal_case` (alias `uppercc`), `author_name`, `author_email`, `json`.

use chrono::Datelike;
use heck::ToPascalCase;

use super::answers::AnswerSet;
use crate::domain::value_objects::{AuthorIdentity, author_email, author_name};

/// A string transform available to templates.
pub type Helper = fn(&str) -> String;

/// Read-only input to template rendering: answers plus derived values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    answers: AnswerSet,
    author: AuthorIdentity,
    year: i32,
}

impl RenderContext {
    /// Build the context, deriving the author identity and current year.
    ///
    /// The author string is trusted here; it was validated during collection.
    pub fn new(answers: AnswerSet) -> Self {
        Self::with_year(answers, chrono::Local::now().year())
    }

    /// Same as [`RenderContext::new`] with a fixed year.
    pub fn with_year(answers: AnswerSet, year: i32) -> Self {
        let author = answers
            .text("author")
            .map(AuthorIdentity::parse)
            .unwrap_or_default();
        Self {
            answers,
            author,
            year,
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn author(&self) -> &AuthorIdentity {
        &self.author
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.answers.flag(key)
    }

    /// Resolve a dotted path. `None` when nothing answers to it.
    pub fn lookup(&self, path: &str) -> Option<String> {
        match path {
            "author.name" => Some(self.author.name.clone()),
            "author.email" => Some(self.author.email.clone()),
            "year" => Some(self.year.to_string()),
            key => self.answers.get(key).map(ToString::to_string),
        }
    }

    /// Look up a helper by name.
    pub fn helper(&self, name: &str) -> Option<Helper> {
        match name {
            "pascal_case" | "uppercc" => Some(to_pascal_case),
            "author_name" => Some(author_name),
            "author_email" => Some(author_email),
            "json" => Some(json_escape),
            _ => None,
        }
    }
}

// ============================================================================
// String helpers
// ============================================================================

/// Convert a string to PascalCase.
///
/// | Input | Output |
/// |-------|--------|
/// | "my cool project" | "MyCoolProject" |
/// | "already-PascalCase" | "AlreadyPascalCase" |
/// | "HTTPRequest" | "HttpRequest" |
/// | "project2go" | "Project2go" |
///
/// Digits stay attached to the word they follow.
pub fn to_pascal_case(s: &str) -> String {
    s.to_pascal_case()
}

/// Escape a string for embedding inside a JSON string literal.
pub fn json_escape(s: &str) -> String {
    match serde_json::to_string(s) {
        Ok(quoted) => quoted[1..quoted.len() - 1].to_string(),
        Err(_) => String::new(),
    }
}
