//! Small immutable values shared across the domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ============================================================================
// AuthorIdentity
// ============================================================================

/// Name and email pulled out of an author string such as
/// `Jane Doe <jane@example.com>`.
///
/// Extraction never fails: a missing part is the empty string. Whether the
/// parts are acceptable is decided by [`crate::domain::validate_author`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorIdentity {
    pub name: String,
    pub email: String,
}

impl AuthorIdentity {
    pub fn parse(author: &str) -> Self {
        Self {
            name: author_name(author),
            email: author_email(author),
        }
    }
}

impl fmt::Display for AuthorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Text before the first `(` or `<`, trimmed.
///
/// A string that starts with either delimiter has no name.
pub fn author_name(author: &str) -> String {
    let end = author.find(['(', '<']).unwrap_or(author.len());
    author[..end].trim().to_string()
}

/// Text inside the first non-empty `<...>` pair, trimmed.
pub fn author_email(author: &str) -> String {
    for (open, _) in author.match_indices('<') {
        let rest = &author[open + 1..];
        match rest.find('>') {
            Some(0) => continue,
            Some(close) => return rest[..close].trim().to_string(),
            None => return String::new(),
        }
    }
    String::new()
}

// ============================================================================
// Answers
// ============================================================================

/// A single accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Question kinds
// ============================================================================

/// How a question is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Free-form text.
    Input,
    /// Yes/no.
    Confirm,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Confirm => "confirm",
        })
    }
}

/// Built-in validators a question can reference by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerValidator {
    /// Semantic version (`MAJOR.MINOR.PATCH[-pre][+build]`).
    Semver,
    /// `Name <email>` author string.
    Author,
    /// SPDX license expression.
    Spdx,
}

impl AnswerValidator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Semver => "semver",
            Self::Author => "author",
            Self::Spdx => "spdx",
        }
    }
}

impl FromStr for AnswerValidator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "semver" | "version" => Ok(Self::Semver),
            "author" => Ok(Self::Author),
            "spdx" | "license" => Ok(Self::Spdx),
            _ => Err(DomainError::UnknownValidator { name: s.into() }),
        }
    }
}

impl fmt::Display for AnswerValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
