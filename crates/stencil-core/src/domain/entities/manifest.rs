//! The file manifest: which templates become which files, and when.
//!
//! The manifest is static configuration. Inclusion is a pure function of the
//! render context's flags, so planning the same context twice always yields
//! the same list of output paths.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{common::RelativePath, context::RenderContext, question::QuestionSet};
use crate::domain::error::DomainError;

/// Identifier of a template inside a template store (e.g. `static/_.gitignore`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// How an included entry produces its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Template bytes are written unchanged.
    #[serde(alias = "copy-verbatim")]
    Copy,
    /// Template text has its placeholders substituted first.
    #[serde(alias = "render-with-context")]
    Render,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Copy => "copy",
            Self::Render => "render",
        })
    }
}

/// Inclusion predicate of a manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inclusion {
    Always,
    /// Included iff the flag was answered `true`.
    When(String),
    /// Included iff the flag was not answered `true`.
    Unless(String),
}

impl Inclusion {
    pub fn evaluate(&self, ctx: &RenderContext) -> bool {
        match self {
            Self::Always => true,
            Self::When(flag) => ctx.flag(flag) == Some(true),
            Self::Unless(flag) => ctx.flag(flag) != Some(true),
        }
    }

    fn flag(&self) -> Option<&str> {
        match self {
            Self::Always => None,
            Self::When(f) | Self::Unless(f) => Some(f),
        }
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::When(flag) => write!(f, "when {flag}"),
            Self::Unless(flag) => write!(f, "unless {flag}"),
        }
    }
}

/// One candidate output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub template: TemplateId,
    pub output: RelativePath,
    pub kind: EntryKind,
    pub include: Inclusion,
}

impl ManifestEntry {
    pub fn copy(template: impl Into<TemplateId>, output: RelativePath) -> Self {
        Self {
            template: template.into(),
            output,
            kind: EntryKind::Copy,
            include: Inclusion::Always,
        }
    }

    pub fn render(template: impl Into<TemplateId>, output: RelativePath) -> Self {
        Self {
            kind: EntryKind::Render,
            ..Self::copy(template, output)
        }
    }

    pub fn when(mut self, flag: impl Into<String>) -> Self {
        self.include = Inclusion::When(flag.into());
        self
    }

    pub fn unless(mut self, flag: impl Into<String>) -> Self {
        self.include = Inclusion::Unless(flag.into());
        self
    }

    pub fn is_included(&self, ctx: &RenderContext) -> bool {
        self.include.evaluate(ctx)
    }
}

/// Ordered list of manifest entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileManifest {
    entries: Vec<ManifestEntry>,
}

impl FileManifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Full front-end boilerplate: package descriptors, gulp build, optional
    /// lint/CI/editor configs and the asset placeholder directories.
    pub fn standard() -> Self {
        use ManifestEntry as E;
        let out = RelativePath::new;
        Self::new(vec![
            E::render("_package.json", out("package.json")),
            E::render("_bower.json", out("bower.json")),
            E::copy("static/_.bowerrc", out(".bowerrc")),
            E::render("_gulpfile.js", out("gulpfile.js")),
            E::copy("static/_.editorconfig", out(".editorconfig")).when("editorconfig"),
            E::copy("static/_.sass-lint.yml", out(".sass-lint.yml")).when("sasslinting"),
            E::copy("static/_.eslintrc", out(".eslintrc")).when("es6linting"),
            E::render("_.gitlab-ci.yml", out(".gitlab-ci.yml")).when("gitlabci"),
            E::copy("static/_.gitignore", out(".gitignore")),
            E::render("_README.md", out("README.md")),
            E::copy("static/_.gitkeep", out("assets/dist/images/.gitkeep")),
            E::copy("static/_.gitkeep", out("assets/dist/fonts/.gitkeep")),
        ])
    }

    /// Package descriptor, ignore file and readme.
    pub fn minimal() -> Self {
        use ManifestEntry as E;
        let out = RelativePath::new;
        Self::new(vec![
            E::render("_package.json", out("package.json")),
            E::copy("static/_.gitignore", out(".gitignore")),
            E::render("_README.md", out("README.md")),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    /// Entries whose predicate holds for `ctx`, in manifest order.
    pub fn included<'a>(
        &'a self,
        ctx: &'a RenderContext,
    ) -> impl Iterator<Item = &'a ManifestEntry> + 'a {
        self.entries.iter().filter(move |e| e.is_included(ctx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check manifest invariants against the question set it will run with.
    ///
    /// - at least one entry
    /// - output paths are unique
    /// - every predicate flag is a confirm question
    pub fn validate(&self, questions: &QuestionSet) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidProfile("manifest has no entries".into()));
        }

        let flags: HashSet<&str> = questions.flag_keys().collect();
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.output.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.output.to_string(),
                });
            }
            if let Some(flag) = entry.include.flag() {
                if !flags.contains(flag) {
                    return Err(DomainError::UnknownFlag { flag: flag.into() });
                }
            }
        }
        Ok(())
    }
}
