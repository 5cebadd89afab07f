//! Profile loading.
//!
//! A profile is either one of the built-ins (`frontend`, `frontend-minimal`)
//! or a TOML file describing the questions, the file manifest and the post
//! hooks.
//!
//! # Profile file format
//!
//! ```toml
//! [profile]
//! name = "frontend"
//!
//! [[questions]]
//! key      = "name"
//! message  = "Project name"          # optional, defaults to the key
//! kind     = "input"                 # input | confirm (default: input)
//! default_from = "directory-name"    # optional, instead of `default`
//!
//! [[questions]]
//! key       = "version"
//! default   = "0.1.0"                # string for input, bool for confirm
//! validator = "semver"               # semver | author | spdx
//!
//! [[questions]]
//! key     = "gitlabci"
//! kind    = "confirm"
//! default = true
//! sticky  = true                     # remember the answer between runs
//!
//! [[files]]
//! template = "_.gitlab-ci.yml"       # template id in the store
//! output   = ".gitlab-ci.yml"        # relative to the project root
//! kind     = "render"                # copy | render
//! when     = "gitlabci"              # optional; or `unless = "flag"`
//!
//! [[hooks]]
//! name    = "npm install"
//! program = "npm"
//! args    = ["install"]
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::{debug, instrument};

use stencil_core::{
    application::ApplicationError,
    domain::{
        AnswerValidator, DefaultValue, DomainError, DomainValidator, EntryKind, FileManifest,
        HookSpec, ManifestEntry, Profile, Question, QuestionKind, QuestionSet, RelativePath,
    },
    error::StencilResult,
};

// ── File format ───────────────────────────────────────────────────────────────

/// Deserialised representation of a profile file.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProfileFile {
    pub profile: ProfileSection,
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub hooks: Vec<HookEntry>,
}

/// `[profile]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProfileSection {
    pub name: String,
}

/// One entry under `[[questions]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct QuestionEntry {
    pub key: String,
    pub message: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: QuestionKind,
    pub default: Option<DefaultEntry>,
    pub default_from: Option<String>,
    pub validator: Option<String>,
    #[serde(default)]
    pub sticky: bool,
}

fn default_kind() -> QuestionKind {
    QuestionKind::Input
}

/// A literal default: text for input questions, a boolean for confirms.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum DefaultEntry {
    Flag(bool),
    Text(String),
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub template: String,
    pub output: String,
    pub kind: EntryKind,
    pub when: Option<String>,
    pub unless: Option<String>,
}

/// One entry under `[[hooks]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct HookEntry {
    pub name: Option<String>,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// A built-in profile by name.
pub fn builtin(name: &str) -> Option<Profile> {
    match name {
        "frontend" | "standard" => Some(Profile::standard()),
        "frontend-minimal" | "minimal" => Some(Profile::minimal()),
        _ => None,
    }
}

/// Names accepted by [`builtin`], canonical name first.
pub const BUILTIN_PROFILES: &[(&str, &str)] = &[
    ("frontend", "standard"),
    ("frontend-minimal", "minimal"),
];

/// Resolve `--profile` values: a built-in name, otherwise a file path.
pub fn resolve(name_or_path: &str) -> StencilResult<Profile> {
    match builtin(name_or_path) {
        Some(profile) => Ok(profile),
        None => load_profile(Path::new(name_or_path)),
    }
}

/// Load and validate a profile file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_profile(path: &Path) -> StencilResult<Profile> {
    let raw = fs::read_to_string(path).map_err(|e| ApplicationError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let file: ProfileFile = toml::from_str(&raw).map_err(|e| ApplicationError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let profile = file.into_profile()?;
    debug!(
        name = %profile.name,
        questions = profile.questions.len(),
        files = profile.manifest.len(),
        "loaded profile"
    );
    Ok(profile)
}

/// Parse and validate profile TOML.
pub fn parse_profile(raw: &str) -> StencilResult<Profile> {
    let file: ProfileFile = toml::from_str(raw).map_err(|e| ApplicationError::ProfileLoad {
        path: "<inline>".into(),
        reason: e.to_string(),
    })?;
    Ok(file.into_profile()?)
}

impl ProfileFile {
    /// Convert to a domain profile, enforcing every profile invariant.
    pub fn into_profile(self) -> Result<Profile, DomainError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionEntry::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        let entries = self
            .files
            .into_iter()
            .map(FileEntry::into_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let hooks = self
            .hooks
            .into_iter()
            .map(|hook| HookSpec {
                name: hook.name.unwrap_or_else(|| {
                    std::iter::once(hook.program.as_str())
                        .chain(hook.args.iter().map(String::as_str))
                        .collect::<Vec<_>>()
                        .join(" ")
                }),
                program: hook.program,
                args: hook.args,
            })
            .collect();

        let profile = Profile {
            name: self.profile.name,
            questions: QuestionSet::new(questions),
            manifest: FileManifest::new(entries),
            hooks,
        };
        DomainValidator::validate_profile(&profile)?;
        Ok(profile)
    }
}

impl QuestionEntry {
    fn into_question(self) -> Result<Question, DomainError> {
        let message = self.message.unwrap_or_else(|| self.key.clone());
        let mut question = match self.kind {
            QuestionKind::Input => Question::input(self.key, message),
            QuestionKind::Confirm => Question::confirm(self.key, message),
        };

        question.default = match (self.default, self.default_from.as_deref()) {
            (Some(_), Some(_)) => {
                return Err(DomainError::InvalidProfile(format!(
                    "question '{}' sets both default and default_from",
                    question.key
                )));
            }
            (Some(DefaultEntry::Text(text)), None) => Some(DefaultValue::Text(text)),
            (Some(DefaultEntry::Flag(flag)), None) => Some(DefaultValue::Flag(flag)),
            (None, Some("directory-name")) => Some(DefaultValue::DirectoryName),
            (None, Some(other)) => {
                return Err(DomainError::InvalidProfile(format!(
                    "question '{}': unknown default_from '{}' (expected 'directory-name')",
                    question.key, other
                )));
            }
            (None, None) => None,
        };

        if let Some(name) = self.validator {
            question.validator = Some(name.parse::<AnswerValidator>()?);
        }
        question.sticky = self.sticky;
        Ok(question)
    }
}

impl FileEntry {
    fn into_entry(self) -> Result<ManifestEntry, DomainError> {
        let output = RelativePath::try_new(normalize_path(&self.output))?;
        let entry = match self.kind {
            EntryKind::Copy => ManifestEntry::copy(self.template.as_str(), output),
            EntryKind::Render => ManifestEntry::render(self.template.as_str(), output),
        };
        match (self.when, self.unless) {
            (Some(_), Some(_)) => Err(DomainError::InvalidProfile(format!(
                "file '{}' sets both when and unless",
                entry.output
            ))),
            (Some(flag), None) => Ok(entry.when(flag)),
            (None, Some(flag)) => Ok(entry.unless(flag)),
            (None, None) => Ok(entry),
        }
    }
}

/// Normalise a filesystem path to forward slashes so Windows and Unix paths
/// compare identically.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{domain::Inclusion, error::StencilError};
    use tempfile::TempDir;

    const SMALL: &str = r#"
[profile]
name = "small"

[[questions]]
key = "name"
message = "Project name"
default_from = "directory-name"

[[questions]]
key = "version"
default = "1.0.0"
validator = "semver"

[[questions]]
key = "ci"
kind = "confirm"
default = true
sticky = true

[[files]]
template = "_package.json"
output = "package.json"
kind = "render"

[[files]]
template = "ci.yml"
output = ".ci/config.yml"
kind = "copy"
when = "ci"

[[hooks]]
program = "npm"
args = ["install"]
"#;

    fn domain_error(result: StencilResult<Profile>) -> DomainError {
        match result.unwrap_err() {
            StencilError::Domain(e) => e,
            other => panic!("expected a domain error, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_complete_profile() {
        let profile = parse_profile(SMALL).unwrap();

        assert_eq!(profile.name, "small");
        let keys: Vec<_> = profile.questions.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, ["name", "version", "ci"]);

        let version = profile.questions.get("version").unwrap();
        assert_eq!(version.message, "version");
        assert_eq!(version.validator, Some(AnswerValidator::Semver));
        assert_eq!(version.default, Some(DefaultValue::Text("1.0.0".into())));

        let name = profile.questions.get("name").unwrap();
        assert_eq!(name.default, Some(DefaultValue::DirectoryName));

        let ci = profile.questions.get("ci").unwrap();
        assert!(ci.sticky && ci.is_confirm());

        let entries: Vec<_> = profile.manifest.iter().collect();
        assert_eq!(entries[1].output.as_str(), ".ci/config.yml");
        assert_eq!(entries[1].include, Inclusion::When("ci".into()));
        assert_eq!(profile.hooks[0].name, "npm install");
    }

    #[test]
    fn builtins_resolve_by_name() {
        assert_eq!(resolve("frontend").unwrap(), Profile::standard());
        assert_eq!(resolve("minimal").unwrap(), Profile::minimal());
        assert!(builtin("nope").is_none());
    }

    #[test]
    fn loads_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("small.toml");
        fs::write(&path, SMALL).unwrap();

        assert_eq!(resolve(path.to_str().unwrap()).unwrap().name, "small");
    }

    #[test]
    fn missing_file_is_profile_load_error() {
        let err = load_profile(Path::new("/absolutely/not/here.toml")).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::ProfileLoad { .. })
        ));
    }

    #[test]
    fn syntax_errors_are_profile_load_errors() {
        assert!(matches!(
            parse_profile("[profile\nname = 1"),
            Err(StencilError::Application(ApplicationError::ProfileLoad { .. }))
        ));
        assert!(parse_profile("[profile]\nname = \"x\"\nextra = 1").is_err());
    }

    #[test]
    fn duplicate_outputs_are_rejected() {
        let raw = SMALL.replace(".ci/config.yml", "package.json");
        assert!(matches!(
            domain_error(parse_profile(&raw)),
            DomainError::DuplicatePath { .. }
        ));
    }

    #[test]
    fn absolute_outputs_are_rejected() {
        let raw = SMALL.replace(".ci/config.yml", "/etc/config.yml");
        assert!(matches!(
            domain_error(parse_profile(&raw)),
            DomainError::AbsolutePathNotAllowed { .. }
        ));
        let raw = SMALL.replace(".ci/config.yml", "../config.yml");
        assert!(matches!(
            domain_error(parse_profile(&raw)),
            DomainError::AbsolutePathNotAllowed { .. }
        ));
    }

    #[test]
    fn predicates_must_name_confirm_questions() {
        let raw = SMALL.replace("when = \"ci\"", "when = \"version\"");
        assert!(matches!(
            domain_error(parse_profile(&raw)),
            DomainError::UnknownFlag { .. }
        ));
    }

    #[test]
    fn unknown_validator_is_rejected() {
        let raw = SMALL.replace("validator = \"semver\"", "validator = \"regex\"");
        assert!(matches!(
            domain_error(parse_profile(&raw)),
            DomainError::UnknownValidator { .. }
        ));
    }

    #[test]
    fn duplicate_question_keys_are_rejected() {
        let raw = SMALL.replace("key = \"ci\"", "key = \"name\"");
        assert!(matches!(
            domain_error(parse_profile(&raw)),
            DomainError::DuplicateQuestion { .. } | DomainError::UnknownFlag { .. }
        ));
    }

    #[test]
    fn conflicting_defaults_are_rejected() {
        let raw = SMALL.replace(
            "default_from = \"directory-name\"",
            "default_from = \"directory-name\"\ndefault = \"x\"",
        );
        assert!(matches!(
            domain_error(parse_profile(&raw)),
            DomainError::InvalidProfile(_)
        ));
    }
}
