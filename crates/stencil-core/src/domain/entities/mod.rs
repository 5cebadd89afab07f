pub mod answers;
pub mod common;
pub mod context;
pub mod manifest;
pub mod profile;
pub mod question;

pub use crate::domain::DomainError;
pub use answers::AnswerSet;
pub use common::RelativePath;
pub use context::RenderContext;
pub use manifest::{EntryKind, FileManifest, Inclusion, ManifestEntry, TemplateId};
pub use profile::{HookSpec, Profile};
pub use question::{DefaultValue, Question, QuestionSet};
