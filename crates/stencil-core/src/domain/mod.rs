// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! Pure logic only: answers, questions, the file manifest, the render context
//! and the answer validators. All I/O (prompting, template storage, writing
//! files, remembering preferences) is reached through ports defined in the
//! application layer.
//!
//! - **No I/O**: No filesystem, terminal, or process calls
//! - **Immutable entities**: built once, then only read
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    AnswerSet, DefaultValue, EntryKind, FileManifest, HookSpec, Inclusion, ManifestEntry,
    Profile, Question, QuestionSet, RelativePath, RenderContext, TemplateId,
    context::{Helper, to_pascal_case},
};

pub use error::{DomainError, ErrorCategory, ValidationError};

pub use value_objects::{
    AnswerValidator, AnswerValue, AuthorIdentity, QuestionKind, author_email, author_name,
};

pub use validation::{DomainValidator, validate_author, validate_license, validate_version};
