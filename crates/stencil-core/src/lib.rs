//! Core of the `stencil` boilerplate generator.
//!
//! The [`domain`] layer holds the pure pieces: questions and answers, the
//! file manifest, the render context and the answer validators. The
//! [`application`] layer runs a generation through ports that
//! `stencil-adapters` implements:
//!
//! ```text
//! Generator ── Collector ──────── Prompter, PreferenceStore
//!           └─ ScaffoldService ── TemplateStore, TemplateRenderer, Filesystem
//!           └─ post hooks ─────── PostHook
//! ```
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! let scaffold = ScaffoldService::new(store, renderer, filesystem);
//! let generator = Generator::new(Profile::standard(), scaffold)?;
//! let report = generator.run(&prompter, &preferences, &RunOptions::new("./my-site"))?;
//! ```
//!
//! This crate only emits `tracing` events; installing a subscriber is the
//! binary's job.

pub mod application;
pub mod domain;
pub mod error;

/// The types needed to wire and run a generation.
pub mod prelude {
    pub use crate::application::{
        CollectOptions, Collector, Generator, RunOptions, RunReport, ScaffoldService,
        ports::{Filesystem, PostHook, PreferenceStore, Prompter, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        AnswerSet, AnswerValue, EntryKind, FileManifest, HookSpec, ManifestEntry, Profile,
        Question, QuestionSet, RelativePath, RenderContext, TemplateId,
    };
    pub use crate::error::{StencilError, StencilResult};
}
