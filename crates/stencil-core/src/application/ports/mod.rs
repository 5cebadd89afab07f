//! Application ports (traits) for external dependencies.
//!
//! All ports are driven (output) ports: the application calls them and
//! `stencil-adapters` (or the CLI, for the terminal prompter) implements them.
//!
//! - `TemplateStore`: template lookup by id
//! - `TemplateRenderer`: placeholder substitution
//! - `Filesystem`: destination tree writes
//! - `Prompter`: the interactive question surface
//! - `PreferenceStore`: remembered answers for sticky questions
//! - `PostHook`: commands run after materialization

pub mod output;

pub use output::{Filesystem, PostHook, PreferenceStore, Prompter, TemplateRenderer, TemplateStore};
