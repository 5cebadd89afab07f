//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: the collector and the scaffold (materialize) service
//! - **Pipeline**: the run driver that chains collect → build → write → hooks
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types

pub mod error;
pub mod pipeline;
pub mod ports;
pub mod services;

pub use pipeline::{Generator, HookFailure, RunOptions, RunReport, Stage};

pub use services::{
    CollectOptions, Collector, MaterializeReport, PlannedFile, ScaffoldService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, PostHook, PreferenceStore, Prompter, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
