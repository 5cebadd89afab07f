//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod hooks;
pub mod preferences;
pub mod profile_loader;
pub mod prompt;
pub mod renderer;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use hooks::CommandHook;
pub use preferences::{FilePreferences, MemoryPreferences};
pub use prompt::ScriptedPrompter;
pub use renderer::PlaceholderRenderer;
pub use template_store::{DirectoryStore, InMemoryStore, LayeredStore};
