//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use crate::domain::{Question, RenderContext, TemplateId, ValidationError};
use crate::error::StencilResult;

#[cfg(test)]
use mockall::automock;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// A successful `write_file` must be visible to `exists` immediately.
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template retrieval.
///
/// Implemented by:
/// - `stencil_adapters::template_store::InMemoryStore` (built-in templates)
/// - `stencil_adapters::template_store::DirectoryStore` (templates on disk)
#[cfg_attr(test, automock)]
pub trait TemplateStore: Send + Sync {
    /// Raw template bytes.
    fn resolve(&self, id: &TemplateId) -> StencilResult<Vec<u8>>;

    /// Whether `resolve` would find the template.
    fn exists(&self, id: &TemplateId) -> bool;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `stencil_adapters::renderer::PlaceholderRenderer`
#[cfg_attr(test, automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Substitute every placeholder in `source`.
    ///
    /// `template` is only used for error reporting.
    fn render(
        &self,
        template: &TemplateId,
        source: &str,
        context: &RenderContext,
    ) -> StencilResult<String>;
}

/// Port for the interactive question surface.
///
/// The collector owns validation and re-asking; a prompter only displays a
/// question and hands back what the user typed.
///
/// Implemented by:
/// - `stencil_cli::prompt::TerminalPrompter` (dialoguer)
/// - `stencil_adapters::prompt::ScriptedPrompter` (answers file, tests)
pub trait Prompter {
    /// Ask a text question. An empty answer means "take the default".
    fn input(&self, question: &Question, default: Option<&str>) -> StencilResult<String>;

    /// Ask a yes/no question.
    fn confirm(&self, question: &Question, default: bool) -> StencilResult<bool>;

    /// Tell the user their answer was rejected; the question is asked again.
    fn reject(&self, question: &Question, error: &ValidationError) -> StencilResult<()>;
}

/// Port for remembering sticky answers between runs.
///
/// Implemented by:
/// - `stencil_adapters::preferences::FilePreferences` (JSON file)
/// - `stencil_adapters::preferences::MemoryPreferences` (testing)
#[cfg_attr(test, automock)]
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<bool>;

    fn set(&self, key: &str, value: bool) -> StencilResult<()>;
}

/// Port for post-generation steps such as dependency installation.
///
/// Implemented by:
/// - `stencil_adapters::hooks::CommandHook`
#[cfg_attr(test, automock)]
pub trait PostHook: Send + Sync {
    fn name(&self) -> &str;

    /// Run inside `project_root`.
    fn run(&self, project_root: &Path) -> StencilResult<()>;
}
