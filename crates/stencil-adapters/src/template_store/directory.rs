//! Templates read from a directory on disk.
//!
//! A template id is its path relative to the root, with `/` separators:
//!
//! ```text
//! my-templates/
//! ├── _package.json        → "_package.json"
//! └── static/
//!     └── _.gitignore      → "static/_.gitignore"
//! ```

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use stencil_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateId,
    error::{StencilError, StencilResult},
};

/// Template store backed by a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store rooted at `root`, which must be an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> StencilResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StencilError::Configuration {
                message: format!("template directory not found: {}", root.display()),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every template under the root, sorted by id.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn ids(&self) -> StencilResult<Vec<TemplateId>> {
        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| StencilError::Configuration {
                message: format!("failed to read {}: {e}", self.root.display()),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            ids.push(TemplateId::new(normalize_path(&relative.to_string_lossy())));
        }
        ids.sort();
        debug!(count = ids.len(), "listed templates");
        Ok(ids)
    }

    /// Location of `id` on disk. `None` for ids that would escape the root.
    fn path_of(&self, id: &TemplateId) -> Option<PathBuf> {
        let relative = Path::new(id.as_str());
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        safe.then(|| self.root.join(relative))
    }
}

impl TemplateStore for DirectoryStore {
    fn resolve(&self, id: &TemplateId) -> StencilResult<Vec<u8>> {
        let missing = |reason: String| -> StencilError {
            ApplicationError::TemplateMissing {
                template: id.to_string(),
                reason,
            }
            .into()
        };

        let path = self
            .path_of(id)
            .ok_or_else(|| missing("template ids must be relative paths inside the store".into()))?;

        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => missing(format!("{} does not exist", path.display())),
            _ => missing(format!("failed to read {}: {e}", path.display())),
        })
    }

    fn exists(&self, id: &TemplateId) -> bool {
        self.path_of(id).is_some_and(|path| path.is_file())
    }
}

/// Normalise a filesystem path to forward slashes so Windows and Unix paths
/// produce identical ids.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
