//! Sticky preference stores.
//!
//! [`FilePreferences`] keeps answers in one JSON file shared by every
//! profile, namespaced so two profiles never see each other's choices:
//!
//! ```json
//! {
//!   "stencil:frontend": { "sasslinting": true, "gitlabci": false }
//! }
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use tracing::{debug, warn};

use stencil_core::{
    application::{ApplicationError, ports::PreferenceStore},
    error::{StencilError, StencilResult},
};

type Namespaces = BTreeMap<String, BTreeMap<String, bool>>;

/// JSON-file backed preference store. Every `set` rewrites the file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    namespace: String,
    data: RwLock<Namespaces>,
}

impl FilePreferences {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and treated as empty; it will be replaced on the next `set`.
    pub fn open(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt preference file");
                Namespaces::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Namespaces::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read preference file");
                Namespaces::new()
            }
        };

        Self {
            path,
            namespace: namespace.into(),
            data: RwLock::new(data),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &Namespaces) -> StencilResult<()> {
        let failed = |reason: String| -> StencilError {
            ApplicationError::PreferenceStore { reason }.into()
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| failed(format!("create {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(data).map_err(|e| failed(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| failed(format!("write {}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), "Saved preferences");
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<bool> {
        let data = self.data.read().ok()?;
        data.get(&self.namespace)?.get(key).copied()
    }

    fn set(&self, key: &str, value: bool) -> StencilResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        data.entry(self.namespace.clone())
            .or_default()
            .insert(key.to_string(), value);
        self.persist(&data)
    }
}

/// Preference store that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, bool>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a remembered value.
    pub fn with(self, key: impl Into<String>, value: bool) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value);
        }
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<bool> {
        self.values.read().ok()?.get(key).copied()
    }

    fn set(&self, key: &str, value: bool) -> StencilResult<()> {
        self.values
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .insert(key.to_string(), value);
        Ok(())
    }
}
