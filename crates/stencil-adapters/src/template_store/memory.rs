//! In-memory template store with built-in templates.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use stencil_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateId,
    error::StencilResult,
};

use crate::builtin_templates;

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<HashMap<TemplateId, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> StencilResult<Self> {
        let store = Self::new();
        for (id, bytes) in builtin_templates::all() {
            store.insert(id, bytes.to_vec())?;
        }
        Ok(store)
    }

    /// Add or replace a template.
    pub fn insert(&self, id: impl Into<TemplateId>, content: Vec<u8>) -> StencilResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(id.into(), content);
        Ok(())
    }

    /// Sorted template ids.
    pub fn ids(&self) -> StencilResult<Vec<TemplateId>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let mut ids: Vec<_> = inner.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn resolve(&self, id: &TemplateId) -> StencilResult<Vec<u8>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateMissing {
                template: id.to_string(),
                reason: "not in the in-memory store".into(),
            }
            .into()
        })
    }

    fn exists(&self, id: &TemplateId) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_has_every_embedded_template() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.len(), builtin_templates::TEMPLATES.len());
        assert!(store.exists(&TemplateId::new("_package.json")));
        assert!(store.exists(&TemplateId::new("static/_.gitkeep")));
    }

    #[test]
    fn resolve_returns_bytes() {
        let store = InMemoryStore::new();
        store.insert("a.txt", b"hello".to_vec()).unwrap();
        assert_eq!(store.resolve(&"a.txt".into()).unwrap(), b"hello".to_vec());
    }

    #[test]
    fn unknown_id_is_template_missing() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert!(!store.exists(&"nope".into()));
        let err = store.resolve(&"nope".into()).unwrap_err();
        assert!(matches!(
            err,
            stencil_core::error::StencilError::Application(ApplicationError::TemplateMissing { .. })
        ));
    }

    #[test]
    fn ids_are_sorted() {
        let store = InMemoryStore::new();
        store.insert("b", vec![]).unwrap();
        store.insert("a", vec![]).unwrap();
        assert_eq!(store.ids().unwrap(), vec![TemplateId::new("a"), TemplateId::new("b")]);
    }
}
