//! Template store adapters.
//!
//! - [`InMemoryStore`]: a map of id to bytes, seeded with the built-in templates
//! - [`DirectoryStore`]: templates read from a directory on disk
//! - [`LayeredStore`]: first store that has a template wins

mod directory;
mod memory;

pub use directory::DirectoryStore;
pub use memory::InMemoryStore;

use stencil_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateId,
    error::StencilResult,
};

/// Looks templates up in each store in order.
///
/// Used to let a template directory override some built-in templates while
/// falling back to the built-ins for the rest.
pub struct LayeredStore {
    layers: Vec<Box<dyn TemplateStore>>,
}

impl LayeredStore {
    pub fn new(layers: Vec<Box<dyn TemplateStore>>) -> Self {
        Self { layers }
    }
}

impl TemplateStore for LayeredStore {
    fn resolve(&self, id: &TemplateId) -> StencilResult<Vec<u8>> {
        match self.layers.iter().find(|layer| layer.exists(id)) {
            Some(layer) => layer.resolve(id),
            None => Err(ApplicationError::TemplateMissing {
                template: id.to_string(),
                reason: format!("not found in any of {} template stores", self.layers.len()),
            }
            .into()),
        }
    }

    fn exists(&self, id: &TemplateId) -> bool {
        self.layers.iter().any(|layer| layer.exists(id))
    }
}
