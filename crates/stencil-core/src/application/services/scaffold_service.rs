//! Scaffold Service - materializes a file manifest.
//!
//! For each manifest entry, in manifest order:
//! 1. Evaluate the inclusion predicate against the render context
//! 2. Resolve the template from the store
//! 3. Copy the bytes, or render them with the context
//! 4. Write the result under the destination root
//!
//! There is no rollback. Files written before a failure stay on disk.

use std::path::Path;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{EntryKind, FileManifest, ManifestEntry, RelativePath, RenderContext, TemplateId},
    error::{StencilError, StencilResult},
};

/// A file that an included manifest entry will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub template: TemplateId,
    pub output: RelativePath,
    pub kind: EntryKind,
}

/// What a materialization run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Written files, in manifest order.
    pub written: Vec<RelativePath>,
    /// Outputs whose predicate excluded them.
    pub skipped: Vec<RelativePath>,
}

/// Materializes manifests through the template, renderer and filesystem ports.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stencil_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     store,      // impl TemplateStore
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// The files `materialize` would write, without writing anything.
    ///
    /// Fails like `materialize` does when an included template is missing.
    pub fn plan(
        &self,
        manifest: &FileManifest,
        context: &RenderContext,
    ) -> StencilResult<Vec<PlannedFile>> {
        manifest
            .included(context)
            .map(|entry| {
                self.ensure_template(&entry.template)?;
                Ok(PlannedFile {
                    template: entry.template.clone(),
                    output: entry.output.clone(),
                    kind: entry.kind,
                })
            })
            .collect()
    }

    /// Walk the manifest once, writing every included entry under `root`.
    #[instrument(skip_all, fields(root = %root.display(), entries = manifest.len()))]
    pub fn materialize(
        &self,
        manifest: &FileManifest,
        context: &RenderContext,
        root: &Path,
    ) -> StencilResult<MaterializeReport> {
        let mut report = MaterializeReport::default();

        self.filesystem.create_dir_all(root)?;

        for entry in manifest.iter() {
            if !entry.is_included(context) {
                debug!(output = %entry.output, predicate = %entry.include, "Skipping entry");
                report.skipped.push(entry.output.clone());
                continue;
            }

            let content = self.produce(entry, context)?;
            let path = root.join(entry.output.as_path());

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &content)?;

            info!(path = %entry.output, kind = %entry.kind, "Wrote file");
            report.written.push(entry.output.clone());
        }

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Materialization complete"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn ensure_template(&self, id: &TemplateId) -> StencilResult<()> {
        if self.store.exists(id) {
            Ok(())
        } else {
            Err(ApplicationError::TemplateMissing {
                template: id.to_string(),
                reason: "not found in template store".into(),
            }
            .into())
        }
    }

    /// Final bytes for an included entry.
    fn produce(&self, entry: &ManifestEntry, context: &RenderContext) -> StencilResult<Vec<u8>> {
        self.ensure_template(&entry.template)?;
        let bytes = self.store.resolve(&entry.template).map_err(|e| match e {
            StencilError::Application(ApplicationError::TemplateMissing { .. }) => e,
            other => ApplicationError::TemplateMissing {
                template: entry.template.to_string(),
                reason: other.to_string(),
            }
            .into(),
        })?;

        match entry.kind {
            EntryKind::Copy => Ok(bytes),
            EntryKind::Render => {
                let source =
                    String::from_utf8(bytes).map_err(|e| ApplicationError::RenderingFailed {
                        template: entry.template.to_string(),
                        reason: format!("template is not valid UTF-8: {}", e),
                    })?;
                let rendered = self.renderer.render(&entry.template, &source, context)?;
                Ok(rendered.into_bytes())
            }
        }
    }
}
