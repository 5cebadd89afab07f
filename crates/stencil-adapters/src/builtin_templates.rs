//! Templates compiled into the binary.
//!
//! The files live under `crates/stencil-adapters/templates/` and are embedded
//! with `include_bytes!`, so the `stencil` binary works without any template
//! directory on disk. Ids are paths relative to that directory, which is also
//! the layout a `--templates DIR` override must follow.
//!
//! ```text
//! templates/
//! ├── _package.json          rendered
//! ├── _bower.json            rendered
//! ├── _gulpfile.js           rendered
//! ├── _.gitlab-ci.yml        rendered
//! ├── _README.md             rendered
//! └── static/                copied verbatim
//!     ├── _.bowerrc
//!     ├── _.editorconfig
//!     ├── _.eslintrc
//!     ├── _.gitignore
//!     ├── _.gitkeep
//!     └── _.sass-lint.yml
//! ```

use stencil_core::domain::TemplateId;

macro_rules! embed {
    ($($id:literal),+ $(,)?) => {
        &[$(($id, include_bytes!(concat!("../templates/", $id)) as &[u8])),+]
    };
}

/// Every built-in template as `(id, bytes)`.
pub const TEMPLATES: &[(&str, &[u8])] = embed![
    "_package.json",
    "_bower.json",
    "_gulpfile.js",
    "_.gitlab-ci.yml",
    "_README.md",
    "static/_.bowerrc",
    "static/_.editorconfig",
    "static/_.eslintrc",
    "static/_.gitignore",
    "static/_.gitkeep",
    "static/_.sass-lint.yml",
];

/// Iterate over the built-in templates.
pub fn all() -> impl Iterator<Item = (TemplateId, &'static [u8])> {
    TEMPLATES
        .iter()
        .map(|(id, bytes)| (TemplateId::new(*id), *bytes))
}

/// Look up one built-in template.
pub fn get(id: &str) -> Option<&'static [u8]> {
    TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map(|(_, bytes)| *bytes)
}
