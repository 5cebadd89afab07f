//! Spinner shown while a post hook (`npm install`, ...) runs.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use stencil_core::{application::ports::PostHook, error::StencilResult};

/// Wraps a hook so the terminal shows progress instead of the tool's own
/// output, which the inner hook is expected to capture.
pub struct SpinnerHook<H> {
    inner: H,
    hidden: bool,
}

impl<H: PostHook> SpinnerHook<H> {
    pub fn new(inner: H, hidden: bool) -> Self {
        Self { inner, hidden }
    }

    fn spinner(&self) -> ProgressBar {
        if self.hidden {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

impl<H: PostHook> PostHook for SpinnerHook<H> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(&self, project_root: &Path) -> StencilResult<()> {
        let spinner = self.spinner();
        spinner.set_message(format!("Running {}...", self.inner.name()));
        let result = self.inner.run(project_root);
        spinner.finish_and_clear();
        result
    }
}
