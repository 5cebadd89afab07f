//! Post-generation hooks that run external commands.

use std::{
    path::Path,
    process::{Command, Stdio},
};

use tracing::{debug, instrument};

use stencil_core::{
    application::{ApplicationError, ports::PostHook},
    domain::HookSpec,
    error::StencilResult,
};

/// Runs a [`HookSpec`] as a child process in the project root.
#[derive(Debug, Clone)]
pub struct CommandHook {
    spec: HookSpec,
    capture: bool,
}

impl CommandHook {
    pub fn new(spec: HookSpec) -> Self {
        Self {
            spec,
            capture: false,
        }
    }

    /// Capture the child's output instead of inheriting the terminal.
    ///
    /// Captured stderr is included in the failure reason.
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn spec(&self) -> &HookSpec {
        &self.spec
    }

    fn failed(&self, reason: String) -> ApplicationError {
        ApplicationError::HookFailed {
            hook: self.spec.name.clone(),
            reason,
        }
    }
}

impl PostHook for CommandHook {
    fn name(&self) -> &str {
        &self.spec.name
    }

    #[instrument(skip(self), fields(hook = %self.spec.name, command = %self.spec.command_line()))]
    fn run(&self, project_root: &Path) -> StencilResult<()> {
        let mut command = Command::new(program(&self.spec.program));
        command.args(&self.spec.args).current_dir(project_root);

        if self.capture {
            command.stdout(Stdio::null()).stderr(Stdio::piped());
        } else {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let output = command.output().map_err(|e| {
            self.failed(format!("could not start '{}': {e}", self.spec.program))
        })?;

        if output.status.success() {
            debug!("hook finished");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = stderr.trim().lines().last().unwrap_or_default();
        let reason = if tail.is_empty() {
            format!("{} ({})", self.spec.command_line(), output.status)
        } else {
            format!("{} ({}): {}", self.spec.command_line(), output.status, tail)
        };
        Err(self.failed(reason).into())
    }
}

/// npm, bower and friends are batch files on Windows.
#[cfg(windows)]
fn program(name: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{name}.cmd")
    }
}

#[cfg(not(windows))]
fn program(name: &str) -> String {
    name.to_string()
}
