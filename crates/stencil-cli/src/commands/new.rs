//! Implementation of the `stencil new` command.
//!
//! Responsibility: pick the profile, wire the adapters into a `Generator`,
//! run it and display the results. No business logic lives here.

use std::path::Path;

use tracing::{debug, info, instrument};

use stencil_adapters::{
    CommandHook, DirectoryStore, FilePreferences, InMemoryStore, LayeredStore, LocalFilesystem,
    PlaceholderRenderer, ScriptedPrompter, profile_loader,
};
use stencil_core::{
    application::{
        Generator, RunOptions, RunReport, ScaffoldService,
        ports::{PostHook, PreferenceStore, Prompter, TemplateStore},
    },
    domain::{DefaultValue, Profile},
    error::StencilResult,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::SpinnerHook,
};

/// Profile used when neither `--profile` nor `profile.path` is set.
pub const DEFAULT_PROFILE: &str = "frontend";

/// Execute the `stencil new` command.
///
/// Dispatch sequence:
/// 1. Resolve the profile and fold config defaults into its questions
/// 2. Build the template store, renderer, filesystem and hooks
/// 3. Print the banner
/// 4. Run the generator (collect, build, write, post-hook)
/// 5. Print the summary, or the plan on `--dry-run`
#[instrument(skip_all, fields(dest = %args.destination.display()))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if args.destination.exists() && !args.destination.is_dir() {
        return Err(CliError::NotADirectory {
            path: args.destination,
        });
    }

    let mut profile = resolve_profile(args.profile.as_deref(), &config)?;
    apply_config_defaults(&mut profile, &config);
    debug!(profile = %profile.name, "Profile resolved");

    let templates = args.templates.as_deref().or(config.templates.dir.as_deref());
    let scaffold = ScaffoldService::new(
        template_store(templates)?,
        Box::new(PlaceholderRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    let install_steps: Vec<String> = profile.hooks.iter().map(|h| h.command_line()).collect();
    let hooks = post_hooks(&profile, global.quiet);
    let namespace = preference_namespace(&profile);
    let generator = Generator::new(profile, scaffold)?.with_hooks(hooks);

    banner(&output)?;

    let prompter = prompter(args.answers.as_deref(), &output)?;
    let file_preferences = FilePreferences::open(config.preferences_path(), namespace);
    let read_only = ReadOnly(&file_preferences);
    let preferences: &dyn PreferenceStore = if args.dry_run {
        &read_only
    } else {
        &file_preferences
    };

    let skip_hooks = args.skip_install || config.hooks.skip_install;
    let options = RunOptions::new(&args.destination)
        .dry_run(args.dry_run)
        .skip_hooks(skip_hooks);

    info!(profile = %generator.profile().name, "Generation started");
    let report = generator.run(prompter.as_ref(), preferences, &options)?;

    if args.dry_run {
        show_plan(&report, &args.destination, &output)?;
        return Ok(());
    }

    info!(files = report.written.len(), "Generation completed");
    show_summary(&report, &args.destination, &output)?;
    show_end(&report, skip_hooks, &install_steps, &output)?;
    Ok(())
}

// ── Wiring ────────────────────────────────────────────────────────────────────

/// `--profile` beats `profile.path`, which beats the built-in default.
pub fn resolve_profile(flag: Option<&str>, config: &AppConfig) -> StencilResult<Profile> {
    let name = flag
        .or(config.profile.path.as_deref())
        .unwrap_or(DEFAULT_PROFILE);
    profile_loader::resolve(name)
}

/// Configured version and license become the offered defaults.
pub fn apply_config_defaults(profile: &mut Profile, config: &AppConfig) {
    profile.questions.set_default(
        "version",
        DefaultValue::Text(config.defaults.version.clone()),
    );
    profile.questions.set_default(
        "license",
        DefaultValue::Text(config.defaults.license.clone()),
    );
}

/// Sticky answers are remembered per profile.
pub fn preference_namespace(profile: &Profile) -> String {
    format!("stencil:{}", profile.name)
}

/// Built-in templates, overlaid by a template directory when one is given.
pub fn template_store(dir: Option<&Path>) -> StencilResult<Box<dyn TemplateStore>> {
    let builtin: Box<dyn TemplateStore> = Box::new(InMemoryStore::with_builtin()?);
    let Some(dir) = dir else {
        return Ok(builtin);
    };
    let overlay: Box<dyn TemplateStore> = Box::new(DirectoryStore::open(dir)?);
    Ok(Box::new(LayeredStore::new(vec![overlay, builtin])))
}

fn post_hooks(profile: &Profile, quiet: bool) -> Vec<Box<dyn PostHook>> {
    profile
        .hooks
        .iter()
        .map(|spec| {
            let hook = CommandHook::new(spec.clone()).capture_output(true);
            Box::new(SpinnerHook::new(hook, quiet)) as Box<dyn PostHook>
        })
        .collect()
}

fn prompter(answers: Option<&Path>, output: &OutputManager) -> CliResult<Box<dyn Prompter>> {
    if let Some(path) = answers {
        debug!(path = %path.display(), "Answering from file");
        return Ok(Box::new(ScriptedPrompter::from_path(path)?));
    }
    terminal_prompter(output)
}

#[cfg(feature = "interactive")]
fn terminal_prompter(output: &OutputManager) -> CliResult<Box<dyn Prompter>> {
    Ok(Box::new(crate::prompt::TerminalPrompter::new(
        output.supports_color(),
    )))
}

#[cfg(not(feature = "interactive"))]
fn terminal_prompter(_output: &OutputManager) -> CliResult<Box<dyn Prompter>> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Reads remembered answers without recording new ones.
struct ReadOnly<'a>(&'a dyn PreferenceStore);

impl PreferenceStore for ReadOnly<'_> {
    fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key)
    }

    fn set(&self, _key: &str, _value: bool) -> StencilResult<()> {
        Ok(())
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn banner(out: &OutputManager) -> CliResult<()> {
    out.header("Thank you for using stencil, the front-end boilerplate generator.")?;
    out.print("Answer a few questions and your project is ready to build.")?;
    out.print("")?;
    Ok(())
}

fn show_plan(report: &RunReport, destination: &Path, out: &OutputManager) -> CliResult<()> {
    out.print("")?;
    out.info(&format!(
        "Dry run: would create {} file(s) in {}",
        report.planned.len(),
        destination.display(),
    ))?;
    for file in &report.planned {
        out.file(&format!("{} ({})", file.output, file.kind), true)?;
    }
    for path in &report.skipped {
        out.file(path.as_str(), false)?;
    }
    Ok(())
}

fn show_summary(report: &RunReport, destination: &Path, out: &OutputManager) -> CliResult<()> {
    out.print("")?;
    out.success(&format!(
        "Created {} file(s) in {}",
        report.written.len(),
        destination.display(),
    ))?;
    for path in &report.written {
        out.file(path.as_str(), true)?;
    }
    for failure in &report.hook_failures {
        out.warning(&format!("{} failed: {}", failure.hook, failure.reason))?;
    }
    Ok(())
}

fn show_end(
    report: &RunReport,
    skipped_hooks: bool,
    install_steps: &[String],
    out: &OutputManager,
) -> CliResult<()> {
    out.print("")?;
    if skipped_hooks || !report.hook_failures.is_empty() {
        for step in install_steps {
            out.print(&format!("Run `{step}` to fetch the dependencies."))?;
        }
    } else {
        out.header("Everything is up!")?;
    }
    out.print(
        "You can run `npm start` or `gulp default` to watch for styles or scripts \
         file changes and auto-compiling",
    )?;
    out.print("")?;
    out.print("Happy coding!")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
