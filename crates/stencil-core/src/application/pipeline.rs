//! Run pipeline: init → collect → build → write → post-hook → end.
//!
//! The generator is a driver over explicit stages. Banner and summary
//! output belong to the caller; everything between is here.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use tracing::{info, info_span, instrument, warn};

use crate::{
    application::{
        ports::{PostHook, PreferenceStore, Prompter},
        services::{CollectOptions, Collector, PlannedFile, ScaffoldService},
    },
    domain::{AnswerSet, DomainValidator, Profile, RelativePath, RenderContext},
    error::StencilResult,
};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collect,
    Build,
    Write,
    PostHook,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collect => write!(f, "collect"),
            Self::Build => write!(f, "build"),
            Self::Write => write!(f, "write"),
            Self::PostHook => write!(f, "post-hook"),
        }
    }
}

/// Per-run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub destination: PathBuf,
    /// Plan only: no files, no hooks.
    pub dry_run: bool,
    pub skip_hooks: bool,
}

impl RunOptions {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            dry_run: false,
            skip_hooks: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn skip_hooks(mut self, skip: bool) -> Self {
        self.skip_hooks = skip;
        self
    }

    /// Default for the `name` question.
    pub fn directory_name(&self) -> String {
        directory_name(&self.destination)
    }
}

/// A post hook that failed. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFailure {
    pub hook: String,
    pub reason: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub answers: AnswerSet,
    /// Files written (empty on a dry run).
    pub written: Vec<RelativePath>,
    /// Outputs excluded by their predicate.
    pub skipped: Vec<RelativePath>,
    /// Files a dry run would write (empty otherwise).
    pub planned: Vec<PlannedFile>,
    pub hooks_run: Vec<String>,
    pub hook_failures: Vec<HookFailure>,
}

impl RunReport {
    fn new(answers: AnswerSet) -> Self {
        Self {
            answers,
            written: Vec::new(),
            skipped: Vec::new(),
            planned: Vec::new(),
            hooks_run: Vec::new(),
            hook_failures: Vec::new(),
        }
    }
}

/// Drives one generation run for a profile.
pub struct Generator {
    profile: Profile,
    scaffold: ScaffoldService,
    hooks: Vec<Box<dyn PostHook>>,
}

impl Generator {
    /// Validates the profile up front so a bad manifest fails before any
    /// question is asked.
    pub fn new(profile: Profile, scaffold: ScaffoldService) -> StencilResult<Self> {
        DomainValidator::validate_profile(&profile)?;
        Ok(Self {
            profile,
            scaffold,
            hooks: Vec::new(),
        })
    }

    pub fn with_hooks(mut self, hooks: Vec<Box<dyn PostHook>>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Run every stage once, front to back.
    #[instrument(skip_all, fields(profile = %self.profile.name, dest = %options.destination.display()))]
    pub fn run(
        &self,
        prompter: &dyn Prompter,
        preferences: &dyn PreferenceStore,
        options: &RunOptions,
    ) -> StencilResult<RunReport> {
        let answers = {
            let _stage = info_span!("stage", name = %Stage::Collect).entered();
            Collector::new(prompter, preferences).collect(
                &self.profile.questions,
                &CollectOptions::new(options.directory_name()),
            )?
        };

        let context = {
            let _stage = info_span!("stage", name = %Stage::Build).entered();
            RenderContext::new(answers.clone())
        };

        let mut report = RunReport::new(answers);

        {
            let _stage = info_span!("stage", name = %Stage::Write).entered();
            if options.dry_run {
                report.planned = self.scaffold.plan(&self.profile.manifest, &context)?;
                report.skipped = self
                    .profile
                    .manifest
                    .iter()
                    .filter(|entry| !entry.is_included(&context))
                    .map(|entry| entry.output.clone())
                    .collect();
                info!(files = report.planned.len(), "Dry run, nothing written");
                return Ok(report);
            }

            let written =
                self.scaffold
                    .materialize(&self.profile.manifest, &context, &options.destination)?;
            report.written = written.written;
            report.skipped = written.skipped;
        }

        if !options.skip_hooks {
            let _stage = info_span!("stage", name = %Stage::PostHook).entered();
            self.run_hooks(&options.destination, &mut report);
        }

        Ok(report)
    }

    fn run_hooks(&self, root: &Path, report: &mut RunReport) {
        for hook in &self.hooks {
            info!(hook = hook.name(), "Running post hook");
            match hook.run(root) {
                Ok(()) => report.hooks_run.push(hook.name().to_string()),
                Err(err) => {
                    warn!(hook = hook.name(), error = %err, "Post hook failed");
                    report.hook_failures.push(HookFailure {
                        hook: hook.name().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}

/// Final path segment of `path`, falling back to the current directory's.
pub fn directory_name(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut segments: Vec<String> = Vec::new();
    for component in absolute.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            Component::ParentDir => {
                segments.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    segments.pop().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{
            Filesystem, TemplateRenderer, TemplateStore,
            output::{MockPostHook, MockPreferenceStore},
        },
    };
    use crate::domain::{FileManifest, Question, TemplateId, ValidationError};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    struct Defaults;

    impl Prompter for Defaults {
        fn input(&self, question: &Question, _default: Option<&str>) -> StencilResult<String> {
            Ok(match question.key.as_str() {
                "author" => "Jane Doe <jane@example.com>".into(),
                _ => String::new(),
            })
        }

        fn confirm(&self, question: &Question, default: bool) -> StencilResult<bool> {
            Ok(question.key != "es6linting" && default)
        }

        fn reject(&self, question: &Question, error: &ValidationError) -> StencilResult<()> {
            panic!("unexpected rejection of {}: {}", question.key, error)
        }
    }

    struct Templates;

    impl TemplateStore for Templates {
        fn resolve(&self, id: &TemplateId) -> StencilResult<Vec<u8>> {
            Ok(id.as_str().as_bytes().to_vec())
        }

        fn exists(&self, _id: &TemplateId) -> bool {
            true
        }
    }

    struct NameRenderer;

    impl TemplateRenderer for NameRenderer {
        fn render(
            &self,
            _template: &TemplateId,
            source: &str,
            context: &RenderContext,
        ) -> StencilResult<String> {
            Ok(format!("{}:{}", source, context.lookup("name").unwrap_or_default()))
        }
    }

    #[derive(Clone, Default)]
    struct Tree(Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>);

    impl Filesystem for Tree {
        fn create_dir_all(&self, _path: &Path) -> StencilResult<()> {
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
            self.0.lock().unwrap().insert(path.to_path_buf(), content.to_vec());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.0.lock().unwrap().contains_key(path)
        }
    }

    fn prefs() -> MockPreferenceStore {
        let mut prefs = MockPreferenceStore::new();
        prefs.expect_get().returning(|_| None);
        prefs.expect_set().returning(|_, _| Ok(()));
        prefs
    }

    fn generator(tree: &Tree) -> Generator {
        let scaffold = ScaffoldService::new(
            Box::new(Templates),
            Box::new(NameRenderer),
            Box::new(tree.clone()),
        );
        Generator::new(Profile::standard(), scaffold).unwrap()
    }

    #[test]
    fn full_run_writes_selected_files() {
        let tree = Tree::default();
        let report = generator(&tree)
            .run(&Defaults, &prefs(), &RunOptions::new("/work/demo").skip_hooks(true))
            .unwrap();

        assert_eq!(report.answers.text("name"), Some("demo"));
        assert_eq!(report.written.len(), 11);
        assert_eq!(report.skipped, vec![RelativePath::new(".eslintrc")]);

        let files = tree.0.lock().unwrap();
        assert_eq!(
            files.get(Path::new("/work/demo/package.json")).unwrap(),
            &b"_package.json:demo".to_vec()
        );
        assert!(files.contains_key(Path::new("/work/demo/assets/dist/fonts/.gitkeep")));
        assert!(!files.contains_key(Path::new("/work/demo/.eslintrc")));
    }

    #[test]
    fn dry_run_writes_nothing_and_skips_hooks() {
        let tree = Tree::default();
        let mut hook = MockPostHook::new();
        hook.expect_run().never();
        hook.expect_name().return_const("npm install".to_string());

        let report = generator(&tree)
            .with_hooks(vec![Box::new(hook)])
            .run(&Defaults, &prefs(), &RunOptions::new("/work/demo").dry_run(true))
            .unwrap();

        assert!(tree.0.lock().unwrap().is_empty());
        assert!(report.written.is_empty());
        assert_eq!(report.planned.len(), 11);
        assert!(report.hooks_run.is_empty());
    }

    #[test]
    fn hook_failure_is_reported_not_fatal() {
        let tree = Tree::default();

        let mut npm = MockPostHook::new();
        npm.expect_name().return_const("npm install".to_string());
        npm.expect_run().times(1).returning(|_| {
            Err(ApplicationError::HookFailed {
                hook: "npm install".into(),
                reason: "exit status 1".into(),
            }
            .into())
        });

        let mut bower = MockPostHook::new();
        bower.expect_name().return_const("bower install".to_string());
        bower.expect_run().times(1).returning(|_| Ok(()));

        let report = generator(&tree)
            .with_hooks(vec![Box::new(npm), Box::new(bower)])
            .run(&Defaults, &prefs(), &RunOptions::new("/work/demo"))
            .unwrap();

        assert_eq!(report.written.len(), 11);
        assert_eq!(report.hooks_run, vec!["bower install".to_string()]);
        assert_eq!(report.hook_failures.len(), 1);
        assert_eq!(report.hook_failures[0].hook, "npm install");
    }

    #[test]
    fn invalid_profile_fails_before_prompting() {
        let mut profile = Profile::standard();
        profile.manifest = FileManifest::new(vec![]);
        let scaffold = ScaffoldService::new(
            Box::new(Templates),
            Box::new(NameRenderer),
            Box::new(Tree::default()),
        );

        assert!(Generator::new(profile, scaffold).is_err());
    }

    #[test]
    fn minimal_profile_runs_without_flags() {
        let tree = Tree::default();
        let scaffold = ScaffoldService::new(
            Box::new(Templates),
            Box::new(NameRenderer),
            Box::new(tree.clone()),
        );
        let generator = Generator::new(Profile::minimal(), scaffold).unwrap();
        assert_eq!(generator.profile().hooks.len(), 1);

        let mut prefs = MockPreferenceStore::new();
        prefs.expect_get().never();
        prefs.expect_set().never();

        let report = generator
            .run(&Defaults, &prefs, &RunOptions::new("/work/mini").skip_hooks(true))
            .unwrap();
        assert_eq!(report.written.len(), 3);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn directory_name_takes_last_segment() {
        assert_eq!(directory_name(Path::new("/tmp/projects/my-site")), "my-site");
        assert_eq!(directory_name(Path::new("/tmp/projects/my-site/")), "my-site");
        assert!(!directory_name(Path::new(".")).is_empty());
    }

    #[test]
    fn directory_name_resolves_parent_segments() {
        assert_eq!(directory_name(Path::new("/work/a/b/..")), "a");
        assert_eq!(directory_name(Path::new("/work/a/./b/../c")), "c");
        assert_eq!(directory_name(Path::new("/work/..")), "");
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::PostHook.to_string(), "post-hook");
        assert_eq!(Stage::Collect.to_string(), "collect");
    }
}
