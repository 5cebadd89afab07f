//! End-to-end generation with the real adapters.

use std::fs;
use std::path::Path;

use stencil_adapters::{
    InMemoryStore, LocalFilesystem, MemoryPreferences, PlaceholderRenderer, ScriptedPrompter,
};
use stencil_core::prelude::*;
use tempfile::TempDir;

fn generator(profile: Profile) -> Generator {
    let scaffold = ScaffoldService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(PlaceholderRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    Generator::new(profile, scaffold).unwrap()
}

fn answers(sass: bool, es6: bool, ci: bool, editor: bool) -> ScriptedPrompter {
    ScriptedPrompter::new()
        .answer("version", "0.1.0")
        .answer("desc", "")
        .answer("author", "Jane Doe <jane@example.com>")
        .answer("license", "Unlicense")
        .flag("sasslinting", sass)
        .flag("es6linting", es6)
        .flag("gitlabci", ci)
        .flag("editorconfig", editor)
}

fn run(root: &Path, prompter: &ScriptedPrompter) -> RunReport {
    generator(Profile::standard())
        .run(
            prompter,
            &MemoryPreferences::new(),
            &RunOptions::new(root).skip_hooks(true),
        )
        .unwrap()
}

#[test]
fn selected_options_produce_matching_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");

    run(&root, &answers(true, false, true, true));

    let package = fs::read_to_string(root.join("package.json")).unwrap();
    assert!(package.contains("\"name\": \"demo\""));
    assert!(package.contains("\"email\": \"jane@example.com\""));
    assert!(package.contains("gulp-sass-lint"));
    assert!(!package.contains("gulp-eslint"));

    assert!(root.join(".sass-lint.yml").exists());
    assert!(!root.join(".eslintrc").exists());
    assert!(root.join(".gitlab-ci.yml").exists());
    assert!(root.join(".editorconfig").exists());
    assert!(root.join("assets/dist/images/.gitkeep").exists());
    assert!(root.join("assets/dist/fonts/.gitkeep").exists());

    let gulpfile = fs::read_to_string(root.join("gulpfile.js")).unwrap();
    assert!(gulpfile.contains("Demo build tasks"));
    assert!(gulpfile.contains("gulp.task('sasslint'"));
    assert!(!gulpfile.contains("gulp.task('eslint'"));
    assert!(gulpfile.contains("gulp.task('lint', ['sasslint']);"));
    assert!(gulpfile.contains(".pipe(concat('Demo.js'))"));
}

#[test]
fn gulp_lint_task_lists_selected_linters() {
    let temp = TempDir::new().unwrap();
    let cases = [
        ((true, true), "['sasslint', 'eslint']"),
        ((true, false), "['sasslint']"),
        ((false, true), "['eslint']"),
        ((false, false), "[]"),
    ];

    for (i, ((sass, es6), list)) in cases.into_iter().enumerate() {
        let root = temp.path().join(format!("lint-{i}"));
        run(&root, &answers(sass, es6, false, false));
        let gulpfile = fs::read_to_string(root.join("gulpfile.js")).unwrap();
        assert!(
            gulpfile.contains(&format!("gulp.task('lint', {list});")),
            "sass={sass} es6={es6}:\n{gulpfile}"
        );
    }
}

#[test]
fn quotes_in_project_name_stay_out_of_js_strings() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("quoted");

    run(&root, &answers(false, false, false, false).answer("name", "it's my app"));

    let gulpfile = fs::read_to_string(root.join("gulpfile.js")).unwrap();
    assert!(gulpfile.contains(".pipe(concat('ItSMyApp.js'))"));
    let package: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert_eq!(package["name"], "it's my app");
}

#[test]
fn all_flags_off_writes_only_mandatory_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("bare");

    let report = run(&root, &answers(false, false, false, false));

    for optional in [".editorconfig", ".sass-lint.yml", ".eslintrc", ".gitlab-ci.yml"] {
        assert!(!root.join(optional).exists(), "{optional} should not exist");
    }
    let written: Vec<_> = report.written.iter().map(|p| p.as_str().to_string()).collect();
    assert_eq!(
        written,
        [
            "package.json",
            "bower.json",
            ".bowerrc",
            "gulpfile.js",
            ".gitignore",
            "README.md",
            "assets/dist/images/.gitkeep",
            "assets/dist/fonts/.gitkeep",
        ]
    );
}

#[test]
fn rendered_json_files_stay_valid_json() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("json-check");

    let prompter = answers(true, true, true, true)
        .answer("desc", "A \"quoted\" description")
        .answer("author", "Jane \"JD\" Doe <jane@example.com>");
    run(&root, &prompter);

    for file in ["package.json", "bower.json", ".bowerrc"] {
        let raw = fs::read_to_string(root.join(file)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw)
            .unwrap_or_else(|e| panic!("{file} is not valid JSON: {e}\n{raw}"));
        assert!(value.is_object());
    }

    let package: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert_eq!(package["description"], "A \"quoted\" description");
    assert_eq!(package["author"]["name"], "Jane \"JD\" Doe");
}

#[test]
fn readme_mentions_author_and_license() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("readme");

    run(&root, &answers(false, true, false, false));

    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.starts_with("# readme\n"));
    assert!(readme.contains("Unlicense ©"));
    assert!(readme.contains("Jane Doe <jane@example.com>"));
    assert!(readme.contains("gulp eslint"));
    assert!(!readme.contains("gulp sasslint"));
}

#[test]
fn repeated_runs_pick_the_same_files() {
    let temp = TempDir::new().unwrap();
    let prompter = answers(true, false, false, true);

    let first = run(&temp.path().join("one"), &prompter);
    let second = run(&temp.path().join("two"), &prompter);

    assert_eq!(first.written, second.written);
    assert_eq!(first.skipped, second.skipped);
}

#[test]
fn existing_files_are_overwritten() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("again");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("README.md"), "old readme").unwrap();

    run(&root, &answers(false, false, false, false));

    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.starts_with("# again"));
}
