//! Implementation of the `stencil list` command.

use stencil_adapters::profile_loader::BUILTIN_PROFILES;
use stencil_core::domain::{DefaultValue, Profile, Question};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::new::{apply_config_defaults, resolve_profile},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut profile = resolve_profile(args.profile.as_deref(), &config)?;
    apply_config_defaults(&mut profile, &config);

    match args.format {
        ListFormat::Table => {
            for line in describe(&profile) {
                match line {
                    Line::Header(text) => output.header(&text)?,
                    Line::Item(text) => output.print(&text)?,
                }
            }
        }
        ListFormat::List => {
            // Bypasses OutputManager so piping works even with --quiet.
            for entry in profile.manifest.iter() {
                println!("{}", entry.output);
            }
        }
    }

    Ok(())
}

enum Line {
    Header(String),
    Item(String),
}

fn describe(profile: &Profile) -> Vec<Line> {
    let mut lines = vec![Line::Header(format!("Profile: {}", profile.name))];

    lines.push(Line::Header("Questions:".into()));
    for q in profile.questions.iter() {
        lines.push(Line::Item(question_line(q)));
    }

    lines.push(Line::Header("Files:".into()));
    for entry in profile.manifest.iter() {
        lines.push(Line::Item(format!(
            "  {:<30} <- {:<24} {:<6} {}",
            entry.output.as_str(),
            entry.template.as_str(),
            entry.kind,
            entry.include,
        )));
    }

    if !profile.hooks.is_empty() {
        lines.push(Line::Header("Post hooks:".into()));
        for hook in &profile.hooks {
            lines.push(Line::Item(format!("  {}", hook.command_line())));
        }
    }

    let builtin: Vec<&str> = BUILTIN_PROFILES.iter().map(|(name, _)| *name).collect();
    lines.push(Line::Item(String::new()));
    lines.push(Line::Item(format!("Built-in profiles: {}", builtin.join(", "))));
    lines
}

fn question_line(q: &Question) -> String {
    let default = match &q.default {
        Some(DefaultValue::Text(text)) if text.is_empty() => "(empty)".to_string(),
        Some(DefaultValue::Text(text)) => text.clone(),
        Some(DefaultValue::Flag(flag)) => flag.to_string(),
        Some(DefaultValue::DirectoryName) => "<directory name>".to_string(),
        None => "-".to_string(),
    };
    let mut extras = Vec::new();
    if let Some(validator) = q.validator {
        extras.push(format!("validator={validator}"));
    }
    if q.sticky {
        extras.push("sticky".to_string());
    }
    format!(
        "  {:<14} {:<8} default={:<18} {}",
        q.key,
        q.kind,
        default,
        extras.join(" ")
    )
    .trim_end()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<&str> {
        lines
            .iter()
            .map(|l| match l {
                Line::Header(t) | Line::Item(t) => t.as_str(),
            })
            .collect()
    }

    #[test]
    fn standard_profile_lists_every_file_and_question() {
        let profile = Profile::standard();
        let lines = describe(&profile);
        let text = text(&lines);

        assert_eq!(text[0], "Profile: frontend");
        for entry in profile.manifest.iter() {
            assert!(
                text.iter().any(|l| l.contains(entry.output.as_str())),
                "{} missing",
                entry.output
            );
        }
        assert!(text.iter().any(|l| l.contains("gitlabci") && l.contains("sticky")));
        assert!(text.iter().any(|l| l.contains("npm install")));
    }

    #[test]
    fn question_line_shows_validator_and_default() {
        let line = question_line(Profile::standard().questions.get("version").unwrap());
        assert!(line.contains("default=0.1.0"));
        assert!(line.contains("validator=semver"));

        let line = question_line(Profile::standard().questions.get("name").unwrap());
        assert!(line.contains("<directory name>"));
    }
}
