//! User-facing output on stdout.
//!
//! Every line goes through [`OutputManager`] so `--quiet`, `--no-color`,
//! `NO_COLOR`, `output.no_color` and `--output-format plain` are honoured in
//! one place. Diagnostics belong to `tracing`, not here.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Kinds of status line, each with its own marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Success => text.green().to_string(),
            Self::Warning => text.yellow().to_string(),
            Self::Info => text.blue().to_string(),
        }
    }
}

pub struct OutputManager {
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let plain = match args.output_format {
            OutputFormat::Auto => !io::stdout().is_terminal(),
            OutputFormat::Plain => true,
            OutputFormat::Human => false,
        };
        Self {
            quiet: args.quiet,
            color: !(plain || args.no_color || config.output.no_color),
            term: Term::stdout(),
        }
    }

    /// A line as-is.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(|| msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    /// Section title, bold cyan when colour is on.
    pub fn header(&self, text: &str) -> io::Result<()> {
        self.line(|| {
            if self.color {
                text.cyan().bold().to_string()
            } else {
                text.to_owned()
            }
        })
    }

    /// One file of a plan or summary: `+` written, `-` left out.
    pub fn file(&self, path: &str, written: bool) -> io::Result<()> {
        self.line(|| match (written, self.color) {
            (true, false) => format!("  + {path}"),
            (false, false) => format!("  - {path}"),
            (true, true) => format!("  {} {path}", "+".green()),
            (false, true) => format!("  {} {}", "-".dimmed(), path.dimmed()),
        })
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        self.line(|| {
            if self.color {
                format!("{} {}", tone.paint(tone.marker()).bold(), tone.paint(msg))
            } else {
                format!("{} {msg}", tone.marker())
            }
        })
    }

    /// Quiet mode skips formatting as well as writing.
    fn line(&self, render: impl FnOnce() -> String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_mode_writes_nothing_and_succeeds() {
        let out = manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.warning("careful").is_ok());
        assert!(out.file("package.json", true).is_ok());
    }

    #[test]
    fn colour_follows_flag_and_format() {
        assert!(manager(false, false, OutputFormat::Human).supports_color());
        assert!(!manager(false, true, OutputFormat::Human).supports_color());
        assert!(!manager(false, false, OutputFormat::Plain).supports_color());
    }

    #[test]
    fn config_can_turn_colour_off() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn every_tone_has_a_distinct_marker() {
        let markers = [Tone::Success, Tone::Warning, Tone::Info].map(Tone::marker);
        assert_ne!(markers[0], markers[1]);
        assert_ne!(markers[1], markers[2]);
        assert_ne!(markers[0], markers[2]);
    }
}
