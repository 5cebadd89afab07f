//! Tracing subscriber setup for the `stencil` binary.
//!
//! The library crates emit events; this is the only place a subscriber is
//! installed. Diagnostics go to stderr so generated summaries on stdout stay
//! clean.
//!
//! | Flags     | Level |
//! |-----------|-------|
//! | `--quiet` | ERROR |
//! | (none)    | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//!
//! A set `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the computed level.
const CRATES: &[&str] = &["stencil", "stencil_core", "stencil_adapters"];

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse(directives(level))?,
    };

    // Targets and timestamps only help once someone is debugging.
    let detailed = level >= LevelFilter::DEBUG;
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(detailed);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if detailed {
        registry.with(layer).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn directives(level: LevelFilter) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `--quiet` wins over any number of `-v`.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn verbosity_counts_map_to_levels() {
        let cases = [
            (0, LevelFilter::WARN),
            (1, LevelFilter::INFO),
            (2, LevelFilter::DEBUG),
            (3, LevelFilter::TRACE),
            (9, LevelFilter::TRACE),
        ];
        for (count, expected) in cases {
            assert_eq!(level_for(&args(count, false)), expected, "-v x{count}");
        }
    }

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(level_for(&args(0, true)), LevelFilter::ERROR);
        assert_eq!(level_for(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_name_every_crate() {
        assert_eq!(
            directives(LevelFilter::DEBUG),
            "stencil=debug,stencil_core=debug,stencil_adapters=debug"
        );
    }

    #[test]
    fn directives_parse_as_a_filter() {
        assert!(
            EnvFilter::builder()
                .parse(directives(LevelFilter::INFO))
                .is_ok()
        );
    }
}
