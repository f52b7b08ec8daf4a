//! Flags shared by `serve`, `new`, `check` and `sdk`.
//!
//! Flattened into [`super::Cli`] with `global = true`, so they may appear
//! before or after the subcommand.

use clap::Args;
use std::path::PathBuf;

/// Logging, colour and config-file flags.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log filter: warnings by default, `-v` info, `-vv` debug, `-vvv` trace.
    /// A `RUST_LOG` value takes precedence.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more (-v info, -vv debug, -vvv trace)",
        long_help = "Raise the log level written to stderr:
    (none)  - warnings and errors
    -v      - scaffold steps, HTTP requests, dotnet invocations
    -vv     - template registration, marker patches
    -vvv    - everything"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal; reports and progress lines are dropped.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain output on stdout and stderr. Also set by a non-empty `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Never emit ANSI colour"
    )]
    pub no_color: bool,

    /// Settings file used in place of the discovered one. `NETSCAFF__*`
    /// variables still override it.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How scaffold and check reports are printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of reports on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Coloured, one line per step.
    Human,
    Plain,
    /// One JSON document per report; logs switch to JSON lines as well.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        global: GlobalArgs,
    }

    #[test]
    fn verbosity_counts_repeated_flags() {
        let args = Harness::parse_from(["netscaff", "-vvv"]).global;
        assert_eq!(args.verbose, 3);
        assert!(!args.quiet);
    }

    #[test]
    fn config_and_format_parse() {
        let args = Harness::parse_from([
            "netscaff",
            "-c",
            "/etc/netscaff.toml",
            "--output-format",
            "plain",
        ])
        .global;
        assert_eq!(args.config, Some(PathBuf::from("/etc/netscaff.toml")));
        assert_eq!(args.output_format, OutputFormat::Plain);
    }
}
