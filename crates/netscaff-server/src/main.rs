//! # netscaff
//!
//! Layered .NET solution scaffolding over HTTP and from the command line.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                     |
//! |------|-----------------------------|
//! |  0   | Success                     |
//! |  1   | Internal / system error     |
//! |  2   | User / input error          |
//! |  3   | Resource not found          |
//! |  4   | Configuration error         |
//! |  5   | .NET SDK missing or failed  |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use netscaff_server::{
    cli::{Cli, Commands, GlobalArgs},
    commands,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init. A missing
    // .env is not an error.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and exit 0.
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let color = colored_errors(&cli.global, None, std::io::stderr().is_terminal());
            return handle_error(e, cli.global.verbose > 0, color);
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let verbose = cli.global.verbose > 0;
    let color = colored_errors(&cli.global, Some(&config), std::io::stderr().is_terminal());
    match run(cli, config, output) {
        Ok(()) => {
            info!("netscaff completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, color),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config, output),
        Commands::New(args) => commands::new::execute(args, config, output),
        Commands::Check(args) => commands::check::execute(args, output),
        Commands::Sdk => commands::sdk::execute(config, output),
    }
}

/// Whether the error report on stderr may use ANSI colour. `config` is
/// `None` when loading it is what failed.
fn colored_errors(global: &GlobalArgs, config: Option<&AppConfig>, stderr_is_terminal: bool) -> bool {
    stderr_is_terminal && !global.no_color && !config.is_some_and(|c| c.output.no_color)
}

/// Print `err` to stderr and turn it into the process exit code.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    let msg = if color {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
