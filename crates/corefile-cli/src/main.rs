//! corefile-tool - command-line front end for the Corefile migration engine
//!
//! Reads a Corefile, runs one migration or analysis operation against the
//! built-in (or configured) release catalogue and prints the result.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use corefile_schemas::Catalog;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    let cli = Cli::parse_args();

    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, cli.use_color(true)),
    };

    let use_color = cli.use_color(config.output.color);
    control::set_override(use_color);

    // Held until exit so buffered file logs are flushed
    let log_guard = match init_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    if let Err(e) = run(cli, config) {
        drop(log_guard);
        exit_with(&e, use_color);
    }
}

fn exit_with(error: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(error, use_color));

    if error.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(error.exit_code());
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let custom = {
        let _catalog_timer = Timer::new("catalog_loading");
        config.load_catalog()?
    };
    let catalog = custom.as_ref().unwrap_or_else(|| Catalog::builtin());

    let format = cli.output.unwrap_or(config.output.format);
    let mut output = OutputWriter::new(
        format,
        control::SHOULD_COLORIZE.should_colorize(),
        cli.quiet,
        cli.verbosity_level(),
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        ?format,
        "Executing command"
    );

    match cli.command {
        Commands::Migrate(args) => handlers::handle_migrate(args, &config, catalog, &mut output),
        Commands::Downgrade(args) => handlers::handle_downgrade(args, catalog, &mut output),
        Commands::Default(args) => handlers::handle_default(args, &config, catalog, &mut output),
        Commands::Deprecated(args) => handlers::handle_deprecated(args, catalog, &mut output),
        Commands::Unsupported(args) => handlers::handle_unsupported(args, catalog, &mut output),
        Commands::Validversions => handlers::handle_validversions(catalog, &mut output),
        Commands::Released(args) => handlers::handle_released(args, catalog, &mut output),
        Commands::Completions(args) => {
            handlers::handle_completions(args, &mut std::io::stdout())
        }
    }
}

/// Initialize the logging system from flags, config file and environment
fn init_logging(cli: &Cli, config: &Config) -> Result<Option<WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_config(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}
