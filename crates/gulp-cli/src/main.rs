//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers in [`gulp_cli::handlers`].

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use gulp_cli::handlers::{self, download::DownloadArgs};
use gulp_cli::{Cli, CliConfig, CliError, Commands, bootstrap};
use gulp_core::normalize_user_path;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.data_dir {
        Some(dir) => CliConfig::with_data_dir(
            normalize_user_path(&dir.to_string_lossy()).map_err(CliError::from)?,
        ),
        None => CliConfig::with_defaults()?,
    };
    let ctx = bootstrap(config);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Download {
            url,
            output,
            no_skip_existing,
            write_metadata,
            no_notify,
            quiet,
        } => {
            let args = DownloadArgs {
                url,
                output,
                no_skip_existing,
                write_metadata,
                no_notify,
                quiet,
            };
            handlers::download::execute(&ctx, args).await?;
        }
        Commands::History { command } => {
            handlers::history::execute(&ctx, command).await?;
        }
        Commands::Config { command } => {
            handlers::config::execute(&ctx, command)?;
        }
        Commands::Paths => {
            handlers::paths::execute(&ctx)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = match err.downcast_ref::<CliError>() {
                Some(cli_error) => {
                    if let Some(line) = cli_error.report() {
                        eprintln!("{line}");
                    }
                    cli_error.exit_code()
                }
                None => {
                    eprintln!("Error: {err}");
                    1
                }
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
