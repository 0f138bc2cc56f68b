mod cli;
mod commands;
mod completions;
mod config;
mod error;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::BotConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        error::handle_error(err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        completions::generate_completions(shell);
        return Ok(());
    }

    let config = BotConfig::load(cli.config.as_deref())?;
    let _guard = init_logging(&config, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run_bot(&config).await,
        Commands::Detect { text } => {
            commands::run_detect(&text.join(" "));
            Ok(())
        }
        Commands::Prompt { name, text } => {
            commands::run_prompt(&config, &name, &text.join(" "));
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// Configure logging: RUST_LOG wins, then `--verbose`, then the config file.
/// Logs go to stderr unless `logging.dir` is set.
fn init_logging(config: &BotConfig, verbose: bool) -> Result<Option<WorkerGuard>> {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        config
            .logging
            .level
            .clone()
            .unwrap_or_else(|| "info".to_string())
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&default_level)?,
    };

    let Some(log_dir) = &config.logging.dir else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "sathi.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    Ok(Some(guard))
}
