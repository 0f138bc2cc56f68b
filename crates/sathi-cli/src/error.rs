use colored::Colorize;

use crate::config::{OPENROUTER_API_KEY_ENV, TELEGRAM_TOKEN_ENV};

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{:#}", err).to_lowercase();

    if msg.contains(&TELEGRAM_TOKEN_ENV.to_lowercase()) {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Export the bot token from @BotFather:");
        eprintln!("  {} export {}=<token>", "$".dimmed(), TELEGRAM_TOKEN_ENV);
    }

    if msg.contains(&OPENROUTER_API_KEY_ENV.to_lowercase()) {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Export your OpenRouter API key:");
        eprintln!("  {} export {}=<key>", "$".dimmed(), OPENROUTER_API_KEY_ENV);
    }

    if msg.contains("unauthorized") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check that {} is a valid bot token.", TELEGRAM_TOKEN_ENV);
    }

    if msg.contains("invalid config file") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Fix the TOML syntax or pass another file with --config.");
    }

    if msg.contains("connection refused") || msg.contains("network") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check your internet connection and try again.");
    }

    std::process::exit(1);
}
