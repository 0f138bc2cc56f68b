use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sathi")]
#[command(version, about = "Sathi - multilingual companion chat bot for Telegram")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ~/.config/sathi/config.toml)
    #[arg(long, global = true, env = "SATHI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (default)
    Run,

    /// Detect the language of a text and print its reply instruction
    Detect {
        /// Text to classify
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the system prompt a first message would be sent with
    Prompt {
        /// Display name of the user
        #[arg(long, default_value = "Friend")]
        name: String,

        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
