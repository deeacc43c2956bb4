//! Command-line interface definitions using clap

pub mod commands;

use clap::{Parser, Subcommand};
use std::fmt;

/// bioview - page-view analytics for link-in-bio pages
#[derive(Parser)]
#[command(name = "bioview")]
#[command(version)]
#[command(about = "Page-view analytics for link-in-bio pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print the recent activity summary of a page as JSON
    Summary {
        /// Page owner id
        owner_id: i64,
    },

    /// Create the page record for an owner (no-op if it exists)
    CreatePage {
        /// Page owner id
        owner_id: i64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::BioviewError> for CliError {
    fn from(err: crate::errors::BioviewError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is handled by the caller.
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a one-shot command".to_string(),
        )),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => commands::config_generate(output_path, force),
        Commands::Summary { owner_id } => {
            let ctx = commands::open_store().await?;
            commands::print_summary(&ctx, owner_id).await
        }
        Commands::CreatePage { owner_id } => {
            let ctx = commands::open_store().await?;
            commands::create_page(&ctx, owner_id).await
        }
    }
}
