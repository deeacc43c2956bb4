//! CLI mode
//!
//! This module delegates to the actual CLI implementation.

use crate::cli::{CliError, Commands};

/// Run a CLI command
pub async fn run_cli(cmd: Commands) -> Result<(), CliError> {
    crate::cli::run_cli_command(cmd).await
}
