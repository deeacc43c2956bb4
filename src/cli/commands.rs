use colored::Colorize;
use std::path::Path;

use super::CliError;
use crate::config::{StaticConfig, get_config};
use crate::runtime::lifetime::startup::{StartupContext, prepare_startup};

pub async fn open_store() -> Result<StartupContext, CliError> {
    let config = get_config();
    prepare_startup(&config)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))
}

pub async fn print_summary(ctx: &StartupContext, owner_id: i64) -> Result<(), CliError> {
    let summary = ctx.aggregator.summarize_recent_activity(owner_id).await?;
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::CommandError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

pub async fn create_page(ctx: &StartupContext, owner_id: i64) -> Result<(), CliError> {
    let page = ctx.store.create_page(owner_id).await?;
    println!(
        "{} owner {} -> page {} ({} views)",
        "Page ready:".green(),
        owner_id.to_string().blue(),
        page.id.to_string().blue(),
        page.views
    );
    Ok(())
}

pub fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());

    if !force && Path::new(&path).exists() {
        return Err(CliError::CommandError(format!(
            "File already exists: {} (use --force to overwrite)",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| CliError::CommandError(format!("Failed to write {}: {}", path, e)))?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bioview.toml");
        let path_str = path.to_string_lossy().to_string();

        config_generate(Some(path_str.clone()), false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("dedup_window_secs = 300"));

        // 已存在且未指定 --force
        assert!(config_generate(Some(path_str.clone()), false).is_err());
        assert!(config_generate(Some(path_str), true).is_ok());
    }
}
