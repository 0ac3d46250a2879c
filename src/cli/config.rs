use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::config::{CONFIG_FILE, SeedConfig};
use crate::core::style;

/// Print the configuration a `setup` run would start from
pub async fn run(config_path: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let (config, source) = SeedConfig::resolve(config_path.as_deref(), &cwd)?;

    eprintln!("{}", style::banner("CONFIGURATION"));
    let source = match &source {
        Some(path) => path.display().to_string(),
        None => format!("built-in defaults (no {} found)", CONFIG_FILE),
    };
    eprintln!("{}", style::summary_line("Source", &source));
    eprintln!(
        "{}",
        style::summary_line("Local", &config.local_path(&cwd).display().to_string())
    );
    if config.repository.remote.is_none() {
        eprintln!("{}", style::warning("No remote configured; `gitseed setup` needs --remote"));
    }
    eprintln!();

    println!("{}", render(&config)?);
    Ok(())
}

/// The resolved configuration as gitseed.toml text
pub fn render(config: &SeedConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render configuration")
}
