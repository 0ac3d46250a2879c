use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::config::{Overrides, SeedConfig};
use crate::core::files::discover_files;
use crate::core::style;

/// Preview the listing step without touching git
pub async fn run(config_path: Option<PathBuf>, path: Option<PathBuf>, all: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let (mut config, _source) = SeedConfig::resolve(config_path.as_deref(), &cwd)?;
    config.apply(Overrides {
        path,
        ..Overrides::default()
    })?;

    for line in preview(&config, &cwd, all)? {
        eprintln!("{}", line);
    }
    Ok(())
}

/// Lines `gitseed files` prints: the folder, then the listing.
/// `all` lifts the sample limit.
pub fn preview(config: &SeedConfig, cwd: &Path, all: bool) -> Result<Vec<String>> {
    let root = config.local_path(cwd);
    if !root.is_dir() {
        anyhow::bail!("Local folder {} does not exist", root.display());
    }

    let listing = discover_files(&root, &config.listing.exclude)?;
    let limit = if all {
        listing.total().max(1)
    } else {
        config.listing.sample
    };

    let mut lines = vec![style::summary_line("Local", &root.display().to_string())];
    lines.extend(listing.display_lines(limit));
    Ok(lines)
}
