use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up from the current directory upwards
pub const CONFIG_FILE: &str = "gitseed.toml";

/// Directory names never descended into when listing files
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", ".venv", "__pycache__", ".Xil"];

/// Configuration from gitseed.toml (every section is optional)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedConfig {
    pub repository: RepositoryConfig,
    pub commit: CommitConfig,
    pub push: PushConfig,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Local folder to turn into a repository. Defaults to the current directory.
    pub path: Option<PathBuf>,
    /// URL of the hosted remote. Required by `gitseed setup`.
    pub remote: Option<String>,
    pub remote_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CommitConfig {
    pub message: String,
}

/// Branch names tried by upstream tracking and push.
///
/// The first entry is pushed first; the second, if present, is the single
/// fallback when the first push fails.
///
/// ```toml
/// [push]
/// branches = ["main", "master"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PushConfig {
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingConfig {
    pub exclude: Vec<String>,
    /// How many sample paths the listing step prints
    pub sample: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            remote: None,
            remote_name: "origin".to_string(),
        }
    }
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            message: "Initial commit".to_string(),
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            branches: vec!["main".to_string(), "master".to_string()],
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            sample: 10,
        }
    }
}

/// Values given on the command line. They win over gitseed.toml.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub path: Option<PathBuf>,
    pub remote: Option<String>,
    pub message: Option<String>,
    pub branches: Vec<String>,
}

impl SeedConfig {
    /// Load and validate configuration from a gitseed.toml file.
    ///
    /// A relative `repository.path` is resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        if let (Some(repo_path), Some(base)) = (&config.repository.path, path.parent()) {
            if repo_path.is_relative() {
                config.repository.path = Some(base.join(repo_path));
            }
        }

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SeedConfig =
            toml::from_str(content).context("Failed to parse gitseed.toml")?;

        config.validate()?;
        Ok(config)
    }

    /// Find gitseed.toml by walking up from the given directory.
    ///
    /// Returns `None` when no config file exists in `start_dir` or any parent.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.is_file() {
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Resolve the configuration for a run: an explicit file if given,
    /// otherwise a discovered gitseed.toml, otherwise the built-in defaults.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            tracing::debug!(config = %path.display(), "loaded explicit config");
            return Ok((config, Some(path.to_path_buf())));
        }

        match Self::find_and_load(cwd)? {
            Some((config, path)) => {
                tracing::debug!(config = %path.display(), "discovered config");
                Ok((config, Some(path)))
            }
            None => {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                Ok((Self::default(), None))
            }
        }
    }

    /// Apply command-line overrides and re-validate
    pub fn apply(&mut self, overrides: Overrides) -> Result<()> {
        if let Some(path) = overrides.path {
            self.repository.path = Some(path);
        }
        if let Some(remote) = overrides.remote {
            self.repository.remote = Some(remote);
        }
        if let Some(message) = overrides.message {
            self.commit.message = message;
        }
        if !overrides.branches.is_empty() {
            self.push.branches = overrides.branches;
        }
        self.validate()
    }

    /// The folder every git command runs in
    pub fn local_path(&self, cwd: &Path) -> PathBuf {
        match &self.repository.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => cwd.join(path),
            None => cwd.to_path_buf(),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let branches = &self.push.branches;
        if branches.is_empty() || branches.len() > 2 {
            bail!(
                "Invalid push.branches: expected one or two branch names, got {}",
                branches.len()
            );
        }
        if let Some(blank) = branches.iter().position(|b| b.trim().is_empty()) {
            bail!("Invalid push.branches: entry {} is empty", blank + 1);
        }

        if self.repository.remote_name.trim().is_empty() {
            bail!("Invalid repository.remote_name: must not be empty");
        }

        if self.commit.message.trim().is_empty() {
            bail!("Invalid commit.message: must not be empty");
        }

        if self.listing.sample == 0 {
            bail!("Invalid listing.sample: must be at least 1");
        }

        Ok(())
    }
}
