use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether a step's failure stops the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepPolicy {
    Required,
    BestEffort,
}

/// One executed command (or the listing walk) in a run
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: &'static str,
    /// Shell rendering of the git command; `None` for steps that run no command
    pub command: Option<String>,
    pub policy: StepPolicy,
    pub success: bool,
}

/// Machine-readable account of a `gitseed setup` run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub local_path: PathBuf,
    pub remote: String,
    pub success: bool,
    /// Branch that was pushed, if any
    pub pushed_branch: Option<String>,
    pub steps: Vec<StepRecord>,
}

impl RunReport {
    pub fn new(local_path: PathBuf, remote: String) -> Self {
        Self {
            started_at: Utc::now(),
            local_path,
            remote,
            success: false,
            pushed_branch: None,
            steps: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        step: &'static str,
        command: Option<String>,
        policy: StepPolicy,
        success: bool,
    ) {
        self.steps.push(StepRecord {
            step,
            command,
            policy,
            success,
        });
    }

    /// Commands that were actually handed to git, in order
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|s| s.command.as_deref())
    }

    /// Write the report as pretty JSON
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write run report to {}", path.display()))
    }
}
