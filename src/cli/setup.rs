use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::config::{Overrides, SeedConfig};
use crate::core::runner::{CommandRunner, GitRunner};
use crate::core::style;
use crate::core::workflow::Workflow;

/// Run the full setup sequence against the system git.
pub async fn run(
    config_path: Option<PathBuf>,
    overrides: Overrides,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let (mut config, _source) = SeedConfig::resolve(config_path.as_deref(), &cwd)?;
    config.apply(overrides)?;

    let runner = GitRunner::new();
    execute(&config, &runner, &cwd, report_path.as_deref()).await
}

/// Drive the workflow with `runner`, narrating on stderr.
///
/// The report, when requested, is written even if a required step failed.
pub async fn execute(
    config: &SeedConfig,
    runner: &dyn CommandRunner,
    cwd: &Path,
    report_path: Option<&Path>,
) -> Result<()> {
    let mut workflow = Workflow::new(config, runner, cwd, std::io::stderr())?;
    let result = workflow.run().await;
    let (report, _) = workflow.finish();

    eprintln!("\n{}", style::rule());

    if let Some(path) = report_path {
        report.write(path)?;
        eprintln!("{}", style::hint(&format!("Run report written to {}", path.display())));
    }

    result?;
    Ok(())
}
