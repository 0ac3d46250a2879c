//! The setup sequence: init → remote → verify → list → stage → status →
//! commit → fetch → upstream → push.
//!
//! Steps run strictly in order, one git process at a time. Required steps
//! stop the run on failure; best-effort steps print and carry on. Push gets
//! exactly one fallback branch before it counts as a required failure.

use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::config::SeedConfig;
use crate::core::error::SetupError;
use crate::core::files::discover_files;
use crate::core::report::{RunReport, StepPolicy};
use crate::core::runner::{CommandOutput, CommandRunner, GitCommand};
use crate::core::style;

const TOTAL_STEPS: usize = 10;

pub struct Workflow<'a, W: Write> {
    config: &'a SeedConfig,
    runner: &'a dyn CommandRunner,
    root: PathBuf,
    remote: String,
    out: W,
    report: RunReport,
}

impl<'a, W: Write> Workflow<'a, W> {
    /// Prepare a run rooted at the configured local path (relative to `cwd`).
    ///
    /// Fails only when no remote URL is configured; the local path is checked
    /// when the run starts.
    pub fn new(
        config: &'a SeedConfig,
        runner: &'a dyn CommandRunner,
        cwd: &Path,
        out: W,
    ) -> Result<Self, SetupError> {
        let remote = config
            .repository
            .remote
            .clone()
            .filter(|r| !r.trim().is_empty())
            .ok_or(SetupError::MissingRemote)?;
        let root = config.local_path(cwd);

        Ok(Self {
            config,
            runner,
            report: RunReport::new(root.clone(), remote.clone()),
            root,
            remote,
            out,
        })
    }

    /// Consume the workflow, handing back the report and the output sink
    pub fn finish(self) -> (RunReport, W) {
        (self.report, self.out)
    }

    /// Execute every step. On success the closing summary is printed.
    pub async fn run(&mut self) -> Result<(), SetupError> {
        let result = self.run_steps().await;
        self.report.success = result.is_ok();

        match &result {
            Ok(()) => {
                tracing::info!(root = %self.root.display(), "setup complete");
                self.print_summary();
            }
            Err(e) => tracing::warn!(error = %e, "setup stopped"),
        }
        result
    }

    async fn run_steps(&mut self) -> Result<(), SetupError> {
        self.say(style::banner("GIT REPOSITORY SETUP"));

        if !self.root.is_dir() {
            let msg = format!("Local folder {} does not exist", self.root.display());
            self.say(format!("\n{}", style::error(&msg)));
            return Err(SetupError::MissingLocalPath(self.root.clone()));
        }

        self.say(String::new());
        self.say(style::summary_line("Local", &self.root.display().to_string()));
        self.say(style::summary_line("Remote", &self.remote.clone()));

        let remote_name = self.config.repository.remote_name.clone();

        self.heading(1, "Initializing git repository");
        self.required("init", GitCommand::new(["init"])).await?;

        self.heading(2, "Adding remote");
        self.required(
            "add-remote",
            GitCommand::new(["remote", "add", remote_name.as_str(), self.remote.as_str()]),
        )
        .await?;

        self.heading(3, "Verifying configured remote");
        self.required("verify-remote", GitCommand::new(["remote", "-v"]))
            .await?;

        self.heading(4, "Listing files in the folder");
        self.list_files();

        self.heading(5, "Staging files");
        self.required("stage", GitCommand::new(["add", "."])).await?;

        self.heading(6, "Repository status");
        self.best_effort("status", GitCommand::new(["status"])).await;

        self.heading(7, "Creating initial commit");
        let message = self.config.commit.message.clone();
        if !self
            .best_effort("commit", GitCommand::new(["commit", "-m", message.as_str()]))
            .await
        {
            self.say(format!(
                "   {}",
                style::info("Nothing to commit (the folder may be empty or fully ignored)")
            ));
        }

        self.heading(8, "Fetching from remote");
        self.best_effort("fetch", GitCommand::new(["fetch", remote_name.as_str()]))
            .await;

        self.heading(9, "Configuring upstream tracking");
        self.set_upstream(&remote_name).await;

        self.heading(10, "Pushing to remote");
        self.push(&remote_name).await
    }

    /// Walk the tree for display. Never fails the run.
    fn list_files(&mut self) {
        let sample = self.config.listing.sample;
        match discover_files(&self.root, &self.config.listing.exclude) {
            Ok(listing) => {
                tracing::debug!(total = listing.total(), "listed files");
                for line in listing.display_lines(sample) {
                    self.say(line);
                }
                self.report
                    .record("list-files", None, StepPolicy::BestEffort, true);
            }
            Err(e) => {
                tracing::warn!(error = %e, "file listing failed");
                self.say(format!("   {}", style::warning(&format!("Could not list files: {:#}", e))));
                self.report
                    .record("list-files", None, StepPolicy::BestEffort, false);
            }
        }
    }

    /// Try each candidate branch until one accepts an upstream.
    ///
    /// Only the branch git created on commit exists locally, so at most one
    /// candidate is expected to succeed; all failing is reported once.
    async fn set_upstream(&mut self, remote_name: &str) {
        let branches = self.config.push.branches.clone();
        for branch in &branches {
            let cmd = GitCommand::new([
                "branch".to_string(),
                format!("--set-upstream-to={}/{}", remote_name, branch),
                branch.clone(),
            ]);
            if self.best_effort("upstream", cmd).await {
                return;
            }
        }
        self.say(format!(
            "   {}",
            style::warning(&format!(
                "No upstream tracking configured for {} (push -u will set it)",
                branches.join(" or ")
            ))
        ));
    }

    async fn push(&mut self, remote_name: &str) -> Result<(), SetupError> {
        self.say(format!(
            "   {}",
            style::hint("Note: git may ask for credentials. For HTTPS remotes use a personal access token.")
        ));

        let branches = self.config.push.branches.clone();
        let mut attempted = Vec::new();

        for (i, branch) in branches.iter().enumerate() {
            if let Some(previous) = i.checked_sub(1).map(|p| &branches[p]) {
                self.say(format!(
                    "\n{}",
                    style::warning(&format!(
                        "Push to '{}' failed. Trying '{}'...",
                        previous, branch
                    ))
                ));
            }

            attempted.push(branch.clone());
            let cmd = GitCommand::new(["push", "-u", remote_name, branch.as_str()]);
            if self.exec("push", StepPolicy::Required, cmd).await.success {
                self.report.pushed_branch = Some(branch.clone());
                self.say(format!("\n{}", style::success("Push completed")));
                return Ok(());
            }
        }

        self.say(format!("\n{}", style::warning("Push failed. Check:")));
        for item in [
            "your internet connection",
            "your git credentials",
            "your permissions on the remote repository",
        ] {
            self.say(format!("   - {}", item));
        }
        Err(SetupError::PushFailed {
            branches: attempted,
        })
    }

    fn print_summary(&mut self) {
        let root = self.root.display().to_string();
        let remote = self.remote.clone();

        self.say(format!("\n{}", style::banner("SETUP COMPLETE")));
        self.say(format!("\n{}", style::success("Git repository initialized")));
        self.say(String::new());
        self.say(style::summary_line("Location", &root));
        self.say(style::summary_line("Remote", &remote));

        self.say(format!("\n{}", style::section("Next steps:")));
        self.say("   1. Copy your project files into the folder");
        self.say("   2. Run: git add .");
        self.say("   3. Run: git commit -m \"Add project files\"");
        self.say("   4. Run: git push");

        self.say(format!("\n{}", style::section("Useful commands:")));
        self.say(format!("   cd {}", root));
        self.say(style::suggestion("git log --oneline", "history"));
        self.say(style::suggestion("git status", "pending changes"));
        self.say(style::suggestion("git diff", "differences"));
        self.say(style::suggestion("git push", "send commits"));
    }

    // ---------- Command runner ----------

    async fn required(&mut self, step: &'static str, cmd: GitCommand) -> Result<(), SetupError> {
        let output = self.exec(step, StepPolicy::Required, cmd).await;
        if output.success {
            Ok(())
        } else {
            Err(SetupError::RequiredStep {
                step,
                detail: output.error_text(),
            })
        }
    }

    async fn best_effort(&mut self, step: &'static str, cmd: GitCommand) -> bool {
        self.exec(step, StepPolicy::BestEffort, cmd).await.success
    }

    /// Echo, run, print the captured output, and record the outcome.
    async fn exec(&mut self, step: &'static str, policy: StepPolicy, cmd: GitCommand) -> CommandOutput {
        let line = cmd.to_string();
        self.say(style::command(&line));

        let output = self.runner.run(&self.root, &cmd).await;
        if output.success {
            let stdout = output.stdout.trim();
            if !stdout.is_empty() {
                self.say(style::command_ok(stdout));
            }
        } else {
            self.say(style::command_err(&output.error_text()));
        }

        tracing::debug!(step, command = %line, success = output.success, "step finished");
        self.report.record(step, Some(line), policy, output.success);
        output
    }

    fn heading(&mut self, number: usize, title: &str) {
        self.say(style::step(number, TOTAL_STEPS, title));
    }

    /// Narration is best-effort: a closed stderr must not change the outcome.
    fn say(&mut self, line: impl Display) {
        let _ = writeln!(self.out, "{}", line);
    }
}
