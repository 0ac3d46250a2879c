use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

/// A git invocation: the argument vector passed to the `git` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<String>,
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Renders as a copy-pasteable shell line: `git commit -m "Initial commit"`
impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git")?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of one invocation.
///
/// A process that could not be spawned at all is reported as a failure whose
/// `stderr` carries the spawn error.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// The text to show the user when the command failed
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs git commands inside a working directory
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, dir: &Path, command: &GitCommand) -> CommandOutput;
}

/// Spawns the system `git` executable.
///
/// We shell out to git rather than linking libgit2 so that the user's
/// credential helpers, SSH keys and proxy settings apply to fetch and push.
pub struct GitRunner {
    program: PathBuf,
}

impl GitRunner {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git binary instead of the one on PATH
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for GitRunner {
    async fn run(&self, dir: &Path, command: &GitCommand) -> CommandOutput {
        tracing::debug!(cwd = %dir.display(), command = %command, "spawning");

        let output = Command::new(&self.program)
            .args(command.args())
            .current_dir(dir)
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) => {
                let result = CommandOutput {
                    success: output.status.success(),
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                };
                tracing::debug!(command = %command, code = ?result.code, "finished");
                result
            }
            Err(e) => {
                tracing::warn!(command = %command, error = %e, "failed to spawn git");
                CommandOutput {
                    success: false,
                    code: None,
                    stdout: String::new(),
                    stderr: format!(
                        "failed to run `{}`: {}. Is git installed?",
                        self.program.display(),
                        e
                    ),
                }
            }
        }
    }
}
