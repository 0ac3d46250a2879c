//! In-memory `CommandRunner` for unit tests.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::runner::{CommandOutput, CommandRunner, GitCommand};

/// Succeeds unless the rendered command starts with one of `failing`.
/// Every invocation is recorded in order.
#[derive(Default)]
pub struct ScriptedRunner {
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn failing(cmds: &[&str]) -> Self {
        Self {
            failing: cmds.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, _dir: &Path, command: &GitCommand) -> CommandOutput {
        let line = command.to_string();
        self.calls.lock().unwrap().push(line.clone());
        if self.failing.iter().any(|f| line.starts_with(f.as_str())) {
            CommandOutput::failed(1, format!("simulated failure of {}", line))
        } else if line == "git remote -v" {
            CommandOutput::ok("origin\thttps://example.com/fpga.git (fetch)\n")
        } else {
            CommandOutput::ok("")
        }
    }
}
