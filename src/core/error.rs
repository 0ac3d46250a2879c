use std::path::PathBuf;

use thiserror::Error;

/// Why a setup run stopped.
///
/// Best-effort steps never produce one of these; they only print.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("local folder {} does not exist", .0.display())]
    MissingLocalPath(PathBuf),

    #[error("no remote URL configured (set repository.remote in gitseed.toml or pass --remote)")]
    MissingRemote,

    #[error("step '{step}' failed: {detail}")]
    RequiredStep { step: &'static str, detail: String },

    #[error("push failed for branch(es): {}", .branches.join(", "))]
    PushFailed { branches: Vec<String> },
}
