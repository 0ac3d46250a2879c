pub mod config;
pub mod files;
pub mod setup;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::Overrides;

#[derive(Parser)]
#[command(name = "gitseed")]
#[command(about = "Turn a local folder into a git repository wired to a hosted remote")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a gitseed.toml (default: search upwards from the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the repository, add the remote, commit and push
    Setup {
        /// Local folder to turn into a repository
        #[arg(long)]
        path: Option<PathBuf>,

        /// Remote repository URL
        #[arg(long)]
        remote: Option<String>,

        /// Initial commit message
        #[arg(short, long)]
        message: Option<String>,

        /// Branch to push; give twice for a fallback (default: main, then master)
        #[arg(short, long = "branch")]
        branches: Vec<String>,

        /// Write a JSON report of the run to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Preview the files that would be tracked
    Files {
        /// Local folder to list
        #[arg(long)]
        path: Option<PathBuf>,

        /// List every file instead of a sample
        #[arg(long)]
        all: bool,
    },

    /// Show the resolved configuration
    Config,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = self.config;
        match self.command {
            Commands::Setup {
                path,
                remote,
                message,
                branches,
                report,
            } => {
                let overrides = Overrides {
                    path,
                    remote,
                    message,
                    branches,
                };
                setup::run(config_path, overrides, report).await
            }
            Commands::Files { path, all } => files::run(config_path, path, all).await,
            Commands::Config => config::run(config_path).await,
        }
    }
}
