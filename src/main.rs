use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitseed::cli::Cli;
use gitseed::core::style;

/// Diagnostics go to stderr; RUST_LOG wins over --verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose { "gitseed=debug" } else { "gitseed=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style::error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}
