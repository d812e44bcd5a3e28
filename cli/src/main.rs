//! netdiag - network diagnostics against a single target

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use netdiag_cli::cli::Cli;
use netdiag_cli::output::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = cli.run().await {
        let message = format!("{e:#}");
        tracing::debug!(error = %message, "run failed");
        match json::format_error(&message, "RUN_FAILED") {
            Ok(text) if json_mode => println!("{text}"),
            _ => eprintln!("Task failed: {message}"),
        }
        std::process::exit(1);
    }
}
