//! This is the main entry point for mkpatch.

use std::process::ExitCode;

use mkpatch::cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stdout carries the patch, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MKPATCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::parse(None) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}
