//! # Shopfront Register Entry Point
//!
//! `shopfront-register [CONFIG]` runs one scripted sale against the sample
//! store and prints the receipt. The setup lives in `lib.rs` for testability.

use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    match shopfront_register::run(config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "register stopped");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
