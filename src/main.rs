//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_tracker` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ip_tracker::initialization::init_logger_with;
use ip_tracker::{run_session, Config, Opt, SessionOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), falling back
    // to one next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    let options = SessionOptions {
        queries: opt.queries.clone(),
        once: opt.once,
    };
    let config = Config::from(opt);

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_session(config, options).await {
        Ok(report) => {
            println!(
                "Issued {} lookup{} ({} succeeded, {} failed, {} rejected before lookup)",
                report.lookups_issued,
                if report.lookups_issued == 1 { "" } else { "s" },
                report.lookups_succeeded,
                report.lookups_failed,
                report.validation_rejections
            );
            if report.lookups_discarded > 0 {
                println!("{} stale responses discarded", report.lookups_discarded);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ip_tracker error: {:#}", e);
            process::exit(1);
        }
    }
}
