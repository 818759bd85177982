//! File-based logging
//!
//! Only initializes if the DEVNOTES_LOG environment variable is set; the
//! value is used as the level for both DevNotes crates. Logs go to
//! `config.log_file` or `{data_dir}/debug.log` so they never mix with
//! command output.

use std::fs::OpenOptions;

use tracing::info;
use tracing_subscriber::EnvFilter;

use devnotes_core::Config;

/// Environment variable that enables logging
const LOG_ENV: &str = "DEVNOTES_LOG";

pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(&log_level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::new(directives(level))
}

fn directives(level: &str) -> String {
    format!("devnotes_core={},devnotes_cli={}", level, level)
}
