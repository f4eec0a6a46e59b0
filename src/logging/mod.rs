//! Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_DATA_DIR: when using file mode, the directory of the log file (default "logs")

use chrono::Utc;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};
use std::{
    env,
    fs::{create_dir_all, OpenOptions},
};

/// Computes the path of the date-stamped log file for the given directory.
pub fn dated_log_path(base_dir: &str, date_str: &str) -> String {
    format!("{}/harness-{}.log", base_dir.trim_end_matches('/'), date_str)
}

fn level_from_env() -> LevelFilter {
    match env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Sets up logging. In file mode a missing log directory is created; if the
/// log file cannot be opened, logging falls back to stdout.
pub fn setup_logging() {
    let level = level_from_env();
    let mode = env::var("LOG_MODE").unwrap_or_else(|_| "stdout".to_string());

    if mode.to_lowercase() == "file" {
        let base_dir = env::var("LOG_DATA_DIR").unwrap_or_else(|_| "logs".to_string());
        let date_str = Utc::now().format("%Y-%m-%d").to_string();
        let path = dated_log_path(&base_dir, &date_str);

        let file = create_dir_all(base_dir.trim_end_matches('/')).and_then(|_| {
            OpenOptions::new().append(true).create(true).open(&path)
        });
        match file {
            Ok(file) => {
                let _ = WriteLogger::init(level, Config::default(), file);
                return;
            }
            Err(err) => {
                eprintln!("falling back to stdout logging: cannot open {}: {}", path, err);
            }
        }
    }

    let _ = SimpleLogger::init(level, Config::default());
}
