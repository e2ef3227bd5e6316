//! Logging initialization for the relay binary.
//!
//! Defaults to `./relay.log` so log lines never mix with command output;
//! `RELAY_LOG=stderr` or `RELAY_LOG=both` adds a terminal logger.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "./relay.log";

/// Destination for log output, selected by the `RELAY_LOG` env var.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    File,
    Terminal,
    Both,
}

impl LogDestination {
    pub fn from_env() -> Self {
        destination_from(std::env::var("RELAY_LOG").ok().as_deref())
    }

    fn wants_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }

    fn wants_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

fn destination_from(value: Option<&str>) -> LogDestination {
    match value {
        Some("stderr") => LogDestination::Terminal,
        Some("both") => LogDestination::Both,
        // Unknown values fall back to the file logger.
        _ => LogDestination::File,
    }
}

/// Initialize the global logger for the selected destination.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.wants_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.wants_file() {
        match File::create(LOG_FILENAME) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => {
                eprintln!("Warning: Could not create log file at {LOG_FILENAME}: {err}");
            }
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}
