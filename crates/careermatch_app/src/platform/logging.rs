//! Logger setup for the terminal client.
//!
//! The terminal doubles as the UI, so the default sink is a file in the
//! state directory. Each run appends to it.

use std::fs::{File, OpenOptions};
use std::path::Path;

use careermatch_logging::level_for;
use clap::ValueEnum;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const LOG_FILENAME: &str = "careermatch.log";

/// Dependencies whose records only add transport noise.
const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    /// Append to `careermatch.log` in the state directory.
    File,
    /// The terminal, mixed into the UI output.
    Terminal,
    Both,
    Off,
}

impl LogDestination {
    fn wants_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }

    fn wants_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }
}

pub fn initialize(destination: LogDestination, state_dir: &Path, verbose: bool) {
    let level = level_for(verbose);
    let config = logger_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.wants_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.wants_file() {
        match open_log_file(state_dir) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!(
                "Warning: could not open {} in {:?}: {}",
                LOG_FILENAME, state_dir, err
            ),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

fn logger_config() -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(log::LevelFilter::Error);
    for target in QUIET_TARGETS {
        builder.add_filter_ignore_str(target);
    }
    builder.build()
}

fn open_log_file(state_dir: &Path) -> std::io::Result<File> {
    std::fs::create_dir_all(state_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(state_dir.join(LOG_FILENAME))
}
