#![cfg(feature = "std")]

use std::env;
use log::{self, LevelFilter, Metadata, Record};

use crate::core::LOG_ENV;

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // stdout belongs to the game itself
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Parse a level name, falling back to `default` when missing or invalid.
pub fn parse_level(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(default)
}

/// Initialize logging with a level taken from the `SUPERMUNITION_LOG` environment variable.
/// Defaults to `default` if the variable is not set or invalid.
pub fn init_logging(default: LevelFilter) {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref(), default);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
