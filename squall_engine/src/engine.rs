/// Engine — global logging entry point.
///
/// The only process-global state in the engine is the logger; every other
/// service (graphics backend, GUI system, post-processor, music player)
/// is an explicitly constructed instance handed to whoever owns it.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized lazily with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Static entry point for engine-wide logging.
///
/// The `engine_trace!` … `engine_error!` macros route through here, so a
/// custom logger installed with [`Engine::set_logger`] observes every
/// engine message.
pub struct Engine;

impl Engine {
    fn logger() -> &'static RwLock<Box<dyn Logger>> {
        LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
    }

    /// Replace the global logger.
    ///
    /// Entries logged from other threads while the swap happens are
    /// serialized by the lock; none are lost.
    pub fn set_logger(logger: Box<dyn Logger>) {
        if let Ok(mut current) = Self::logger().write() {
            *current = logger;
        }
    }

    /// Log a message (used by the engine_* macros)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let entry = LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        };

        if let Ok(logger) = Self::logger().read() {
            logger.log(&entry);
        }
    }

    /// Log a message with file:line details (used by engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let entry = LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        };

        if let Ok(logger) = Self::logger().read() {
            logger.log(&entry);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
