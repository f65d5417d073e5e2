//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! and forwards them to the application state for display in the UI.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

type LogCallback = Box<dyn Fn(String) + Send + Sync>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:5} {}", timestamp, level_str, record.args())
}

/// Custom logger that captures logs to state
///
#[derive(Clone)]
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<LogCallback>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }

    /// Install a copy of this logger as the global `log` backend.
    ///
    pub fn install(&self) -> Result<(), AppError> {
        log::set_boxed_logger(Box::new(self.clone()))
            .map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(self.level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(callback) = self.log_callback.lock() {
            if let Some(ref cb) = *callback {
                cb(format_log(record));
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_log_contains_level_and_message() {
        let line = format_log(
            &Record::builder()
                .args(format_args!("Reorder persisted"))
                .level(Level::Warn)
                .build(),
        );
        assert!(line.contains("WARN"));
        assert!(line.ends_with("Reorder persisted"));
    }

    #[test]
    fn test_callback_receives_enabled_records() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let logger = CustomLogger::new(LevelFilter::Info);
        let sink = Arc::clone(&captured);
        logger.set_log_callback(Box::new(move |line| sink.lock().unwrap().push(line)));

        logger.log(
            &Record::builder()
                .args(format_args!("kept"))
                .level(Level::Info)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("dropped"))
                .level(Level::Debug)
                .build(),
        );
        let lines = captured.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("kept"));
    }
}
