//! Log sink management

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use routegen_core::LogLevel;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};

/// Name printed at the start of every line
const PROGRAM: &str = "protoc-gen-route";

/// Global sink manager
static SINK_MANAGER: OnceCell<LogSinkManager> = OnceCell::new();

/// Holds the output writer and the runtime log level
///
/// The level is adjustable after the subscriber is installed, which lets the
/// plugin apply `log_level` from the request parameter once it has been parsed.
pub struct LogSinkManager {
    writer: Mutex<Box<dyn Write + Send>>,
    level: AtomicU8,
}

impl LogSinkManager {
    /// Create a manager writing to stderr
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Create a manager writing to the given writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Get the global sink manager instance
    pub fn global() -> &'static LogSinkManager {
        SINK_MANAGER.get_or_init(LogSinkManager::new)
    }

    /// Replace the output writer
    pub fn set_writer(&self, writer: Box<dyn Write + Send>) {
        *self.writer.lock() = writer;
    }

    /// Set the log level
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Get the current log level
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Check if a log level is enabled
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Write one line if the level is enabled
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        let line = format_line(level, target, message);
        let mut writer = self.writer.lock();
        // A closed stderr must not abort generation
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

impl Default for LogSinkManager {
    fn default() -> Self {
        Self::new()
    }
}

fn format_line(level: LogLevel, target: &str, message: &str) -> String {
    if target.is_empty() {
        format!("{PROGRAM} [{level}] {message}\n")
    } else {
        format!("{PROGRAM} [{level}] {target}: {message}\n")
    }
}
