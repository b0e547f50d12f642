//! routegen-core - Route model, configuration, and error types
//!
//! This crate provides the foundational types shared by every stage of
//! `protoc-gen-route`:
//! - [`ServiceDesc`] / [`MethodDesc`] / [`PackageDesc`], the model handed to templates
//! - [`GeneratorConfig`] for per-run configuration
//! - [`RouteGenError`] for error handling

mod config;
mod error;
mod model;

pub use config::{DEFAULT_EXTENSION, GeneratorConfig};
pub use error::{RouteGenError, RouteGenResult};
pub use model::{MethodDesc, PackageDesc, ServiceDesc};

/// Log levels for plugin diagnostics
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = RouteGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(RouteGenError::ConfigError(format!(
                "unknown log level: {other}"
            ))),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        GeneratorConfig, LogLevel, MethodDesc, PackageDesc, RouteGenError, RouteGenResult,
        ServiceDesc,
    };
}
