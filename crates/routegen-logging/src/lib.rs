//! routegen-logging - Tracing output for a protoc plugin
//!
//! protoc owns the plugin's stdout, so every diagnostic goes to stderr.
//!
//! This crate provides:
//! - [`StderrLayer`] tracing layer that writes formatted lines to a sink
//! - [`LogSinkManager`] holding the sink writer and the runtime level
//! - [`init_logging`] to install the layer once per process

mod layer;
mod sink;

pub use layer::{StderrLayer, init_logging};
pub use routegen_core::LogLevel;
pub use sink::LogSinkManager;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, LogSinkManager, StderrLayer, init_logging};
}
