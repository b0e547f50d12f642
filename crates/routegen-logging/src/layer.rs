//! Tracing layer that writes to the log sink

use crate::sink::LogSinkManager;
use routegen_core::LogLevel;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that formats events onto the sink (stderr by default)
pub struct StderrLayer {
    manager: &'static LogSinkManager,
}

impl StderrLayer {
    /// Create a layer using the global sink manager
    pub fn new() -> Self {
        Self {
            manager: LogSinkManager::global(),
        }
    }

    /// Create a layer with a specific sink manager
    pub fn with_manager(manager: &'static LogSinkManager) -> Self {
        Self { manager }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for StderrLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for StderrLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());

        if !self.manager.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.manager
            .log(level, metadata.target(), &visitor.into_line());
    }

    // The level can change after callsites register
    fn register_callsite(
        &self,
        _metadata: &'static tracing::Metadata<'static>,
    ) -> tracing::subscriber::Interest {
        tracing::subscriber::Interest::sometimes()
    }

    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.manager
            .is_enabled(Self::convert_level(metadata.level()))
    }
}

/// Collects the message and any structured fields of an event
///
/// Fields other than `message` are appended as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }

    fn into_line(self) -> String {
        match (self.message, self.fields.is_empty()) {
            (Some(message), true) => message,
            (Some(message), false) => format!("{message} {}", self.fields),
            (None, _) => self.fields,
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Install the stderr layer as the global subscriber at the given level
///
/// Calling this more than once only updates the level.
pub fn init_logging(level: LogLevel) {
    use tracing_subscriber::prelude::*;

    LogSinkManager::global().set_level(level);

    let subscriber = tracing_subscriber::registry().with(StderrLayer::new());

    // Already installed is fine; the level above still applies
    let _ = tracing::subscriber::set_global_default(subscriber);
}
