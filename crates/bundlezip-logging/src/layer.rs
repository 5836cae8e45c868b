//! Tracing layer that forwards to the host log callback

use crate::callback::LogCallbackManager;
use bundlezip_core::LogLevel;
use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable read by [`init_stderr_logging`]
pub const LOG_ENV_VAR: &str = "BUNDLEZIP_LOG";

/// Tracing layer that forwards log events to the host callback
pub struct HostLoggingLayer {
    manager: &'static LogCallbackManager,
}

impl HostLoggingLayer {
    /// Create a new layer using the global callback manager
    pub fn new() -> Self {
        Self {
            manager: LogCallbackManager::global(),
        }
    }

    /// Create a layer with a specific callback manager
    pub fn with_manager(manager: &'static LogCallbackManager) -> Self {
        Self { manager }
    }
}

impl Default for HostLoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for HostLoggingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = LogLevel::from(metadata.level());

        if !self.manager.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.manager
            .log(level, metadata.target(), &visitor.into_message());
    }

    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.manager.is_enabled(LogLevel::from(metadata.level()))
    }
}

/// Renders the `message` field followed by `key=value` pairs
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }

    fn into_message(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Install the host callback layer as the global subscriber
///
/// Later calls are ignored once a global subscriber is set.
pub fn init_logging() {
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry().with(HostLoggingLayer::new());

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Initialize logging with a specific log level
pub fn init_logging_with_level(level: LogLevel) {
    LogCallbackManager::global().set_level(level);
    init_logging();
}

/// Install a stderr subscriber for hosts that do not register a callback
///
/// Filtering follows `BUNDLEZIP_LOG` and falls back to `info`.
pub fn init_stderr_logging() {
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
