//! bundlezip-logging - Tracing to host callback bridge
//!
//! This crate provides:
//! - [`HostLoggingLayer`] tracing layer that forwards logs to a host callback
//! - [`LogCallback`] type for the host log callback
//! - Dynamic log level filtering
//! - [`init_stderr_logging`] for hosts without a callback

mod callback;
mod layer;

pub use bundlezip_core::LogLevel;
pub use callback::{LogCallback, LogCallbackManager};
pub use layer::{
    HostLoggingLayer, LOG_ENV_VAR, init_logging, init_logging_with_level, init_stderr_logging,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        HostLoggingLayer, LogCallback, LogCallbackManager, LogLevel, init_logging,
        init_stderr_logging,
    };
}
