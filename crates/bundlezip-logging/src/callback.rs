//! Host log callback management

use bundlezip_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Callback the build host registers to receive packager log lines
///
/// Arguments are the level, the event target (module path) and the rendered
/// message including structured fields.
pub type LogCallback = Arc<dyn Fn(LogLevel, &str, &str) + Send + Sync>;

/// Global log callback manager
static CALLBACK_MANAGER: OnceCell<LogCallbackManager> = OnceCell::new();

/// Holds the host callback and the minimum level forwarded to it
pub struct LogCallbackManager {
    callback: RwLock<Option<LogCallback>>,
    level: AtomicU8,
}

impl LogCallbackManager {
    /// Create a new callback manager
    pub fn new() -> Self {
        Self {
            callback: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Get the global callback manager instance
    pub fn global() -> &'static LogCallbackManager {
        CALLBACK_MANAGER.get_or_init(LogCallbackManager::new)
    }

    /// Set or clear the log callback
    pub fn set_callback(&self, callback: Option<LogCallback>) {
        *self.callback.write() = callback;
    }

    /// Register a closure as the log callback
    pub fn set_callback_fn<F>(&self, callback: F)
    where
        F: Fn(LogLevel, &str, &str) + Send + Sync + 'static,
    {
        self.set_callback(Some(Arc::new(callback)));
    }

    /// Get the current log callback
    pub fn get_callback(&self) -> Option<LogCallback> {
        self.callback.read().clone()
    }

    pub fn has_callback(&self) -> bool {
        self.callback.read().is_some()
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

    /// Invoke the callback if set and level is enabled
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        // Clone out of the lock so a callback that logs again cannot deadlock
        let Some(callback) = self.get_callback() else {
            return;
        };

        callback(level, target, message);
    }
}

impl Default for LogCallbackManager {
    fn default() -> Self {
        Self::new()
    }
}
