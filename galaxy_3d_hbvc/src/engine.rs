/// Galaxy3D Engine - engine-wide services
///
/// The culling core is plain data owned by the caller (scene graphs, cameras,
/// cullers). The only process-wide state is the logger, stored here behind a
/// RwLock so that any component can report through the `engine_*!` macros.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Installed logger; a DefaultLogger until replaced
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

// ===== PUBLIC API =====

/// Entry point for engine-wide services.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_hbvc::galaxy3d::Engine;
/// use galaxy_3d_hbvc::galaxy3d::log::{DefaultLogger, LogSeverity};
///
/// // Show per-frame culling traces
/// Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Trace));
/// ```
pub struct Engine;

impl Engine {
    // ===== LOGGING API =====

    /// Install `logger` for every subsequent engine_*! call
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger, Info threshold)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Forward a plain entry (no file:line) to the installed logger.
    ///
    /// Backs engine_trace!, engine_debug!, engine_info! and engine_warn!.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        dispatch(severity, source, message, None);
    }

    /// Forward an entry carrying its call site.
    ///
    /// Backs engine_error!, and therefore engine_err! and engine_bail!.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        dispatch(severity, source, message, Some((file, line)));
    }
}

fn dispatch(severity: LogSeverity, source: &str, message: String, location: Option<(&'static str, u32)>) {
    let Ok(logger) = logger_lock().read() else {
        return;
    };
    logger.log(&LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_owned(),
        message,
        file: location.map(|(file, _)| file),
        line: location.map(|(_, line)| line),
    });
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
