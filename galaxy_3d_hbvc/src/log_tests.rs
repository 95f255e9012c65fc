//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry, DefaultLogger filtering and formatting,
//! and CaptureLogger storage.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, CaptureLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::test".to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Error.label(), "ERROR");
    assert_eq!(LogSeverity::Info.label().trim(), "INFO");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_creation_with_file_line() {
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "galaxy3d::SceneGraph".to_string(),
        message: "cycle detected".to_string(),
        file: Some("scene_graph.rs"),
        line: Some(42),
    };

    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.source, "galaxy3d::SceneGraph");
    assert_eq!(entry.file, Some("scene_graph.rs"));
    assert_eq!(entry.line, Some(42));
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_threshold_is_info() {
    let logger = DefaultLogger::default();
    assert_eq!(logger.min_severity(), LogSeverity::Info);
}

#[test]
fn test_default_logger_all_severities() {
    // Filtered and printed branches must not panic
    let logger = DefaultLogger::with_min_severity(LogSeverity::Trace);
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        logger.log(&entry(severity, "message"));
    }

    let quiet = DefaultLogger::with_min_severity(LogSeverity::Error);
    quiet.log(&entry(LogSeverity::Trace, "dropped"));
}

#[test]
fn test_format_plain_without_location() {
    let text = DefaultLogger::format_plain(&entry(LogSeverity::Warn, "near plane is zero"));
    assert!(text.contains("[WARN ]"));
    assert!(text.contains("[galaxy3d::test]"));
    assert!(text.ends_with("near plane is zero"));
}

#[test]
fn test_format_plain_with_location() {
    let mut e = entry(LogSeverity::Error, "bad parent");
    e.file = Some("scene_graph.rs");
    e.line = Some(12);

    let text = DefaultLogger::format_plain(&e);
    assert!(text.contains("[ERROR]"));
    assert!(text.ends_with("bad parent (scene_graph.rs:12)"));
}

// ============================================================================
// CAPTURE LOGGER TESTS
// ============================================================================

#[test]
fn test_capture_logger_records_entries() {
    let logger = CaptureLogger::new();
    logger.log(&entry(LogSeverity::Info, "first"));
    logger.log(&entry(LogSeverity::Error, "second"));

    let entries = logger.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "first");
    assert_eq!(logger.count(LogSeverity::Error), 1);
    assert_eq!(logger.count(LogSeverity::Trace), 0);
}

#[test]
fn test_capture_logger_clones_share_storage() {
    let logger = CaptureLogger::new();
    let installed = logger.clone();

    installed.log(&entry(LogSeverity::Debug, "shared"));
    assert_eq!(logger.entries().len(), 1);

    logger.clear();
    assert!(installed.entries().is_empty());
}

#[test]
fn test_loggers_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
    assert_send_sync::<CaptureLogger>();
}
