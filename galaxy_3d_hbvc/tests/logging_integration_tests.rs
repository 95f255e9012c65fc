//! Integration tests for Engine logging system
//!
//! These tests verify that custom loggers receive the entries emitted by
//! the culling engine, including errors raised by scene graph misuse.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_hbvc::galaxy3d::Engine;
use galaxy_3d_hbvc::galaxy3d::log::{CaptureLogger, Logger, LogEntry, LogSeverity};
use galaxy_3d_hbvc::galaxy3d::scene::SceneGraph;
use galaxy_3d_hbvc::galaxy3d::bounding::BoundingAabb;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that keeps only the messages of one severity
struct SeverityFilterLogger {
    severity: LogSeverity,
    messages: Arc<Mutex<Vec<String>>>,
}

impl Logger for SeverityFilterLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.severity == self.severity {
            if let Ok(mut messages) = self.messages.lock() {
                messages.push(entry.message.clone());
            }
        }
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(SeverityFilterLogger {
        severity: LogSeverity::Warn,
        messages: messages.clone(),
    });

    Engine::log(LogSeverity::Info, "test::module", "ignored".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "kept".to_string());

    assert_eq!(*messages.lock().unwrap(), vec!["kept".to_string()]);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let capture = CaptureLogger::new();
    Engine::set_logger(capture.clone());

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    let entries = capture.entries();
    let entry = entries.iter().find(|e| e.source == "test::error").unwrap();
    assert_eq!(entry.message, "Critical error occurred");
    assert_eq!(entry.file, Some("test_file.rs"));
    assert_eq!(entry.line, Some(42));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_structural_error_is_logged() {
    let capture = CaptureLogger::new();
    Engine::set_logger(capture.clone());

    let mut graph: SceneGraph<BoundingAabb> = SceneGraph::new();
    let parent = graph.create_node("parent");
    let child = graph.create_child(parent, "child").unwrap();
    let error = graph.set_parent(parent, child).unwrap_err();

    let entries: Vec<LogEntry> = capture
        .entries()
        .into_iter()
        .filter(|e| e.source == "galaxy3d::SceneGraph")
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert!(entries[0].file.is_some());
    assert!(error.to_string().contains(&entries[0].message));

    Engine::reset_logger();
}
