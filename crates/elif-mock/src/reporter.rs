//! Advisory warning channel
//!
//! Warnings never change control flow. The server hands them to whichever
//! reporter it was built with.

use std::sync::{Arc, Mutex};

/// Sink for advisory warnings
pub trait WarningReporter: Send + Sync {
    fn warn(&self, message: &str);
}

/// Drops every warning
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl WarningReporter for NoopReporter {
    fn warn(&self, _message: &str) {}
}

/// Forwards warnings to `tracing` at WARN level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl WarningReporter for TracingReporter {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "elif_mock::warnings", "{}", message);
    }
}

/// Records warnings in memory so tests can assert on them.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CapturingReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages captured so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }

    pub fn clear(&self) {
        match self.messages.lock() {
            Ok(mut messages) => messages.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl WarningReporter for CapturingReporter {
    fn warn(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}
