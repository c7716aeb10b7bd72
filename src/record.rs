//! Log record data model.
//!
//! The host logging framework constructs a [`LogRecord`] per event and
//! hands it to the formatter. The record is read-only during formatting
//! except for the exception-text cache, which is computed at most once.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// A single log event as supplied by the host framework.
///
/// `attributes` is an open-ended map used for MDC/NDC extraction;
/// `BTreeMap` keeps enumeration order lexicographic so extraction is
/// deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub logger: String,
    pub level: String,
    /// Creation time as fractional seconds since the Unix epoch.
    pub created: f64,
    pub thread: String,
    pub message: String,
    pub file: String,
    pub line: u32,
    pub module: String,
    pub function: Option<String>,
    pub attributes: BTreeMap<String, Value>,
    pub exception: Option<ExceptionInfo>,
    #[serde(skip)]
    exc_text: OnceLock<String>,
}

impl LogRecord {
    /// Create a record stamped with the current time and thread name.
    /// Source location fields start empty; hosts that track them fill
    /// them in directly.
    pub fn new(logger: &str, level: &str, message: &str) -> Self {
        Self {
            logger: logger.to_string(),
            level: level.to_string(),
            created: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
            thread: std::thread::current()
                .name()
                .unwrap_or("main")
                .to_string(),
            message: message.to_string(),
            file: String::new(),
            line: 0,
            module: String::new(),
            function: None,
            attributes: BTreeMap::new(),
            exception: None,
            exc_text: OnceLock::new(),
        }
    }

    /// Replace the creation time with an explicit timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.created = timestamp.timestamp_micros() as f64 / 1_000_000.0;
        self
    }

    /// Names of all attributes attached to this record, in
    /// lexicographic order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Look up a single attribute value.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Rendered exception text, computed on first access and cached on
    /// the record. Rendering is deterministic, so a concurrent
    /// duplicate computation produces the same text.
    pub fn exception_text(&self) -> Option<&str> {
        self.exception
            .as_ref()
            .map(|exc| self.exc_text.get_or_init(|| exc.render()).as_str())
    }
}

/// Exception details attached to a record.
#[derive(Debug, Clone, Serialize)]
pub struct ExceptionInfo {
    pub exc_type: String,
    pub message: String,
    pub traceback: Vec<String>,
}

impl ExceptionInfo {
    pub fn new(exc_type: &str, message: &str) -> Self {
        Self {
            exc_type: exc_type.to_string(),
            message: message.to_string(),
            traceback: Vec::new(),
        }
    }

    pub fn with_traceback(mut self, lines: Vec<String>) -> Self {
        self.traceback = lines;
        self
    }

    /// Render the traceback lines followed by a `Type: message` line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.traceback {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.exc_type);
        out.push_str(": ");
        out.push_str(&self.message);
        out
    }
}
