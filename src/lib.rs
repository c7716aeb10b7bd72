//! xmllayout - log4j XMLLayout formatting for log records
//!
//! This crate renders structured log records as XML fragments
//! compatible with the log4j XMLLayout event schema, so logs produced
//! by one ecosystem can be consumed by viewers and collectors that
//! speak log4j's XML (Chainsaw and friends). The implementation
//! prioritizes:
//!
//! 1. **Well-formedness** - escaping satisfies the XML 1.0 AttValue
//!    and CharData productions exactly, with a configurable policy for
//!    characters XML forbids outright
//! 2. **Determinism** - context extraction and rendering are pure;
//!    the same record always formats to the same fragment
//! 3. **Fail-fast configuration** - every configurable is validated at
//!    build time, never at format time
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `escape` - illegal-character remediation and XML entity escaping
//! - `context` - NDC/MDC extraction from record attributes
//! - `layout` - template bundles (full, compact, custom)
//! - `encoding` - optional output transcoding with character-reference
//!   fallback
//! - `formatter` - configuration builder and event assembly
//! - `record` - the log record data model
//!
//! ## Example
//!
//! ```
//! use xmllayout::{LogRecord, XmlLayout, DEFAULT_MDC_PATTERN};
//!
//! let layout = XmlLayout::builder()
//!     .mdc_pattern(DEFAULT_MDC_PATTERN)
//!     .layout("compact")
//!     .build()
//!     .expect("valid configuration");
//!
//! let mut record = LogRecord::new("app.web", "WARNING", "slow request");
//! record
//!     .attributes
//!     .insert("mdc:request_id".to_string(), serde_json::json!("abc-123"));
//!
//! let event = layout.format(&record);
//! assert!(event.as_text().unwrap().contains("level=\"WARN\""));
//! ```

pub mod context;
pub mod encoding;
pub mod error;
pub mod escape;
pub mod formatter;
pub mod layout;
pub mod record;

pub use context::{mdc, ndc, DEFAULT_MDC_PATTERN};
pub use error::ConfigError;
pub use escape::{
    coerce_text, escape_att_value, escape_char_data, IllegalCharPolicy, REPLACEMENT_CHAR,
};
pub use formatter::{FormattedEvent, XmlLayout, XmlLayoutBuilder, LOG4J_LEVELS};
pub use layout::LayoutBundle;
pub use record::{ExceptionInfo, LogRecord};

/// Namespace URI the log4j XML schema expects the `log4j` prefix to be
/// bound to.
pub const LOG4J_NS: &str = "http://jakarta.apache.org/log4j/";
