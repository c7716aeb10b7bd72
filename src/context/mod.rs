//! Diagnostic context extraction.
//!
//! Derives the log4j Nested Diagnostic Context (one free-text value)
//! and Mapped Diagnostic Context (named key/value pairs) from a
//! record's attributes.

pub mod extractor;

pub use extractor::*;
