//! Configuration errors.
//!
//! Everything here is raised at construction time. Formatting itself
//! degrades per field instead of failing (see the extractor module).

use thiserror::Error;

/// Rejected formatter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The MDC pattern is not a valid regular expression.
    #[error("invalid MDC pattern: {0}")]
    InvalidMdcPattern(#[from] regex::Error),

    /// The MDC pattern compiled but has no `name` capture group.
    #[error("MDC pattern has no `name` capture group")]
    MissingNameGroup,

    /// The layout name does not resolve to a built-in bundle.
    #[error("unknown layout `{0}`, expected `full`, `compact` or `default`")]
    UnknownLayout(String),

    /// The output encoding label is not a known encoding.
    #[error("unknown output encoding `{0}`")]
    UnknownEncoding(String),
}
