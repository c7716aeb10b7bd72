//! Illegal-character remediation.
//!
//! XML 1.0 forbids most control characters and the BMP noncharacters
//! in documents outright; no amount of entity escaping makes them
//! legal. The policy decides what happens to them before any escaping
//! runs.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::{Captures, NoExpand, Regex};

/// Conventional substitute for an illegal character, U+FFFD.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

lazy_static! {
    /// Characters excluded by the XML 1.0 Char production. The
    /// surrogate block U+D800-U+DFFF is excluded too but cannot occur
    /// in a Rust string, so the class only covers the low controls and
    /// the BMP noncharacters.
    static ref ILLEGAL_XML_CHAR: Regex =
        Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\u{FFFE}\u{FFFF}]").unwrap();
}

/// What to do with characters that are illegal in XML.
#[derive(Clone, Default)]
pub enum IllegalCharPolicy {
    /// Leave them in place. Control characters still become numeric
    /// references downstream, which keeps the text well-formed at the
    /// grammar level even though a validating parser may reject the
    /// references themselves.
    #[default]
    Preserve,
    /// Substitute a fixed replacement for each illegal character.
    Replace(String),
    /// Remove them entirely.
    Strip,
    /// Ask a caller-supplied function for the replacement of each
    /// matched illegal character.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl IllegalCharPolicy {
    /// Replace each illegal character with [`REPLACEMENT_CHAR`].
    pub fn replacement() -> Self {
        IllegalCharPolicy::Replace(REPLACEMENT_CHAR.to_string())
    }

    /// Apply the policy to `text`. Runs strictly before entity
    /// escaping: replacement text is escaped like any other input.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            IllegalCharPolicy::Preserve => Cow::Borrowed(text),
            IllegalCharPolicy::Replace(repl) => {
                ILLEGAL_XML_CHAR.replace_all(text, NoExpand(repl.as_str()))
            }
            IllegalCharPolicy::Strip => ILLEGAL_XML_CHAR.replace_all(text, NoExpand("")),
            IllegalCharPolicy::Custom(repl) => {
                ILLEGAL_XML_CHAR.replace_all(text, |caps: &Captures| repl(&caps[0]))
            }
        }
    }
}

impl fmt::Debug for IllegalCharPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalCharPolicy::Preserve => f.write_str("Preserve"),
            IllegalCharPolicy::Replace(repl) => f.debug_tuple("Replace").field(repl).finish(),
            IllegalCharPolicy::Strip => f.write_str("Strip"),
            IllegalCharPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Decode raw bytes to text without ever failing: UTF-8 first, then
/// Latin-1, which maps every byte to a codepoint.
pub fn coerce_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
