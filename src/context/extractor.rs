//! NDC and MDC extraction.
//!
//! Both lookups degrade locally: a missing or unusable attribute means
//! the section is omitted from the event, never an error.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;

use crate::record::LogRecord;

/// Pattern selecting `mdc:`-prefixed attributes, exposing the rest of
/// the name as the MDC key.
pub const DEFAULT_MDC_PATTERN: &str = r"mdc:(?P<name>.*)";

/// Coerce an attribute value to text: strings verbatim, scalars via
/// their display form, null empty, containers as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => value.to_string(),
    }
}

/// Nested Diagnostic Context: the text of one designated attribute.
/// Returns `None` when no attribute is designated, the record lacks
/// it, or its text is empty.
pub fn ndc(record: &LogRecord, attribute: Option<&str>) -> Option<String> {
    let value = record.attribute(attribute?)?;
    let text = value_text(value);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Mapped Diagnostic Context: every attribute whose name the pattern
/// matches contributes an entry under its captured `name` group.
///
/// The pattern must match at the start of the attribute name.
/// Attributes are enumerated in lexicographic order, so when two
/// captures collide the lexicographically later attribute wins.
pub fn mdc(record: &LogRecord, pattern: Option<&Regex>) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    let Some(pattern) = pattern else {
        return entries;
    };

    for attr in record.attribute_names() {
        let Some(caps) = pattern.captures(attr) else {
            continue;
        };
        if caps.get(0).map(|m| m.start()) != Some(0) {
            continue;
        }
        let Some(name) = caps.name("name") else {
            continue;
        };
        let Some(value) = record.attribute(attr) else {
            continue;
        };
        let text = value_text(value);
        if let Some(previous) = entries.insert(name.as_str().to_string(), text) {
            log::debug!(
                "MDC_OVERWRITE name={} attribute={} previous={:?}",
                name.as_str(),
                attr,
                previous
            );
        }
    }
    entries
}
