//! Entity escaping for character data and attribute values.
//!
//! Productions 10 (AttValue) and 14 (CharData) of the XML 1.0
//! recommendation. Both passes run after illegal-character remediation
//! and finish by converting every remaining control character to a
//! decimal character reference.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::escape::policy::IllegalCharPolicy;

lazy_static! {
    static ref CONTROL_CHAR: Regex = Regex::new(r"[\x00-\x1F]").unwrap();
}

/// Convert every control character to `&#<decimal>;`.
fn control_char_refs(text: &str) -> Cow<'_, str> {
    CONTROL_CHAR.replace_all(text, |caps: &Captures| {
        let ch = caps[0].chars().next().unwrap();
        format!("&#{};", ch as u32)
    })
}

/// Escape element character data.
///
/// The literal sequence `]]>` is broken up even outside CDATA sections
/// so the output stays well-formed wherever it lands.
pub fn escape_char_data(text: &str, policy: &IllegalCharPolicy) -> String {
    let text = policy.apply(text);
    let text = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace("]]>", "]]&gt;");
    control_char_refs(&text).into_owned()
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_att_value(text: &str, policy: &IllegalCharPolicy) -> String {
    let text = policy.apply(text);
    let text = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;");
    control_char_refs(&text).into_owned()
}
