//! Escaping and round-trip properties over generated input.

use lazy_static::lazy_static;
use proptest::prelude::*;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use xmllayout::{
    escape_att_value, escape_char_data, FormattedEvent, IllegalCharPolicy, LogRecord, XmlLayout,
    LOG4J_NS,
};

lazy_static! {
    static ref ENTITY_OR_REF: Regex = Regex::new(r"&(amp|lt|gt|quot|#[0-9]+);").unwrap();
}

/// Remove every well-formed entity/character reference; whatever is
/// left must contain no markup-significant character.
fn strip_references(escaped: &str) -> String {
    ENTITY_OR_REF.replace_all(escaped, "").into_owned()
}

proptest! {
    #[test]
    fn char_data_escaping_leaves_no_raw_markup(text in any::<String>()) {
        let escaped = escape_char_data(&text, &IllegalCharPolicy::Preserve);
        let rest = strip_references(&escaped);
        prop_assert!(!rest.contains('&'));
        prop_assert!(!rest.contains('<'));
        prop_assert!(!escaped.contains("]]>"));
    }

    #[test]
    fn att_value_escaping_leaves_no_raw_markup(text in any::<String>()) {
        let escaped = escape_att_value(&text, &IllegalCharPolicy::Preserve);
        let rest = strip_references(&escaped);
        prop_assert!(!rest.contains('&'));
        prop_assert!(!rest.contains('<'));
        prop_assert!(!rest.contains('"'));
    }

    #[test]
    fn control_chars_become_decimal_references(code in 0u32..0x20) {
        let ch = char::from_u32(code).unwrap();
        let expected = format!("&#{};", code);
        prop_assert!(escape_char_data(&ch.to_string(), &IllegalCharPolicy::Preserve)
            .contains(&expected));
        prop_assert!(escape_att_value(&ch.to_string(), &IllegalCharPolicy::Preserve)
            .contains(&expected));
    }

    /// Any message, with illegal characters replaced, survives a trip
    /// through a conformant parser byte for byte.
    #[test]
    fn formatted_event_parses_and_preserves_message(message in any::<String>()) {
        let policy = IllegalCharPolicy::replacement();
        let expected = policy.apply(&message).into_owned();

        let layout = XmlLayout::builder()
            .layout("compact")
            .illegal_chars(policy)
            .build()
            .unwrap();
        let fragment = match layout.format(&LogRecord::new("prop.logger", "INFO", &message)) {
            FormattedEvent::Text(text) => text,
            FormattedEvent::Bytes(_) => unreachable!("no encoding configured"),
        };

        prop_assert_eq!(parse_message(&fragment), expected);
    }

    /// Logger names land in an attribute; same round-trip guarantee.
    #[test]
    fn formatted_event_preserves_logger_attribute(logger in any::<String>()) {
        let policy = IllegalCharPolicy::replacement();
        let expected = policy.apply(&logger).into_owned();

        let layout = XmlLayout::builder()
            .layout("compact")
            .illegal_chars(policy)
            .build()
            .unwrap();
        let fragment = match layout.format(&LogRecord::new(&logger, "INFO", "x")) {
            FormattedEvent::Text(text) => text,
            FormattedEvent::Bytes(_) => unreachable!("no encoding configured"),
        };

        prop_assert_eq!(parse_logger(&fragment), expected);
    }
}

fn resolve_ref(name: &str) -> char {
    match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).expect("hex character reference")
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().expect("decimal character reference")
            } else {
                panic!("unexpected entity reference: {name}");
            };
            char::from_u32(code).expect("valid codepoint")
        }
    }
}

fn parse_message(fragment: &str) -> String {
    let doc = format!("<test xmlns:log4j=\"{LOG4J_NS}\">{fragment}</test>");
    let mut reader = Reader::from_str(&doc);
    reader.config_mut().trim_text(false);

    let mut inside = false;
    let mut message = String::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) if e.name().as_ref() == b"log4j:message" => inside = true,
            Event::End(e) if e.name().as_ref() == b"log4j:message" => inside = false,
            Event::Text(t) if inside => {
                let raw = String::from_utf8_lossy(t.as_ref()).into_owned();
                message.push_str(&quick_xml::escape::unescape(&raw).expect("valid escapes"));
            }
            Event::GeneralRef(r) if inside => {
                message.push(resolve_ref(&String::from_utf8_lossy(&r)));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    message
}

fn parse_logger(fragment: &str) -> String {
    let doc = format!("<test xmlns:log4j=\"{LOG4J_NS}\">{fragment}</test>");
    let mut reader = Reader::from_str(&doc);
    reader.config_mut().trim_text(false);

    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) if e.name().as_ref() == b"log4j:event" => {
                for attr in e.attributes() {
                    let attr = attr.expect("well-formed attribute");
                    if attr.key.as_ref() == b"logger" {
                        let raw = String::from_utf8_lossy(&attr.value).into_owned();
                        return quick_xml::escape::unescape(&raw)
                            .expect("valid escapes")
                            .into_owned();
                    }
                }
                panic!("event element has no logger attribute");
            }
            Event::Eof => panic!("no event element found"),
            _ => {}
        }
    }
}
