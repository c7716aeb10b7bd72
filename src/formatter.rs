//! Event assembly and formatter configuration.
//!
//! `XmlLayoutBuilder` validates everything up front; a built
//! [`XmlLayout`] is immutable and `format` is a pure transform over
//! one record, so one formatter instance can serve any number of
//! threads.

use std::collections::HashMap;

use encoding_rs::Encoding;
use regex::Regex;

use crate::context::extractor;
use crate::encoding::{encode_with_char_refs, resolve_encoding};
use crate::error::ConfigError;
use crate::escape::{escape_att_value, escape_char_data, IllegalCharPolicy};
use crate::layout::{fill, LayoutBundle};
use crate::record::LogRecord;

/// Level names differ slightly in log4j, see
/// <https://logging.apache.org/log4j/1.2/apidocs/org/apache/log4j/Level.html>.
/// All other names pass through unchanged.
pub const LOG4J_LEVELS: &[(&str, &str)] = &[("WARNING", "WARN"), ("CRITICAL", "FATAL")];

/// One formatted event: text, or bytes when an output encoding is
/// configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedEvent {
    Text(String),
    Bytes(Vec<u8>),
}

impl FormattedEvent {
    /// The event as text, if no output encoding was configured.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormattedEvent::Text(text) => Some(text),
            FormattedEvent::Bytes(_) => None,
        }
    }

    /// The event as bytes, encoding text output as UTF-8.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FormattedEvent::Text(text) => text.into_bytes(),
            FormattedEvent::Bytes(bytes) => bytes,
        }
    }
}

/// Renders log records as log4j XMLLayout event fragments.
#[derive(Debug, Clone)]
pub struct XmlLayout {
    mdc_pattern: Option<Regex>,
    ndc_attribute: Option<String>,
    encoding: Option<&'static Encoding>,
    illegal_chars: IllegalCharPolicy,
    include_location_info: bool,
    layout: LayoutBundle,
    levels: HashMap<String, String>,
}

fn log4j_levels() -> HashMap<String, String> {
    LOG4J_LEVELS
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

impl Default for XmlLayout {
    fn default() -> Self {
        Self {
            mdc_pattern: None,
            ndc_attribute: None,
            encoding: None,
            illegal_chars: IllegalCharPolicy::default(),
            include_location_info: true,
            layout: LayoutBundle::full(),
            levels: log4j_levels(),
        }
    }
}

impl XmlLayout {
    pub fn builder() -> XmlLayoutBuilder {
        XmlLayoutBuilder::new()
    }

    /// Render one record as an XMLLayout event fragment.
    pub fn format(&self, record: &LogRecord) -> FormattedEvent {
        let policy = &self.illegal_chars;

        let level = self
            .levels
            .get(record.level.as_str())
            .map(String::as_str)
            .unwrap_or(&record.level);
        // Milliseconds since epoch, truncated toward zero.
        let timestamp = (record.created * 1000.0) as i64;

        let message = fill(
            &self.layout.message,
            &[("text", &escape_char_data(&record.message, policy))],
        );

        let ndc = match extractor::ndc(record, self.ndc_attribute.as_deref()) {
            Some(text) => fill(
                &self.layout.ndc,
                &[("text", &escape_char_data(&text, policy))],
            ),
            None => String::new(),
        };

        let throwable = match record.exception_text() {
            Some(text) => fill(
                &self.layout.throwable,
                &[("text", &escape_char_data(text, policy))],
            ),
            None => String::new(),
        };

        let location_info = if self.include_location_info {
            fill(
                &self.layout.location_info,
                &[
                    ("class", &escape_att_value(&record.module, policy)),
                    (
                        "method",
                        &escape_att_value(record.function.as_deref().unwrap_or(""), policy),
                    ),
                    ("file", &escape_att_value(&record.file, policy)),
                    ("line", &record.line.to_string()),
                ],
            )
        } else {
            String::new()
        };

        let entries = extractor::mdc(record, self.mdc_pattern.as_ref());
        let properties = if entries.is_empty() {
            String::new()
        } else {
            let data: String = entries
                .iter()
                .map(|(name, value)| {
                    fill(
                        &self.layout.data,
                        &[
                            ("name", &escape_att_value(name, policy)),
                            ("value", &escape_att_value(value, policy)),
                        ],
                    )
                })
                .collect();
            fill(&self.layout.properties, &[("entries", &data)])
        };

        let event = fill(
            &self.layout.event,
            &[
                ("logger", &escape_att_value(&record.logger, policy)),
                ("timestamp", &timestamp.to_string()),
                ("level", &escape_att_value(level, policy)),
                ("thread", &escape_att_value(&record.thread, policy)),
                ("message", &message),
                ("ndc", &ndc),
                ("throwable", &throwable),
                ("location_info", &location_info),
                ("properties", &properties),
            ],
        );

        match self.encoding {
            Some(encoding) => FormattedEvent::Bytes(encode_with_char_refs(encoding, &event)),
            None => FormattedEvent::Text(event),
        }
    }
}

#[derive(Debug, Clone)]
enum LayoutChoice {
    Named(String),
    Custom(LayoutBundle),
}

/// Builder for [`XmlLayout`]. All validation happens in [`build`];
/// a bad MDC pattern, a pattern without a `name` capture group, an
/// unknown layout name or an unknown encoding label fail there, never
/// at format time.
///
/// [`build`]: XmlLayoutBuilder::build
#[derive(Debug, Clone)]
pub struct XmlLayoutBuilder {
    mdc_pattern: Option<String>,
    ndc_attribute: Option<String>,
    encoding: Option<String>,
    illegal_chars: IllegalCharPolicy,
    include_location_info: bool,
    layout: LayoutChoice,
}

impl Default for XmlLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlLayoutBuilder {
    pub fn new() -> Self {
        Self {
            mdc_pattern: None,
            ndc_attribute: None,
            encoding: None,
            illegal_chars: IllegalCharPolicy::default(),
            include_location_info: true,
            layout: LayoutChoice::Named("default".to_string()),
        }
    }

    /// Regex selecting record attributes to expose as MDC entries.
    /// Must contain a `name` capture group; matched against the start
    /// of each attribute name.
    pub fn mdc_pattern(mut self, pattern: &str) -> Self {
        self.mdc_pattern = Some(pattern.to_string());
        self
    }

    /// Name of the record attribute carrying the NDC value.
    pub fn ndc_attribute(mut self, attribute: &str) -> Self {
        self.ndc_attribute = Some(attribute.to_string());
        self
    }

    /// WHATWG label of the output byte encoding. When set, `format`
    /// returns bytes. UTF-16 labels encode as UTF-8, per the WHATWG
    /// encode step.
    pub fn encoding(mut self, label: &str) -> Self {
        self.encoding = Some(label.to_string());
        self
    }

    /// Policy for characters that are illegal in XML.
    pub fn illegal_chars(mut self, policy: IllegalCharPolicy) -> Self {
        self.illegal_chars = policy;
        self
    }

    /// Whether to emit the `locationInfo` element. Defaults to true.
    pub fn include_location_info(mut self, include: bool) -> Self {
        self.include_location_info = include;
        self
    }

    /// Select a built-in layout by name: `full`, `compact` or
    /// `default`.
    pub fn layout(mut self, name: &str) -> Self {
        self.layout = LayoutChoice::Named(name.to_string());
        self
    }

    /// Use a custom template bundle instead of a built-in layout.
    pub fn layout_bundle(mut self, bundle: LayoutBundle) -> Self {
        self.layout = LayoutChoice::Custom(bundle);
        self
    }

    pub fn build(self) -> Result<XmlLayout, ConfigError> {
        let mdc_pattern = match self.mdc_pattern {
            Some(pattern) => {
                let regex = Regex::new(&pattern)?;
                if !regex.capture_names().flatten().any(|name| name == "name") {
                    return Err(ConfigError::MissingNameGroup);
                }
                Some(regex)
            }
            None => None,
        };

        let encoding = match self.encoding {
            Some(label) => Some(resolve_encoding(&label)?),
            None => None,
        };

        let layout = match self.layout {
            LayoutChoice::Named(name) => LayoutBundle::by_name(&name)?,
            LayoutChoice::Custom(bundle) => bundle,
        };

        log::debug!(
            "XMLLAYOUT_CONFIGURED mdc={} ndc={} encoding={} location_info={}",
            mdc_pattern.as_ref().map(Regex::as_str).unwrap_or("-"),
            self.ndc_attribute.as_deref().unwrap_or("-"),
            encoding.map(Encoding::name).unwrap_or("-"),
            self.include_location_info
        );

        Ok(XmlLayout {
            mdc_pattern,
            ndc_attribute: self.ndc_attribute,
            encoding,
            illegal_chars: self.illegal_chars,
            include_location_info: self.include_location_info,
            layout,
            levels: log4j_levels(),
        })
    }
}
