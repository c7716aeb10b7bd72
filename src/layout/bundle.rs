//! Built-in template bundles and placeholder substitution.

use crate::error::ConfigError;

/// The set of templates used to render one event.
///
/// Placeholders use `{name}` syntax. The envelope template sees
/// `logger`, `timestamp`, `level`, `thread` plus the five pre-rendered
/// sections `message`, `ndc`, `throwable`, `location_info` and
/// `properties`; the section templates see `text` (message, ndc,
/// throwable), `name`/`value` (data), `entries` (properties) and
/// `class`/`method`/`file`/`line` (location info).
#[derive(Debug, Clone)]
pub struct LayoutBundle {
    pub event: String,
    pub message: String,
    pub ndc: String,
    pub properties: String,
    pub data: String,
    pub throwable: String,
    pub location_info: String,
}

impl LayoutBundle {
    /// Pretty-printed layout: one field per envelope line, sections
    /// indented four spaces, trailing newline per event.
    pub fn full() -> Self {
        Self {
            event: r#"<log4j:event logger="{logger}"
    timestamp="{timestamp}"
    level="{level}"
    thread="{thread}">
{message}{ndc}{throwable}{location_info}{properties}</log4j:event>
"#
            .to_string(),
            message: "    <log4j:message>{text}</log4j:message>\n".to_string(),
            ndc: "    <log4j:ndc>{text}</log4j:ndc>\n".to_string(),
            properties: "    <log4j:properties>\n{entries}    </log4j:properties>\n".to_string(),
            data: "      <log4j:data name=\"{name}\" value=\"{value}\"/>\n".to_string(),
            throwable: "    <log4j:throwable>{text}</log4j:throwable>\n".to_string(),
            location_info: r#"    <log4j:locationInfo class="{class}"
        method="{method}"
        file="{file}"
        line="{line}"/>
"#
            .to_string(),
        }
    }

    /// Single-line layout carrying the same structure with no
    /// inter-element whitespace.
    pub fn compact() -> Self {
        Self {
            event: concat!(
                "<log4j:event logger=\"{logger}\" timestamp=\"{timestamp}\" ",
                "level=\"{level}\" thread=\"{thread}\">",
                "{message}{ndc}{throwable}{location_info}{properties}",
                "</log4j:event>"
            )
            .to_string(),
            message: "<log4j:message>{text}</log4j:message>".to_string(),
            ndc: "<log4j:ndc>{text}</log4j:ndc>".to_string(),
            properties: "<log4j:properties>{entries}</log4j:properties>".to_string(),
            data: "<log4j:data name=\"{name}\" value=\"{value}\"/>".to_string(),
            throwable: "<log4j:throwable>{text}</log4j:throwable>".to_string(),
            location_info: concat!(
                "<log4j:locationInfo class=\"{class}\" method=\"{method}\" ",
                "file=\"{file}\" line=\"{line}\"/>"
            )
            .to_string(),
        }
    }

    /// Resolve a bundle by name. `default` is an alias for the full
    /// layout. Unknown names are rejected here, at configuration time.
    pub fn by_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "full" | "default" => Ok(Self::full()),
            "compact" => Ok(Self::compact()),
            other => Err(ConfigError::UnknownLayout(other.to_string())),
        }
    }
}

/// Substitute `{name}` placeholders from `vars` in a single pass.
///
/// Substituted values are never re-scanned, so placeholder-shaped log
/// content cannot expand. Unknown placeholders stay in the output
/// untouched.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        match tail.find('}') {
            Some(close) => {
                let key = &tail[..close];
                match vars.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &tail[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_substitutes_known_placeholders() {
        assert_eq!(
            fill("<m>{text}</m>", &[("text", "hello")]),
            "<m>hello</m>"
        );
    }

    #[test]
    fn test_fill_multiple_placeholders() {
        assert_eq!(
            fill("{name}={value}", &[("name", "k"), ("value", "v")]),
            "k=v"
        );
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("a {mystery} b", &[("text", "x")]), "a {mystery} b");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        // A value shaped like a placeholder must come through verbatim.
        assert_eq!(
            fill("{text} {other}", &[("text", "{other}"), ("other", "boom")]),
            "{other} boom"
        );
    }

    #[test]
    fn test_fill_unterminated_brace() {
        assert_eq!(fill("tail {oops", &[]), "tail {oops");
    }

    #[test]
    fn test_by_name_known_bundles() {
        assert!(LayoutBundle::by_name("full").is_ok());
        assert!(LayoutBundle::by_name("compact").is_ok());
        assert!(LayoutBundle::by_name("default").is_ok());
    }

    #[test]
    fn test_by_name_default_is_full() {
        assert_eq!(
            LayoutBundle::by_name("default").unwrap().event,
            LayoutBundle::full().event
        );
    }

    #[test]
    fn test_by_name_unknown_is_rejected() {
        let err = LayoutBundle::by_name("fancy").unwrap_err();
        assert!(matches!(
            err,
            crate::error::ConfigError::UnknownLayout(ref name) if name == "fancy"
        ));
    }

    #[test]
    fn test_compact_is_single_line() {
        let bundle = LayoutBundle::compact();
        assert!(!bundle.event.contains('\n'));
        assert!(!bundle.data.contains('\n'));
    }
}
