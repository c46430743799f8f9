//! Describe-value and describe-type rendering
//!
//! Presentation helpers shared by every validator: bracketed value
//! inspection for rejection reasons, literal descriptors for equality
//! validators, and descriptor elision for wide unions and shapes.

use std::sync::LazyLock;

use crate::value::{Value, ValueKind};

/// Sub-descriptors shown before a composite descriptor is elided.
pub const MAX_DISPLAYED_TYPES: usize = 5;

/// Entries shown per array/object when inspecting a value.
const MAX_INSPECT_ENTRIES: usize = 3;

/// Deepest nesting level that is expanded when inspecting a value.
const MAX_INSPECT_DEPTH: usize = 1;

static IDENTIFIER_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[_$a-zA-Z][_$a-zA-Z0-9]*$").expect("identifier pattern is valid")
});

// ============================================================================
// VALUE INSPECTION
// ============================================================================

/// Renders a value for use inside a rejection reason, e.g. `<{ a: 1 }>`.
pub fn inspect(value: &Value) -> String {
    format!("<{}>", inspect_at(value, 0))
}

fn inspect_at(value: &Value, level: usize) -> String {
    match value {
        Value::Number(n) if *n == 0.0 && n.is_sign_negative() => "-0".to_owned(),
        Value::String(s) => quote(s),
        Value::Array(items) if items.is_empty() => "[]".to_owned(),
        Value::Object(map) if map.is_empty() => "{}".to_owned(),
        Value::Array(_) if level > MAX_INSPECT_DEPTH => "[Array]".to_owned(),
        Value::Object(_) if level > MAX_INSPECT_DEPTH => "[Object]".to_owned(),
        Value::Array(items) => {
            let mut parts: Vec<String> = items
                .iter()
                .take(MAX_INSPECT_ENTRIES)
                .map(|item| inspect_at(item, level + 1))
                .collect();
            if items.len() > MAX_INSPECT_ENTRIES {
                parts.push("...".to_owned());
            }
            format!("[ {} ]", parts.join(", "))
        }
        Value::Object(map) => {
            let mut parts: Vec<String> = map
                .iter()
                .take(MAX_INSPECT_ENTRIES)
                .map(|(key, item)| {
                    let key = if IDENTIFIER_REGEX.is_match(key) {
                        key.clone()
                    } else {
                        quote(key)
                    };
                    format!("{key}: {}", inspect_at(item, level + 1))
                })
                .collect();
            if map.len() > MAX_INSPECT_ENTRIES {
                parts.push("...".to_owned());
            }
            format!("{{ {} }}", parts.join(", "))
        }
        other => primitive(other),
    }
}

/// Quotes a string with the least-conflicting quote character.
fn quote(s: &str) -> String {
    if !s.contains('\'') {
        format!("'{s}'")
    } else if !s.contains('"') {
        format!("\"{s}\"")
    } else if !s.contains('`') {
        format!("`{s}`")
    } else {
        format!("'{}'", s.replace('\'', "\\'"))
    }
}

/// Source-form rendering of a primitive value.
fn primitive(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_owned(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number(*n),
        Value::BigInt(n) => format!("{n}n"),
        Value::String(s) => quote(s),
        Value::Symbol(sym) => sym.to_string(),
        Value::Array(_) => "[ ... ]".to_owned(),
        Value::Object(_) => "{ ... }".to_owned(),
    }
}

/// Formats a number the way a literal is written in source.
pub fn number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        n.to_string()
    }
}

// ============================================================================
// TYPE DESCRIPTORS
// ============================================================================

/// Descriptor of a literal value accepted by an equality validator.
///
/// Composite values are opaque: `is({ ... })` and `is([ ... ])`.
pub fn literal_type(value: &Value) -> String {
    match value.kind() {
        ValueKind::Array | ValueKind::Object => format!("is({})", primitive(value)),
        _ => primitive(value),
    }
}

/// Renders an object property key, quoting keys that are not identifiers.
pub fn property_key(key: &str) -> String {
    if IDENTIFIER_REGEX.is_match(key) {
        key.to_owned()
    } else {
        format!("\"{key}\"")
    }
}

/// Elides a descriptor list to first-two, `...`, last-two when it is wider
/// than [`MAX_DISPLAYED_TYPES`].
pub fn elide(mut parts: Vec<String>) -> Vec<String> {
    if parts.len() <= MAX_DISPLAYED_TYPES {
        return parts;
    }
    let tail = parts.split_off(parts.len() - 2);
    parts.truncate(2);
    parts.push("...".to_owned());
    parts.extend(tail);
    parts
}

/// Joins descriptors with `separator`, eliding wide lists.
pub fn join_types(parts: Vec<String>, separator: &str) -> String {
    elide(parts).join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inspect_limits_depth_and_width() {
        let value = Value::from(json!({ "key2": 2, "a3": { "key3": 3, "b3": { "key3": 3 } } }));
        assert_eq!(inspect(&value), "<{ key2: 2, a3: { key3: 3, b3: [Object] } }>");

        let wide = Value::from(json!([1, 2, 3, 4, 5]));
        assert_eq!(inspect(&wide), "<[ 1, 2, 3, ... ]>");
    }

    #[test]
    fn inspect_primitives() {
        assert_eq!(inspect(&Value::from(5)), "<5>");
        assert_eq!(inspect(&Value::from(1.5)), "<1.5>");
        assert_eq!(inspect(&Value::Number(-0.0)), "<-0>");
        assert_eq!(inspect(&Value::BigInt(7)), "<7n>");
        assert_eq!(inspect(&Value::from("it's")), "<\"it's\">");
        assert_eq!(inspect(&Value::Undefined), "<undefined>");
    }

    #[test]
    fn literal_type_picks_quotes() {
        assert_eq!(literal_type(&Value::from("a")), "'a'");
        assert_eq!(literal_type(&Value::from("a'b")), "\"a'b\"");
        assert_eq!(literal_type(&Value::from("a'\"b")), "`a'\"b`");
        assert_eq!(literal_type(&Value::Number(-0.0)), "0");
        assert_eq!(literal_type(&Value::from(json!({}))), "is({ ... })");
        assert_eq!(literal_type(&Value::from(json!([]))), "is([ ... ])");
    }

    #[test]
    fn elide_keeps_edges() {
        let parts: Vec<String> = (1..=7).map(|i| i.to_string()).collect();
        assert_eq!(join_types(parts, " | "), "1 | 2 | ... | 6 | 7");
        let few: Vec<String> = (1..=5).map(|i| i.to_string()).collect();
        assert_eq!(join_types(few, " | "), "1 | 2 | 3 | 4 | 5");
    }

    #[test]
    fn property_keys_quote_non_identifiers() {
        assert_eq!(property_key("name"), "name");
        assert_eq!(property_key("first name"), "\"first name\"");
        assert_eq!(property_key("0"), "\"0\"");
    }
}
