//! Helpers for reading loosely-typed JSON input.
//!
//! Editors send whatever the admin form produced: strings where lists are
//! expected, numbers where booleans are expected, `null` everywhere. These
//! helpers turn that into plain Rust values without ever failing.

use serde_json::Value;

/// A JSON object map. This is the raw shape of a stored content document.
pub type Document = serde_json::Map<String, Value>;

/// Trim a string value; anything that is not a string becomes `""`.
///
/// # Examples
///
/// ```
/// use folio_core::value::clean_text;
/// use serde_json::json;
///
/// assert_eq!(clean_text(&json!("  Jaipur  ")), "Jaipur");
/// assert_eq!(clean_text(&json!(42)), "");
/// assert_eq!(clean_text(&json!(null)), "");
/// ```
pub fn clean_text(value: &Value) -> String {
    match value {
        Value::String(s) => trim(s).to_string(),
        _ => String::new(),
    }
}

/// Read `key` from an object and clean it. Missing keys and non-objects give `""`.
pub fn field_text(source: &Value, key: &str) -> String {
    source.get(key).map(clean_text).unwrap_or_default()
}

/// Like [`field_text`], but substitutes `fallback` when the result is empty.
pub fn field_text_or(source: &Value, key: &str, fallback: &str) -> String {
    let text = field_text(source, key);
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// Clean a list of strings.
///
/// Arrays keep their non-empty string entries; a single string is treated as
/// a comma-separated list. Anything else is an empty list.
///
/// # Examples
///
/// ```
/// use folio_core::value::clean_list;
/// use serde_json::json;
///
/// assert_eq!(clean_list(&json!(["Rust", " ", 3, "SQL "])), vec!["Rust", "SQL"]);
/// assert_eq!(clean_list(&json!("Python, Pandas,,SQL")), vec!["Python", "Pandas", "SQL"]);
/// assert!(clean_list(&json!({"a": 1})).is_empty());
/// ```
pub fn clean_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(clean_text)
            .filter(|item| !item.is_empty())
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(|item| trim(item).to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Read `key` from an object as a cleaned list.
pub fn field_list(source: &Value, key: &str) -> Vec<String> {
    source.get(key).map(clean_list).unwrap_or_default()
}

/// JavaScript-style truthiness.
///
/// `null`, `false`, `0` and `""` are falsy; every array and object is truthy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether a value is a JSON object or array.
///
/// Stored sections that were meant to be objects are accepted in either form;
/// an array simply normalizes to the section's defaults.
pub fn is_object_like(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

// Editors paste from word processors, so a leading BOM is stripped too.
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
