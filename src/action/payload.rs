//! Untyped form payloads and their field readers

use super::error::{ValidationError, ValidationResult};
use crate::langdata::value_to_text;
use serde_json::Value;
use std::collections::HashMap;

/// A submitted form: string keys to string values
///
/// Fields are read defensively. An absent field reads as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: HashMap<String, String>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Build a payload from a JSON object, rendering scalar values as text.
    ///
    /// `null` members are treated as absent; non-object input gives an
    /// empty payload.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        obj.iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), value_to_text(v)))
            .collect()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// The raw value, untrimmed
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Single-line text, trimmed
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().trim().to_string()
    }

    /// Multi-line text with CRLF line endings folded to LF, trimmed
    pub fn multiline(&self, key: &str) -> String {
        self.get(key)
            .unwrap_or_default()
            .replace("\r\n", "\n")
            .trim()
            .to_string()
    }

    /// A zero-based position; `label` names it in the refusal notice
    ///
    /// Digits too large for `usize` saturate, so they fall out of bounds
    /// rather than being rejected as malformed.
    pub fn index(&self, key: &str, label: &'static str) -> ValidationResult<usize> {
        let raw = self.get(key).ok_or(ValidationError::InvalidIndex(label))?;
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidIndex(label));
        }
        Ok(digits.parse().unwrap_or(usize::MAX))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_trims_and_defaults() {
        let payload = Payload::new().with("title", "  Hello \t");
        assert_eq!(payload.text("title"), "Hello");
        assert_eq!(payload.text("missing"), "");
    }

    #[test]
    fn multiline_folds_crlf() {
        let payload = Payload::new().with("code", "\r\nfn main() {\r\n}\r\n  ");
        assert_eq!(payload.multiline("code"), "fn main() {\n}");
    }

    #[test]
    fn index_accepts_padded_integers() {
        let payload = Payload::from_pairs([("index", " 3 "), ("zero", "0"), ("plus", "+2")]);
        assert_eq!(payload.index("index", "tip"), Ok(3));
        assert_eq!(payload.index("zero", "tip"), Ok(0));
        assert_eq!(payload.index("plus", "tip"), Ok(2));
    }

    #[test]
    fn index_saturates_oversized_integers() {
        let payload = Payload::new().with("index", "99999999999999999999");
        assert_eq!(payload.index("index", "tip"), Ok(usize::MAX));
    }

    #[test]
    fn index_rejects_missing_negative_and_garbage() {
        let payload = Payload::from_pairs([
            ("neg", "-1"),
            ("word", "two"),
            ("float", "1.5"),
            ("empty", ""),
            ("sign", "+"),
            ("inner", "1 2"),
        ]);
        for key in ["absent", "neg", "word", "float", "empty", "sign", "inner"] {
            assert_eq!(
                payload.index(key, "link"),
                Err(ValidationError::InvalidIndex("link")),
                "{}",
                key
            );
        }
        assert_eq!(
            payload.index("neg", "link").unwrap_err().to_string(),
            "Invalid link index"
        );
    }

    #[test]
    fn from_json_renders_scalars() {
        let payload = Payload::from_json(&json!({
            "index": 2,
            "title": "T",
            "flag": true,
            "gone": null
        }));
        assert_eq!(payload.get("index"), Some("2"));
        assert_eq!(payload.get("title"), Some("T"));
        assert_eq!(payload.get("flag"), Some("true"));
        assert_eq!(payload.get("gone"), None);
        assert_eq!(Payload::from_json(&json!([1])), Payload::new());
    }
}
