//! Free-form dimension bag attached to every part.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to raw value. Values are usually numbers kept as strings
/// (`"12.5"`), or a small categorical word such as the button `shape`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimensions(BTreeMap<String, String>);

impl Dimensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a field, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a field, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Whether `key` holds a non-empty value.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Keys whose values are non-empty, in key order.
    pub fn non_empty_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dimensions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_keys_skips_blank_values() {
        let dims: Dimensions = [("length", "10"), ("radius", ""), ("depth", "3")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = dims.non_empty_keys().collect();
        assert_eq!(keys, vec!["depth", "length"]);
        assert!(!dims.has_value("radius"));
        assert!(!dims.has_value("missing"));
    }

    #[test]
    fn test_set_and_remove() {
        let mut dims = Dimensions::new();
        assert!(dims.is_empty());
        assert_eq!(dims.set("length", "10"), None);
        assert_eq!(dims.set("length", "12"), Some("10".to_string()));
        assert_eq!(dims.get("length"), Some("12"));
        assert_eq!(dims.remove("length"), Some("12".to_string()));
        assert_eq!(dims.len(), 0);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let dims: Dimensions = [("shape", "Circle"), ("thickness", "4")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&dims).unwrap();
        assert_eq!(json, r#"{"shape":"Circle","thickness":"4"}"#);
    }
}
