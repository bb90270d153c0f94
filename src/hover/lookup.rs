//! Localized text lookup
//!
//! The resolver only needs `exists` and `get`. `Catalog` is the bundled
//! implementation: a JSON object of strings, nested objects flattened into
//! dotted keys, so `{"LegacyMenu": {"1": "Single Player"}}` answers
//! `LegacyMenu.1`.

use crate::{HoverspeakError, Result};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Text lookup capability queried by key
pub trait TextLookup {
    /// Does `key` have a localized entry?
    fn exists(&self, key: &str) -> bool;

    /// Localized text for `key`; only meaningful when `exists(key)` is true
    fn get(&self, key: &str) -> String;
}

/// Flat key → text table
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Catalog that resolves nothing, so every region falls back
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a catalog from JSON text
    ///
    /// The top level must be an object. String leaves become entries;
    /// numbers and booleans are stringified; nulls and arrays are skipped.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(map) = root else {
            return Err(HoverspeakError::Catalog(
                "top level of a localization catalog must be an object".to_string(),
            ));
        };

        let mut entries = HashMap::new();
        for (key, value) in map {
            flatten_into(&mut entries, key, value);
        }
        debug!("Parsed localization catalog with {} entries", entries.len());

        Ok(Self { entries })
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HoverspeakError::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&text)?;
        info!(
            "Loaded {} localized strings from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten_into(entries: &mut HashMap<String, String>, prefix: String, value: Value) {
    match value {
        Value::String(text) => {
            entries.insert(prefix, text);
        }
        Value::Number(n) => {
            entries.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            entries.insert(prefix, b.to_string());
        }
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(entries, format!("{}.{}", prefix, key), child);
            }
        }
        Value::Null | Value::Array(_) => {}
    }
}

impl TextLookup for Catalog {
    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_keys_flatten() {
        let catalog = Catalog::from_json_str(
            r#"{"LegacyMenu": {"1": "Single Player", "2": "Multiplayer"}, "UI": {"Button6": "Settings"}}"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.exists("LegacyMenu.1"));
        assert_eq!(catalog.get("LegacyMenu.2"), "Multiplayer");
        assert_eq!(catalog.get("UI.Button6"), "Settings");
        assert!(!catalog.exists("LegacyMenu"));
    }

    #[test]
    fn test_non_string_leaves() {
        let catalog = Catalog::from_json_str(r#"{"a": 3, "b": true, "c": null, "d": ["x"]}"#).unwrap();
        assert_eq!(catalog.get("a"), "3");
        assert_eq!(catalog.get("b"), "true");
        assert!(!catalog.exists("c"));
        assert!(!catalog.exists("d"));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(Catalog::from_json_str(r#"["LegacyMenu.1"]"#).is_err());
        assert!(Catalog::from_json_str("not json").is_err());
    }

    #[test]
    fn test_empty_resolves_nothing() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(!catalog.exists("Menu.1"));
        assert_eq!(catalog.get("Menu.1"), "");
    }
}
