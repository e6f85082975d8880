//! Shell configuration
//!
//! Remote collection names and the leaf matching policy. Defaults match the
//! hosted store's collection names; each can be overridden by a `DATA_SCREENS_*`
//! key, read from the environment natively and from `localStorage` in the browser.

use serde::Deserialize;

use crate::domain::{DomainError, DomainResult, TagMatch};

pub const ITEMS_COLLECTION_VAR: &str = "DATA_SCREENS_ITEMS_COLLECTION";
pub const SCREENS_COLLECTION_VAR: &str = "DATA_SCREENS_SCREENS_COLLECTION";
pub const TAG_MATCH_VAR: &str = "DATA_SCREENS_TAG_MATCH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    pub data_items_collection: String,
    pub screens_collection: String,
    pub tag_match: TagMatch,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_items_collection: "dataItems".to_string(),
            screens_collection: "screens".to_string(),
            tag_match: TagMatch::default(),
        }
    }
}

impl ShellConfig {
    /// Defaults overridden by the `DATA_SCREENS_*` environment variables
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let set = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(name) = set(ITEMS_COLLECTION_VAR) {
            config.data_items_collection = name;
        }
        if let Some(name) = set(SCREENS_COLLECTION_VAR) {
            config.screens_collection = name;
        }
        if let Some(policy) = set(TAG_MATCH_VAR) {
            config.tag_match = policy
                .parse()
                .map_err(|e: DomainError| DomainError::InvalidInput(format!("{}: {}", TAG_MATCH_VAR, e)))?;
        }
        if config.data_items_collection == config.screens_collection {
            return Err(DomainError::InvalidInput(
                "data items and screens must use different collections".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShellConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.data_items_collection, "dataItems");
        assert_eq!(config.tag_match, TagMatch::Any);
    }

    #[test]
    fn test_overrides() {
        let config = ShellConfig::from_lookup(lookup(&[
            (ITEMS_COLLECTION_VAR, "items_test"),
            (SCREENS_COLLECTION_VAR, " "),
            (TAG_MATCH_VAR, "all"),
        ]))
        .unwrap();
        assert_eq!(config.data_items_collection, "items_test");
        assert_eq!(config.screens_collection, "screens");
        assert_eq!(config.tag_match, TagMatch::All);
    }

    #[test]
    fn test_key_value_store_overrides() {
        // browser storage holds other keys next to the overrides
        let stored = lookup(&[("data-screens:user", "a@x.com"), (TAG_MATCH_VAR, " ALL ")]);
        let config = ShellConfig::from_lookup(stored).unwrap();
        assert_eq!(config.tag_match, TagMatch::All);
        assert_eq!(config.data_items_collection, "dataItems");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ShellConfig::from_lookup(lookup(&[(TAG_MATCH_VAR, "most")])).is_err());
        assert!(ShellConfig::from_lookup(lookup(&[(ITEMS_COLLECTION_VAR, "screens")])).is_err());
    }

    #[test]
    fn test_deserializes_partial_json() {
        let config: ShellConfig = serde_json::from_str(r#"{"tagMatch": "all"}"#).unwrap();
        assert_eq!(config.tag_match, TagMatch::All);
        assert_eq!(config.screens_collection, "screens");
    }
}
