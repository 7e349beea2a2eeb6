//! The flat property mapping consumed by the expansion engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A flat key→value property mapping.
///
/// A `PropertySet` is the merged view of every property source supplied for
/// one expansion call. Keys are unique and insertion order is irrelevant.
/// The engine treats it as read-only for the duration of a call.
///
/// # Example
///
/// ```
/// use conflux_domain::PropertySet;
///
/// let properties = PropertySet::from_pairs([("server.port", "8080")]);
/// assert_eq!(properties.get("server.port"), Some("8080"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    properties: HashMap<String, String>,
}

impl PropertySet {
    /// Creates an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a property set from key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            properties: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Gets a property value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns true if the set contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Sets a property, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Merges another set into this one. Entries from `other` win on
    /// conflicting keys, so later sources override earlier ones.
    pub fn merge(&mut self, other: Self) {
        self.properties.extend(other.properties);
    }

    /// Returns all keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl From<HashMap<String, String>> for PropertySet {
    fn from(properties: HashMap<String, String>) -> Self {
        Self { properties }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
