//! Fragment parameters.
//!
//! [`FragmentParams`] is the `key -> value` part of a route fragment
//! (`#detail?id=5&draft`). Two things set it apart from an ordinary query map:
//!
//! - a key may be present **without** a value (`draft` above), which is kept
//!   distinct from a key with an empty value (`draft=`);
//! - keys are always iterated in ascending order, so a fragment built from the
//!   same parameters is byte-for-byte identical no matter how they were
//!   collected.
//!
//! # Example
//!
//! ```
//! use navigator_history::FragmentParams;
//!
//! let params = FragmentParams::new()
//!     .with("id", "42")
//!     .with_flag("draft");
//!
//! assert_eq!(params.get_as::<u32>("id"), Some(42));
//! assert!(params.contains("draft"));
//! assert_eq!(params.get("draft"), None);
//! assert_eq!(params.keys().collect::<Vec<_>>(), vec!["draft", "id"]);
//! ```

use std::collections::{BTreeMap, HashMap};

/// Ordered fragment parameters; a value of `None` is a bare key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FragmentParams {
    params: BTreeMap<String, Option<String>>,
}

impl FragmentParams {
    /// Create empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`insert_flag`](Self::insert_flag).
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.insert_flag(key);
        self
    }

    /// Insert or overwrite a key with a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), Some(value.into()));
    }

    /// Insert or overwrite a bare key (rendered without `=`).
    pub fn insert_flag(&mut self, key: impl Into<String>) {
        self.params.insert(key.into(), None);
    }

    /// Insert a raw entry. Later calls for the same key win.
    pub fn set(&mut self, key: String, value: Option<String>) {
        self.params.insert(key, value);
    }

    /// Remove a key, returning its entry if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.params.remove(key)
    }

    /// Value of a key. `None` both when the key is absent and when it is bare;
    /// use [`entry`](Self::entry) to tell the two apart.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key)?.as_deref()
    }

    /// Raw entry: `None` = absent, `Some(None)` = bare key.
    pub fn entry(&self, key: &str) -> Option<Option<&str>> {
        self.params.get(key).map(Option::as_deref)
    }

    /// Get a value and parse it as `T`.
    ///
    /// Returns `None` if the key is missing, bare, or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Return `true` if the key is present, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Iterate `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Borrow the underlying ordered map.
    pub fn as_map(&self) -> &BTreeMap<String, Option<String>> {
        &self.params
    }

    /// Consume into the underlying ordered map.
    pub fn into_map(self) -> BTreeMap<String, Option<String>> {
        self.params
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for FragmentParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.map(Into::into)))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, Option<String>>> for FragmentParams {
    fn from(params: BTreeMap<String, Option<String>>) -> Self {
        Self { params }
    }
}

impl From<HashMap<String, Option<String>>> for FragmentParams {
    fn from(params: HashMap<String, Option<String>>) -> Self {
        params.into_iter().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
