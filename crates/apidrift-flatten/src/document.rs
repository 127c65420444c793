//! The flattened document type.

use std::collections::btree_map::{Iter, Keys};
use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// A document reduced to a flat mapping from dotted key-path to leaf value.
///
/// Leaf values are scalars (null, bool, number, string) or an empty
/// container that had nothing to descend into. A key that is not present
/// is `absent`, which is distinct from an explicit `null`.
///
/// Keys are kept in a `BTreeMap` so iteration order is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatDocument {
    entries: BTreeMap<String, Value>,
}

impl FlatDocument {
    /// Create an empty document (every key absent).
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }

    /// The value stored under `key`, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of leaf entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the document has no leaves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key-paths in ascending order.
    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// `(key-path, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Sorted union of the key-paths present in either document.
    pub fn union_keys<'a>(&'a self, other: &'a FlatDocument) -> BTreeSet<&'a str> {
        self.entries
            .keys()
            .chain(other.entries.keys())
            .map(String::as_str)
            .collect()
    }
}

impl<'a> IntoIterator for &'a FlatDocument {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, Value)> for FlatDocument {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
