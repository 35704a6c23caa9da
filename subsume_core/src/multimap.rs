//! Lookup result type: keys mapped to sets of delta isomorphisms.

use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

use crate::mapping::BiMapping;

/// A multimap from entry keys to the (identity-removed) mappings that embed
/// the entry's graph into a query graph.
#[derive(Clone, Debug, Default)]
pub struct IsoMultimap<K, V> {
    inner: AHashMap<K, AHashSet<BiMapping<V>>>,
}

impl<K, V> IsoMultimap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Ord + Hash,
{
    pub fn new() -> Self {
        IsoMultimap {
            inner: AHashMap::new(),
        }
    }

    /// Adds a `(key, mapping)` pair; returns `false` if it was already
    /// present.
    pub fn insert(&mut self, key: K, mapping: BiMapping<V>) -> bool {
        self.inner.entry(key).or_default().insert(mapping)
    }

    pub fn get(&self, key: &K) -> Option<&AHashSet<BiMapping<V>>> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn num_keys(&self) -> usize {
        self.inner.len()
    }

    /// Number of `(key, mapping)` pairs.
    pub fn len(&self) -> usize {
        self.inner.values().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &AHashSet<BiMapping<V>>)> {
        self.inner.iter()
    }

    /// Flattened view over all `(key, mapping)` pairs.
    pub fn items(&self) -> impl Iterator<Item = (&K, &BiMapping<V>)> {
        self.inner
            .iter()
            .flat_map(|(k, isos)| isos.iter().map(move |iso| (k, iso)))
    }
}

impl<K, V> PartialEq for IsoMultimap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Ord + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V> Eq for IsoMultimap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Ord + Hash,
{
}
