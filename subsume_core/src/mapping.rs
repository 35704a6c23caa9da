//! Bidirectional partial vertex mappings and the algebra the index runs on.
//!
//! A [`BiMapping`] is an injective partial map over vertices: a bijection
//! between its key set and its value set. Both directions are kept in
//! ordered maps so mappings iterate deterministically and can serve as hash
//! keys.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Injective partial mapping between vertices.
#[derive(Clone)]
pub struct BiMapping<V> {
    fwd: BTreeMap<V, V>,
    inv: BTreeMap<V, V>,
}

impl<V> Default for BiMapping<V> {
    fn default() -> Self {
        BiMapping {
            fwd: BTreeMap::new(),
            inv: BTreeMap::new(),
        }
    }
}

impl<V: Clone + Ord> BiMapping<V> {
    pub fn new() -> Self {
        BiMapping {
            fwd: BTreeMap::new(),
            inv: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.fwd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fwd.is_empty()
    }

    pub fn get(&self, key: &V) -> Option<&V> {
        self.fwd.get(key)
    }

    /// Reverse lookup: the key mapped onto `value`, if any.
    pub fn get_inverse(&self, value: &V) -> Option<&V> {
        self.inv.get(value)
    }

    pub fn contains_key(&self, key: &V) -> bool {
        self.fwd.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.inv.contains_key(value)
    }

    /// Inserts a pair, panicking if it would break bijectivity.
    ///
    /// Re-inserting an existing pair is a no-op. Use [`try_insert`] when the
    /// pair comes from outside and a clash is an expected, skippable case.
    ///
    /// [`try_insert`]: BiMapping::try_insert
    pub fn insert(&mut self, key: V, value: V) {
        assert!(
            self.try_insert(key, value),
            "mapping insertion would break bijectivity"
        );
    }

    /// Inserts a pair unless it conflicts with an existing one.
    ///
    /// Returns `false` (leaving the mapping untouched) if `key` is already
    /// mapped to a different value or `value` is already the image of a
    /// different key.
    pub fn try_insert(&mut self, key: V, value: V) -> bool {
        match (self.fwd.get(&key), self.inv.get(&value)) {
            (Some(v), _) => *v == value,
            (None, Some(_)) => false,
            (None, None) => {
                self.fwd.insert(key.clone(), value.clone());
                self.inv.insert(value, key);
                true
            }
        }
    }

    /// Removes the pair keyed by `key`, returning its value.
    pub fn remove(&mut self, key: &V) -> Option<V> {
        let value = self.fwd.remove(key)?;
        self.inv.remove(&value);
        Some(value)
    }

    /// The mapping with keys and values swapped.
    pub fn inverted(&self) -> BiMapping<V> {
        BiMapping {
            fwd: self.inv.clone(),
            inv: self.fwd.clone(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, &V)> {
        self.fwd.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &V> {
        self.fwd.keys()
    }
}

impl<V: Clone + Ord> FromIterator<(V, V)> for BiMapping<V> {
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        let mut mapping = BiMapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl<V: PartialEq> PartialEq for BiMapping<V> {
    fn eq(&self, other: &Self) -> bool {
        self.fwd == other.fwd
    }
}

impl<V: Eq> Eq for BiMapping<V> {}

impl<V: Hash> Hash for BiMapping<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for pair in &self.fwd {
            pair.hash(state);
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for BiMapping<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.fwd {
            map.entry(k, v);
        }
        map.finish()
    }
}

/// Remaps the domain of `src` through `via`: `{ via(x)⊍x → y | (x, y) ∈ src }`
/// where `via(x)⊍x` falls back to `x` outside `via`'s domain.
///
/// Returns `None` when two source keys land on the same remapped key (or the
/// remapped pairs stop being injective). Callers treat this as a legitimate
/// non-result and skip the candidate.
pub fn map_domain_via<V: Clone + Ord>(
    src: &BiMapping<V>,
    via: &BiMapping<V>,
) -> Option<BiMapping<V>> {
    let mut result = BiMapping::new();
    for (k, v) in src.iter() {
        let key = via.get(k).unwrap_or(k).clone();
        if !result.try_insert(key, v.clone()) {
            return None;
        }
    }
    Some(result)
}

/// Range-side counterpart of [`map_domain_via`]:
/// `{ x → via(y)⊍y | (x, y) ∈ src }`.
pub fn map_range_via<V: Clone + Ord>(
    src: &BiMapping<V>,
    via: &BiMapping<V>,
) -> Option<BiMapping<V>> {
    let mut result = BiMapping::new();
    for (k, v) in src.iter() {
        let value = via.get(v).unwrap_or(v).clone();
        if !result.try_insert(k.clone(), value) {
            return None;
        }
    }
    Some(result)
}

/// The "delta" form of a mapping: all pairs with key equal to value dropped.
pub fn remove_identity<V: Clone + Ord>(mapping: &BiMapping<V>) -> BiMapping<V> {
    mapping
        .iter()
        .filter(|(k, v)| k != v)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Whether two mappings agree on every key they share.
pub fn is_compatible<V: Clone + Ord>(a: &BiMapping<V>, b: &BiMapping<V>) -> bool {
    a.iter().all(|(k, v)| b.get(k).map_or(true, |bv| bv == v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> BiMapping<String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn insert_rejects_bijectivity_violations() {
        let mut m = mapping(&[("a", "x")]);
        assert!(m.try_insert("a".into(), "x".into()));
        assert!(!m.try_insert("a".into(), "y".into()));
        assert!(!m.try_insert("b".into(), "x".into()));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn inverted_swaps_directions() {
        let m = mapping(&[("a", "x"), ("b", "y")]);
        let inv = m.inverted();
        assert_eq!(inv.get(&"x".to_string()), Some(&"a".to_string()));
        assert_eq!(inv.get_inverse(&"b".to_string()), Some(&"y".to_string()));
    }

    #[test]
    fn map_domain_via_remaps_and_keeps_unmapped_keys() {
        let src = mapping(&[("a", "1"), ("b", "2")]);
        let via = mapping(&[("a", "c")]);
        let out = map_domain_via(&src, &via).unwrap();
        assert_eq!(out, mapping(&[("c", "1"), ("b", "2")]));
    }

    #[test]
    fn map_domain_via_reports_collisions() {
        // both "a" and "b" would end up keyed by "b"
        let src = mapping(&[("a", "1"), ("b", "2")]);
        let via = mapping(&[("a", "b")]);
        assert!(map_domain_via(&src, &via).is_none());
    }

    #[test]
    fn map_range_via_remaps_values() {
        let src = mapping(&[("a", "1"), ("b", "2")]);
        let via = mapping(&[("1", "x")]);
        let out = map_range_via(&src, &via).unwrap();
        assert_eq!(out, mapping(&[("a", "x"), ("b", "2")]));
    }

    #[test]
    fn remove_identity_drops_fixed_points() {
        let m = mapping(&[("a", "a"), ("b", "c")]);
        assert_eq!(remove_identity(&m), mapping(&[("b", "c")]));
    }

    #[test]
    fn compatibility_is_agreement_on_shared_keys() {
        let a = mapping(&[("a", "1"), ("b", "2")]);
        let b = mapping(&[("b", "2"), ("c", "3")]);
        let c = mapping(&[("b", "9")]);
        assert!(is_compatible(&a, &b));
        assert!(is_compatible(&a, &BiMapping::new()));
        assert!(!is_compatible(&a, &c));
    }
}
