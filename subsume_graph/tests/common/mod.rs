//! Shared helpers for the integration tests.
#![allow(dead_code)]

use ahash::AHashSet;
use subsume_core::{BiMapping, IsoMultimap};
use subsume_graph::{Term, TripleGraph};

pub fn graph(text: &str) -> TripleGraph {
    text.parse().unwrap_or_else(|e| panic!("bad graph {text:?}: {e}"))
}

pub fn mapping(pairs: &[(&str, &str)]) -> BiMapping<Term> {
    pairs
        .iter()
        .map(|(k, v)| (k.parse::<Term>().unwrap(), v.parse::<Term>().unwrap()))
        .collect()
}

/// Asserts that `key` was found with exactly the given delta mappings.
pub fn assert_deltas(
    result: &IsoMultimap<&str, Term>,
    key: &str,
    expected: &[&[(&str, &str)]],
) {
    let actual = result.get(&key).cloned().unwrap_or_default();
    let expected: AHashSet<BiMapping<Term>> =
        expected.iter().map(|pairs| mapping(pairs)).collect();
    assert_eq!(actual, expected, "deltas for {key}");
}

/// Sorted `(key, mapping)` pairs, as a canonical comparable form.
pub fn canonical(result: &IsoMultimap<&str, Term>) -> Vec<(String, String)> {
    let mut items: Vec<(String, String)> = result
        .items()
        .map(|(key, iso)| (key.to_string(), format!("{iso:?}")))
        .collect();
    items.sort();
    items
}
