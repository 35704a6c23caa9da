//! Triple-graph binding for the `subsume_core` sub-graph isomorphism index.
//!
//! Provides the concrete pieces the generic index is parameterized over: an
//! RDF-style [`Term`]/[`Triple`]/[`TripleGraph`] model with its set algebra,
//! tag extraction (the concrete terms of a graph), and a backtracking
//! [`TripleMatcher`], plus ready-made index constructors.

mod graph;
mod matcher;
mod term;
mod triple;

pub use crate::graph::{extract_tags, TripleGraph, TripleSetOps};
pub use crate::matcher::TripleMatcher;
pub use crate::term::{ParseError, Term};
pub use crate::triple::Triple;

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

use subsume_core::{FlatIndex, SubsumptionIndex};

/// The hierarchical index instantiated for triple graphs.
pub type TripleIndex<K> = SubsumptionIndex<
    K,
    TripleGraph,
    Term,
    Term,
    TripleSetOps,
    TripleMatcher,
    fn(&TripleGraph) -> BTreeSet<Term>,
>;

/// The flat reference index instantiated for triple graphs.
pub type FlatTripleIndex<K> = FlatIndex<K, TripleGraph, Term, TripleSetOps, TripleMatcher>;

/// A hierarchical index over triple graphs.
pub fn triple_index<K: Clone + Eq + Hash + Debug>() -> TripleIndex<K> {
    SubsumptionIndex::new(TripleSetOps, TripleMatcher, extract_tags)
}

/// A linear-scan index over triple graphs, useful as a correctness oracle.
pub fn flat_triple_index<K: Clone + Eq + Hash + Debug>() -> FlatTripleIndex<K> {
    FlatIndex::new(TripleSetOps, TripleMatcher)
}
