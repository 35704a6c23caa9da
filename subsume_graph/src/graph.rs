//! Triple graphs and their set algebra.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use subsume_core::SetOps;

use crate::term::{ParseError, Term};
use crate::triple::Triple;

/// A graph as an ordered set of triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleGraph {
    triples: BTreeSet<Triple>,
}

impl TripleGraph {
    pub fn new() -> Self {
        TripleGraph::default()
    }

    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Every distinct term occurring in any triple.
    pub fn terms(&self) -> BTreeSet<&Term> {
        self.triples.iter().flat_map(Triple::terms).collect()
    }
}

impl FromIterator<Triple> for TripleGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        TripleGraph {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Display for TripleGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for triple in &self.triples {
            if !first {
                write!(f, " . ")?;
            }
            write!(f, "{triple}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for TripleGraph {
    type Err = ParseError;

    /// Parses statements separated by `.` or newlines, e.g.
    /// `"?x type Person . ?x name ?l"`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .split(['.', '\n'])
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(Triple::from_str)
            .collect()
    }
}

/// Set algebra over [`TripleGraph`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct TripleSetOps;

impl SetOps<TripleGraph, Term> for TripleSetOps {
    fn create_new(&self) -> TripleGraph {
        TripleGraph::new()
    }

    fn union(&self, a: &TripleGraph, b: &TripleGraph) -> TripleGraph {
        a.triples.union(&b.triples).cloned().collect()
    }

    fn difference(&self, a: &TripleGraph, b: &TripleGraph) -> TripleGraph {
        a.triples.difference(&b.triples).cloned().collect()
    }

    fn intersect(&self, a: &TripleGraph, b: &TripleGraph) -> TripleGraph {
        a.triples.intersection(&b.triples).cloned().collect()
    }

    fn transform_items(
        &self,
        graph: &TripleGraph,
        transform: &mut dyn FnMut(&Term) -> Option<Term>,
    ) -> TripleGraph {
        graph
            .iter()
            .map(|triple| {
                let mut map = |term: &Term| transform(term).unwrap_or_else(|| term.clone());
                Triple::new(map(&triple.s), map(&triple.p), map(&triple.o))
            })
            .collect()
    }

    fn size(&self, graph: &TripleGraph) -> usize {
        graph.len()
    }
}

/// The iso-invariant tags of a graph: every concrete term it mentions.
pub fn extract_tags(graph: &TripleGraph) -> BTreeSet<Term> {
    graph
        .terms()
        .into_iter()
        .filter(|term| term.is_concrete())
        .cloned()
        .collect()
}
