//! Linear-scan reference index.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;
use tracing::trace;

use crate::api::SubgraphIndex;
use crate::error::IndexError;
use crate::mapping::{remove_identity, BiMapping};
use crate::matcher::IsoMatcher;
use crate::multimap::IsoMultimap;
use crate::set_ops::SetOps;

/// Index without any of the subsumption machinery: every lookup runs the
/// matcher against every stored graph. The correctness oracle for
/// [`SubsumptionIndex`](crate::SubsumptionIndex), and a baseline for
/// benchmarks.
pub struct FlatIndex<K, G, V, S, M> {
    set_ops: S,
    matcher: M,
    key_to_graph: AHashMap<K, G>,
    _vertices: std::marker::PhantomData<fn(V)>,
}

impl<K, G, V, S, M> FlatIndex<K, G, V, S, M>
where
    K: Clone + Eq + Hash + fmt::Debug,
    G: Clone,
    V: Clone + Ord + Hash,
    S: SetOps<G, V>,
    M: IsoMatcher<G, V>,
{
    pub fn new(set_ops: S, matcher: M) -> Self {
        FlatIndex {
            set_ops,
            matcher,
            key_to_graph: AHashMap::new(),
            _vertices: std::marker::PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.key_to_graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_graph.is_empty()
    }
}

impl<K, G, V, S, M> SubgraphIndex<K, G, V> for FlatIndex<K, G, V, S, M>
where
    K: Clone + Eq + Hash + fmt::Debug,
    G: Clone,
    V: Clone + Ord + Hash,
    S: SetOps<G, V>,
    M: IsoMatcher<G, V>,
{
    fn put(&mut self, key: K, graph: G) -> Result<K, IndexError> {
        if let Some(existing) = self.key_to_graph.get(&key) {
            let unchanged = self.set_ops.is_empty(&self.set_ops.difference(existing, &graph))
                && self.set_ops.is_empty(&self.set_ops.difference(&graph, existing));
            return if unchanged {
                Ok(key)
            } else {
                Err(IndexError::KeyInUse)
            };
        }
        self.key_to_graph.insert(key.clone(), graph);
        Ok(key)
    }

    fn get(&self, key: &K) -> Option<&G> {
        self.key_to_graph.get(key)
    }

    fn remove(&mut self, key: &K) {
        self.key_to_graph.remove(key);
    }

    fn lookup(&self, query: &G, exact: bool, base_iso: Option<&BiMapping<V>>) -> IsoMultimap<K, V> {
        let base = base_iso.cloned().unwrap_or_default();
        let mut result = IsoMultimap::new();
        for (key, graph) in &self.key_to_graph {
            let isos = self.matcher.enumerate(&base, graph, query);
            trace!("flat scan of {key:?}: {} isos", isos.len());
            for iso in isos {
                if exact {
                    // The mapped graph is contained in the query; exactness
                    // additionally needs the query contained in it.
                    let mapped = self.set_ops.apply_iso(graph, &iso);
                    let extra = self.set_ops.difference(query, &mapped);
                    if !self.set_ops.is_empty(&extra) {
                        continue;
                    }
                }
                result.insert(key.clone(), remove_identity(&iso));
            }
        }
        result
    }

    fn print_tree(&self) {
        for key in self.key_to_graph.keys() {
            println!("{key:?}");
        }
    }
}
