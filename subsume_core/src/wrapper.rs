//! Object-level adapter over a graph index.

use std::marker::PhantomData;

use crate::api::SubgraphIndex;
use crate::error::IndexError;
use crate::mapping::BiMapping;
use crate::multimap::IsoMultimap;

/// Exposes an index over arbitrary objects by converting them to graphs
/// with a caller-supplied function; stateless beyond delegation.
pub struct ObjectIndex<K, O, G, V, I, F> {
    inner: I,
    object_to_graph: F,
    _types: PhantomData<fn(K, O, G, V)>,
}

impl<K, O, G, V, I, F> ObjectIndex<K, O, G, V, I, F>
where
    I: SubgraphIndex<K, G, V>,
    F: Fn(&O) -> G,
{
    pub fn new(inner: I, object_to_graph: F) -> Self {
        ObjectIndex {
            inner,
            object_to_graph,
            _types: PhantomData,
        }
    }

    pub fn put(&mut self, key: K, object: &O) -> Result<K, IndexError> {
        let graph = (self.object_to_graph)(object);
        self.inner.put(key, graph)
    }

    /// The stored graph for `key` (objects are not retained).
    pub fn get(&self, key: &K) -> Option<&G> {
        self.inner.get(key)
    }

    pub fn remove(&mut self, key: &K) {
        self.inner.remove(key);
    }

    pub fn lookup(
        &self,
        query: &O,
        exact: bool,
        base_iso: Option<&BiMapping<V>>,
    ) -> IsoMultimap<K, V> {
        let graph = (self.object_to_graph)(query);
        self.inner.lookup(&graph, exact, base_iso)
    }

    pub fn print_tree(&self) {
        self.inner.print_tree();
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}
