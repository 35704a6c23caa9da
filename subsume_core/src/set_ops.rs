//! Abstract set algebra over graphs.

use crate::mapping::BiMapping;

/// Pure set operations over a graph type `G` whose items are built from
/// vertices of type `V`.
///
/// `size` and `is_empty` are expected to be O(1); everything else is free to
/// materialize. `difference` and `union` are set-theoretic over the graph's
/// items and `union` is idempotent.
pub trait SetOps<G, V> {
    /// A fresh empty graph.
    fn create_new(&self) -> G;

    fn union(&self, a: &G, b: &G) -> G;

    fn difference(&self, a: &G, b: &G) -> G;

    fn intersect(&self, a: &G, b: &G) -> G;

    /// Rebuilds the graph with every vertex passed through `transform`;
    /// vertices mapped to `None` are kept as they are.
    fn transform_items(&self, graph: &G, transform: &mut dyn FnMut(&V) -> Option<V>) -> G;

    fn size(&self, graph: &G) -> usize;

    fn is_empty(&self, graph: &G) -> bool {
        self.size(graph) == 0
    }

    /// Renames vertices along a partial isomorphism; vertices outside the
    /// mapping's domain stay fixed.
    fn apply_iso(&self, graph: &G, iso: &BiMapping<V>) -> G
    where
        V: Clone + Ord,
    {
        self.transform_items(graph, &mut |v| iso.get(v).cloned())
    }
}
