//! The map-like surface shared by index implementations.

use crate::error::IndexError;
use crate::mapping::BiMapping;
use crate::multimap::IsoMultimap;

/// A container of `(key, graph)` entries queryable by sub-graph
/// isomorphism.
pub trait SubgraphIndex<K, G, V> {
    /// Stores an entry and hands the key back.
    fn put(&mut self, key: K, graph: G) -> Result<K, IndexError>;

    /// The graph stored for `key`, if any.
    fn get(&self, key: &K) -> Option<&G>;

    /// Drops an entry; unknown keys are ignored.
    fn remove(&mut self, key: &K);

    /// Every stored key whose graph embeds into `query` (`exact`: is
    /// isomorphic to it), with the identity-removed mappings witnessing each
    /// embedding. `base_iso` seeds the mapping as a starting constraint.
    fn lookup(&self, query: &G, exact: bool, base_iso: Option<&BiMapping<V>>) -> IsoMultimap<K, V>;

    /// Dumps the implementation's internal structure to stdout.
    fn print_tree(&self);
}
