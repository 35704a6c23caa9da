//! Subsumption edges.

use std::collections::BTreeSet;
use std::fmt;

use crate::mapping::BiMapping;

/// Identity of an edge inside its source node's tables. The `(target,
/// trans_iso)` table and the tag-indexed view both address edges through it.
pub type EdgeId = u64;

/// A directed subsumption relation between two index nodes.
///
/// Crossing the edge renames the source entry's vertices through
/// `trans_iso`; what the target entry adds on top of the (renamed) source is
/// `residual_graph`, and `residual_tags` are the target's tags not already
/// seen on the path from the root to the source.
#[derive(Clone, Debug)]
pub struct Edge<K, G, V, T> {
    pub from: Option<K>,
    pub to: K,
    /// Delta mapping applied to the source's vertices when crossing.
    pub trans_iso: BiMapping<V>,
    pub residual_graph: G,
    pub residual_tags: BTreeSet<T>,
    /// Full mapping accumulated from the root when the edge was created;
    /// absent on edges produced by rewiring.
    pub base_iso: Option<BiMapping<V>>,
}

impl<K, G, V, T> Edge<K, G, V, T>
where
    K: PartialEq + fmt::Debug,
{
    pub fn new(
        from: Option<K>,
        to: K,
        trans_iso: BiMapping<V>,
        residual_graph: G,
        residual_tags: BTreeSet<T>,
        base_iso: Option<BiMapping<V>>,
    ) -> Self {
        assert!(
            from.as_ref() != Some(&to),
            "self-edge on index node {to:?}"
        );
        Edge {
            from,
            to,
            trans_iso,
            residual_graph,
            residual_tags,
            base_iso,
        }
    }
}
