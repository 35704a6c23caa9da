//! Nodes of the subsumption DAG.

use std::collections::hash_map::Entry;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

use crate::edge::{Edge, EdgeId};
use crate::mapping::BiMapping;
use crate::tag_trie::TagTrie;

/// One node of the subsumption DAG: the preferred entry it represents plus
/// its outgoing edge tables.
///
/// Outgoing edges are kept in two agreeing views sharing [`EdgeId`]s: a
/// `(target key, trans iso)` table for identity-based replacement and
/// removal, and a tag-indexed view for the subset/superset prefilters of the
/// traversal. Nodes refer to each other by key only; the index owns the flat
/// key-to-node map.
#[derive(Clone, Debug)]
pub struct IndexNode<K, G, V, T> {
    /// `None` for the root.
    key: Option<K>,
    /// Full graph of the preferred entry (empty for the root).
    graph: G,
    graph_tags: BTreeSet<T>,
    edges: AHashMap<EdgeId, Edge<K, G, V, T>>,
    by_target: AHashMap<K, AHashMap<BiMapping<V>, EdgeId>>,
    tag_index: TagTrie<EdgeId, T>,
    parents: AHashSet<Option<K>>,
    next_edge: EdgeId,
}

impl<K, G, V, T> IndexNode<K, G, V, T>
where
    K: Clone + Eq + Hash + fmt::Debug,
    V: Clone + Ord + Hash,
    T: Clone + Ord,
{
    pub fn new(key: Option<K>, graph: G, graph_tags: BTreeSet<T>) -> Self {
        IndexNode {
            key,
            graph,
            graph_tags,
            edges: AHashMap::new(),
            by_target: AHashMap::new(),
            tag_index: TagTrie::new(),
            parents: AHashSet::new(),
            next_edge: 0,
        }
    }

    pub fn key(&self) -> &Option<K> {
        &self.key
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_tags(&self) -> &BTreeSet<T> {
        &self.graph_tags
    }

    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<K, G, V, T> {
        &self.edges[&id]
    }

    pub fn out_edges(&self) -> impl Iterator<Item = &Edge<K, G, V, T>> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges whose residual tags are a subset of `tags` — the candidates a
    /// traversal carrying `tags` may cross.
    pub fn edges_with_subset_tags(&self, tags: &BTreeSet<T>, strict: bool) -> Vec<EdgeId> {
        self.tag_index.all_subsets_of(tags, strict)
    }

    /// Edges whose residual tags are a superset of `tags` — the candidates a
    /// newly inserted entry with `tags` may subsume.
    pub fn edges_with_superset_tags(&self, tags: &BTreeSet<T>, strict: bool) -> Vec<EdgeId> {
        self.tag_index.all_supersets_of(tags, strict)
    }

    /// Inserts an edge, replacing any existing edge with the same
    /// `(target, trans iso)` pair.
    pub fn insert_edge(&mut self, edge: Edge<K, G, V, T>) -> EdgeId {
        debug_assert_eq!(edge.from, self.key, "edge inserted at a foreign node");

        let slot = self
            .by_target
            .entry(edge.to.clone())
            .or_default()
            .entry(edge.trans_iso.clone());

        let id = self.next_edge;
        self.next_edge += 1;

        match slot {
            Entry::Occupied(mut occupied) => {
                let prior = std::mem::replace(occupied.get_mut(), id);
                self.edges.remove(&prior);
                self.tag_index.remove(&prior);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(id);
            }
        }

        self.tag_index.insert(id, edge.residual_tags.clone());
        self.edges.insert(id, edge);
        id
    }

    /// Removes one edge by id, keeping all views in sync.
    pub fn remove_edge(&mut self, id: EdgeId) -> Edge<K, G, V, T> {
        let edge = self.edges.remove(&id).expect("edge id not present");
        let before = self.tag_index.len();
        self.tag_index.remove(&id);
        assert_eq!(
            before - self.tag_index.len(),
            1,
            "edge index out of sync while removing an edge"
        );
        if let Some(per_iso) = self.by_target.get_mut(&edge.to) {
            per_iso.remove(&edge.trans_iso);
            if per_iso.is_empty() {
                self.by_target.remove(&edge.to);
            }
        }
        edge
    }

    /// Drops every edge leading to `target`.
    pub fn remove_edges_to(&mut self, target: &K) {
        if let Some(per_iso) = self.by_target.remove(target) {
            for id in per_iso.values() {
                self.edges.remove(id);
                self.tag_index.remove(id);
            }
        }
    }

    pub fn has_edges_to(&self, target: &K) -> bool {
        self.by_target.get(target).is_some_and(|m| !m.is_empty())
    }

    pub fn parents(&self) -> impl Iterator<Item = &Option<K>> {
        self.parents.iter()
    }

    pub fn add_parent(&mut self, parent: Option<K>) {
        self.parents.insert(parent);
    }

    pub fn remove_parent(&mut self, parent: &Option<K>) {
        self.parents.remove(parent);
    }

}

impl<K, G, V, T> IndexNode<K, G, V, T>
where
    K: Clone + Eq + Hash + fmt::Debug,
    V: Clone + Ord + Hash,
    T: Clone + Ord + fmt::Debug,
{
    /// Asserts that the edge storage, the target table, and the tag index
    /// describe the same edge set.
    pub fn assert_views_agree(&self) {
        assert_eq!(self.edges.len(), self.tag_index.len());
        let table_total: usize = self.by_target.values().map(|per_iso| per_iso.len()).sum();
        assert_eq!(self.edges.len(), table_total);
        for (id, edge) in &self.edges {
            assert_eq!(self.tag_index.get(id), Some(&edge.residual_tags));
            assert_eq!(
                self.by_target
                    .get(&edge.to)
                    .and_then(|per_iso| per_iso.get(&edge.trans_iso)),
                Some(id)
            );
        }
    }
}
