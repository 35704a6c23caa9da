//! The hierarchical subsumption index.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use tracing::{debug, trace};

use crate::api::SubgraphIndex;
use crate::edge::{Edge, EdgeId};
use crate::error::IndexError;
use crate::mapping::{is_compatible, map_domain_via, map_range_via, remove_identity, BiMapping};
use crate::matcher::IsoMatcher;
use crate::multimap::IsoMultimap;
use crate::node::IndexNode;
use crate::set_ops::SetOps;
use crate::tag_trie::TagTrie;

/// Key of a node in the subsumption DAG; `None` addresses the root.
type NodeKey<K> = Option<K>;

/// A spot in the DAG where a graph being inserted (or looked up) came to
/// rest, together with what is left of it there.
struct InsertPosition<K, G, V, T> {
    node: NodeKey<K>,
    residual_graph: G,
    residual_tags: BTreeSet<T>,
    /// Snapshot of the accumulated mapping from the root to this position.
    base_iso: BiMapping<V>,
    /// Delta mapping of the last edge crossed to get here.
    delta_iso: BiMapping<V>,
}

/// Map-like index over `(key, graph)` entries arranged in a subsumption DAG.
///
/// An edge `A → B` records that `A`'s graph is sub-graph-isomorphic to `B`'s
/// via the edge's trans iso, with `B` adding the edge's residual graph and
/// residual tags. Keys with mutually isomorphic graphs share one node: the
/// first becomes the node's preferred key, later ones are kept in a side
/// table with the renaming that links them.
///
/// Single-threaded; lookups are side-effect free.
pub struct SubsumptionIndex<K, G, V, T, S, M, E> {
    set_ops: S,
    matcher: M,
    extract_tags: E,
    nodes: AHashMap<NodeKey<K>, IndexNode<K, G, V, T>>,
    key_to_graph: AHashMap<K, G>,
    /// Global tag index over all stored keys, used to find rewiring
    /// candidates on insert.
    graphs_by_tags: TagTrie<K, T>,
    /// Node key → alternate key → renamings from the node's graph to the
    /// alternate key's graph.
    alt_rows: AHashMap<NodeKey<K>, AHashMap<K, AHashSet<BiMapping<V>>>>,
    /// Inverse of `alt_rows`: which node owns each stored key.
    alt_owner: AHashMap<K, NodeKey<K>>,
}

impl<K, G, V, T, S, M, E> SubsumptionIndex<K, G, V, T, S, M, E>
where
    K: Clone + Eq + Hash + fmt::Debug,
    G: Clone,
    V: Clone + Ord + Hash + fmt::Debug,
    T: Clone + Ord + fmt::Debug,
    S: SetOps<G, V>,
    M: IsoMatcher<G, V>,
    E: Fn(&G) -> BTreeSet<T>,
{
    pub fn new(set_ops: S, matcher: M, extract_tags: E) -> Self {
        let root = IndexNode::new(None, set_ops.create_new(), BTreeSet::new());
        let mut nodes = AHashMap::new();
        nodes.insert(None, root);
        SubsumptionIndex {
            set_ops,
            matcher,
            extract_tags,
            nodes,
            key_to_graph: AHashMap::new(),
            graphs_by_tags: TagTrie::new(),
            alt_rows: AHashMap::new(),
            alt_owner: AHashMap::new(),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.key_to_graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_graph.is_empty()
    }

    /// Adds an entry. Re-putting a key with a set-equal graph is a no-op;
    /// re-putting it with a different graph is an error (remove it first).
    pub fn put(&mut self, key: K, graph: G) -> Result<K, IndexError> {
        if let Some(existing) = self.key_to_graph.get(&key) {
            let unchanged = self.graphs_equal(existing, &graph);
            return if unchanged {
                trace!("put of unchanged graph for {key:?} ignored");
                Ok(key)
            } else {
                Err(IndexError::KeyInUse)
            };
        }

        let tags = (self.extract_tags)(&graph);
        debug!("inserting {key:?} with {} tags", tags.len());

        self.key_to_graph.insert(key.clone(), graph.clone());
        self.graphs_by_tags.insert(key.clone(), tags.clone());

        let mut positions = Vec::new();
        self.find_insert_positions(
            &mut positions,
            &None,
            &graph,
            &tags,
            &BiMapping::new(),
            &BiMapping::new(),
            false,
            false,
        );
        debug!("found {} insert positions for {key:?}", positions.len());
        for pos in positions {
            self.perform_add(&key, pos);
        }
        Ok(key)
    }

    /// The stored graph reachable through `key`, resolved via the owning
    /// node (an alternate key yields its preferred key's graph).
    pub fn get(&self, key: &K) -> Option<&G> {
        let owner = self.alt_owner.get(key)?;
        self.nodes.get(owner).map(IndexNode::graph)
    }

    /// Removes a key. Dropping the last key of a node extinguishes the node
    /// and cascades upward through parents that become empty leaves; the
    /// root survives. Unknown keys are ignored.
    pub fn remove(&mut self, key: &K) {
        let Some(owner) = self.alt_owner.remove(key) else {
            return;
        };
        self.key_to_graph.remove(key);
        self.graphs_by_tags.remove(key);

        let row_empty = match self.alt_rows.get_mut(&owner) {
            Some(row) => {
                row.remove(key);
                row.is_empty()
            }
            None => true,
        };
        if row_empty {
            debug!("extinguishing node {owner:?} after removal of {key:?}");
            self.alt_rows.remove(&owner);
            self.extinguish_node(&owner);
        }
    }

    /// Every stored key whose graph embeds into `query` (`exact`: is
    /// isomorphic to it), with all witnessing delta mappings. `base_iso`
    /// seeds the accumulated mapping as a starting constraint.
    pub fn lookup(
        &self,
        query: &G,
        exact: bool,
        base_iso: Option<&BiMapping<V>>,
    ) -> IsoMultimap<K, V> {
        let tags = (self.extract_tags)(query);
        let base = base_iso.cloned().unwrap_or_default();

        let mut positions = Vec::new();
        self.find_insert_positions(
            &mut positions,
            &None,
            query,
            &tags,
            &base,
            &BiMapping::new(),
            true,
            exact,
        );
        trace!("lookup visited {} candidate positions", positions.len());

        let mut result = IsoMultimap::new();
        for pos in positions {
            let Some(row) = self.alt_rows.get(&pos.node) else {
                continue;
            };
            for (alt_key, renamings) in row {
                for renaming in renamings {
                    let Some(alt_iso) = map_domain_via(&pos.base_iso, renaming) else {
                        debug!(
                            "skipping alternate key {alt_key:?}: renaming collides with the \
                             accumulated mapping"
                        );
                        continue;
                    };
                    result.insert(alt_key.clone(), remove_identity(&alt_iso));
                }
            }
        }
        result
    }

    fn graphs_equal(&self, a: &G, b: &G) -> bool {
        self.set_ops.is_empty(&self.set_ops.difference(a, b))
            && self.set_ops.is_empty(&self.set_ops.difference(b, a))
    }

    fn node(&self, key: &NodeKey<K>) -> &IndexNode<K, G, V, T> {
        self.nodes.get(key).expect("dangling node key")
    }

    fn node_mut(&mut self, key: &NodeKey<K>) -> &mut IndexNode<K, G, V, T> {
        self.nodes.get_mut(key).expect("dangling node key")
    }

    /// Whether a mapping leaves every concrete vertex on itself. A mapping
    /// that moves a concrete vertex can never be part of a valid embedding,
    /// so carrying it further is pointless.
    fn concrete_fixed(&self, mapping: &BiMapping<V>) -> bool {
        mapping
            .iter()
            .all(|(k, v)| self.matcher.is_renameable(k) || k == v)
    }

    /// Depth-first search for the nodes at which `insert_graph` comes to
    /// rest.
    ///
    /// At each node, only edges whose residual tags are covered by the
    /// current residual tags are considered. For each matching, compatible
    /// isomorphism the accumulated mapping is extended in place, the search
    /// descends with the shrunken residual, and the extension is popped on
    /// return. A position is recorded where no edge subsumes the residual —
    /// or at every visited node in retrieval mode.
    #[allow(clippy::too_many_arguments)]
    fn find_insert_positions(
        &self,
        out: &mut Vec<InsertPosition<K, G, V, T>>,
        node_key: &NodeKey<K>,
        insert_graph: &G,
        insert_tags: &BTreeSet<T>,
        base_iso: &BiMapping<V>,
        latest_delta: &BiMapping<V>,
        retrieval: bool,
        exact: bool,
    ) {
        let node = self.node(node_key);
        let mut subsumed = false;

        for edge_id in node.edges_with_subset_tags(insert_tags, false) {
            let edge = node.edge(edge_id);

            // Re-express the accumulated mapping in the child's vertex
            // naming before matching against the child's residual.
            let Some(mut trans_base) = map_domain_via(base_iso, &edge.trans_iso) else {
                debug!(
                    "skipping edge to {:?}: accumulated mapping collides with its trans iso",
                    edge.to
                );
                continue;
            };
            if !self.concrete_fixed(&trans_base) {
                debug!(
                    "skipping edge to {:?}: a concrete vertex would be renamed",
                    edge.to
                );
                continue;
            }

            let isos = self
                .matcher
                .enumerate(&trans_base, &edge.residual_graph, insert_graph);
            trace!("edge to {:?}: {} candidate isos", edge.to, isos.len());

            for iso in isos {
                if !is_compatible(&iso, &trans_base) {
                    continue;
                }
                let delta = remove_identity(&iso);

                // Pairs newly bound by this iso; pushed for the descent and
                // popped afterwards.
                let affected: Vec<(V, V)> = iso
                    .iter()
                    .filter(|(k, _)| !trans_base.contains_key(k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                if !Self::push_pairs(&mut trans_base, &affected) {
                    debug!("skipping non-injective candidate iso");
                    continue;
                }
                subsumed = true;

                let mapped = self.set_ops.apply_iso(&edge.residual_graph, &iso);
                let residual_graph = self.set_ops.difference(insert_graph, &mapped);
                let residual_tags: BTreeSet<T> = insert_tags
                    .difference(&edge.residual_tags)
                    .cloned()
                    .collect();

                self.find_insert_positions(
                    out,
                    &Some(edge.to.clone()),
                    &residual_graph,
                    &residual_tags,
                    &trans_base,
                    &delta,
                    retrieval,
                    exact,
                );

                for (k, _) in &affected {
                    trans_base.remove(k);
                }
            }
        }

        if (!subsumed || retrieval) && (!exact || self.set_ops.is_empty(insert_graph)) {
            out.push(InsertPosition {
                node: node_key.clone(),
                residual_graph: insert_graph.clone(),
                residual_tags: insert_tags.clone(),
                base_iso: base_iso.clone(),
                delta_iso: latest_delta.clone(),
            });
        }
    }

    /// Applies `pairs` to `mapping`, undoing everything on a clash.
    fn push_pairs(mapping: &mut BiMapping<V>, pairs: &[(V, V)]) -> bool {
        for (i, (k, v)) in pairs.iter().enumerate() {
            if !mapping.try_insert(k.clone(), v.clone()) {
                for (k, _) in &pairs[..i] {
                    mapping.remove(k);
                }
                return false;
            }
        }
        true
    }

    /// Inserts `key` at one recorded position.
    fn perform_add(&mut self, key: &K, pos: InsertPosition<K, G, V, T>) {
        // An exhausted residual under a pure renaming means the entry is
        // isomorphic to the position's entry: record it as an alternate key
        // instead of materializing a node. A renaming onto concrete
        // vertices is a substitution instance and still becomes a child
        // below (with an empty residual graph on its edge).
        if self.set_ops.is_empty(&pos.residual_graph) {
            let delta = remove_identity(&pos.base_iso);
            let renaming = delta
                .iter()
                .all(|(a, b)| self.matcher.is_renameable(a) && self.matcher.is_renameable(b));
            if renaming {
                debug!("recording {key:?} as alternate of node {:?}", pos.node);
                self.alt_rows
                    .entry(pos.node.clone())
                    .or_default()
                    .entry(key.clone())
                    .or_default()
                    .insert(delta);
                self.alt_owner.insert(key.clone(), pos.node.clone());
                return;
            }
        }

        let base_ab = pos.base_iso.clone();
        let base_ba = base_ab.inverted();
        let node_a = pos.node.clone();

        // Materialize the node for this key on first contact.
        let node_b: NodeKey<K> = Some(key.clone());
        if !self.nodes.contains_key(&node_b) {
            let graph = self.key_to_graph[key].clone();
            let tags = self
                .graphs_by_tags
                .get(key)
                .cloned()
                .unwrap_or_default();
            self.nodes
                .insert(node_b.clone(), IndexNode::new(node_b.clone(), graph, tags));
            let mut own: AHashSet<BiMapping<V>> = AHashSet::new();
            own.insert(BiMapping::new());
            self.alt_rows
                .entry(node_b.clone())
                .or_default()
                .insert(key.clone(), own);
            self.alt_owner.insert(key.clone(), node_b.clone());
        }

        // Children of the position node whose residual tags cover the new
        // entry's may now be reachable through it instead. Snapshots, since
        // attaching the new edge below may replace one of them.
        let cand_edges: Vec<(EdgeId, Edge<K, G, V, T>)> = self
            .node(&node_a)
            .edges_with_superset_tags(&pos.residual_tags, false)
            .into_iter()
            .map(|id| (id, self.node(&node_a).edge(id).clone()))
            .collect();

        self.attach_edge(Edge::new(
            node_a.clone(),
            key.clone(),
            pos.delta_iso.clone(),
            pos.residual_graph.clone(),
            pos.residual_tags.clone(),
            Some(base_ab.clone()),
        ));

        self.reroute_direct_children(key, &pos, &base_ba, &cand_edges);
        self.link_super_graphs(key, &pos, &base_ab, &base_ba);
    }

    /// First rewiring pass: for every candidate child `C` of the position
    /// node `A`, try to embed the new entry `B`'s residual into the edge's
    /// residual; on success route `C` through `B` and drop `A → C`.
    fn reroute_direct_children(
        &mut self,
        key: &K,
        pos: &InsertPosition<K, G, V, T>,
        base_ba: &BiMapping<V>,
        cand_edges: &[(EdgeId, Edge<K, G, V, T>)],
    ) {
        for (edge_id, edge) in cand_edges {
            if edge.to == *key {
                continue;
            }
            let to_c = edge.to.clone();
            let insert_graph = edge.residual_graph.clone();
            let insert_tags = edge.residual_tags.clone();

            let Some(base_bc) = map_range_via(base_ba, &edge.trans_iso) else {
                debug!("skipping rewire toward {to_c:?}: mapping collision");
                continue;
            };
            if !self.concrete_fixed(&base_bc) {
                debug!("skipping rewire toward {to_c:?}: a concrete vertex would be renamed");
                continue;
            }

            let isos = self
                .matcher
                .enumerate(&base_bc, &pos.residual_graph, &insert_graph);

            let mut subsumed = false;
            for iso in isos {
                if !is_compatible(&iso, &base_bc) || !self.concrete_fixed(&iso) {
                    continue;
                }
                let delta_bc = remove_identity(&iso);
                subsumed = true;

                let mapped = self.set_ops.apply_iso(&pos.residual_graph, &delta_bc);
                let residual_graph = self.set_ops.difference(&insert_graph, &mapped);
                let residual_tags: BTreeSet<T> = insert_tags
                    .difference(&pos.residual_tags)
                    .cloned()
                    .collect();
                if self.set_ops.is_empty(&residual_graph) {
                    debug!("rewired edge {key:?} → {to_c:?} carries an empty residual");
                }
                self.attach_edge(Edge::new(
                    Some(key.clone()),
                    to_c.clone(),
                    delta_bc,
                    residual_graph,
                    residual_tags,
                    None,
                ));
            }

            if subsumed {
                debug!("rerouting {:?} → {to_c:?} through {key:?}", pos.node);
                self.detach_edge(&pos.node, *edge_id);
            }
        }
    }

    /// Second rewiring pass: walk the global tag index for stored graphs
    /// that provably contain the new entry's graph and add any edges for
    /// isomorphisms not already covered.
    fn link_super_graphs(
        &mut self,
        key: &K,
        pos: &InsertPosition<K, G, V, T>,
        base_ab: &BiMapping<V>,
        base_ba: &BiMapping<V>,
    ) {
        let graph_b = self.key_to_graph[key].clone();
        let tags_b = self
            .graphs_by_tags
            .get(key)
            .cloned()
            .unwrap_or_default();
        let node_graph = self.node(&pos.node).graph().clone();

        for cand in self.graphs_by_tags.all_supersets_of(&tags_b, false) {
            if cand == *key {
                continue;
            }
            // Alternate keys share their node with a preferred key that is
            // itself a candidate (tag sets are iso-invariant), so only
            // preferred keys are processed.
            if self.alt_owner.get(&cand) != Some(&Some(cand.clone())) {
                continue;
            }
            let target = cand.clone();
            if !self.nodes.contains_key(&Some(target.clone())) {
                continue;
            }

            let graph_c = self.key_to_graph[&cand].clone();
            let mapped_b = self.set_ops.apply_iso(&graph_b, base_ab);
            if !self
                .set_ops
                .is_empty(&self.set_ops.difference(&mapped_b, &graph_c))
            {
                continue;
            }
            let insert_graph = self.set_ops.difference(&graph_c, &mapped_b);

            // Embeddings of the position node's graph into the remainder;
            // anything beyond these is a genuinely new route.
            let known: AHashSet<BiMapping<V>> = self
                .matcher
                .enumerate(&BiMapping::new(), &node_graph, &insert_graph)
                .iter()
                .map(remove_identity)
                .collect();

            let tags_c = self
                .graphs_by_tags
                .get(&cand)
                .cloned()
                .unwrap_or_default();
            let residual_tags: BTreeSet<T> = tags_c.difference(&tags_b).cloned().collect();

            for known_ac in &known {
                let Some(base_bc) = map_range_via(base_ba, known_ac) else {
                    debug!("skipping super-graph candidate {cand:?}: mapping collision");
                    continue;
                };
                if !self.concrete_fixed(&base_bc) {
                    debug!("skipping super-graph candidate {cand:?}: a concrete vertex would be renamed");
                    continue;
                }
                for iso in self
                    .matcher
                    .enumerate(&base_bc, &pos.residual_graph, &insert_graph)
                {
                    if !is_compatible(&iso, &base_bc) || !self.concrete_fixed(&iso) {
                        continue;
                    }
                    let delta_bc = remove_identity(&iso);
                    let Some(delta_ac) = map_range_via(base_ab, &delta_bc) else {
                        continue;
                    };
                    if known.contains(&remove_identity(&delta_ac)) {
                        continue;
                    }

                    let mapped = self.set_ops.apply_iso(&pos.residual_graph, &delta_bc);
                    let residual_graph = self.set_ops.difference(&insert_graph, &mapped);
                    if self.set_ops.is_empty(&residual_graph) {
                        debug!("super-graph edge {key:?} → {target:?} carries an empty residual");
                    }
                    self.attach_edge(Edge::new(
                        Some(key.clone()),
                        target.clone(),
                        delta_bc,
                        residual_graph,
                        residual_tags.clone(),
                        None,
                    ));
                }
            }
        }
    }

    fn attach_edge(&mut self, edge: Edge<K, G, V, T>) {
        let from = edge.from.clone();
        let to = edge.to.clone();
        self.node_mut(&from).insert_edge(edge);
        self.node_mut(&Some(to)).add_parent(from);
    }

    fn detach_edge(&mut self, from: &NodeKey<K>, edge_id: EdgeId) {
        let edge = self.node_mut(from).remove_edge(edge_id);
        if !self.node(from).has_edges_to(&edge.to) {
            self.node_mut(&Some(edge.to)).remove_parent(from);
        }
    }

    fn extinguish_node(&mut self, node_key: &NodeKey<K>) {
        // The root is never extinguished.
        let Some(key) = node_key.clone() else {
            return;
        };
        let Some(node) = self.nodes.get(node_key) else {
            return;
        };
        let has_alts = self
            .alt_rows
            .get(node_key)
            .is_some_and(|row| !row.is_empty());
        if !node.is_leaf() || has_alts {
            return;
        }

        let parents: Vec<NodeKey<K>> = node.parents().cloned().collect();
        for parent in &parents {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.remove_edges_to(&key);
            }
        }
        self.nodes.remove(node_key);
        trace!("extinguished node {key:?}");

        for parent in &parents {
            self.extinguish_node(parent);
        }
    }

    /// Renders the DAG as an indented text dump (diagnostic only).
    pub fn tree_string(&self) -> String {
        let mut out = String::new();
        self.tree_string_rec(&None, &BiMapping::new(), &BTreeSet::new(), 0, &mut out);
        out
    }

    fn tree_string_rec(
        &self,
        node_key: &NodeKey<K>,
        trans_iso: &BiMapping<V>,
        residual_tags: &BTreeSet<T>,
        depth: usize,
        out: &mut String,
    ) {
        use std::fmt::Write;

        let node = self.node(node_key);
        let alts: Vec<&K> = self
            .alt_rows
            .get(node_key)
            .map(|row| row.keys().collect())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:indent$}{node_key:?} alts={alts:?} via {trans_iso:?} residual tags {residual_tags:?}",
            "",
            indent = depth * 2,
        );
        let edges = node
            .out_edges()
            .sorted_by_key(|edge| format!("{:?}", edge.to));
        for edge in edges {
            self.tree_string_rec(
                &Some(edge.to.clone()),
                &edge.trans_iso,
                &edge.residual_tags,
                depth + 1,
                out,
            );
        }
    }

    /// Verifies the structural invariants of the DAG and its side tables,
    /// panicking on any breach. Intended for tests and debugging.
    pub fn check_invariants(&self) {
        assert!(self.nodes.contains_key(&None), "root node missing");

        for (node_key, node) in &self.nodes {
            assert_eq!(node.key(), node_key);
            node.assert_views_agree();

            for edge in node.out_edges() {
                assert_eq!(&edge.from, node_key, "edge stored at a foreign node");
                assert_ne!(
                    edge.from.as_ref(),
                    Some(&edge.to),
                    "self-edge in the subsumption DAG"
                );
                assert!(
                    self.concrete_fixed(&edge.trans_iso),
                    "edge trans iso renames a concrete vertex"
                );
                let target = self
                    .nodes
                    .get(&Some(edge.to.clone()))
                    .expect("edge target has no node");
                assert!(
                    target.parents().any(|p| p == node_key),
                    "edge target does not list the source as parent"
                );
            }
            for parent in node.parents() {
                let node_k = node_key.clone().expect("root node has a parent");
                let parent_node = self.nodes.get(parent).expect("dangling parent key");
                assert!(
                    parent_node.has_edges_to(&node_k),
                    "parent without a corresponding edge"
                );
            }
        }

        // Alt-key tables and node set agree.
        for (key, owner) in &self.alt_owner {
            assert!(
                self.alt_rows
                    .get(owner)
                    .is_some_and(|row| row.contains_key(key)),
                "owner row is missing key {key:?}"
            );
            assert!(
                self.key_to_graph.contains_key(key),
                "owned key without a stored graph"
            );
        }
        for (node_key, row) in &self.alt_rows {
            assert!(
                self.nodes.contains_key(node_key),
                "alt row for a missing node"
            );
            for key in row.keys() {
                assert_eq!(self.alt_owner.get(key), Some(node_key));
            }
        }
        assert_eq!(self.key_to_graph.len(), self.alt_owner.len());
        assert_eq!(self.key_to_graph.len(), self.graphs_by_tags.len());

        self.assert_acyclic();
    }

    fn assert_acyclic(&self) {
        fn visit<K, G, V, T>(
            nodes: &AHashMap<Option<K>, IndexNode<K, G, V, T>>,
            key: &Option<K>,
            in_stack: &mut AHashSet<Option<K>>,
            done: &mut AHashSet<Option<K>>,
        ) where
            K: Clone + Eq + Hash + fmt::Debug,
            V: Clone + Ord + Hash,
            T: Clone + Ord,
        {
            if done.contains(key) {
                return;
            }
            assert!(
                in_stack.insert(key.clone()),
                "cycle through node {key:?} in the subsumption DAG"
            );
            let node = nodes.get(key).expect("dangling node key");
            for edge in node.out_edges() {
                visit(nodes, &Some(edge.to.clone()), in_stack, done);
            }
            in_stack.remove(key);
            done.insert(key.clone());
        }

        let mut in_stack = AHashSet::new();
        let mut done = AHashSet::new();
        visit(&self.nodes, &None, &mut in_stack, &mut done);
        assert_eq!(
            done.len(),
            self.nodes.len(),
            "index nodes unreachable from the root"
        );
    }
}

impl<K, G, V, T, S, M, E> SubgraphIndex<K, G, V> for SubsumptionIndex<K, G, V, T, S, M, E>
where
    K: Clone + Eq + Hash + fmt::Debug,
    G: Clone,
    V: Clone + Ord + Hash + fmt::Debug,
    T: Clone + Ord + fmt::Debug,
    S: SetOps<G, V>,
    M: IsoMatcher<G, V>,
    E: Fn(&G) -> BTreeSet<T>,
{
    fn put(&mut self, key: K, graph: G) -> Result<K, IndexError> {
        SubsumptionIndex::put(self, key, graph)
    }

    fn get(&self, key: &K) -> Option<&G> {
        SubsumptionIndex::get(self, key)
    }

    fn remove(&mut self, key: &K) {
        SubsumptionIndex::remove(self, key)
    }

    fn lookup(&self, query: &G, exact: bool, base_iso: Option<&BiMapping<V>>) -> IsoMultimap<K, V> {
        SubsumptionIndex::lookup(self, query, exact, base_iso)
    }

    fn print_tree(&self) {
        println!("{}", self.tree_string());
    }
}
