//! Hierarchical sub-graph isomorphism index.
//!
//! Stores `(key, graph)` entries and answers, for a query graph `Q`, which
//! stored graphs are sub-graph-isomorphic to `Q` together with the
//! vertex-to-vertex mappings witnessing each embedding. Entries are arranged
//! in a rooted subsumption DAG: an edge from entry `A` to entry `B` records
//! that `A`'s graph embeds into `B`'s under some mapping, leaving a residual
//! graph and a residual tag set. Lookups and insertions walk this DAG,
//! pruning with subset queries over iso-invariant tags.
//!
//! The crate is generic over the graph representation ([`SetOps`]), the
//! pairwise isomorphism matcher ([`IsoMatcher`]), and the tag type; a
//! concrete triple-graph binding lives in the `subsume_graph` crate.

mod api;
mod edge;
mod error;
mod flat;
mod index;
mod mapping;
mod matcher;
mod multimap;
mod node;
mod set_ops;
mod tag_trie;
mod wrapper;

pub use crate::api::SubgraphIndex;
pub use crate::edge::{Edge, EdgeId};
pub use crate::error::IndexError;
pub use crate::flat::FlatIndex;
pub use crate::index::SubsumptionIndex;
pub use crate::mapping::{
    is_compatible, map_domain_via, map_range_via, remove_identity, BiMapping,
};
pub use crate::matcher::IsoMatcher;
pub use crate::multimap::IsoMultimap;
pub use crate::node::IndexNode;
pub use crate::set_ops::SetOps;
pub use crate::tag_trie::TagTrie;
pub use crate::wrapper::ObjectIndex;
