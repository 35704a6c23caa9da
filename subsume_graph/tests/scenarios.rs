//! End-to-end behavior of the hierarchical index on small catalogs of
//! person-shaped graphs.

mod common;

use common::{assert_deltas, canonical, graph, mapping};
use subsume_core::{BiMapping, IndexError, ObjectIndex};
use subsume_graph::{triple_index, Triple, TripleGraph, TripleIndex};

const G1: &str = "?w type Person";
const G2: &str = "?x type Person . ?x name ?l";
const G3: &str = "?y type Person . ?y age ?a";
const G4: &str = "?z type Person . ?z age ?a . ?z name ?n";

fn person_index() -> TripleIndex<&'static str> {
    let mut index = triple_index();
    index.put("g1", graph(G1)).unwrap();
    index.put("g2", graph(G2)).unwrap();
    index.put("g3", graph(G3)).unwrap();
    index.put("g4", graph(G4)).unwrap();
    index.check_invariants();
    index
}

#[test]
fn type_and_name_query_matches_the_two_name_free_graphs() {
    let mut index = triple_index();
    index.put("g1", graph(G1)).unwrap();
    index.put("g2", graph(G2)).unwrap();
    index.check_invariants();

    let result = index.lookup(&graph("?foo type Person . ?foo name ?bar"), false, None);
    assert_eq!(result.num_keys(), 2);
    assert_deltas(&result, "g1", &[&[("?w", "?foo")]]);
    assert_deltas(&result, "g2", &[&[("?x", "?foo"), ("?l", "?bar")]]);
}

#[test]
fn graphs_carrying_age_do_not_match_an_age_free_query() {
    let index = person_index();

    let result = index.lookup(&graph("?foo type Person . ?foo name ?bar"), false, None);
    assert_eq!(result.num_keys(), 2);
    assert!(result.contains_key(&"g1"));
    assert!(result.contains_key(&"g2"));
    assert!(!result.contains_key(&"g3"));
    assert!(!result.contains_key(&"g4"));
}

#[test]
fn concrete_query_terms_bind_stored_variables() {
    let index = person_index();

    let query = graph("?p type Person . ?p age 30 . ?p name \"Ada\"");
    let result = index.lookup(&query, false, None);
    assert_eq!(result.num_keys(), 4);
    assert_deltas(&result, "g1", &[&[("?w", "?p")]]);
    assert_deltas(&result, "g2", &[&[("?x", "?p"), ("?l", "\"Ada\"")]]);
    assert_deltas(&result, "g3", &[&[("?y", "?p"), ("?a", "30")]]);
    assert_deltas(
        &result,
        "g4",
        &[&[("?z", "?p"), ("?a", "30"), ("?n", "\"Ada\"")]],
    );
}

#[test]
fn later_entries_are_rewired_under_the_universal_pattern() {
    let mut index = triple_index();
    index.put("gA", graph("?s ?p ?o")).unwrap();
    index.put("gB", graph("?x type Person")).unwrap();
    index.check_invariants();

    let result = index.lookup(&graph("a type Person"), false, None);
    assert_eq!(result.num_keys(), 2);
    assert_deltas(
        &result,
        "gA",
        &[&[("?s", "a"), ("?p", "type"), ("?o", "Person")]],
    );
    assert_deltas(&result, "gB", &[&[("?x", "a")]]);
}

#[test]
fn isomorphic_entries_share_one_node() {
    let mut index = triple_index();
    index.put("k1", graph("?a type Person")).unwrap();
    index.put("k2", graph("?b type Person")).unwrap();
    index.check_invariants();

    // one node under the root, no second child
    assert_eq!(index.tree_string().lines().count(), 2);

    let result = index.lookup(&graph("?a type Person"), false, None);
    assert_eq!(result.num_keys(), 2);
    assert_deltas(&result, "k1", &[&[]]);
    assert_deltas(&result, "k2", &[&[("?b", "?a")]]);

    let result = index.lookup(&graph("?b type Person"), false, None);
    assert_deltas(&result, "k1", &[&[("?a", "?b")]]);
    assert_deltas(&result, "k2", &[&[]]);

    // both keys count as exact matches of either rendering
    let exact = index.lookup(&graph("?b type Person"), true, None);
    assert_eq!(exact.num_keys(), 2);
}

#[test]
fn removing_every_key_leaves_only_the_root() {
    let mut index = person_index();
    for key in ["g1", "g2", "g3", "g4"] {
        index.remove(&key);
        index.check_invariants();
    }

    assert!(index.is_empty());
    assert_eq!(index.tree_string().lines().count(), 1);
    let query = graph("?p type Person . ?p age 30 . ?p name \"Ada\"");
    assert!(index.lookup(&query, false, None).is_empty());

    // the index stays usable
    index.put("g1", graph(G1)).unwrap();
    index.check_invariants();
    assert_eq!(
        index.lookup(&graph(G1), false, None).num_keys(),
        1
    );
}

#[test]
fn every_stored_graph_finds_itself_with_an_empty_delta() {
    let index = person_index();
    for (key, text) in [("g1", G1), ("g2", G2), ("g3", G3), ("g4", G4)] {
        let result = index.lookup(&graph(text), false, None);
        let isos = result.get(&key).expect("entry should find itself");
        assert!(
            isos.contains(&BiMapping::new()),
            "{key} lacks the identity embedding"
        );
    }
}

#[test]
fn reinsertion_of_an_unchanged_entry_is_invisible() {
    let mut index = person_index();
    let before_tree = index.tree_string();
    let query = graph("?p type Person . ?p age 30 . ?p name \"Ada\"");
    let before_lookup = canonical(&index.lookup(&query, false, None));

    index.put("g2", graph(G2)).unwrap();
    index.check_invariants();

    assert_eq!(index.tree_string(), before_tree);
    assert_eq!(canonical(&index.lookup(&query, false, None)), before_lookup);
}

#[test]
fn rebinding_a_key_to_a_different_graph_is_refused() {
    let mut index = person_index();
    assert_eq!(index.put("g1", graph(G3)), Err(IndexError::KeyInUse));

    index.remove(&"g1");
    index.put("g1", graph(G3)).unwrap();
    index.check_invariants();
}

#[test]
fn exact_lookup_returns_only_isomorphic_entries() {
    let index = person_index();
    let result = index.lookup(&graph(G2), true, None);
    assert_eq!(result.num_keys(), 1);
    assert_deltas(&result, "g2", &[&[]]);
}

#[test]
fn lookup_with_a_base_constraint_filters_embeddings() {
    let mut index = triple_index();
    index.put("pair", graph("?u knows ?v")).unwrap();

    let query = graph("?a knows ?b . ?b knows ?c");
    let unconstrained = index.lookup(&query, false, None);
    assert_eq!(unconstrained.get(&"pair").unwrap().len(), 2);

    let base = mapping(&[("?u", "?b")]);
    let constrained = index.lookup(&query, false, Some(&base));
    assert_deltas(&constrained, "pair", &[&[("?u", "?b"), ("?v", "?c")]]);
}

#[test]
fn the_empty_graph_is_an_entry_of_everything() {
    let mut index = triple_index();
    index.put("empty", graph("")).unwrap();
    index.put("g1", graph(G1)).unwrap();
    index.check_invariants();

    let result = index.lookup(&graph("?q age 30"), false, None);
    assert_deltas(&result, "empty", &[&[]]);
    assert!(!result.contains_key(&"g1"));

    assert_eq!(index.get(&"empty"), Some(&graph("")));

    index.remove(&"empty");
    index.remove(&"g1");
    index.check_invariants();
    assert!(index.is_empty());
}

#[test]
fn get_resolves_through_the_preferred_key() {
    let mut index = triple_index();
    index.put("k1", graph("?a type Person")).unwrap();
    index.put("k2", graph("?b type Person")).unwrap();

    assert_eq!(index.get(&"k1"), Some(&graph("?a type Person")));
    // alternates resolve to the preferred key's rendering
    assert_eq!(index.get(&"k2"), Some(&graph("?a type Person")));
    assert_eq!(index.get(&"missing"), None);

    index.remove(&"k1");
    index.check_invariants();
    assert_eq!(index.get(&"k1"), None);

    // the surviving alternate is still found
    let result = index.lookup(&graph("?b type Person"), false, None);
    assert_eq!(result.num_keys(), 1);
    assert_deltas(&result, "k2", &[&[]]);
}

#[test]
fn object_wrapper_delegates_through_a_conversion() {
    let to_graph = |lines: &Vec<&str>| -> TripleGraph {
        lines
            .iter()
            .map(|line| line.parse::<Triple>().unwrap())
            .collect()
    };
    let mut wrapped = ObjectIndex::new(triple_index::<&str>(), to_graph);

    wrapped.put("q1", &vec!["?x type Person"]).unwrap();
    wrapped
        .put("q2", &vec!["?y type Person", "?y age ?a"])
        .unwrap();

    let result = wrapped.lookup(&vec!["?p type Person", "?p age 30"], false, None);
    assert_eq!(result.num_keys(), 2);
    assert_deltas(&result, "q1", &[&[("?x", "?p")]]);
    assert_deltas(&result, "q2", &[&[("?y", "?p"), ("?a", "30")]]);

    assert_eq!(wrapped.get(&"q1"), Some(&graph("?x type Person")));
    wrapped.remove(&"q1");
    assert_eq!(wrapped.get(&"q1"), None);
}

#[test]
fn instance_chains_stay_reachable_through_deep_queries() {
    let mut index = triple_index();
    index.put("any", graph("?s ?p ?o")).unwrap();
    index.put("person", graph("?x type Person")).unwrap();
    index
        .put("named", graph("?x type Person . ?x name ?l"))
        .unwrap();
    index.check_invariants();

    let query = graph("ada type Person . ada name \"Ada\" . grace type Person");
    let result = index.lookup(&query, false, None);

    assert_eq!(result.num_keys(), 3);
    assert_eq!(result.get(&"any").unwrap().len(), 3);
    assert_deltas(&result, "person", &[&[("?x", "ada")], &[("?x", "grace")]]);
    assert_deltas(
        &result,
        "named",
        &[&[("?x", "ada"), ("?l", "\"Ada\"")]],
    );
}
