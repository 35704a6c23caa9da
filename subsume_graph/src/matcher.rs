//! Backtracking sub-graph isomorphism matching over triple graphs.
//!
//! Embeds a needle graph into a haystack graph by assigning needle triples
//! one at a time, always picking the triple with the most already-bound
//! terms next, and pruning candidates through a predicate-keyed index of the
//! haystack.

use ahash::AHashMap;
use tracing::trace;

use subsume_core::{BiMapping, IsoMatcher};

use crate::graph::TripleGraph;
use crate::term::Term;
use crate::triple::Triple;

/// [`IsoMatcher`] implementation for [`TripleGraph`]s.
///
/// Returned mappings extend the base mapping with a binding for every term
/// of the needle: concrete terms to themselves, variables and blanks to
/// arbitrary haystack terms, injectively across the whole mapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct TripleMatcher;

impl IsoMatcher<TripleGraph, Term> for TripleMatcher {
    fn enumerate(
        &self,
        base: &BiMapping<Term>,
        needle: &TripleGraph,
        haystack: &TripleGraph,
    ) -> Vec<BiMapping<Term>> {
        if needle.is_empty() {
            // The empty graph embeds exactly once, adding no bindings.
            return vec![base.clone()];
        }

        let mut working = base.clone();
        for term in needle.terms() {
            if term.is_concrete() && !working.try_insert(term.clone(), term.clone()) {
                // Some renameable vertex already occupies this label.
                return vec![];
            }
        }

        let index = HaystackIndex::build(haystack);
        let core = MatcherCore { index: &index };

        let remaining: Vec<&Triple> = needle.iter().collect();
        let mut results = Vec::new();
        core.recurse(remaining, working, &mut results);
        trace!(
            "matched needle of {} triples into haystack of {} triples: {} embeddings",
            needle.len(),
            haystack.len(),
            results.len()
        );
        results
    }

    fn is_renameable(&self, term: &Term) -> bool {
        term.is_renameable()
    }
}

/// Haystack triples bucketed by their predicate term.
struct HaystackIndex<'h> {
    by_predicate: AHashMap<&'h Term, Vec<&'h Triple>>,
    all: Vec<&'h Triple>,
}

impl<'h> HaystackIndex<'h> {
    fn build(haystack: &'h TripleGraph) -> Self {
        let mut by_predicate: AHashMap<&'h Term, Vec<&'h Triple>> = AHashMap::new();
        let mut all = Vec::with_capacity(haystack.len());
        for triple in haystack.iter() {
            by_predicate.entry(&triple.p).or_default().push(triple);
            all.push(triple);
        }
        HaystackIndex { by_predicate, all }
    }

    fn with_predicate(&self, predicate: &Term) -> &[&'h Triple] {
        self.by_predicate
            .get(predicate)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn everything(&self) -> &[&'h Triple] {
        &self.all
    }
}

struct MatcherCore<'m> {
    index: &'m HaystackIndex<'m>,
}

impl MatcherCore<'_> {
    fn recurse(
        &self,
        mut remaining: Vec<&Triple>,
        working: BiMapping<Term>,
        results: &mut Vec<BiMapping<Term>>,
    ) {
        let Some(position) = Self::most_constrained(&remaining, &working) else {
            results.push(working);
            return;
        };
        let current = remaining.swap_remove(position);

        let candidates = match working.get(&current.p) {
            Some(image) => self.index.with_predicate(image),
            None => self.index.everything(),
        };

        for candidate in candidates {
            let mut extended = working.clone();
            if Self::unify(&current.s, &candidate.s, &mut extended)
                && Self::unify(&current.p, &candidate.p, &mut extended)
                && Self::unify(&current.o, &candidate.o, &mut extended)
            {
                self.recurse(remaining.clone(), extended, results);
            }
        }
    }

    /// Index of the remaining triple with the most bound terms, if any.
    fn most_constrained(remaining: &[&Triple], working: &BiMapping<Term>) -> Option<usize> {
        remaining
            .iter()
            .enumerate()
            .max_by_key(|(_, triple)| {
                triple
                    .terms()
                    .iter()
                    .filter(|term| working.contains_key(term))
                    .count()
            })
            .map(|(position, _)| position)
    }

    /// Binds one needle term to one haystack term, rejecting anything that
    /// would break consistency or injectivity.
    fn unify(needle_term: &Term, haystack_term: &Term, working: &mut BiMapping<Term>) -> bool {
        match working.get(needle_term) {
            Some(image) => image == haystack_term,
            None => working.try_insert(needle_term.clone(), haystack_term.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subsume_core::remove_identity;

    fn graph(text: &str) -> TripleGraph {
        text.parse().unwrap()
    }

    fn pairs(iso: &BiMapping<Term>) -> Vec<(String, String)> {
        iso.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn variable_to_variable_embedding() {
        let needle = graph("?w type Person");
        let haystack = graph("?foo type Person . ?foo name ?bar");
        let isos = TripleMatcher.enumerate(&BiMapping::new(), &needle, &haystack);
        assert_eq!(isos.len(), 1);
        assert_eq!(
            pairs(&remove_identity(&isos[0])),
            vec![("?w".to_string(), "?foo".to_string())]
        );
    }

    #[test]
    fn variables_may_bind_concrete_terms() {
        let needle = graph("?s ?p ?o");
        let haystack = graph("alice type Person");
        let isos = TripleMatcher.enumerate(&BiMapping::new(), &needle, &haystack);
        assert_eq!(isos.len(), 1);
        assert_eq!(
            pairs(&isos[0]),
            vec![
                ("?o".to_string(), "Person".to_string()),
                ("?p".to_string(), "type".to_string()),
                ("?s".to_string(), "alice".to_string()),
            ]
        );
    }

    #[test]
    fn concrete_terms_must_match_exactly() {
        let needle = graph("?x age 30");
        let haystack = graph("?p age 31");
        assert!(TripleMatcher
            .enumerate(&BiMapping::new(), &needle, &haystack)
            .is_empty());
    }

    #[test]
    fn results_extend_the_base_mapping() {
        let needle = graph("?x name ?l");
        let haystack = graph("?a name ?b . ?c name ?d");
        let unconstrained = TripleMatcher.enumerate(&BiMapping::new(), &needle, &haystack);
        assert_eq!(unconstrained.len(), 2);

        let base: BiMapping<Term> = [(Term::var("x"), Term::var("c"))].into_iter().collect();
        let constrained = TripleMatcher.enumerate(&base, &needle, &haystack);
        assert_eq!(constrained.len(), 1);
        assert_eq!(constrained[0].get(&Term::var("x")), Some(&Term::var("c")));
        assert_eq!(constrained[0].get(&Term::var("l")), Some(&Term::var("d")));
    }

    #[test]
    fn base_pairs_for_foreign_vertices_are_kept() {
        let needle = graph("?x name ?l");
        let haystack = graph("?a name ?b");
        let base: BiMapping<Term> = [(Term::var("up"), Term::var("high"))].into_iter().collect();
        let isos = TripleMatcher.enumerate(&base, &needle, &haystack);
        assert_eq!(isos.len(), 1);
        assert_eq!(isos[0].get(&Term::var("up")), Some(&Term::var("high")));
    }

    #[test]
    fn injectivity_prevents_merging_variables() {
        let needle = graph("?a knows ?b");
        let haystack = graph("?x knows ?x");
        // ?a and ?b would both need to bind ?x
        assert!(TripleMatcher
            .enumerate(&BiMapping::new(), &needle, &haystack)
            .is_empty());
    }

    #[test]
    fn shared_variables_stay_consistent() {
        let needle = graph("?x type Person . ?x name ?l");
        let haystack = graph("?p type Person . ?q name ?n");
        // ?x cannot be both ?p and ?q
        assert!(TripleMatcher
            .enumerate(&BiMapping::new(), &needle, &haystack)
            .is_empty());

        let haystack = graph("?p type Person . ?p name ?n");
        assert_eq!(
            TripleMatcher
                .enumerate(&BiMapping::new(), &needle, &haystack)
                .len(),
            1
        );
    }

    #[test]
    fn empty_needle_embeds_once() {
        let base: BiMapping<Term> = [(Term::var("x"), Term::var("y"))].into_iter().collect();
        let isos = TripleMatcher.enumerate(&base, &TripleGraph::new(), &graph("?a p ?b"));
        assert_eq!(isos, vec![base]);
    }

    #[test]
    fn multiple_embeddings_are_all_found() {
        let needle = graph("?x type Person");
        let haystack = graph("?a type Person . ?b type Person");
        let isos = TripleMatcher.enumerate(&BiMapping::new(), &needle, &haystack);
        assert_eq!(isos.len(), 2);
    }
}
