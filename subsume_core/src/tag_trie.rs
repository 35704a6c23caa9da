//! Set-trie keyed by totally ordered tag sets.
//!
//! Associates keys with small sets of tags and answers subset and superset
//! queries over those sets. Tag sets are stored as paths of strictly
//! increasing tags, so a subset query only descends into children whose tag
//! occurs in the probe set, and a superset query skips over tags the probe
//! does not require.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

#[derive(Clone, Debug)]
struct TrieNode<K, T> {
    children: BTreeMap<T, TrieNode<K, T>>,
    /// Keys whose tag set ends exactly at this node.
    keys: AHashSet<K>,
}

impl<K, T> TrieNode<K, T> {
    fn new() -> Self {
        TrieNode {
            children: BTreeMap::new(),
            keys: AHashSet::new(),
        }
    }
}

/// Map from keys to tag sets with subset/superset retrieval.
#[derive(Clone, Debug)]
pub struct TagTrie<K, T> {
    root: TrieNode<K, T>,
    key_tags: AHashMap<K, BTreeSet<T>>,
}

impl<K, T> Default for TagTrie<K, T> {
    fn default() -> Self {
        TagTrie {
            root: TrieNode::new(),
            key_tags: AHashMap::new(),
        }
    }
}

impl<K, T> TagTrie<K, T>
where
    K: Clone + Eq + Hash,
    T: Clone + Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.key_tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_tags.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&BTreeSet<T>> {
        self.key_tags.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.key_tags.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.key_tags.keys()
    }

    /// Associates `key` with `tags`, replacing any previous association.
    pub fn insert(&mut self, key: K, tags: BTreeSet<T>) {
        if self.key_tags.contains_key(&key) {
            self.remove(&key);
        }
        let mut node = &mut self.root;
        for tag in &tags {
            node = node.children.entry(tag.clone()).or_insert_with(TrieNode::new);
        }
        node.keys.insert(key.clone());
        self.key_tags.insert(key, tags);
    }

    /// Removes `key`, pruning trie paths that no longer carry anything.
    pub fn remove(&mut self, key: &K) -> Option<BTreeSet<T>> {
        let tags = self.key_tags.remove(key)?;
        let path: Vec<T> = tags.iter().cloned().collect();
        Self::remove_rec(&mut self.root, &path, key);
        Some(tags)
    }

    // Returns true when the node is empty and can be pruned by its parent.
    fn remove_rec(node: &mut TrieNode<K, T>, path: &[T], key: &K) -> bool {
        match path.split_first() {
            None => {
                node.keys.remove(key);
            }
            Some((tag, rest)) => {
                if let Some(child) = node.children.get_mut(tag) {
                    if Self::remove_rec(child, rest, key) {
                        node.children.remove(tag);
                    }
                }
            }
        }
        node.keys.is_empty() && node.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.key_tags.clear();
    }

    /// All keys whose tag set is a subset of `set` (strict: a proper subset).
    pub fn all_subsets_of(&self, set: &BTreeSet<T>, strict: bool) -> Vec<K> {
        let mut out = Vec::new();
        Self::collect_subsets(&self.root, set, &mut out);
        if strict {
            out.retain(|k| self.key_tags[k].len() != set.len());
        }
        out
    }

    fn collect_subsets(node: &TrieNode<K, T>, set: &BTreeSet<T>, out: &mut Vec<K>) {
        out.extend(node.keys.iter().cloned());
        for (tag, child) in &node.children {
            if set.contains(tag) {
                Self::collect_subsets(child, set, out);
            }
        }
    }

    /// All keys whose tag set is a superset of `set` (strict: a proper
    /// superset).
    pub fn all_supersets_of(&self, set: &BTreeSet<T>, strict: bool) -> Vec<K> {
        let needed: Vec<&T> = set.iter().collect();
        let mut out = Vec::new();
        Self::collect_supersets(&self.root, &needed, &mut out);
        if strict {
            out.retain(|k| self.key_tags[k].len() != set.len());
        }
        out
    }

    fn collect_supersets(node: &TrieNode<K, T>, needed: &[&T], out: &mut Vec<K>) {
        let Some(&next) = needed.first() else {
            Self::collect_all(node, out);
            return;
        };
        for (tag, child) in &node.children {
            match tag.cmp(next) {
                std::cmp::Ordering::Less => Self::collect_supersets(child, needed, out),
                std::cmp::Ordering::Equal => Self::collect_supersets(child, &needed[1..], out),
                // Tags along a path only grow; `next` cannot occur below here.
                std::cmp::Ordering::Greater => break,
            }
        }
    }

    fn collect_all(node: &TrieNode<K, T>, out: &mut Vec<K>) {
        out.extend(node.keys.iter().cloned());
        for child in node.children.values() {
            Self::collect_all(child, out);
        }
    }
}
