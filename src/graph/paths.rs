// src/graph/paths.rs
//! Shortest paths by breadth-first search.
//!
//! Iterative with a visited set, so cycles and deep chains are safe.
//! Successors are visited in sorted order, which fixes which of several
//! equally short paths is returned.

use super::model::{Edge, OntologyGraph};
use std::collections::{HashMap, VecDeque};

/// BFS tree rooted at one source.
pub struct ShortestPathTree {
    source: String,
    parents: HashMap<String, Option<String>>,
}

impl ShortestPathTree {
    #[must_use]
    pub fn new(graph: &OntologyGraph, source: &str) -> Self {
        Self::with_filter(graph, source, |_| true)
    }

    /// Builds the tree using only edges for which `keep` holds.
    #[must_use]
    pub fn with_filter<F: Fn(&Edge) -> bool>(graph: &OntologyGraph, source: &str, keep: F) -> Self {
        let mut parents: HashMap<String, Option<String>> = HashMap::new();
        if !graph.contains(source) {
            return Self {
                source: source.to_string(),
                parents,
            };
        }

        parents.insert(source.to_string(), None);
        let mut queue = VecDeque::from([source.to_string()]);

        while let Some(node) = queue.pop_front() {
            let mut next: Vec<&str> = graph
                .out_edges(&node)
                .filter(|&e| keep(e))
                .map(|e| e.to.as_str())
                .collect();
            next.sort_unstable();
            next.dedup();

            for succ in next {
                if parents.contains_key(succ) {
                    continue;
                }
                parents.insert(succ.to_string(), Some(node.clone()));
                queue.push_back(succ.to_string());
            }
        }

        Self {
            source: source.to_string(),
            parents,
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn reaches(&self, target: &str) -> bool {
        self.parents.contains_key(target)
    }

    /// Nodes from the source to `target`, both ends included.
    #[must_use]
    pub fn path_to(&self, target: &str) -> Option<Vec<String>> {
        if !self.reaches(target) {
            return None;
        }
        let mut path = vec![target.to_string()];
        let mut cursor = target;
        while let Some(Some(parent)) = self.parents.get(cursor) {
            path.push(parent.clone());
            cursor = parent.as_str();
        }
        path.reverse();
        Some(path)
    }
}

impl OntologyGraph {
    #[must_use]
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        ShortestPathTree::new(self, from).path_to(to)
    }

    #[must_use]
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        ShortestPathTree::new(self, from).reaches(to)
    }

    /// Path check that only follows edges carrying one of `labels`.
    #[must_use]
    pub fn has_path_within<L: AsRef<str>>(&self, from: &str, to: &str, labels: &[L]) -> bool {
        ShortestPathTree::with_filter(self, from, |e| e.has_label(labels)).reaches(to)
    }
}
