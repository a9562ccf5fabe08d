// src/expand/hierarchy.rs
//! Hypernym-path helpers for comparing two term sets.

use crate::graph::{OntologyGraph, HYPER_PROPS};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Hyper-only view of a graph with memoised reachability.
pub struct Hierarchy {
    graph: OntologyGraph,
    reach: HashMap<(String, String), bool>,
}

impl Hierarchy {
    #[must_use]
    pub fn new(graph: &OntologyGraph) -> Self {
        Self {
            graph: graph.project(HYPER_PROPS),
            reach: HashMap::new(),
        }
    }

    /// True if `to` is a (transitive) hypernym of `from`.
    pub fn reaches(&mut self, from: &str, to: &str) -> bool {
        if !self.graph.contains(from) || !self.graph.contains(to) {
            return false;
        }
        let key = (from.to_string(), to.to_string());
        if let Some(&known) = self.reach.get(&key) {
            return known;
        }
        let found = self.graph.has_path(from, to);
        self.reach.insert(key, found);
        found
    }

    /// Appends every term of `to` (not already in `from`) that some `from`
    /// term reaches through hypernym links.
    pub fn bridge<S: AsRef<str>>(&mut self, from: &[S], to: &[S]) -> Vec<String> {
        let mut result: Vec<String> = from.iter().map(|s| s.as_ref().to_string()).collect();
        let sources: BTreeSet<&str> = from.iter().map(|s| s.as_ref()).collect();
        let mut targets: BTreeSet<&str> = to.iter().map(|s| s.as_ref()).collect();
        targets.retain(|t| !sources.contains(t));

        for source in &sources {
            for target in &targets {
                if self.reaches(source, target) {
                    result.push((*target).to_string());
                }
            }
        }
        result
    }

    /// Replaces each hypernym in `terms` by a hyponym that is also present.
    ///
    /// Terms in `protected` are never replaced. Returns the new set and
    /// whether anything changed.
    pub fn reduce<S: AsRef<str>>(&mut self, terms: &[S], protected: &[S]) -> (Vec<String>, bool) {
        let protected: HashSet<&str> = protected.iter().map(|s| s.as_ref()).collect();
        let original: Vec<&str> = terms.iter().map(|s| s.as_ref()).collect();
        let mut reduced: Vec<String> = original.iter().map(|s| (*s).to_string()).collect();
        let mut changed = false;

        for &hyper in &original {
            if protected.contains(hyper) {
                continue;
            }
            for &hypo in &original {
                if hyper == hypo || !self.reaches(hypo, hyper) {
                    continue;
                }
                let Some(pos) = reduced.iter().position(|t| t == hyper) else {
                    continue;
                };
                reduced.remove(pos);
                if !reduced.iter().any(|t| t == hypo) {
                    reduced.push(hypo.to_string());
                }
                changed = true;
            }
        }
        (reduced, changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn taxonomy() -> OntologyGraph {
        OntologyGraph::from_edges([
            Edge::new("sale", "contract", "hyper"),
            Edge::new("contract", "act", "hyperx"),
            Edge::new("sale", "buyer", "sbj"),
        ])
    }

    #[test]
    fn test_bridge_follows_hypernyms_only() {
        let mut h = Hierarchy::new(&taxonomy());
        let out = h.bridge(&["sale"], &["act", "buyer", "sale"]);
        assert_eq!(out, ["sale", "act"]);
    }

    #[test]
    fn test_reduce_prefers_hyponym() {
        let mut h = Hierarchy::new(&taxonomy());
        let (terms, changed) = h.reduce(&["contract", "sale", "buyer"], &[]);
        assert!(changed);
        assert_eq!(terms, ["sale", "buyer"]);
    }

    #[test]
    fn test_reduce_respects_protection() {
        let mut h = Hierarchy::new(&taxonomy());
        let (terms, changed) = h.reduce(&["contract", "sale"], &["contract"]);
        assert!(!changed);
        assert_eq!(terms, ["contract", "sale"]);
    }
}
