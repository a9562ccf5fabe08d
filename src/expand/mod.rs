// src/expand/mod.rs
//! Ontology-based term expansion.
//!
//! Runs the rule list over the accumulated set pass after pass until a full
//! pass admits nothing. Terms are only ever added, and a term keeps the score
//! of the rule that admitted it first.

pub mod hierarchy;
pub mod rules;

pub use hierarchy::Hierarchy;
pub use rules::Rule;

use crate::graph::{OntologyGraph, HYPER_PROPS};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Score given to the caller's seed terms.
pub const SEED_SCORE: f64 = 0.5;

/// The growing term set of one expansion run.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    terms: Vec<String>,
    members: HashSet<String>,
    scores: HashMap<String, f64>,
}

impl Expansion {
    /// Starts from `seeds`, dropping repeats.
    #[must_use]
    pub fn from_seeds<S: AsRef<str>>(seeds: &[S]) -> Self {
        let mut expansion = Self::default();
        for seed in seeds {
            let seed = seed.as_ref();
            if expansion.members.insert(seed.to_string()) {
                expansion.terms.push(seed.to_string());
                expansion.scores.insert(seed.to_string(), SEED_SCORE);
            }
        }
        expansion
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.members.contains(term)
    }

    #[must_use]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn score(&self, term: &str) -> Option<f64> {
        self.scores.get(term).copied()
    }

    /// Adds `term` on behalf of `rule`. Returns false if it was already a member.
    pub fn admit(&mut self, term: &str, rule: Rule, reasons: &[&str]) -> bool {
        if !self.members.insert(term.to_string()) {
            return false;
        }
        debug!("expanded: {} from <<{}>> by [{}]", term, rule, reasons.join(","));
        self.terms.push(term.to_string());
        self.scores.entry(term.to_string()).or_insert(rule.score());
        true
    }

    #[must_use]
    pub fn finish(self) -> ExpansionResult {
        ExpansionResult {
            terms: self.terms,
            scores: self.scores,
        }
    }
}

/// Expanded terms in admission order plus their confidence scores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpansionResult {
    pub terms: Vec<String>,
    pub scores: HashMap<String, f64>,
}

impl ExpansionResult {
    /// Terms the expansion added beyond `seeds`.
    #[must_use]
    pub fn added<S: AsRef<str>>(&self, seeds: &[S]) -> Vec<&str> {
        let seeds: HashSet<&str> = seeds.iter().map(|s| s.as_ref()).collect();
        self.terms
            .iter()
            .map(String::as_str)
            .filter(|t| !seeds.contains(t))
            .collect()
    }
}

/// Expands `seeds` with every rule in canonical order.
#[must_use]
pub fn expand<S: AsRef<str>>(seeds: &[S], graph: &OntologyGraph) -> ExpansionResult {
    expand_with(seeds, graph, &Rule::ALL)
}

/// Expands `seeds` with the given rules, in the given order.
#[must_use]
pub fn expand_with<S: AsRef<str>>(
    seeds: &[S],
    graph: &OntologyGraph,
    rules: &[Rule],
) -> ExpansionResult {
    let mut ctx = Expansion::from_seeds(seeds);
    debug!("** start expansion from: [{}]", ctx.terms().join(","));
    let hierarchy = graph.project(HYPER_PROPS);

    let mut passes = 0;
    loop {
        let before = ctx.len();
        for rule in rules {
            rule.apply(&mut ctx, graph, &hierarchy);
        }
        passes += 1;
        if ctx.len() == before {
            break;
        }
    }

    info!(
        "expansion reached fixed point after {} passes: {} -> {} terms",
        passes,
        seeds.len(),
        ctx.len()
    );
    ctx.finish()
}

/// Expansion engine bound to one graph and rule list, with a memo cache.
///
/// Cached runs start from the sorted seed set, so the result does not depend
/// on the order the caller lists seeds in.
pub struct Expander<'g> {
    graph: &'g OntologyGraph,
    rules: Vec<Rule>,
    cache: HashMap<Vec<String>, ExpansionResult>,
}

impl<'g> Expander<'g> {
    #[must_use]
    pub fn new(graph: &'g OntologyGraph, rules: Vec<Rule>) -> Self {
        Self {
            graph,
            rules,
            cache: HashMap::new(),
        }
    }

    /// Expander over every rule.
    #[must_use]
    pub fn with_all_rules(graph: &'g OntologyGraph) -> Self {
        Self::new(graph, Rule::ALL.to_vec())
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Uncached expansion in caller order.
    #[must_use]
    pub fn expand<S: AsRef<str>>(&self, seeds: &[S]) -> ExpansionResult {
        expand_with(seeds, self.graph, &self.rules)
    }

    /// Memoised expansion keyed by the sorted unique seed set.
    pub fn cached_expand<S: AsRef<str>>(&mut self, seeds: &[S]) -> &ExpansionResult {
        let mut key: Vec<String> = seeds.iter().map(|s| s.as_ref().to_string()).collect();
        key.sort();
        key.dedup();

        let graph = self.graph;
        let rules = &self.rules;
        self.cache
            .entry(key)
            .or_insert_with_key(|key| expand_with(key.as_slice(), graph, rules))
    }

    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_deduplicated_with_seed_score() {
        let ctx = Expansion::from_seeds(&["a", "b", "a"]);
        assert_eq!(ctx.terms(), ["a", "b"]);
        assert_eq!(ctx.score("a"), Some(SEED_SCORE));
    }

    #[test]
    fn test_admit_is_idempotent() {
        let mut ctx = Expansion::from_seeds(&["a"]);
        assert!(ctx.admit("b", Rule::HypoFrames, &["a"]));
        assert!(!ctx.admit("b", Rule::HyperFrames, &["a"]));
        assert!(!ctx.admit("a", Rule::HyperFrames, &[]));
        assert_eq!(ctx.score("b"), Some(0.3));
        assert_eq!(ctx.score("a"), Some(SEED_SCORE));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_empty_graph_returns_seeds() {
        let g = OntologyGraph::new();
        let result = expand(&["x", "y"], &g);
        assert_eq!(result.terms, ["x", "y"]);
        assert!(result.added(&["x", "y"]).is_empty());
    }
}
