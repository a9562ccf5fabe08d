// src/expand/rules.rs
//! The seven inference rules that grow a term set over the ontology.
//!
//! Every rule reads the live accumulated set, so a term admitted earlier in
//! the same pass (or earlier in the same rule) is visible immediately.

use super::Expansion;
use crate::graph::{
    OntologyGraph, ShortestPathTree, ALL_PROPS, ATTR_SLOT, FRAME_PROPS, HYPER_PROPS, SLOT_PROPS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    #[serde(rename = "hyperframes")]
    HyperFrames,
    #[serde(rename = "hypoframes")]
    HypoFrames,
    #[serde(rename = "attr_hypers")]
    AttrHypers,
    #[serde(rename = "prerequisites")]
    Prerequisites,
    #[serde(rename = "ascending_ways")]
    AscendingWays,
    #[serde(rename = "ascendedhubs")]
    AscendedHubs,
    #[serde(rename = "attrs_of_attrs")]
    AttrsOfAttrs,
}

impl Rule {
    /// Canonical pass order.
    pub const ALL: [Rule; 7] = [
        Rule::HyperFrames,
        Rule::HypoFrames,
        Rule::AttrHypers,
        Rule::Prerequisites,
        Rule::AscendingWays,
        Rule::AscendedHubs,
        Rule::AttrsOfAttrs,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Rule::HyperFrames => "hyperframes",
            Rule::HypoFrames => "hypoframes",
            Rule::AttrHypers => "attr_hypers",
            Rule::Prerequisites => "prerequisites",
            Rule::AscendingWays => "ascending_ways",
            Rule::AscendedHubs => "ascendedhubs",
            Rule::AttrsOfAttrs => "attrs_of_attrs",
        }
    }

    /// Confidence given to a term this rule admits first.
    #[must_use]
    pub fn score(self) -> f64 {
        match self {
            Rule::HyperFrames => 1.0,
            Rule::HypoFrames => 0.3,
            Rule::AttrHypers | Rule::AttrsOfAttrs => 0.5,
            Rule::Prerequisites => 0.8,
            Rule::AscendingWays | Rule::AscendedHubs => 0.2,
        }
    }

    /// Looks a rule up by its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Runs the rule once over the current set.
    ///
    /// `hierarchy` is the hyper-only projection of `graph`.
    pub fn apply(self, ctx: &mut Expansion, graph: &OntologyGraph, hierarchy: &OntologyGraph) {
        match self {
            Rule::HyperFrames => hyperframes(ctx, graph),
            Rule::HypoFrames => hypoframes(ctx, graph),
            Rule::AttrHypers => attr_hypers(ctx, graph),
            Rule::Prerequisites => prerequisites(ctx, graph),
            Rule::AscendingWays => ascending_ways(ctx, hierarchy),
            Rule::AscendedHubs => ascendedhubs(ctx, graph, hierarchy),
            Rule::AttrsOfAttrs => attrs_of_attrs(ctx, graph),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A term whose hypernym has a slot already in the set pulls in the hypernym.
fn hyperframes(ctx: &mut Expansion, graph: &OntologyGraph) {
    let mut i = 0;
    while let Some(term) = ctx.term(i).map(str::to_string) {
        for hyper in graph.successors_with_label(&term, HYPER_PROPS) {
            for frame in graph.successors_with_label(hyper, SLOT_PROPS) {
                if ctx.contains(frame) && !ctx.contains(hyper) {
                    ctx.admit(hyper, Rule::HyperFrames, &[term.as_str(), frame]);
                }
            }
        }
        i += 1;
    }
}

/// A node with both a hypernym and a frame slot in the set joins it.
fn hypoframes(ctx: &mut Expansion, graph: &OntologyGraph) {
    for node in graph.nodes() {
        if ctx.contains(node) {
            continue;
        }
        let hypers: Vec<&str> = graph.successors_with_label(node, HYPER_PROPS).collect();
        if !hypers.iter().any(|h| ctx.contains(h)) {
            continue;
        }
        let slots: Vec<&str> = graph.successors_with_label(node, FRAME_PROPS).collect();
        if !slots.iter().any(|s| ctx.contains(s)) {
            continue;
        }
        let reasons: Vec<&str> = hypers.into_iter().chain(slots).collect();
        ctx.admit(node, Rule::HypoFrames, &reasons);
    }
}

/// An attribute of a member whose hypernym is a member joins the set.
fn attr_hypers(ctx: &mut Expansion, graph: &OntologyGraph) {
    let mut i = 0;
    while let Some(term) = ctx.term(i).map(str::to_string) {
        for attr in graph.successors_with_label(&term, ATTR_SLOT) {
            for hyper in graph.successors_with_label(attr, HYPER_PROPS) {
                if ctx.contains(hyper) && !ctx.contains(attr) {
                    ctx.admit(attr, Rule::AttrHypers, &[term.as_str(), hyper]);
                }
            }
        }
        i += 1;
    }
}

/// Distinct members among the targets of `node`'s labeled edges.
fn touched_members<'g>(ctx: &Expansion, graph: &'g OntologyGraph, node: &str) -> Vec<&'g str> {
    let targets: BTreeSet<&str> = graph.successors_with_label(node, ALL_PROPS).collect();
    targets.into_iter().filter(|t| ctx.contains(t)).collect()
}

/// A node linked to at least two members joins the set.
fn prerequisites(ctx: &mut Expansion, graph: &OntologyGraph) {
    for node in graph.nodes() {
        if ctx.contains(node) {
            continue;
        }
        let touched = touched_members(ctx, graph, node);
        if touched.len() < 2 {
            continue;
        }
        ctx.admit(node, Rule::Prerequisites, &touched);
    }
}

/// Intermediate nodes on a hypernym path between two members join the set.
fn ascending_ways(ctx: &mut Expansion, hierarchy: &OntologyGraph) {
    for u in hierarchy.nodes() {
        if !ctx.contains(u) {
            continue;
        }
        let tree = ShortestPathTree::new(hierarchy, u);
        for v in hierarchy.nodes() {
            if v == u || !ctx.contains(v) {
                continue;
            }
            let Some(path) = tree.path_to(v) else {
                continue;
            };
            for stop in &path {
                ctx.admit(stop, Rule::AscendingWays, &[u, v]);
            }
        }
    }
}

/// A hypernym ancestor of a member that is itself a hub of members pulls in its path.
fn ascendedhubs(ctx: &mut Expansion, graph: &OntologyGraph, hierarchy: &OntologyGraph) {
    for u in hierarchy.nodes() {
        if !ctx.contains(u) {
            continue;
        }
        let tree = ShortestPathTree::new(hierarchy, u);
        for v in hierarchy.nodes() {
            if v == u {
                continue;
            }
            let Some(path) = tree.path_to(v) else {
                continue;
            };
            let touched = touched_members(ctx, graph, v);
            if touched.len() < 2 {
                continue;
            }
            let mut reasons = vec![u, v];
            reasons.extend(touched);
            for stop in &path {
                ctx.admit(stop, Rule::AscendedHubs, &reasons);
            }
        }
    }
}

/// An attribute bridging a member to one of its linked attributes joins the set.
fn attrs_of_attrs(ctx: &mut Expansion, graph: &OntologyGraph) {
    let mut i = 0;
    while let Some(term) = ctx.term(i).map(str::to_string) {
        for attr in graph.successors_with_label(&term, ATTR_SLOT) {
            if ctx.contains(attr) {
                continue;
            }
            let bridged = graph
                .successors_with_label(attr, ATTR_SLOT)
                .find(|second| ctx.contains(second) && graph.has_edge_between(&term, second));
            if let Some(second) = bridged {
                ctx.admit(attr, Rule::AttrsOfAttrs, &[term.as_str(), second]);
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_match_rule_table() {
        let scores: Vec<f64> = Rule::ALL.iter().map(|r| r.score()).collect();
        assert_eq!(scores, vec![1.0, 0.3, 0.5, 0.8, 0.2, 0.2, 0.5]);
    }

    #[test]
    fn test_name_round_trip() {
        for rule in Rule::ALL {
            assert_eq!(Rule::from_name(rule.name()), Some(rule));
        }
        assert_eq!(Rule::from_name("nope"), None);
    }
}
