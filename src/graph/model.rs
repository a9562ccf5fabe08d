// src/graph/model.rs
//! The labeled ontology graph and its query interface.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// A labeled, weighted relation between two terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

const fn default_weight() -> f64 {
    1.0
}

impl Edge {
    #[must_use]
    pub fn new(from: &str, to: &str, label: &str) -> Self {
        Self::weighted(from, to, label, default_weight())
    }

    #[must_use]
    pub fn weighted(from: &str, to: &str, label: &str, weight: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
            weight,
        }
    }

    #[must_use]
    pub fn has_label<L: AsRef<str>>(&self, labels: &[L]) -> bool {
        labels.iter().any(|l| l.as_ref() == self.label)
    }

    fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            label: self.label.clone(),
            weight: self.weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    #[default]
    Directed,
    Undirected,
}

/// Term graph with per-node adjacency.
///
/// Nodes are kept sorted so every traversal has a fixed order. Undirected
/// graphs store each edge in both orientations.
#[derive(Debug, Clone, Default)]
pub struct OntologyGraph {
    kind: GraphKind,
    outgoing: BTreeMap<String, Vec<Edge>>,
    incoming: BTreeMap<String, Vec<Edge>>,
}

impl OntologyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn undirected() -> Self {
        Self {
            kind: GraphKind::Undirected,
            ..Self::default()
        }
    }

    /// Builds a directed graph from an edge list.
    #[must_use]
    pub fn from_edges<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    #[must_use]
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    pub fn add_node(&mut self, node: &str) {
        if !self.outgoing.contains_key(node) {
            self.outgoing.insert(node.to_string(), Vec::new());
            self.incoming.insert(node.to_string(), Vec::new());
        }
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.add_node(&edge.from);
        self.add_node(&edge.to);
        if self.kind == GraphKind::Undirected && edge.from != edge.to {
            self.insert_oriented(edge.reversed());
        }
        self.insert_oriented(edge);
    }

    fn insert_oriented(&mut self, edge: Edge) {
        if let Some(incoming) = self.incoming.get_mut(&edge.to) {
            incoming.push(edge.clone());
        }
        if let Some(outgoing) = self.outgoing.get_mut(&edge.from) {
            outgoing.push(edge);
        }
    }

    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.outgoing.contains_key(node)
    }

    /// Node ids in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.outgoing.keys().map(String::as_str)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    /// Number of logical edges (an undirected edge counts once).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let stored: usize = self.outgoing.values().map(Vec::len).sum();
        match self.kind {
            GraphKind::Directed => stored,
            GraphKind::Undirected => {
                let loops = self.edges().filter(|e| e.from == e.to).count();
                (stored - loops) / 2 + loops
            }
        }
    }

    /// Every stored edge, grouped by source in node order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.outgoing.values().flatten()
    }

    pub fn out_edges<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.outgoing.get(node).into_iter().flatten()
    }

    pub fn in_edges<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.incoming.get(node).into_iter().flatten()
    }

    pub fn out_edges_labeled<'a, L: AsRef<str>>(
        &'a self,
        node: &str,
        labels: &'a [L],
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.out_edges(node).filter(move |e| e.has_label(labels))
    }

    pub fn successors_with_label<'a, L: AsRef<str>>(
        &'a self,
        node: &str,
        labels: &'a [L],
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.out_edges_labeled(node, labels).map(|e| e.to.as_str())
    }

    #[must_use]
    pub fn out_degree(&self, node: &str) -> usize {
        self.outgoing.get(node).map_or(0, Vec::len)
    }

    /// Predecessors and successors together, ignoring direction.
    #[must_use]
    pub fn neighbors_any_direction(&self, node: &str) -> BTreeSet<&str> {
        self.out_edges(node)
            .map(|e| e.to.as_str())
            .chain(self.in_edges(node).map(|e| e.from.as_str()))
            .collect()
    }

    /// True if any edge joins `a` and `b`, whatever its label or direction.
    #[must_use]
    pub fn has_edge_between(&self, a: &str, b: &str) -> bool {
        self.out_edges(a).any(|e| e.to == b) || self.out_edges(b).any(|e| e.to == a)
    }

    /// Weight of the first edge `from -> to`.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.out_edges(from).find(|e| e.to == to).map(|e| e.weight)
    }

    /// True if some ordered pair carries more than one edge.
    #[must_use]
    pub fn is_multigraph(&self) -> bool {
        self.outgoing.values().any(|edges| {
            let mut seen = HashSet::new();
            edges.iter().any(|e| !seen.insert(e.to.as_str()))
        })
    }

    /// Directed view of this graph. Undirected edges become reciprocal pairs.
    #[must_use]
    pub fn to_directed(&self) -> Self {
        Self {
            kind: GraphKind::Directed,
            outgoing: self.outgoing.clone(),
            incoming: self.incoming.clone(),
        }
    }

    /// Undirected view; reciprocal and parallel edges collapse, first edge wins.
    #[must_use]
    pub fn to_undirected(&self) -> Self {
        let mut graph = Self::undirected();
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        for node in self.nodes() {
            graph.add_node(node);
        }
        for edge in self.edges() {
            let key = if edge.from <= edge.to {
                (edge.from.as_str(), edge.to.as_str())
            } else {
                (edge.to.as_str(), edge.from.as_str())
            };
            if seen.insert(key) {
                graph.add_edge(edge.clone());
            }
        }
        graph
    }

    /// Private copy for algorithms that need to filter edges.
    #[must_use]
    pub fn to_working_copy(&self) -> Self {
        self.clone()
    }

    /// Drops every edge for which `predicate` holds. Nodes are kept.
    ///
    /// On undirected graphs both orientations of a matching edge go.
    pub fn remove_edges_matching<F: Fn(&Edge) -> bool>(&mut self, predicate: F) {
        let undirected = self.kind == GraphKind::Undirected;
        let doomed = |e: &Edge| predicate(e) || (undirected && predicate(&e.reversed()));
        for edges in self.outgoing.values_mut() {
            edges.retain(|e| !doomed(e));
        }
        for edges in self.incoming.values_mut() {
            edges.retain(|e| !doomed(e));
        }
    }

    /// Working copy with every node but only the edges carrying one of `labels`.
    #[must_use]
    pub fn project<L: AsRef<str>>(&self, labels: &[L]) -> Self {
        let mut copy = self.to_working_copy();
        copy.remove_edges_matching(|e| !e.has_label(labels));
        copy
    }
}
