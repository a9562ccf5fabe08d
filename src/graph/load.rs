// src/graph/load.rs
//! Reads an edge-list document into an [`OntologyGraph`].

use super::model::{Edge, OntologyGraph};
use crate::error::{OntoRankError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const fn default_directed() -> bool {
    true
}

/// On-disk shape: `{ "directed": true, "nodes": [..], "edges": [..] }`.
///
/// Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    #[serde(default = "default_directed")]
    pub directed: bool,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Default for GraphDocument {
    fn default() -> Self {
        Self {
            directed: true,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl GraphDocument {
    /// Builds the graph. In an undirected document every unordered pair
    /// keeps only its first listed edge.
    #[must_use]
    pub fn into_graph(self) -> OntologyGraph {
        let mut graph = if self.directed {
            OntologyGraph::new()
        } else {
            OntologyGraph::undirected()
        };
        for node in &self.nodes {
            graph.add_node(node);
        }
        let mut seen: HashSet<(String, String)> = HashSet::new();
        for edge in self.edges {
            if !self.directed {
                let key = if edge.from <= edge.to {
                    (edge.from.clone(), edge.to.clone())
                } else {
                    (edge.to.clone(), edge.from.clone())
                };
                if !seen.insert(key) {
                    continue;
                }
            }
            graph.add_edge(edge);
        }
        graph
    }
}

/// Parses a graph document from JSON text.
///
/// # Errors
/// Returns `Parse` if the text is not a valid document.
pub fn parse_graph(content: &str) -> Result<OntologyGraph> {
    let doc: GraphDocument = serde_json::from_str(content)?;
    Ok(doc.into_graph())
}

/// Reads a graph document from disk.
///
/// # Errors
/// Returns `Io` if the file cannot be read, `Parse` if it is malformed.
pub fn load_graph(path: &Path) -> Result<OntologyGraph> {
    let content = std::fs::read_to_string(path).map_err(|source| OntoRankError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse_graph(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_weight_and_kind() {
        let g = parse_graph(
            r#"{"nodes": ["solo"], "edges": [{"from": "a", "to": "b", "label": "hyper"}]}"#,
        )
        .unwrap();
        assert!(g.is_directed());
        assert!(g.contains("solo"));
        assert_eq!(g.weight("a", "b"), Some(1.0));
    }

    #[test]
    fn test_parse_undirected() {
        let g = parse_graph(
            r#"{"directed": false, "edges": [{"from": "a", "to": "b", "label": "sbj", "weight": 2.5}]}"#,
        )
        .unwrap();
        assert!(!g.is_directed());
        assert_eq!(g.weight("b", "a"), Some(2.5));
    }

    #[test]
    fn test_undirected_reciprocal_edges_collapse() {
        let g = parse_graph(
            r#"{"directed": false, "edges": [
                {"from": "a", "to": "b", "label": "sbj", "weight": 2.0},
                {"from": "b", "to": "a", "label": "sbj", "weight": 5.0}
            ]}"#,
        )
        .unwrap();
        assert!(!g.is_multigraph());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight("b", "a"), Some(2.0));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_graph(r#"{"kind": "undirected", "edges": []}"#);
        assert!(matches!(err, Err(OntoRankError::Parse(_))));
        let err = parse_graph(r#"{"directd": false}"#);
        assert!(matches!(err, Err(OntoRankError::Parse(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_graph("{nope"), Err(OntoRankError::Parse(_))));
    }
}
