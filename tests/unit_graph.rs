// tests/unit_graph.rs
use ontorank_core::error::OntoRankError;
use ontorank_core::graph::{load_graph, parse_graph, Edge, OntologyGraph, ALL_PROPS, HYPER_PROPS};
use ontorank_core::rank::{pagerank, PageRankOptions};
use std::fs;

fn taxonomy() -> OntologyGraph {
    OntologyGraph::from_edges([
        Edge::new("sale", "contract", "hyper"),
        Edge::new("contract", "juristic_act", "hyperx"),
        Edge::new("sale", "buyer", "sbj"),
        Edge::new("sale", "price", "attr_slot"),
    ])
}

#[test]
fn test_load_graph_from_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("graph.json");
    fs::write(
        &path,
        r#"{"nodes": ["orphan"], "edges": [{"from": "a", "to": "b", "label": "sbj", "weight": 2.0}]}"#,
    )
    .unwrap();
    let g = load_graph(&path).unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.weight("a", "b"), Some(2.0));
    assert!(g.contains("orphan"));
}

#[test]
fn test_load_graph_missing_file_reports_path() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("missing.json");
    match load_graph(&path) {
        Err(OntoRankError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_undirected_document() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("graph.json");
    fs::write(
        &path,
        r#"{"directed": false, "edges": [{"from": "a", "to": "b", "label": "sbj"}]}"#,
    )
    .unwrap();
    let g = load_graph(&path).unwrap();
    assert!(!g.is_directed());
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.weight("b", "a"), Some(1.0));
}

#[test]
fn test_undirected_document_with_both_orientations_ranks() {
    let g = parse_graph(
        r#"{"directed": false, "edges": [
            {"from": "a", "to": "b", "label": "sbj"},
            {"from": "b", "to": "a", "label": "sbj"}
        ]}"#,
    )
    .unwrap();
    let ranks = pagerank(&g, &PageRankOptions::default(), None).unwrap();
    assert!((ranks["a"] - 0.5).abs() < 1e-6);
}

#[test]
fn test_directed_flag_defaults_to_true() {
    let g = parse_graph(r#"{"edges": [{"from": "a", "to": "b", "label": "sbj"}]}"#).unwrap();
    assert!(g.is_directed());
    assert_eq!(g.weight("b", "a"), None);
}

#[test]
fn test_hyper_projection_keeps_nodes() {
    let g = taxonomy();
    let h = g.project(HYPER_PROPS);
    assert_eq!(h.node_count(), g.node_count());
    assert_eq!(h.edge_count(), 2);
    assert!(h.has_path("sale", "juristic_act"));
    assert!(!h.has_path("sale", "buyer"));
    assert_eq!(g.edge_count(), 4, "Projection must not touch the source graph");
}

#[test]
fn test_shortest_path_includes_both_ends() {
    let g = taxonomy();
    assert_eq!(
        g.shortest_path("sale", "juristic_act"),
        Some(vec![
            "sale".to_string(),
            "contract".to_string(),
            "juristic_act".to_string()
        ])
    );
    assert_eq!(g.shortest_path("juristic_act", "sale"), None);
}

#[test]
fn test_labeled_successors() {
    let g = taxonomy();
    let all: Vec<&str> = g.successors_with_label("sale", ALL_PROPS).collect();
    assert_eq!(all, ["contract", "buyer", "price"]);
    let hyper: Vec<&str> = g.successors_with_label("sale", HYPER_PROPS).collect();
    assert_eq!(hyper, ["contract"]);
}

#[test]
fn test_to_undirected_collapses_reciprocal_edges() {
    let g = OntologyGraph::from_edges([Edge::new("a", "b", "sbj"), Edge::new("b", "a", "obj")]);
    let u = g.to_undirected();
    assert_eq!(u.edge_count(), 1);
    assert!(!u.is_multigraph());
}
