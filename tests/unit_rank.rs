// tests/unit_rank.rs
use ontorank_core::error::OntoRankError;
use ontorank_core::graph::{Edge, OntologyGraph};
use ontorank_core::rank::{
    pagerank, personalization_map, ranked, ConditionalOptions, Distribution, NonConvergence,
    PageRank, PageRankOptions, Preprocess, RankDistribution, Weighting,
};
use std::collections::HashMap;

const EPS: f64 = 1e-6;

fn graph(edges: &[(&str, &str, &str)]) -> OntologyGraph {
    OntologyGraph::from_edges(edges.iter().map(|(f, t, l)| Edge::new(f, t, l)))
}

fn total(d: &Distribution) -> f64 {
    d.values().sum()
}

fn fan_graph() -> OntologyGraph {
    graph(&[("a", "b", "sbj"), ("a", "c", "sbj"), ("d", "a", "cause")])
}

#[test]
fn test_two_node_cycle_is_uniform() {
    let g = graph(&[("a", "b", "sbj"), ("b", "a", "sbj")]);
    let ranks = pagerank(&g, &PageRankOptions::default(), None).unwrap();
    assert!((ranks["a"] - 0.5).abs() < EPS);
    assert!((ranks["b"] - 0.5).abs() < EPS);
}

#[test]
fn test_undirected_edge_is_uniform() {
    let mut g = OntologyGraph::undirected();
    g.add_edge(Edge::new("a", "b", "sbj"));
    let ranks = pagerank(&g, &PageRankOptions::default(), None).unwrap();
    assert!((ranks["a"] - 0.5).abs() < EPS);
}

#[test]
fn test_dangling_mass_is_redistributed() {
    let g = graph(&[("a", "b", "sbj")]);
    let ranks = pagerank(&g, &PageRankOptions::default(), None).unwrap();
    assert!((ranks["a"] - 0.350_877_19).abs() < EPS, "got {}", ranks["a"]);
    assert!((ranks["b"] - 0.649_122_81).abs() < EPS, "got {}", ranks["b"]);
}

#[test]
fn test_distribution_sums_to_one() {
    let g = graph(&[
        ("sale", "contract", "hyper"),
        ("contract", "party", "sbj"),
        ("contract", "object", "obj"),
        ("rescission", "contract", "obj"),
        ("party", "sale", "attr_slot"),
    ]);
    let ranks = pagerank(&g, &PageRankOptions::default(), None).unwrap();
    assert_eq!(ranks.len(), g.node_count());
    assert!((total(&ranks) - 1.0).abs() < EPS);
    assert!(ranks.values().all(|&r| r >= 0.0));
}

#[test]
fn test_edge_weights_shift_mass() {
    let g = OntologyGraph::from_edges([
        Edge::weighted("a", "b", "sbj", 9.0),
        Edge::weighted("a", "c", "sbj", 1.0),
        Edge::new("b", "a", "sbj"),
        Edge::new("c", "a", "sbj"),
    ]);
    let weighted = pagerank(&g, &PageRankOptions::default(), None).unwrap();
    assert!(weighted["b"] > weighted["c"]);

    let options = PageRankOptions {
        weighting: Weighting::Unit,
        ..PageRankOptions::default()
    };
    let unit = pagerank(&g, &options, None).unwrap();
    assert!((unit["b"] - unit["c"]).abs() < EPS);
}

#[test]
fn test_empty_graph_gives_empty_distribution() {
    let ranks = pagerank(&OntologyGraph::new(), &PageRankOptions::default(), None).unwrap();
    assert!(ranks.is_empty());
}

#[test]
fn test_multigraph_rejected() {
    let g = graph(&[("a", "b", "sbj"), ("a", "b", "obj")]);
    let err = pagerank(&g, &PageRankOptions::default(), None).unwrap_err();
    assert!(matches!(err, OntoRankError::InvalidGraphKind(_)), "got {err}");
}

#[test]
fn test_personalization_must_cover_every_node() {
    let g = graph(&[("a", "b", "sbj")]);
    let partial: HashMap<String, f64> = [("a".to_string(), 1.0)].into_iter().collect();
    let err = pagerank(&g, &PageRankOptions::default(), Some(&partial)).unwrap_err();
    assert!(matches!(err, OntoRankError::InvalidPersonalization(_)));

    let extra = personalization_map(&["a"], ["a", "b", "zz"], 2.0);
    let err = pagerank(&g, &PageRankOptions::default(), Some(&extra)).unwrap_err();
    assert!(matches!(err, OntoRankError::InvalidPersonalization(_)));
}

#[test]
fn test_zero_personalization_rejected() {
    let g = graph(&[("a", "b", "sbj")]);
    let zero: HashMap<String, f64> = g.nodes().map(|n| (n.to_string(), 0.0)).collect();
    let err = pagerank(&g, &PageRankOptions::default(), Some(&zero)).unwrap_err();
    assert!(matches!(err, OntoRankError::InvalidPersonalization(_)));
}

#[test]
fn test_personalization_biases_toward_featured() {
    let g = graph(&[("a", "b", "sbj"), ("b", "c", "sbj"), ("c", "a", "sbj")]);
    let p = personalization_map(&["c"], g.nodes(), 100.0);
    let ranks = pagerank(&g, &PageRankOptions::default(), Some(&p)).unwrap();
    assert!(ranks["c"] > ranks["b"]);
    assert!((total(&ranks) - 1.0).abs() < EPS);
}

#[test]
fn test_start_vector_validated() {
    let g = graph(&[("a", "b", "sbj")]);
    let negative: HashMap<String, f64> = [("a".to_string(), -1.0)].into_iter().collect();
    let err = PageRank::default().rank(&g, None, Some(&negative)).unwrap_err();
    assert!(matches!(err, OntoRankError::InvalidStartVector(_)));

    let skewed: HashMap<String, f64> = [("a".to_string(), 5.0)].into_iter().collect();
    let ranks = PageRank::default().rank(&g, None, Some(&skewed)).unwrap();
    assert!((ranks["a"] - 0.350_877_19).abs() < EPS);
}

#[test]
fn test_convergence_failure_is_fatal_by_default() {
    let g = graph(&[("a", "b", "sbj")]);
    let options = PageRankOptions {
        max_iter: 2,
        ..PageRankOptions::default()
    };
    let err = pagerank(&g, &options, None).unwrap_err();
    match err {
        OntoRankError::ConvergenceFailure { iterations, error } => {
            assert_eq!(iterations, 2);
            assert!(error > 0.0);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_convergence_failure_can_warn() {
    let g = graph(&[("a", "b", "sbj")]);
    let options = PageRankOptions {
        max_iter: 2,
        on_non_convergence: NonConvergence::Warn,
        ..PageRankOptions::default()
    };
    let ranks = pagerank(&g, &options, None).unwrap();
    assert!((total(&ranks) - 1.0).abs() < EPS);
}

#[test]
fn test_empty_conditional_set_matches_plain() {
    let g = fan_graph();
    let ranker = PageRank::default();
    let plain = ranker.rank(&g, None, None).unwrap();
    let conditional = ranker
        .rank_conditional(&g, &ConditionalOptions::default(), None, None)
        .unwrap();
    for node in g.nodes() {
        assert!((plain[node] - conditional[node]).abs() < EPS, "{node} differs");
    }
}

#[test]
fn test_conditional_edge_carries_static_flow() {
    let g = fan_graph();
    let ranker = PageRank::default();
    let plain = ranker.rank(&g, None, None).unwrap();
    let conditional = ranker
        .rank_conditional(&g, &ConditionalOptions::with_labels(&["cause"]), None, None)
        .unwrap();
    assert!((plain["a"] - 0.288_049_83).abs() < EPS, "got {}", plain["a"]);
    assert!((conditional["a"] - 0.337_105_66).abs() < EPS, "got {}", conditional["a"]);
    assert!((total(&conditional) - 1.0).abs() < EPS);
}

#[test]
fn test_conditional_without_degree_flags_carries_nothing() {
    let g = fan_graph();
    let options = ConditionalOptions {
        in_degree: false,
        out_degree: false,
        ..ConditionalOptions::with_labels(&["cause"])
    };
    let ranks = PageRank::default().rank_conditional(&g, &options, None, None).unwrap();
    assert!((ranks["a"] - ranks["d"]).abs() < EPS);
}

#[test]
fn test_through_flag_is_inert() {
    let g = fan_graph();
    let ranker = PageRank::default();
    let base = ConditionalOptions::with_labels(&["cause"]);
    let through = ConditionalOptions {
        through: true,
        ..base.clone()
    };
    let a = ranker.rank_conditional(&g, &base, None, None).unwrap();
    let b = ranker.rank_conditional(&g, &through, None, None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_rank_distribution_caches_by_term_set() {
    let g = graph(&[("a", "b", "sbj"), ("b", "c", "sbj"), ("c", "a", "sbj")]);
    let mut dist = RankDistribution::new(&g, Preprocess::AsIs, PageRankOptions::default());
    let first = dist.distribution(&["c", "a"]).unwrap().clone();
    let second = dist.distribution(&["a", "c", "a"]).unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(dist.cache_len(), 1);

    let order: Vec<String> = ranked(&first).into_iter().map(|(n, _)| n).collect();
    assert_eq!(order.len(), 3);
    assert_ne!(order[0], "b", "Unfeatured node must not lead");

    dist.invalidate();
    assert_eq!(dist.cache_len(), 0);
}

#[test]
fn test_rank_distribution_undirected_preprocess() {
    let g = graph(&[("a", "b", "sbj")]);
    let mut dist = RankDistribution::new(&g, Preprocess::Undirected, PageRankOptions::default());
    let ranks = dist.distribution(&[] as &[&str]).unwrap();
    assert!((ranks["a"] - 0.5).abs() < EPS);
    assert!(!dist.graph().is_directed());
}
