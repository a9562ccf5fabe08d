// src/rank/stochastic.rs
//! Row-stochastic transition structure and vector helpers shared by both
//! `PageRank` variants.

use super::{Distribution, Weighting};
use crate::error::{OntoRankError, Result};
use crate::graph::OntologyGraph;
use std::collections::{HashMap, HashSet};

/// One normalized out-link.
#[derive(Debug, Clone)]
pub(crate) struct Link {
    pub target: usize,
    pub weight: f64,
    pub label: String,
}

/// Graph in index form with each node's out-weights summing to 1.
///
/// Undirected graphs already store both orientations, so their edges are
/// read as reciprocal directed links.
pub(crate) struct Transition {
    pub nodes: Vec<String>,
    pub index: HashMap<String, usize>,
    pub rows: Vec<Vec<Link>>,
    pub dangling: Vec<usize>,
}

impl Transition {
    pub fn build(graph: &OntologyGraph, weighting: Weighting) -> Result<Self> {
        if graph.is_multigraph() {
            return Err(OntoRankError::InvalidGraphKind(
                "pagerank is not defined for graphs with parallel edges".to_string(),
            ));
        }

        let nodes: Vec<String> = graph.nodes().map(str::to_string).collect();
        let index: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();

        let mut rows = Vec::with_capacity(nodes.len());
        let mut dangling = Vec::new();

        for (i, node) in nodes.iter().enumerate() {
            let row = build_row(graph, node, &index, weighting);
            if row.is_empty() {
                dangling.push(i);
            }
            rows.push(row);
        }

        Ok(Self {
            nodes,
            index,
            rows,
            dangling,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Turns an index vector back into a node-keyed distribution.
    pub fn to_distribution(&self, vector: &[f64]) -> Distribution {
        self.nodes
            .iter()
            .cloned()
            .zip(vector.iter().copied())
            .collect()
    }
}

fn build_row(
    graph: &OntologyGraph,
    node: &str,
    index: &HashMap<String, usize>,
    weighting: Weighting,
) -> Vec<Link> {
    let raw: Vec<(usize, f64, &str)> = graph
        .out_edges(node)
        .filter_map(|e| {
            let weight = match weighting {
                Weighting::Edge => e.weight,
                Weighting::Unit => 1.0,
            };
            index.get(&e.to).map(|&t| (t, weight, e.label.as_str()))
        })
        .collect();

    let total: f64 = raw.iter().map(|(_, w, _)| w).sum();
    raw.into_iter()
        .map(|(target, weight, label)| Link {
            target,
            weight: if total == 0.0 { 0.0 } else { weight / total },
            label: label.to_string(),
        })
        .collect()
}

/// Rescales `v` to sum to 1. A zero vector is left untouched.
pub(crate) fn normalize(v: &mut [f64]) {
    let total: f64 = v.iter().sum();
    if total > 0.0 {
        for x in v.iter_mut() {
            *x /= total;
        }
    }
}

/// Uniform start, or the caller's vector normalized.
pub(crate) fn start_vector(
    transition: &Transition,
    nstart: Option<&HashMap<String, f64>>,
) -> Result<Vec<f64>> {
    #[allow(clippy::cast_precision_loss)]
    let eq_prob = 1.0 / transition.len() as f64;
    let Some(nstart) = nstart else {
        return Ok(vec![eq_prob; transition.len()]);
    };

    let mut v = vec![0.0; transition.len()];
    for (node, &value) in nstart {
        if value < 0.0 || !value.is_finite() {
            return Err(OntoRankError::InvalidStartVector(format!(
                "bad value {value} for {node}"
            )));
        }
        if let Some(&i) = transition.index.get(node) {
            v[i] = value;
        }
    }
    if v.iter().sum::<f64>() <= 0.0 {
        return Err(OntoRankError::InvalidStartVector(
            "no mass on any graph node".to_string(),
        ));
    }
    normalize(&mut v);
    Ok(v)
}

/// Teleportation vector: uniform, or the caller's vector normalized.
///
/// The caller's keys must be exactly the node set.
pub(crate) fn teleport_vector(
    transition: &Transition,
    personalization: Option<&HashMap<String, f64>>,
) -> Result<Vec<f64>> {
    #[allow(clippy::cast_precision_loss)]
    let eq_prob = 1.0 / transition.len() as f64;
    let Some(personalization) = personalization else {
        return Ok(vec![eq_prob; transition.len()]);
    };

    let keys: HashSet<&str> = personalization.keys().map(String::as_str).collect();
    let missing = transition
        .nodes
        .iter()
        .filter(|n| !keys.contains(n.as_str()))
        .count();
    let unexpected = keys
        .iter()
        .filter(|k| !transition.index.contains_key(**k))
        .count();
    if missing > 0 || unexpected > 0 {
        return Err(OntoRankError::InvalidPersonalization(format!(
            "must have a value for every node ({missing} missing, {unexpected} unknown)"
        )));
    }

    let mut v = vec![0.0; transition.len()];
    for (node, &value) in personalization {
        if value < 0.0 || !value.is_finite() {
            return Err(OntoRankError::InvalidPersonalization(format!(
                "bad value {value} for {node}"
            )));
        }
        if let Some(&i) = transition.index.get(node) {
            v[i] = value;
        }
    }
    if v.iter().sum::<f64>() <= 0.0 {
        return Err(OntoRankError::InvalidPersonalization(
            "vector has no mass".to_string(),
        ));
    }
    normalize(&mut v);
    Ok(v)
}

/// L1 distance between two vectors.
pub(crate) fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
