// src/rank/mod.rs
//! Stationary-distribution ranking over the ontology graph.

pub mod pagerank;
pub mod personalization;
mod stochastic;

pub use pagerank::{pagerank, pagerank_conditional, PageRank};
pub use personalization::{personalization_map, ranked, Preprocess, RankDistribution};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Node to probability mass.
pub type Distribution = HashMap<String, f64>;

pub const DEFAULT_ALPHA: f64 = 0.85;
pub const DEFAULT_MAX_ITER: usize = 10_000;
pub const DEFAULT_TOL: f64 = 1e-8;

/// How edge weights enter the transition matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Use each edge's `weight`.
    #[default]
    Edge,
    /// Every edge counts 1.
    Unit,
}

/// What to do when `max_iter` runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonConvergence {
    #[default]
    Fail,
    /// Log a warning and return the last iterate.
    Warn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankOptions {
    pub alpha: f64,
    pub max_iter: usize,
    pub tol: f64,
    pub weighting: Weighting,
    pub on_non_convergence: NonConvergence,
}

impl Default for PageRankOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            weighting: Weighting::Edge,
            on_non_convergence: NonConvergence::Fail,
        }
    }
}

/// Which edges are conditional and how their power is measured.
///
/// `in_degree` and `out_degree` both default to `true`, so a conditional
/// edge draws power from both sides of its target unless turned off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalOptions {
    pub labels: BTreeSet<String>,
    pub in_degree: bool,
    pub out_degree: bool,
    /// Accepted for compatibility; has no effect.
    pub through: bool,
}

impl Default for ConditionalOptions {
    fn default() -> Self {
        Self {
            labels: BTreeSet::new(),
            in_degree: true,
            out_degree: true,
            through: false,
        }
    }
}

impl ConditionalOptions {
    #[must_use]
    pub fn with_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }
}
