// src/config/types.rs
use crate::expand::Rule;
use crate::rank::personalization::DEFAULT_AMPLIFY;
use crate::rank::{
    ConditionalOptions, NonConvergence, PageRankOptions, Preprocess, Weighting, DEFAULT_ALPHA,
    DEFAULT_MAX_ITER, DEFAULT_TOL,
};
use serde::{Deserialize, Serialize};

/// `[rank]` section of ontorank.toml.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Damping factor. Default: 0.85
    pub alpha: f64,
    /// Power-iteration cap. Default: 10000
    pub max_iter: usize,
    /// L1 convergence tolerance. Default: 1e-8
    pub tol: f64,
    /// Fail on non-convergence instead of warning. Default: true
    pub strict: bool,
    /// Treat every edge as weight 1.
    pub unit_weights: bool,
    /// Teleport weight of featured terms. Default: 100
    pub amplify: f64,
    /// Rank over the undirected collapse of the graph.
    pub undirected: bool,
    /// Labels whose edges use conditional redistribution.
    pub conditional_labels: Vec<String>,
    /// Count fixed in-links of a conditional target as power. Default: true
    pub in_degree: bool,
    /// Count fixed out-links of a conditional target as power. Default: true
    pub out_degree: bool,
    pub through: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            strict: true,
            unit_weights: false,
            amplify: DEFAULT_AMPLIFY,
            undirected: false,
            conditional_labels: Vec::new(),
            in_degree: true,
            out_degree: true,
            through: false,
        }
    }
}

impl RankConfig {
    #[must_use]
    pub fn options(&self) -> PageRankOptions {
        PageRankOptions {
            alpha: self.alpha,
            max_iter: self.max_iter,
            tol: self.tol,
            weighting: if self.unit_weights {
                Weighting::Unit
            } else {
                Weighting::Edge
            },
            on_non_convergence: if self.strict {
                NonConvergence::Fail
            } else {
                NonConvergence::Warn
            },
        }
    }

    /// Conditional options, or `None` when no label is conditional.
    #[must_use]
    pub fn conditional(&self) -> Option<ConditionalOptions> {
        if self.conditional_labels.is_empty() {
            return None;
        }
        Some(ConditionalOptions {
            labels: self.conditional_labels.iter().cloned().collect(),
            in_degree: self.in_degree,
            out_degree: self.out_degree,
            through: self.through,
        })
    }

    #[must_use]
    pub fn preprocess(&self) -> Preprocess {
        if self.undirected {
            Preprocess::Undirected
        } else {
            Preprocess::AsIs
        }
    }
}

/// `[expand]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandConfig {
    /// Rules in pass order.
    pub rules: Vec<Rule>,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
        }
    }
}

/// `[segment]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    pub stopwords: Vec<String>,
    /// Term-list files, highest precedence first.
    pub priority_lists: Vec<String>,
    /// Vocabulary file; graph nodes when unset.
    pub vocabulary: Option<String>,
}

/// On-disk shape of ontorank.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OntoRankToml {
    #[serde(default)]
    pub rank: RankConfig,
    #[serde(default)]
    pub expand: ExpandConfig,
    #[serde(default)]
    pub segment: SegmentConfig,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub rank: RankConfig,
    pub expand: ExpandConfig,
    pub segment: SegmentConfig,
    pub verbose: bool,
}
