// src/rank/personalization.rs
//! Term-biased distributions: build a personalization from featured terms,
//! rank, and memoise by term set.

use super::{ConditionalOptions, Distribution, PageRank, PageRankOptions};
use crate::error::Result;
use crate::graph::OntologyGraph;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub const DEFAULT_AMPLIFY: f64 = 100.0;

/// Teleport weights: 1.0 for every node, `amplify` for featured nodes.
///
/// Featured terms outside `nodes` are skipped.
#[must_use]
pub fn personalization_map<'a, S, I>(featured: &[S], nodes: I, amplify: f64) -> HashMap<String, f64>
where
    S: AsRef<str>,
    I: IntoIterator<Item = &'a str>,
{
    let featured: HashSet<&str> = featured.iter().map(|s| s.as_ref()).collect();
    nodes
        .into_iter()
        .map(|n| {
            let value = if featured.contains(n) { amplify } else { 1.0 };
            (n.to_string(), value)
        })
        .collect()
}

/// Sorts a distribution by descending mass, ties broken by node id.
#[must_use]
pub fn ranked(distribution: &Distribution) -> Vec<(String, f64)> {
    let mut ranked: Vec<_> = distribution.iter().map(|(n, r)| (n.clone(), *r)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}

/// Shape applied to the graph before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preprocess {
    #[default]
    AsIs,
    /// Collapse to an undirected graph so mass flows both ways.
    Undirected,
}

impl Preprocess {
    /// Private copy of `graph` in this shape.
    #[must_use]
    pub fn apply(self, graph: &OntologyGraph) -> OntologyGraph {
        match self {
            Preprocess::AsIs => graph.to_working_copy(),
            Preprocess::Undirected => graph.to_undirected(),
        }
    }
}

/// Distributions over one graph, personalized toward term sets.
pub struct RankDistribution {
    graph: OntologyGraph,
    ranker: PageRank,
    amplify: f64,
    conditional: Option<ConditionalOptions>,
    cache: HashMap<Vec<String>, Distribution>,
}

impl RankDistribution {
    #[must_use]
    pub fn new(graph: &OntologyGraph, preprocess: Preprocess, options: PageRankOptions) -> Self {
        Self {
            graph: preprocess.apply(graph),
            ranker: PageRank::new(options),
            amplify: DEFAULT_AMPLIFY,
            conditional: None,
            cache: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_amplify(mut self, amplify: f64) -> Self {
        self.amplify = amplify;
        self.cache.clear();
        self
    }

    /// Ranks with the conditional variant from now on.
    #[must_use]
    pub fn with_conditional(mut self, conditional: ConditionalOptions) -> Self {
        self.conditional = Some(conditional);
        self.cache.clear();
        self
    }

    #[must_use]
    pub fn graph(&self) -> &OntologyGraph {
        &self.graph
    }

    /// Distribution personalized toward `featured`, computed once per term set.
    ///
    /// # Errors
    /// Propagates ranking failures; failed runs are not cached.
    pub fn distribution<S: AsRef<str>>(&mut self, featured: &[S]) -> Result<&Distribution> {
        let mut key: Vec<String> = featured.iter().map(|s| s.as_ref().to_string()).collect();
        key.sort();
        key.dedup();

        match self.cache.entry(key) {
            Entry::Occupied(hit) => Ok(hit.into_mut()),
            Entry::Vacant(slot) => {
                debug!("ranking toward [{}]", slot.key().join(","));
                let personalization =
                    personalization_map(slot.key(), self.graph.nodes(), self.amplify);
                let distribution = match &self.conditional {
                    Some(conditional) => self.ranker.rank_conditional(
                        &self.graph,
                        conditional,
                        Some(&personalization),
                        None,
                    )?,
                    None => self.ranker.rank(&self.graph, Some(&personalization), None)?,
                };
                Ok(slot.insert(distribution))
            }
        }
    }

    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
