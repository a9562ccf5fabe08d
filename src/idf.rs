// src/idf.rs
//! Inverse-document-frequency weights with graph-neighbour interpolation.

use crate::error::{OntoRankError, Result};
use crate::graph::OntologyGraph;
use crate::rank::Distribution;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// How [`IdfTable::weights`] fills in terms without a known IDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeightOptions {
    /// Average the known IDFs of graph neighbours for unknown terms.
    pub interpolate: bool,
    /// Take the square root of every IDF first.
    pub sqrt: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfTable {
    values: BTreeMap<String, f64>,
}

impl IdfTable {
    /// Parses `term,idf` lines. Blank lines are skipped.
    ///
    /// # Errors
    /// Returns `Parse` for a line without a comma or with a non-numeric or
    /// non-finite value.
    pub fn parse(content: &str) -> Result<Self> {
        let mut values = BTreeMap::new();
        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((term, idf)) = line.split_once(',') else {
                return Err(OntoRankError::Parse(format!(
                    "idf line {}: expected `term,idf`",
                    n + 1
                )));
            };
            let idf: f64 = idf
                .trim()
                .parse()
                .ok()
                .filter(|v: &f64| v.is_finite())
                .ok_or_else(|| {
                    OntoRankError::Parse(format!("idf line {}: bad value {:?}", n + 1, idf.trim()))
                })?;
            values.insert(term.trim().to_string(), idf);
        }
        Ok(Self { values })
    }

    /// # Errors
    /// Returns `Io` if the file cannot be read, `Parse` if it is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| OntoRankError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::parse(&content)
    }

    #[must_use]
    pub fn get(&self, term: &str) -> Option<f64> {
        self.values.get(term).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Table extended to every graph node.
    ///
    /// Nodes start at 0.0 if unknown. Every zero-valued node then takes the
    /// mean of its neighbours' current values, pass after pass, until a
    /// pass leaves the total unchanged.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    pub fn interpolated(&self, graph: &OntologyGraph) -> Self {
        let mut values = self.values.clone();
        for node in graph.nodes() {
            values.entry(node.to_string()).or_insert(0.0);
        }

        let mut passes = 0;
        loop {
            let before: f64 = values.values().sum();
            let pending: Vec<String> = values
                .iter()
                .filter(|&(term, &v)| v == 0.0 && graph.contains(term))
                .map(|(term, _)| term.clone())
                .collect();
            for term in pending {
                let scores: Vec<f64> = graph
                    .neighbors_any_direction(&term)
                    .into_iter()
                    .filter_map(|n| values.get(n).copied())
                    .collect();
                if !scores.is_empty() {
                    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                    values.insert(term, mean);
                }
            }
            passes += 1;
            if values.values().sum::<f64>() == before {
                break;
            }
        }

        let inserted = values.len() - self.values.len();
        info!("idf interpolation: {passes} passes, {inserted} terms inserted");
        Self { values }
    }

    /// Weight for every dimension. Terms missing from the table are 0.0, or
    /// the mean of their known neighbours with `interpolate`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn weights<S: AsRef<str>>(
        &self,
        dimensions: &[S],
        graph: &OntologyGraph,
        options: WeightOptions,
    ) -> Distribution {
        let adjust = |v: f64| if options.sqrt { v.sqrt() } else { v };

        dimensions
            .iter()
            .map(|dimension| {
                let term: &str = dimension.as_ref();
                let weight = match self.get(term) {
                    Some(v) => adjust(v),
                    None if options.interpolate => {
                        let scores: Vec<f64> = graph
                            .neighbors_any_direction(term)
                            .into_iter()
                            .filter_map(|n| self.get(n))
                            .map(adjust)
                            .collect();
                        if scores.is_empty() {
                            0.0
                        } else {
                            scores.iter().sum::<f64>() / scores.len() as f64
                        }
                    }
                    None => 0.0,
                };
                (term.to_string(), weight)
            })
            .collect()
    }
}
