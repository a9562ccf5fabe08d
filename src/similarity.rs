// src/similarity.rs
//! Vector views of distributions and cosine comparison between term sets.

use crate::error::Result;
use crate::rank::Distribution;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Cosine of the angle between two equal-length vectors; 0.0 if either is zero.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let norm = dot(a, a).sqrt() * dot(b, b).sqrt();
    if norm == 0.0 {
        return 0.0;
    }
    dot(a, b) / norm
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Mass of `map` along `dimensions`; absent keys read as 0.
#[must_use]
pub fn to_vector<S: AsRef<str>>(map: &Distribution, dimensions: &[S]) -> Vec<f64> {
    dimensions
        .iter()
        .map(|d| map.get(d.as_ref()).copied().unwrap_or(0.0))
        .collect()
}

/// Indicator-style map over `dimensions`.
///
/// Each occurrence of a term adds `fill` (default `1 / terms.len()`).
/// With `logscale` every touched value `x` becomes `1 + ln x`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn dist_map<S: AsRef<str>>(
    terms: &[S],
    dimensions: &[S],
    fill: Option<f64>,
    logscale: bool,
) -> Distribution {
    let mut map: Distribution = dimensions
        .iter()
        .map(|d| (d.as_ref().to_string(), 0.0))
        .collect();
    if terms.is_empty() {
        return map;
    }
    let fill = fill.unwrap_or(1.0 / terms.len() as f64);
    for term in terms {
        *map.entry(term.as_ref().to_string()).or_insert(0.0) += fill;
    }
    if logscale {
        let touched: HashSet<&str> = terms.iter().map(|t| t.as_ref()).collect();
        for term in touched {
            if let Some(value) = map.get_mut(term) {
                if *value > 0.0 {
                    *value = 1.0 + value.ln();
                }
            }
        }
    }
    map
}

/// Pointwise product over the union of keys; a key missing on one side reads as 0.
#[must_use]
pub fn multiply(a: &Distribution, b: &Distribution) -> Distribution {
    a.keys()
        .chain(b.keys())
        .map(|k| {
            let product = a.get(k).copied().unwrap_or(0.0) * b.get(k).copied().unwrap_or(0.0);
            (k.clone(), product)
        })
        .collect()
}

/// Cosine similarity for every ordered pair of distinct term-set keys.
///
/// `distribution` runs once per set, in parallel; each call must be
/// independent of the others.
///
/// # Errors
/// The first error returned by `distribution`.
pub fn pairwise_similarities<S, F>(
    term_sets: &BTreeMap<String, Vec<String>>,
    dimensions: &[S],
    distribution: F,
) -> Result<BTreeMap<(String, String), f64>>
where
    S: AsRef<str> + Sync,
    F: Fn(&str, &[String]) -> Result<Distribution> + Sync,
{
    let vectors: HashMap<&str, Vec<f64>> = term_sets
        .par_iter()
        .map(|(key, terms)| {
            let dist = distribution(key, terms)?;
            Ok((key.as_str(), to_vector(&dist, dimensions)))
        })
        .collect::<Result<_>>()?;
    debug!("computed {} distributions", vectors.len());

    let mut sims = BTreeMap::new();
    for (a, va) in &vectors {
        for (b, vb) in &vectors {
            if a != b {
                sims.insert(((*a).to_string(), (*b).to_string()), cosine_similarity(va, vb));
            }
        }
    }
    Ok(sims)
}
