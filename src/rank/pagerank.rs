// src/rank/pagerank.rs
//! Personalized `PageRank` by power iteration.

use super::stochastic::{self, Transition};
use super::{ConditionalOptions, Distribution, NonConvergence, PageRankOptions};
use crate::error::{OntoRankError, Result};
use crate::graph::OntologyGraph;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Ranking engine holding one set of iteration options.
#[derive(Debug, Clone, Default)]
pub struct PageRank {
    options: PageRankOptions,
}

impl PageRank {
    #[must_use]
    pub fn new(options: PageRankOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &PageRankOptions {
        &self.options
    }

    /// Stationary distribution of a random surfer on `graph`.
    ///
    /// `personalization`, when given, must carry a value for exactly the
    /// graph's nodes. `nstart` seeds the first iterate.
    ///
    /// # Errors
    /// `InvalidGraphKind` for graphs with parallel edges, `InvalidPersonalization`
    /// or `InvalidStartVector` for bad vectors, and `ConvergenceFailure` when
    /// `max_iter` runs out under [`NonConvergence::Fail`].
    pub fn rank(
        &self,
        graph: &OntologyGraph,
        personalization: Option<&HashMap<String, f64>>,
        nstart: Option<&HashMap<String, f64>>,
    ) -> Result<Distribution> {
        if graph.is_empty() {
            return Ok(Distribution::new());
        }
        let transition = Transition::build(graph, self.options.weighting)?;
        let alpha = self.options.alpha;

        let vector = compute(&transition, &self.options, personalization, nstart, |prev, next| {
            for (u, row) in transition.rows.iter().enumerate() {
                for link in row {
                    next[link.target] += alpha * prev[u] * link.weight;
                }
            }
        })?;
        Ok(transition.to_distribution(&vector))
    }

    /// `PageRank` where edges labeled in `conditional.labels` pass on the
    /// static flow around their target instead of their source's mass.
    ///
    /// For a conditional edge `u -> v` the carried power is the static mass
    /// entering `v` (with `in_degree`) plus the static mass of `v`'s static
    /// successors weighted by `v`'s static out-links (with `out_degree`).
    /// `through` is accepted and has no effect. With no conditional labels
    /// this is exactly [`PageRank::rank`].
    ///
    /// # Errors
    /// Same as [`PageRank::rank`].
    pub fn rank_conditional(
        &self,
        graph: &OntologyGraph,
        conditional: &ConditionalOptions,
        personalization: Option<&HashMap<String, f64>>,
        nstart: Option<&HashMap<String, f64>>,
    ) -> Result<Distribution> {
        if graph.is_empty() {
            return Ok(Distribution::new());
        }
        let transition = Transition::build(graph, self.options.weighting)?;
        let split = SplitRows::new(&transition, conditional);
        let alpha = self.options.alpha;

        let vector = compute(&transition, &self.options, personalization, nstart, |prev, next| {
            for u in 0..transition.len() {
                for &(v, weight) in &split.fixed[u] {
                    next[v] += alpha * prev[u] * weight;
                }
                for &(v, weight) in &split.conditional[u] {
                    let power = split.static_power(v, prev, conditional);
                    next[v] += alpha * power * weight;
                }
            }
        })?;
        Ok(transition.to_distribution(&vector))
    }
}

/// Plain `PageRank` with the given options.
///
/// # Errors
/// See [`PageRank::rank`].
pub fn pagerank(
    graph: &OntologyGraph,
    options: &PageRankOptions,
    personalization: Option<&HashMap<String, f64>>,
) -> Result<Distribution> {
    PageRank::new(options.clone()).rank(graph, personalization, None)
}

/// Conditional `PageRank` with the given options.
///
/// # Errors
/// See [`PageRank::rank`].
pub fn pagerank_conditional(
    graph: &OntologyGraph,
    options: &PageRankOptions,
    conditional: &ConditionalOptions,
    personalization: Option<&HashMap<String, f64>>,
) -> Result<Distribution> {
    PageRank::new(options.clone()).rank_conditional(graph, conditional, personalization, None)
}

/// Normalized rows split by label into static and conditional links.
struct SplitRows {
    fixed: Vec<Vec<(usize, f64)>>,
    conditional: Vec<Vec<(usize, f64)>>,
    fixed_in: Vec<Vec<(usize, f64)>>,
}

impl SplitRows {
    fn new(transition: &Transition, options: &ConditionalOptions) -> Self {
        let n = transition.len();
        let mut fixed = vec![Vec::new(); n];
        let mut conditional = vec![Vec::new(); n];
        let mut fixed_in = vec![Vec::new(); n];

        for (u, row) in transition.rows.iter().enumerate() {
            for link in row {
                if options.labels.contains(&link.label) {
                    conditional[u].push((link.target, link.weight));
                } else {
                    fixed[u].push((link.target, link.weight));
                    fixed_in[link.target].push((u, link.weight));
                }
            }
        }

        Self {
            fixed,
            conditional,
            fixed_in,
        }
    }

    fn static_power(&self, v: usize, prev: &[f64], options: &ConditionalOptions) -> f64 {
        let mut power = 0.0;
        if options.in_degree {
            power += self.fixed_in[v]
                .iter()
                .map(|&(p, w)| prev[p] * w)
                .sum::<f64>();
        }
        if options.out_degree {
            power += self.fixed[v]
                .iter()
                .map(|&(s, w)| prev[s] * w)
                .sum::<f64>();
        }
        power
    }
}

/// Power iteration shared by both variants. `propagate` adds the
/// link-following mass of `prev` into the zeroed `next`.
#[allow(clippy::cast_precision_loss)]
fn compute<F>(
    transition: &Transition,
    options: &PageRankOptions,
    personalization: Option<&HashMap<String, f64>>,
    nstart: Option<&HashMap<String, f64>>,
    propagate: F,
) -> Result<Vec<f64>>
where
    F: Fn(&[f64], &mut [f64]),
{
    let mut ranks = stochastic::start_vector(transition, nstart)?;
    let teleport = stochastic::teleport_vector(transition, personalization)?;
    let eq_prob = 1.0 / transition.len() as f64;
    let mut error = f64::INFINITY;

    for iteration in 1..=options.max_iter {
        let next = iterate_once(transition, options.alpha, eq_prob, &ranks, &teleport, &propagate);
        error = stochastic::l1_distance(&next, &ranks);
        ranks = next;
        if error < options.tol {
            debug!("pagerank converged after {iteration} iterations (err {error:e})");
            return Ok(ranks);
        }
    }

    match options.on_non_convergence {
        NonConvergence::Fail => Err(OntoRankError::ConvergenceFailure {
            iterations: options.max_iter,
            error,
        }),
        NonConvergence::Warn => {
            warn!(
                "pagerank did not converge in {} iterations (err {error:e}); using last iterate",
                options.max_iter
            );
            Ok(ranks)
        }
    }
}

fn iterate_once<F>(
    transition: &Transition,
    alpha: f64,
    eq_prob: f64,
    ranks: &[f64],
    teleport: &[f64],
    propagate: &F,
) -> Vec<f64>
where
    F: Fn(&[f64], &mut [f64]),
{
    let dangle_sum: f64 =
        alpha * eq_prob * transition.dangling.iter().map(|&d| ranks[d]).sum::<f64>();

    let mut next = vec![0.0; transition.len()];
    propagate(ranks, &mut next);
    for (value, pers) in next.iter_mut().zip(teleport) {
        *value += dangle_sum + (1.0 - alpha) * pers;
    }

    stochastic::normalize(&mut next);
    next
}
