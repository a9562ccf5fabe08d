// src/evaluate.rs
//! Ranking-quality measures for batch runs against known answers.

/// Tie-aware rank of every answer in `order`, sorted ascending.
///
/// `order` is candidate/score pairs sorted by descending score. Candidates
/// sharing a score form one group; an answer inside a group of `k` ranks at
/// the group's start plus `(k - 1) / 2`. Returns `None` if an answer is not
/// in `order`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn answer_ranks<S: AsRef<str>>(order: &[(String, f64)], answers: &[S]) -> Option<Vec<f64>> {
    let mut ranks = Vec::with_capacity(answers.len());
    for answer in answers {
        let answer = answer.as_ref();
        let mut rank = 0.0;
        let mut found = false;
        for group in order.chunk_by(|a, b| a.1 == b.1) {
            if group.iter().any(|(candidate, _)| candidate == answer) {
                rank += 1.0 + (group.len() - 1) as f64 / 2.0;
                found = true;
                break;
            }
            rank += group.len() as f64;
        }
        if !found {
            return None;
        }
        ranks.push(rank);
    }
    ranks.sort_by(f64::total_cmp);
    Some(ranks)
}

/// Mean of `rank / ideal_rank` and mean of `2 ln(rank / ideal_rank)`,
/// where the i-th smallest rank ideally sits at position i.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_rank(ranks: &[f64]) -> Option<(f64, f64)> {
    if ranks.is_empty() {
        return None;
    }
    let ratios: Vec<f64> = ranks
        .iter()
        .enumerate()
        .map(|(i, rank)| rank / (i + 1) as f64)
        .collect();
    let n = ratios.len() as f64;
    let mean = ratios.iter().sum::<f64>() / n;
    let log_mean = ratios.iter().map(|r| 2.0 * r.ln()).sum::<f64>() / n;
    Some((mean, log_mean))
}

/// Answers ranked within `threshold`, over the mean of `threshold` and the
/// answer count.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn f_measure(threshold: usize, ranks: &[f64], num_answers: usize) -> f64 {
    let recalled = ranks.iter().filter(|&&r| r <= threshold as f64).count();
    let denominator = 0.5 * (threshold + num_answers) as f64;
    if denominator == 0.0 {
        return 0.0;
    }
    recalled as f64 / denominator
}
