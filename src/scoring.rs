//! Utility-scoring collaborator contract.
//!
//! The acquirer never computes metric math itself: it hands the scoring
//! collaborator the raw predictions plus whatever round context the metric
//! may need, and treats the returned score array as opaque, aligned
//! index-for-index with the input items. [`RandomScorer`] is the built-in
//! fallback that scores uniformly at random.

use crate::config::Metric;
use crate::pareto::ParetoFront;
use crate::predictions::PredictionBatch;
use crate::rng::{Rng, XorShift64};

/// An input a scoring strategy declares it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Need {
    /// Predicted means.
    Means,
    /// Predicted variances.
    Variances,
    /// The tracked Pareto front.
    Pareto,
}

/// Everything a scorer may read for one round of utility computation.
///
/// Borrowed from the acquirer for the duration of the `score` call.
pub struct ScoreContext<'a> {
    /// Predicted means/variances for the items being scored.
    pub predictions: &'a PredictionBatch,
    /// Tracked Pareto front (meaningful when `dim > 1`).
    pub pareto_front: &'a dyn ParetoFront,
    /// The k-th largest explored outcome, or `-inf` before any exploration.
    pub current_max: f64,
    /// Threshold hyperparameter.
    pub threshold: f64,
    /// Beta hyperparameter.
    pub beta: f64,
    /// Xi hyperparameter.
    pub xi: f64,
    /// Whether predictions were produced stochastically.
    pub stochastic: bool,
    /// Nadir point for multi-objective normalization.
    pub nadir: &'a [f64],
    /// How many top-scored items the caller will consider downstream.
    pub top_n_scored: usize,
}

/// Contract for the external utility-scoring module.
pub trait UtilityScorer {
    /// Which inputs the given metric requires.
    fn needs(&self, metric: Metric) -> &'static [Need];

    /// One scalar utility per item, aligned with the prediction order.
    fn score(&mut self, metric: Metric, ctx: &ScoreContext<'_>) -> Vec<f64>;

    /// `n` uniform random scores, for rounds where no model exists.
    fn random(&mut self, n: usize) -> Vec<f64>;
}

/// Fallback scorer: every metric degrades to uniform random scores.
///
/// Owns its RNG so repeated runs under the same seed reproduce exactly.
///
/// # Examples
///
/// ```
/// use adquirir::scoring::{RandomScorer, UtilityScorer};
///
/// let mut scorer = RandomScorer::new(42);
/// let scores = scorer.random(100);
/// assert_eq!(scores.len(), 100);
/// assert!(scores.iter().all(|u| (0.0..1.0).contains(u)));
/// ```
#[derive(Debug, Clone)]
pub struct RandomScorer {
    rng: XorShift64,
}

impl RandomScorer {
    /// Create a seeded random scorer.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: XorShift64::new(seed),
        }
    }
}

impl UtilityScorer for RandomScorer {
    fn needs(&self, metric: Metric) -> &'static [Need] {
        match metric {
            Metric::Random => &[],
            Metric::Greedy | Metric::Threshold => &[Need::Means],
            Metric::Ucb | Metric::Ei | Metric::Pi | Metric::Thompson => {
                &[Need::Means, Need::Variances]
            }
            Metric::Nds => &[Need::Means, Need::Pareto],
        }
    }

    fn score(&mut self, _metric: Metric, ctx: &ScoreContext<'_>) -> Vec<f64> {
        self.random(ctx.predictions.len())
    }

    fn random(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.rng.gen_f64()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::NonDominatedFront;

    #[test]
    fn test_needs_by_metric() {
        let scorer = RandomScorer::new(0);
        assert!(scorer.needs(Metric::Random).is_empty());
        assert_eq!(scorer.needs(Metric::Greedy), &[Need::Means]);
        assert!(scorer.needs(Metric::Ucb).contains(&Need::Variances));
        assert!(scorer.needs(Metric::Nds).contains(&Need::Pareto));
    }

    #[test]
    fn test_score_aligned_with_input() {
        let preds =
            PredictionBatch::single(vec![0.0; 7], vec![0.0; 7]).unwrap();
        let front = NonDominatedFront::new(1);
        let ctx = ScoreContext {
            predictions: &preds,
            pareto_front: &front,
            current_max: f64::NEG_INFINITY,
            threshold: f64::NEG_INFINITY,
            beta: 2.0,
            xi: 0.01,
            stochastic: false,
            nadir: &[0.0],
            top_n_scored: 7,
        };
        let mut scorer = RandomScorer::new(1);
        assert_eq!(scorer.score(Metric::Greedy, &ctx).len(), 7);
    }

    #[test]
    fn test_random_deterministic_under_seed() {
        let mut a = RandomScorer::new(9);
        let mut b = RandomScorer::new(9);
        assert_eq!(a.random(32), b.random(32));
    }
}
