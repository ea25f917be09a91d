//! Acquisition configuration.
//!
//! [`AcquirerConfig`] is the full recognized option surface for an
//! acquisition run. It is plain data (serde-friendly); validation and
//! fraction resolution happen once, when an `Acquirer` is constructed, and
//! the resolved form is immutable afterwards.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{AdquirirError, Result};

/// A batch or initial-acquisition size, as an absolute count or a fraction
/// of the pool.
///
/// # Examples
///
/// ```
/// use adquirir::config::SizeSpec;
///
/// assert_eq!(SizeSpec::Count(25).resolve(1000).unwrap(), 25);
/// // fractions are ceiling-rounded against the pool size
/// assert_eq!(SizeSpec::Fraction(0.011).resolve(1000).unwrap(), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizeSpec {
    /// An absolute item count.
    Count(usize),
    /// A fraction of the pool size, in [0, 1].
    Fraction(f64),
}

impl SizeSpec {
    /// Resolve against a pool size, ceiling-rounding fractions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` for fractions outside [0, 1] or
    /// non-finite fractions.
    pub fn resolve(self, pool_size: usize) -> Result<usize> {
        match self {
            SizeSpec::Count(n) => Ok(n),
            SizeSpec::Fraction(f) => {
                if !f.is_finite() || !(0.0..=1.0).contains(&f) {
                    return Err(AdquirirError::invalid_hyperparameter(
                        "size fraction",
                        f,
                        "in [0, 1]",
                    ));
                }
                Ok((pool_size as f64 * f).ceil() as usize)
            }
        }
    }
}

/// Identifier of the utility-scoring strategy.
///
/// The metric-specific math lives entirely in the scoring collaborator; the
/// acquirer only carries the identifier through. Unknown names degrade to
/// [`Metric::Greedy`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Rank purely by predicted mean.
    #[default]
    Greedy,
    /// Upper confidence bound.
    Ucb,
    /// Expected improvement.
    Ei,
    /// Probability of improvement.
    Pi,
    /// Thompson sampling over stochastic predictions.
    Thompson,
    /// Random scores above a threshold.
    Threshold,
    /// Uniform random scores.
    Random,
    /// Non-dominated sorting (multi-objective).
    Nds,
}

impl Metric {
    /// Parse a metric name, falling back to the default on unknown input.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "greedy" => Metric::Greedy,
            "ucb" => Metric::Ucb,
            "ei" => Metric::Ei,
            "pi" => Metric::Pi,
            "thompson" => Metric::Thompson,
            "threshold" => Metric::Threshold,
            "random" => Metric::Random,
            "nds" => Metric::Nds,
            other => {
                warn!("unrecognized metric {other:?}; falling back to greedy");
                Metric::Greedy
            }
        }
    }
}

/// Which clustering policy diversifies batch selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterMode {
    /// Plain bounded top-k, no clustering.
    #[default]
    None,
    /// Cluster the superset by predicted objective vectors.
    Objective,
    /// Cluster the superset by structural feature vectors.
    Feature,
    /// Half objective-space, half feature-space.
    Hybrid,
}

impl ClusterMode {
    /// Parse a mode name, falling back to [`ClusterMode::None`] on unknown
    /// input. Accepts the legacy aliases `objs`, `fps`, and `both`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "none" => ClusterMode::None,
            "objective" | "objs" => ClusterMode::Objective,
            "feature" | "fps" => ClusterMode::Feature,
            "hybrid" | "both" => ClusterMode::Hybrid,
            other => {
                warn!("unrecognized cluster mode {other:?}; proceeding with top-k batching");
                ClusterMode::None
            }
        }
    }

    /// Whether any clustering is enabled.
    #[must_use]
    pub fn is_clustered(self) -> bool {
        self != ClusterMode::None
    }
}

/// Full configuration surface for an [`Acquirer`](crate::acquirer::Acquirer).
///
/// Fractional sizes are resolved to counts (ceiling-rounded against
/// `pool_size`) when the acquirer is constructed; out-of-range values are
/// rejected at that point.
///
/// # Examples
///
/// ```
/// use adquirir::config::{AcquirerConfig, SizeSpec, Metric};
///
/// let config = AcquirerConfig {
///     pool_size: 10_000,
///     init_size: SizeSpec::Fraction(0.01),
///     batch_sizes: vec![SizeSpec::Count(100)],
///     metric: Metric::Ucb,
///     ..AcquirerConfig::new(10_000)
/// };
/// assert_eq!(config.pool_size, 10_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquirerConfig {
    /// Size of the candidate pool.
    pub pool_size: usize,
    /// Number (or fraction) of items to acquire before any model exists.
    pub init_size: SizeSpec,
    /// Per-round batch sizes; the final entry repeats past the schedule end.
    pub batch_sizes: Vec<SizeSpec>,
    /// Utility-scoring strategy identifier.
    pub metric: Metric,
    /// Objective dimensionality (1 = single-objective).
    pub dim: usize,
    /// Nadir point for multi-objective normalization.
    pub nadir: Vec<f64>,
    /// Fraction of each batch forced to random selection.
    pub epsilon: f64,
    /// Beta hyperparameter (bound-based metrics).
    pub beta: f64,
    /// Xi hyperparameter (improvement-based metrics).
    pub xi: f64,
    /// Threshold hyperparameter (threshold-based metrics).
    pub threshold: f64,
    /// Whether predictions are produced by stochastic means.
    pub stochastic_preds: bool,
    /// Initial annealing temperature, if temperature rescaling is used.
    pub temp_i: Option<f64>,
    /// Final annealing temperature.
    pub temp_f: f64,
    /// Seed for the acquirer-owned RNG.
    pub seed: u64,
    /// Progress-reporting verbosity (0 = quiet).
    pub verbose: u8,
    /// Batch-diversification policy.
    pub cluster_mode: ClusterMode,
    /// Clustering superset size; defaults to 10x the first batch size when
    /// clustering is enabled and this is unset. Ignored when clustering is
    /// disabled.
    pub cluster_superset: Option<usize>,
}

impl AcquirerConfig {
    /// Configuration with the stock defaults for a pool of `pool_size`
    /// items: 1% initial batch, 1% per-round batches, greedy scoring, no
    /// exploration noise, no clustering.
    #[must_use]
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            init_size: SizeSpec::Fraction(0.01),
            batch_sizes: vec![SizeSpec::Fraction(0.01)],
            metric: Metric::Greedy,
            dim: 1,
            nadir: vec![0.0],
            epsilon: 0.0,
            beta: 2.0,
            xi: 0.01,
            threshold: f64::NEG_INFINITY,
            stochastic_preds: false,
            temp_i: None,
            temp_f: 1.0,
            seed: 42,
            verbose: 0,
            cluster_mode: ClusterMode::None,
            cluster_superset: None,
        }
    }
}

/// Configuration after validation and fraction resolution. Immutable for
/// the lifetime of the acquirer that owns it.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub pool_size: usize,
    pub init_size: usize,
    pub batch_sizes: Vec<usize>,
    pub metric: Metric,
    pub dim: usize,
    pub nadir: Vec<f64>,
    pub epsilon: f64,
    pub beta: f64,
    pub xi: f64,
    pub threshold: f64,
    pub stochastic_preds: bool,
    pub temp_i: Option<f64>,
    pub temp_f: f64,
    pub seed: u64,
    pub verbose: u8,
    pub cluster_mode: ClusterMode,
    pub cluster_superset: Option<usize>,
}

impl ResolvedConfig {
    /// Validate and resolve a raw configuration.
    pub(crate) fn try_from_config(config: &AcquirerConfig) -> Result<Self> {
        if config.dim < 1 {
            return Err(AdquirirError::invalid_hyperparameter(
                "dim",
                config.dim,
                ">= 1",
            ));
        }
        if !config.epsilon.is_finite() || !(0.0..=1.0).contains(&config.epsilon) {
            return Err(AdquirirError::invalid_hyperparameter(
                "epsilon",
                config.epsilon,
                "in [0, 1]",
            ));
        }
        if config.batch_sizes.is_empty() {
            return Err(AdquirirError::EmptyInput {
                context: "batch_sizes".to_string(),
            });
        }

        let init_size = config.init_size.resolve(config.pool_size)?;
        let batch_sizes = config
            .batch_sizes
            .iter()
            .map(|bs| bs.resolve(config.pool_size))
            .collect::<Result<Vec<usize>>>()?;

        // the superset size only means something under a clustered mode
        let cluster_superset = if config.cluster_mode.is_clustered() {
            Some(config.cluster_superset.unwrap_or(10 * batch_sizes[0]))
        } else {
            None
        };

        Ok(Self {
            pool_size: config.pool_size,
            init_size,
            batch_sizes,
            metric: config.metric,
            dim: config.dim,
            nadir: config.nadir.clone(),
            epsilon: config.epsilon,
            beta: config.beta,
            xi: config.xi,
            threshold: config.threshold,
            stochastic_preds: config.stochastic_preds,
            temp_i: config.temp_i,
            temp_f: config.temp_f,
            seed: config.seed,
            verbose: config.verbose,
            cluster_mode: config.cluster_mode,
            cluster_superset,
        })
    }

    /// Batch size for round `t`; the schedule repeats its final value.
    pub(crate) fn batch_size(&self, t: usize) -> usize {
        *self
            .batch_sizes
            .get(t)
            .unwrap_or_else(|| self.batch_sizes.last().expect("schedule is non-empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_resolution_ceils() {
        assert_eq!(SizeSpec::Fraction(0.01).resolve(1000).unwrap(), 10);
        assert_eq!(SizeSpec::Fraction(0.011).resolve(1000).unwrap(), 11);
        assert_eq!(SizeSpec::Fraction(0.0001).resolve(5).unwrap(), 1);
        assert_eq!(SizeSpec::Fraction(0.0).resolve(1000).unwrap(), 0);
        assert_eq!(SizeSpec::Fraction(1.0).resolve(17).unwrap(), 17);
    }

    #[test]
    fn test_fraction_out_of_range_rejected() {
        assert!(SizeSpec::Fraction(1.5).resolve(100).is_err());
        assert!(SizeSpec::Fraction(-0.1).resolve(100).is_err());
        assert!(SizeSpec::Fraction(f64::NAN).resolve(100).is_err());
    }

    #[test]
    fn test_metric_from_name() {
        assert_eq!(Metric::from_name("ucb"), Metric::Ucb);
        assert_eq!(Metric::from_name("ei"), Metric::Ei);
        assert_eq!(Metric::from_name("nds"), Metric::Nds);
        // unknown names degrade to the default instead of failing
        assert_eq!(Metric::from_name("does-not-exist"), Metric::Greedy);
    }

    #[test]
    fn test_cluster_mode_aliases() {
        assert_eq!(ClusterMode::from_name("objs"), ClusterMode::Objective);
        assert_eq!(ClusterMode::from_name("fps"), ClusterMode::Feature);
        assert_eq!(ClusterMode::from_name("both"), ClusterMode::Hybrid);
        assert_eq!(ClusterMode::from_name("garbage"), ClusterMode::None);
    }

    #[test]
    fn test_resolved_config_defaults() {
        let config = AcquirerConfig::new(1000);
        let resolved = ResolvedConfig::try_from_config(&config).unwrap();
        assert_eq!(resolved.init_size, 10);
        assert_eq!(resolved.batch_sizes, vec![10]);
        assert_eq!(resolved.cluster_superset, None);
    }

    #[test]
    fn test_superset_defaults_to_10x_first_batch() {
        let config = AcquirerConfig {
            cluster_mode: ClusterMode::Objective,
            ..AcquirerConfig::new(1000)
        };
        let resolved = ResolvedConfig::try_from_config(&config).unwrap();
        assert_eq!(resolved.cluster_superset, Some(100));
    }

    #[test]
    fn test_explicit_superset_kept() {
        let config = AcquirerConfig {
            cluster_mode: ClusterMode::Feature,
            cluster_superset: Some(250),
            ..AcquirerConfig::new(1000)
        };
        let resolved = ResolvedConfig::try_from_config(&config).unwrap();
        assert_eq!(resolved.cluster_superset, Some(250));
    }

    #[test]
    fn test_superset_cleared_when_unclustered() {
        let config = AcquirerConfig {
            cluster_mode: ClusterMode::None,
            cluster_superset: Some(250),
            ..AcquirerConfig::new(1000)
        };
        let resolved = ResolvedConfig::try_from_config(&config).unwrap();
        assert_eq!(resolved.cluster_superset, None);
    }

    #[test]
    fn test_epsilon_out_of_range_rejected() {
        for eps in [-0.1, 1.1, f64::NAN] {
            let config = AcquirerConfig {
                epsilon: eps,
                ..AcquirerConfig::new(100)
            };
            assert!(ResolvedConfig::try_from_config(&config).is_err());
        }
    }

    #[test]
    fn test_zero_dim_rejected() {
        let config = AcquirerConfig {
            dim: 0,
            ..AcquirerConfig::new(100)
        };
        assert!(ResolvedConfig::try_from_config(&config).is_err());
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let config = AcquirerConfig {
            batch_sizes: vec![],
            ..AcquirerConfig::new(100)
        };
        assert!(ResolvedConfig::try_from_config(&config).is_err());
    }

    #[test]
    fn test_schedule_repeats_final_value() {
        let config = AcquirerConfig {
            batch_sizes: vec![
                SizeSpec::Count(10),
                SizeSpec::Count(20),
                SizeSpec::Count(5),
            ],
            ..AcquirerConfig::new(100)
        };
        let resolved = ResolvedConfig::try_from_config(&config).unwrap();
        assert_eq!(resolved.batch_size(0), 10);
        assert_eq!(resolved.batch_size(1), 20);
        assert_eq!(resolved.batch_size(2), 5);
        assert_eq!(resolved.batch_size(3), 5);
        assert_eq!(resolved.batch_size(1000), 5);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = AcquirerConfig {
            metric: Metric::Ei,
            cluster_mode: ClusterMode::Hybrid,
            epsilon: 0.1,
            // JSON has no -inf; use a finite threshold for the round trip
            threshold: -1.0,
            ..AcquirerConfig::new(500)
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: AcquirerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pool_size, 500);
        assert_eq!(back.metric, Metric::Ei);
        assert_eq!(back.cluster_mode, ClusterMode::Hybrid);
        assert!((back.epsilon - 0.1).abs() < 1e-12);
    }
}
