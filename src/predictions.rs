//! Per-item surrogate predictions.
//!
//! [`PredictionBatch`] holds the predicted means and variances for one round
//! of acquisition as row-major `n x dim` storage, shared between utility
//! scoring and objective-space clustering.

use crate::error::{AdquirirError, Result};

/// Predicted means and variances for `n` items over `dim` objectives.
///
/// # Examples
///
/// ```
/// use adquirir::predictions::PredictionBatch;
///
/// let preds = PredictionBatch::single(vec![0.1, 0.5, 0.9], vec![0.01; 3]).unwrap();
/// assert_eq!(preds.len(), 3);
/// assert_eq!(preds.mean_row(1), &[0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct PredictionBatch {
    means: Vec<f64>,
    variances: Vec<f64>,
    dim: usize,
}

impl PredictionBatch {
    /// Build a batch from row-major means and variances over `dim`
    /// objectives.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the arrays disagree in length or are
    /// not a whole number of `dim`-sized rows, and `InvalidHyperparameter`
    /// for `dim == 0`.
    pub fn new(means: Vec<f64>, variances: Vec<f64>, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(AdquirirError::invalid_hyperparameter("dim", dim, ">= 1"));
        }
        if means.len() != variances.len() {
            return Err(AdquirirError::dimension_mismatch(
                "means",
                means.len(),
                variances.len(),
            ));
        }
        if means.len() % dim != 0 {
            return Err(AdquirirError::DimensionMismatch {
                expected: format!("a multiple of dim={dim}"),
                actual: format!("{}", means.len()),
            });
        }
        Ok(Self {
            means,
            variances,
            dim,
        })
    }

    /// Build a single-objective batch.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the arrays disagree in length.
    pub fn single(means: Vec<f64>, variances: Vec<f64>) -> Result<Self> {
        Self::new(means, variances, 1)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.means.len() / self.dim
    }

    /// Whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Objective dimensionality.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Predicted mean vector for item `i`.
    #[must_use]
    pub fn mean_row(&self, i: usize) -> &[f64] {
        &self.means[i * self.dim..(i + 1) * self.dim]
    }

    /// Predicted variance vector for item `i`.
    #[must_use]
    pub fn var_row(&self, i: usize) -> &[f64] {
        &self.variances[i * self.dim..(i + 1) * self.dim]
    }

    /// The full row-major means array.
    #[must_use]
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// The full row-major variances array.
    #[must_use]
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }
}
