//! Observed outcomes for explored items.

use serde::{Deserialize, Serialize};

/// The evaluated outcome of one explored item: a scalar for
/// single-objective searches, a vector for multi-objective ones.
///
/// NaN components mark failed evaluations. They are treated as
/// negative-infinity when computing the single-objective reference max, and
/// any vector containing a NaN is excluded from Pareto-front updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// A single-objective outcome.
    Scalar(f64),
    /// A multi-objective outcome.
    Vector(Vec<f64>),
}

impl Outcome {
    /// The outcome as a scalar, with NaN (and shape mismatches) mapped to
    /// `-inf` so failed evaluations never count as the current max.
    #[must_use]
    pub fn scalar_or_neg_inf(&self) -> f64 {
        let value = match self {
            Outcome::Scalar(y) => *y,
            Outcome::Vector(v) if v.len() == 1 => v[0],
            Outcome::Vector(_) => f64::NAN,
        };
        if value.is_nan() {
            f64::NEG_INFINITY
        } else {
            value
        }
    }

    /// The outcome as a fully defined `dim`-vector, or `None` if any
    /// component is NaN or the shape disagrees.
    #[must_use]
    pub fn objective_row(&self, dim: usize) -> Option<Vec<f64>> {
        let v = match self {
            Outcome::Scalar(y) => std::slice::from_ref(y),
            Outcome::Vector(v) => v.as_slice(),
        };
        if v.len() != dim || v.iter().any(|y| y.is_nan()) {
            return None;
        }
        Some(v.to_vec())
    }
}

impl From<f64> for Outcome {
    fn from(y: f64) -> Self {
        Outcome::Scalar(y)
    }
}

impl From<Vec<f64>> for Outcome {
    fn from(v: Vec<f64>) -> Self {
        Outcome::Vector(v)
    }
}
