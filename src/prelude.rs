//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use adquirir::prelude::*;
//! ```

pub use crate::acquirer::{Acquirer, Outcome};
pub use crate::cluster::{ClusterBackend, ClusterMethod, ClusterParams};
pub use crate::config::{AcquirerConfig, ClusterMode, Metric, SizeSpec};
pub use crate::error::{AdquirirError, Result};
pub use crate::featurize::{feature_matrix, Featurizer};
pub use crate::heap::{BoundedMinHeap, ClusterHeap};
pub use crate::pareto::{NonDominatedFront, ParetoFront};
pub use crate::predictions::PredictionBatch;
pub use crate::rng::{Rng, XorShift64};
pub use crate::scoring::{Need, RandomScorer, ScoreContext, UtilityScorer};
