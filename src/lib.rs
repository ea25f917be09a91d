//! Adquirir: batched candidate acquisition for pool-based active learning.
//!
//! Adquirir implements the acquisition step of an active-learning
//! (Bayesian-optimization-style) loop searching a very large combinatorial
//! pool under a limited evaluation budget: given noisy per-item predictions
//! from an external surrogate model, it selects which unscored candidates to
//! evaluate next, round after round, in bounded memory.
//!
//! # Quick Start
//!
//! ```
//! use adquirir::prelude::*;
//! use std::collections::HashMap;
//!
//! let config = AcquirerConfig {
//!     init_size: SizeSpec::Count(10),
//!     batch_sizes: vec![SizeSpec::Count(10)],
//!     ..AcquirerConfig::new(1_000)
//! };
//! let mut acquirer: Acquirer<u32> = Acquirer::new(config).unwrap();
//!
//! // Round 0: no surrogate yet, random-but-bounded selection.
//! let initial = acquirer.acquire_initial(0..1_000);
//! assert_eq!(initial.len(), 10);
//!
//! // Later rounds: rank by predicted utility, skipping explored items.
//! let explored: HashMap<u32, Outcome> =
//!     initial.iter().map(|&x| (x, Outcome::Scalar(0.0))).collect();
//! let means: Vec<f64> = (0..1_000).map(f64::from).collect();
//! let preds = PredictionBatch::single(means, vec![0.0; 1_000]).unwrap();
//! let batch = acquirer.acquire_batch(0..1_000, &preds, &explored, 1, None, 0);
//! assert_eq!(batch.len(), 10);
//! assert!(batch.iter().all(|x| !explored.contains_key(x)));
//! ```
//!
//! # Modules
//!
//! - [`acquirer`]: The core selection engine (initial + per-round batches)
//! - [`config`]: Configuration surface, size specs, metric and mode enums
//! - [`heap`]: Bounded top-k selection primitives
//! - [`scoring`]: Utility-scoring collaborator contract + random fallback
//! - [`pareto`]: Pareto-front collaborator contract + basic tracker
//! - [`cluster`]: Clustering-backend collaborator contract
//! - [`featurize`]: Feature-matrix builder collaborator contract
//! - [`predictions`]: Per-item surrogate prediction storage
//! - [`rng`]: Deterministic random number generation
//! - [`error`]: Error types

pub mod acquirer;
pub mod cluster;
pub mod config;
pub mod error;
pub mod featurize;
pub mod heap;
pub mod pareto;
pub mod predictions;
pub mod prelude;
pub mod rng;
pub mod scoring;

pub use acquirer::{Acquirer, Outcome};
pub use config::{AcquirerConfig, ClusterMode, Metric, SizeSpec};
pub use error::{AdquirirError, Result};
