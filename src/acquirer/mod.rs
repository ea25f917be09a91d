//! Batched candidate acquisition over a large pool.
//!
//! The [`Acquirer`] implements the acquisition step of a pool-based
//! active-learning loop: an initial random-but-bounded batch before any
//! model exists, then per-round conversion of predicted mean/variance into
//! utility scores, epsilon-greedy exploration noise, and bounded top-k
//! selection — optionally diversified by clustering — while never
//! re-selecting explored items.
//!
//! Selection is single-threaded and synchronous; clustering is delegated to
//! the [`ClusterBackend`] collaborator as one blocking call per round.
//!
//! # Examples
//!
//! ```
//! use adquirir::prelude::*;
//! use std::collections::HashMap;
//!
//! let config = AcquirerConfig {
//!     init_size: SizeSpec::Count(4),
//!     batch_sizes: vec![SizeSpec::Count(4)],
//!     ..AcquirerConfig::new(100)
//! };
//! let mut acquirer: Acquirer<u32> = Acquirer::new(config).unwrap();
//!
//! // Round 0: no model yet, random-but-bounded initial batch.
//! let initial = acquirer.acquire_initial(0..100);
//! assert_eq!(initial.len(), 4);
//!
//! // Round 1: select by predicted utility, skipping explored items.
//! let explored: HashMap<u32, Outcome> =
//!     initial.iter().map(|&x| (x, Outcome::Scalar(0.5))).collect();
//! let means: Vec<f64> = (0..100).map(f64::from).collect();
//! let preds = PredictionBatch::single(means, vec![0.0; 100]).unwrap();
//! let batch = acquirer.acquire_batch(0..100, &preds, &explored, 1, None, 0);
//! assert_eq!(batch.len(), 4);
//! ```

mod outcome;
#[cfg(test)]
mod tests_proptests;

pub use outcome::Outcome;

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use log::{debug, info, warn};

use crate::cluster::{available_parallelism, ClusterBackend, ClusterMethod, ClusterParams};
use crate::config::{AcquirerConfig, ClusterMode, Metric, ResolvedConfig};
use crate::error::Result;
use crate::featurize::{feature_matrix, Featurizer};
use crate::heap::{BoundedMinHeap, ClusterHeap};
use crate::pareto::{NonDominatedFront, ParetoFront};
use crate::predictions::PredictionBatch;
use crate::rng::{Rng, XorShift64};
use crate::scoring::{Need, RandomScorer, ScoreContext, UtilityScorer};

/// Which basis a single-mode clustered selection partitions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClusterBasis {
    /// Predicted objective vectors of the superset items.
    Objective,
    /// Structural feature vectors of the superset items.
    Feature,
}

/// Selects which pool items to evaluate next, round after round.
///
/// Constructed once per active-learning run. Owns its RNG, its scorer and
/// its Pareto front; the explored set is owned by the caller and read-only
/// here. Not safe for concurrent calls on one instance — the loop drives it
/// serially.
pub struct Acquirer<T> {
    config: ResolvedConfig,
    scorer: Box<dyn UtilityScorer>,
    backend: Option<Box<dyn ClusterBackend>>,
    pareto_front: Box<dyn ParetoFront>,
    rng: XorShift64,
    _marker: std::marker::PhantomData<T>,
}

impl<T> std::fmt::Debug for Acquirer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Acquirer")
            .field("config", &self.config)
            .field("has_backend", &self.backend.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Eq + Hash + Clone> Acquirer<T> {
    /// Validate a configuration and build an acquirer with the default
    /// collaborators: the random-scoring fallback and a basic Pareto
    /// tracker, no clustering backend.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` when `epsilon` is outside `[0, 1]`,
    /// `dim < 1`, or any size fraction is outside `[0, 1]`, and
    /// `EmptyInput` for an empty batch-size schedule.
    pub fn new(config: AcquirerConfig) -> Result<Self> {
        let config = ResolvedConfig::try_from_config(&config)?;
        let scorer = Box::new(RandomScorer::new(config.seed));
        let pareto_front = Box::new(NonDominatedFront::new(config.dim));
        let rng = XorShift64::new(config.seed);
        Ok(Self {
            config,
            scorer,
            backend: None,
            pareto_front,
            rng,
            _marker: std::marker::PhantomData,
        })
    }

    /// Replace the scoring collaborator.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Box<dyn UtilityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Attach a clustering backend (required for any clustered mode).
    #[must_use]
    pub fn with_backend(mut self, backend: Box<dyn ClusterBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Replace the Pareto-front tracker.
    #[must_use]
    pub fn with_pareto_front(mut self, front: Box<dyn ParetoFront>) -> Self {
        self.pareto_front = front;
        self
    }

    /// Size of the pool this acquirer works on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.config.pool_size
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.config.pool_size == 0
    }

    /// The configured scoring metric.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.config.metric
    }

    /// The configured clustering mode.
    #[must_use]
    pub fn cluster_mode(&self) -> ClusterMode {
        self.config.cluster_mode
    }

    /// The inputs the configured metric requires from the caller.
    #[must_use]
    pub fn needs(&self) -> &'static [Need] {
        self.scorer.needs(self.config.metric)
    }

    /// The tracked Pareto front.
    #[must_use]
    pub fn pareto_front(&self) -> &dyn ParetoFront {
        &*self.pareto_front
    }

    /// Batch size for round `t`. The schedule repeats its final value, so
    /// this is total over all `t`.
    #[must_use]
    pub fn batch_size(&self, t: usize) -> usize {
        self.config.batch_size(t)
    }

    /// Acquire the initial batch, before any surrogate model exists.
    ///
    /// Every item gets a uniformly random utility and selection is a
    /// bounded min-heap of capacity `init_size`, so the result is exactly
    /// the `init_size` items with the greatest random scores (or the whole
    /// pool when it is smaller). Order is unspecified (heap order).
    pub fn acquire_initial<I>(&mut self, xs: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let scores = self.scorer.random(self.config.pool_size);
        let mut heap = BoundedMinHeap::new(self.config.init_size);
        for (x, u) in xs.into_iter().zip(scores) {
            heap.push(u, x);
        }

        if self.config.verbose > 0 {
            info!("selected {} initial samples", heap.len());
        }
        heap.into_entries().into_iter().map(|(_, x)| x).collect()
    }

    /// Acquire the initial batch with per-cluster proportional allocation.
    ///
    /// `cluster_ids` is parallel to `xs`; `cluster_sizes` maps each cluster
    /// id to its total population. Each cluster gets its own bounded heap of
    /// capacity `ceil(init_size * cluster_size / pool_size)`, so clusters
    /// are represented roughly in proportion to their share of the pool.
    /// Items whose cluster id is absent from `cluster_sizes` are skipped.
    pub fn acquire_initial_clustered<I, C>(
        &mut self,
        xs: I,
        cluster_ids: C,
        cluster_sizes: &HashMap<usize, usize>,
    ) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        C: IntoIterator<Item = usize>,
    {
        let scores = self.scorer.random(self.config.pool_size);
        let pool_size = self.config.pool_size.max(1);

        let mut heaps: HashMap<usize, BoundedMinHeap<T>> = cluster_sizes
            .iter()
            .map(|(&cid, &cluster_size)| {
                let capacity = (self.config.init_size as f64 * cluster_size as f64
                    / pool_size as f64)
                    .ceil() as usize;
                (cid, BoundedMinHeap::new(capacity))
            })
            .collect();

        for ((x, u), cid) in xs.into_iter().zip(scores).zip(cluster_ids) {
            match heaps.get_mut(&cid) {
                Some(heap) => heap.push(u, x),
                None => warn!("item with unknown cluster id {cid} skipped"),
            }
        }

        let mut selected: Vec<T> = Vec::new();
        let mut cids: Vec<usize> = heaps.keys().copied().collect();
        cids.sort_unstable();
        for cid in cids {
            if let Some(heap) = heaps.remove(&cid) {
                selected.extend(heap.into_entries().into_iter().map(|(_, x)| x));
            }
        }

        if self.config.verbose > 0 {
            info!("selected {} initial samples", selected.len());
        }
        selected
    }

    /// Acquire one batch of unexplored items for round `t`.
    ///
    /// `predictions` is aligned index-for-index with `xs`; `explored` maps
    /// already-evaluated items to their outcomes; `k` is the top-k target
    /// count used for the single-objective reference max. `featurizer` is
    /// only needed for feature-space clustering modes.
    ///
    /// Per-round anomalies (missing backend or featurizer, backend failure)
    /// degrade to plain top-k selection with a logged warning — a round
    /// never aborts the campaign. Result order is unspecified.
    pub fn acquire_batch<I>(
        &mut self,
        xs: I,
        predictions: &PredictionBatch,
        explored: &HashMap<T, Outcome>,
        k: usize,
        featurizer: Option<&dyn Featurizer<T>>,
        t: usize,
    ) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let current_max = self.update_round_state(explored, k);
        let batch_size = self.config.batch_size(t);
        let begin = Instant::now();

        let top_n_scored = self.config.cluster_superset.unwrap_or(batch_size);
        let ctx = ScoreContext {
            predictions,
            pareto_front: &*self.pareto_front,
            current_max,
            threshold: self.config.threshold,
            beta: self.config.beta,
            xi: self.config.xi,
            stochastic: self.config.stochastic_preds,
            nadir: &self.config.nadir,
            top_n_scored,
        };
        let mut utilities = self.scorer.score(self.config.metric, &ctx);
        debug!(
            "utility calculation took {:.2?}",
            begin.elapsed()
        );

        // epsilon-greedy: force a fraction of the batch to pure exploration
        let n_forced = (batch_size as f64 * self.config.epsilon).floor() as usize;
        for i in self.rng.sample_indices(utilities.len(), n_forced) {
            utilities[i] = f64::INFINITY;
        }

        let selected = match self.config.cluster_mode {
            ClusterMode::None => {
                let heap = Self::top_k(
                    xs.into_iter(),
                    &utilities,
                    batch_size,
                    |x| explored.contains_key(x),
                );
                heap.into_entries().into_iter().map(|(_, x)| x).collect()
            }
            mode => {
                let xs: Vec<T> = xs.into_iter().collect();
                self.dispatch_clustered(
                    mode, &xs, &utilities, predictions, explored, featurizer, batch_size,
                )
            }
        };

        if self.config.verbose > 0 {
            info!("selected {} new samples", selected.len());
        }
        debug!("batch acquisition took {:.2?}", begin.elapsed());
        selected
    }

    /// Reference-max computation and Pareto bookkeeping for one round.
    ///
    /// Single-objective: the k-th largest explored outcome with NaN treated
    /// as `-inf`. Multi-objective: NaN-free outcomes are merged into the
    /// tracked Pareto front and the reference max stays `-inf`.
    fn update_round_state(&mut self, explored: &HashMap<T, Outcome>, k: usize) -> f64 {
        if explored.is_empty() {
            return f64::NEG_INFINITY;
        }

        if self.config.dim == 1 {
            let mut ys: Vec<f64> = explored
                .values()
                .map(Outcome::scalar_or_neg_inf)
                .collect();
            ys.sort_by(|a, b| b.total_cmp(a));
            let k = k.clamp(1, ys.len());
            ys[k - 1]
        } else {
            let rows: Vec<Vec<f64>> = explored
                .values()
                .filter_map(|y| y.objective_row(self.config.dim))
                .collect();
            self.pareto_front.update_front(&rows);
            f64::NEG_INFINITY
        }
    }

    /// Bounded top-k over `(utility, item)` pairs, skipping excluded items.
    fn top_k(
        xs: impl Iterator<Item = T>,
        utilities: &[f64],
        capacity: usize,
        excluded: impl Fn(&T) -> bool,
    ) -> BoundedMinHeap<T> {
        let mut heap = BoundedMinHeap::new(capacity);
        for (x, &u) in xs.zip(utilities) {
            if excluded(&x) {
                continue;
            }
            heap.push(u, x);
        }
        heap
    }

    /// Index-based top-k used as the clustering superset pre-filter.
    fn top_k_indices(
        n: usize,
        utilities: &[f64],
        capacity: usize,
        excluded: &dyn Fn(usize) -> bool,
    ) -> Vec<(f64, usize)> {
        let mut heap = BoundedMinHeap::new(capacity);
        for (i, &u) in utilities.iter().enumerate().take(n) {
            if excluded(i) {
                continue;
            }
            heap.push(u, i);
        }
        heap.into_entries()
    }

    /// Clustered selection dispatch, falling back to plain top-k whenever a
    /// required collaborator is missing or fails.
    #[allow(clippy::too_many_arguments)]
    fn dispatch_clustered(
        &self,
        mode: ClusterMode,
        xs: &[T],
        utilities: &[f64],
        predictions: &PredictionBatch,
        explored: &HashMap<T, Outcome>,
        featurizer: Option<&dyn Featurizer<T>>,
        batch_size: usize,
    ) -> Vec<T> {
        let excluded = |i: usize| explored.contains_key(&xs[i]);

        let fall_back = |reason: &str| {
            warn!("{reason}; proceeding with top-k batching");
            let heap = Self::top_k(xs.iter().cloned(), utilities, batch_size, |x| {
                explored.contains_key(x)
            });
            heap.into_entries().into_iter().map(|(_, x)| x).collect()
        };

        if self.backend.is_none() {
            return fall_back("no clustering backend attached");
        }
        if matches!(mode, ClusterMode::Feature | ClusterMode::Hybrid) && featurizer.is_none() {
            return fall_back("feature-space clustering requires a featurizer");
        }

        let picks = match mode {
            ClusterMode::Objective => self.clustered_batch(
                ClusterBasis::Objective,
                xs,
                utilities,
                predictions,
                featurizer,
                batch_size,
                &excluded,
            ),
            ClusterMode::Feature => self.clustered_batch(
                ClusterBasis::Feature,
                xs,
                utilities,
                predictions,
                featurizer,
                batch_size,
                &excluded,
            ),
            ClusterMode::Hybrid => self.hybrid_batch(
                xs, utilities, predictions, featurizer, batch_size, &excluded,
            ),
            ClusterMode::None => unreachable!("dispatched only for clustered modes"),
        };

        match picks {
            Ok(indices) => indices.into_iter().map(|(_, i)| xs[i].clone()).collect(),
            Err(e) => fall_back(&e.to_string()),
        }
    }

    /// Single-mode cluster-diversified selection.
    ///
    /// Pre-filters a scored superset, clusters it on the requested basis,
    /// then round-robins extraction of the best unselected item per cluster
    /// (largest clusters first) until the batch is full or every cluster is
    /// drained.
    #[allow(clippy::too_many_arguments)]
    fn clustered_batch(
        &self,
        basis: ClusterBasis,
        xs: &[T],
        utilities: &[f64],
        predictions: &PredictionBatch,
        featurizer: Option<&dyn Featurizer<T>>,
        batch_size: usize,
        excluded: &dyn Fn(usize) -> bool,
    ) -> Result<Vec<(f64, usize)>> {
        if batch_size == 0 {
            return Ok(Vec::new());
        }
        let superset_size = self
            .config
            .cluster_superset
            .unwrap_or(batch_size)
            .max(batch_size);
        let superset = Self::top_k_indices(xs.len(), utilities, superset_size, excluded);

        let basis_rows: Vec<Vec<f64>> = match basis {
            ClusterBasis::Objective => superset
                .iter()
                .map(|&(_, i)| predictions.mean_row(i).to_vec())
                .collect(),
            ClusterBasis::Feature => {
                let featurizer =
                    featurizer.ok_or_else(|| crate::error::AdquirirError::Backend {
                        message: "missing featurizer".to_string(),
                    })?;
                let items: Vec<T> = superset.iter().map(|&(_, i)| xs[i].clone()).collect();
                feature_matrix(&items, featurizer)
            }
        };

        debug!("clustering {} superset items ({basis:?})", superset.len());

        let backend = self
            .backend
            .as_deref()
            .ok_or_else(|| crate::error::AdquirirError::Backend {
                message: "missing clustering backend".to_string(),
            })?;
        let params = ClusterParams {
            method: ClusterMethod::MiniBatch,
            parallelism: available_parallelism(),
            init_size: 3 * batch_size,
        };
        let cluster_ids = backend.cluster(&basis_rows, batch_size, &params)?;
        if cluster_ids.len() != superset.len() {
            return Err(crate::error::AdquirirError::dimension_mismatch(
                "cluster assignments",
                superset.len(),
                cluster_ids.len(),
            ));
        }

        // group superset entries by cluster, best-scoring last for pop()
        let mut clusters: HashMap<usize, Vec<(f64, usize)>> = HashMap::new();
        for (&cid, &(u, i)) in cluster_ids.iter().zip(&superset) {
            clusters.entry(cid).or_default().push((u, i));
        }
        for members in clusters.values_mut() {
            members.sort_by(|a, b| a.0.total_cmp(&b.0));
        }

        // largest clusters are sampled first; ties by cluster id
        let mut order: Vec<usize> = clusters.keys().copied().collect();
        order.sort_by_key(|cid| (std::cmp::Reverse(clusters[cid].len()), *cid));

        let mut picks: Vec<(f64, usize)> = Vec::with_capacity(batch_size);
        while picks.len() < batch_size {
            let mut any_popped = false;
            for cid in &order {
                if picks.len() >= batch_size {
                    break;
                }
                if let Some(best) = clusters.get_mut(cid).and_then(|members| members.pop()) {
                    picks.push(best);
                    any_popped = true;
                }
            }
            if !any_popped {
                break;
            }
        }
        Ok(picks)
    }

    /// Hybrid selection: roughly half the batch from objective-space
    /// clustering, the remainder from feature-space clustering with the
    /// first half's picks excluded. The two sub-batches are disjoint.
    fn hybrid_batch(
        &self,
        xs: &[T],
        utilities: &[f64],
        predictions: &PredictionBatch,
        featurizer: Option<&dyn Featurizer<T>>,
        batch_size: usize,
        excluded: &dyn Fn(usize) -> bool,
    ) -> Result<Vec<(f64, usize)>> {
        let n_objective = batch_size.div_ceil(2);
        let n_feature = batch_size - n_objective;

        let mut picks = self.clustered_batch(
            ClusterBasis::Objective,
            xs,
            utilities,
            predictions,
            featurizer,
            n_objective,
            excluded,
        )?;

        let chosen: std::collections::HashSet<usize> =
            picks.iter().map(|&(_, i)| i).collect();
        let excluded_second = |i: usize| excluded(i) || chosen.contains(&i);

        let feature_picks = self.clustered_batch(
            ClusterBasis::Feature,
            xs,
            utilities,
            predictions,
            featurizer,
            n_feature,
            &excluded_second,
        )?;

        picks.extend(feature_picks);
        Ok(picks)
    }

    /// Optional post-processing: shrink per-cluster heaps by a
    /// temperature-scaled, simulated-annealing-style decay factor.
    ///
    /// The temperature decays over rounds from `temp_i + temp_f` toward
    /// `temp_f`; each cluster is then shrunk to
    /// `ceil(exp(-(global_max - local_max)/temp) * capacity)` entries,
    /// keeping its largest-scoring members, so clusters whose best candidate
    /// lags the predicted global best lose capacity early on. Clusters with
    /// no finite-scored entry are left untouched. A no-op (with a warning)
    /// when `temp_i` is unconfigured.
    ///
    /// Not invoked by [`acquire_batch`](Self::acquire_batch); callers opt in.
    pub fn rescale_cluster_heaps(
        &self,
        heaps: &mut HashMap<usize, ClusterHeap<T>>,
        pred_global_max: f64,
        t: usize,
    ) {
        let Some(temp_i) = self.config.temp_i else {
            warn!("temperature rescaling requested without temp_i configured");
            return;
        };
        let temp = Self::calc_temp(t, temp_i, self.config.temp_f);

        for heap in heaps.values_mut() {
            if heap.is_empty() {
                continue;
            }
            let Some(local_max) = heap.best_finite() else {
                continue;
            };
            let f = Self::calc_decay(pred_global_max, local_max, temp);
            let new_capacity = (f * heap.capacity() as f64).ceil() as usize;
            heap.shrink_to_largest(new_capacity);
        }
    }

    /// Temperature at round `t`: exponential decay from `temp_i + temp_f`
    /// toward `temp_f`.
    fn calc_temp(t: usize, temp_i: f64, temp_f: f64) -> f64 {
        temp_i * (-(t as f64) / 0.75).exp() + temp_f
    }

    /// Decay factor for a cluster whose best candidate lags the predicted
    /// global max.
    fn calc_decay(global_max: f64, local_max: f64, temp: f64) -> f64 {
        (-(global_max - local_max) / temp).exp()
    }
}
