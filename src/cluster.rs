//! Clustering-backend collaborator contract.
//!
//! The acquirer delegates all clustering to an external backend and treats
//! the call as blocking: it hands over a basis matrix and receives a complete
//! cluster-assignment array aligned to input order. Worker pools, cancellation
//! and timeouts are the backend's concern.

use crate::error::Result;

/// Clustering algorithm hint passed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterMethod {
    /// Mini-batch k-means, the default for large supersets.
    #[default]
    MiniBatch,
    /// Full-batch k-means.
    Full,
}

/// Tuning parameters the acquirer forwards with each clustering request.
#[derive(Debug, Clone, Copy)]
pub struct ClusterParams {
    /// Algorithm variant to use.
    pub method: ClusterMethod,
    /// Suggested worker parallelism.
    pub parallelism: usize,
    /// Number of initial centers to seed mini-batch clustering with.
    pub init_size: usize,
}

/// Contract for the external clustering backend.
pub trait ClusterBackend {
    /// Partition `basis` (one feature vector per item) into `n_clusters`
    /// groups, returning one cluster id per input row.
    ///
    /// # Errors
    ///
    /// Backends may fail (e.g. degenerate input); the acquirer logs the
    /// failure and falls back to unclustered top-k selection.
    fn cluster(
        &self,
        basis: &[Vec<f64>],
        n_clusters: usize,
        params: &ClusterParams,
    ) -> Result<Vec<usize>>;
}

/// Parallelism hint for clustering requests, from the available compute
/// resources.
#[must_use]
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assigns each row to `row_index % n_clusters`.
    struct ModuloBackend;

    impl ClusterBackend for ModuloBackend {
        fn cluster(
            &self,
            basis: &[Vec<f64>],
            n_clusters: usize,
            _params: &ClusterParams,
        ) -> Result<Vec<usize>> {
            Ok((0..basis.len()).map(|i| i % n_clusters.max(1)).collect())
        }
    }

    #[test]
    fn test_assignments_aligned_to_input() {
        let basis = vec![vec![0.0]; 7];
        let params = ClusterParams {
            method: ClusterMethod::MiniBatch,
            parallelism: available_parallelism(),
            init_size: 6,
        };
        let ids = ModuloBackend.cluster(&basis, 3, &params).unwrap();
        assert_eq!(ids.len(), 7);
        assert!(ids.iter().all(|&c| c < 3));
    }

    #[test]
    fn test_available_parallelism_nonzero() {
        assert!(available_parallelism() >= 1);
    }
}
