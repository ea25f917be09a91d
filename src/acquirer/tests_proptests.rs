//! Property tests for the acquisition laws.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use super::*;
use crate::config::{AcquirerConfig, SizeSpec};
use crate::predictions::PredictionBatch;

proptest! {
    /// Initial acquisition returns exactly `ceil(N * f)` distinct pool
    /// members for any pool size and fraction.
    #[test]
    fn prop_initial_size_is_ceil_of_fraction(
        pool_size in 1usize..200,
        fraction in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let config = AcquirerConfig {
            init_size: SizeSpec::Fraction(fraction),
            seed,
            ..AcquirerConfig::new(pool_size)
        };
        let mut acquirer: Acquirer<usize> = Acquirer::new(config).unwrap();
        let selected = acquirer.acquire_initial(0..pool_size);

        let expected = (pool_size as f64 * fraction).ceil() as usize;
        prop_assert_eq!(selected.len(), expected);

        let unique: HashSet<usize> = selected.iter().copied().collect();
        prop_assert_eq!(unique.len(), selected.len());
        prop_assert!(selected.iter().all(|&x| x < pool_size));
    }

    /// The schedule is total: past its end it repeats the final value.
    #[test]
    fn prop_schedule_repeats_final_value(
        sizes in proptest::collection::vec(0usize..50, 1..5),
        t in 0usize..100,
    ) {
        let config = AcquirerConfig {
            batch_sizes: sizes.iter().map(|&n| SizeSpec::Count(n)).collect(),
            ..AcquirerConfig::new(100)
        };
        let acquirer: Acquirer<u32> = Acquirer::new(config).unwrap();

        let expected = if t < sizes.len() { sizes[t] } else { *sizes.last().unwrap() };
        prop_assert_eq!(acquirer.batch_size(t), expected);
    }

    /// Unclustered selection never returns an explored item and returns
    /// exactly `min(batch_size, |pool \ explored|)` items.
    #[test]
    fn prop_top_k_respects_explored(
        pool_size in 1usize..100,
        batch in 0usize..20,
        explored_bits in proptest::collection::vec(any::<bool>(), 100),
    ) {
        let config = AcquirerConfig {
            init_size: SizeSpec::Count(batch),
            batch_sizes: vec![SizeSpec::Count(batch)],
            ..AcquirerConfig::new(pool_size)
        };
        let mut acquirer: Acquirer<usize> = Acquirer::new(config).unwrap();

        let explored: HashMap<usize, Outcome> = (0..pool_size)
            .filter(|&i| explored_bits[i])
            .map(|i| (i, Outcome::Scalar(0.0)))
            .collect();

        let means: Vec<f64> = (0..pool_size).map(|i| i as f64).collect();
        let preds = PredictionBatch::single(means, vec![0.0; pool_size]).unwrap();

        let selected = acquirer.acquire_batch(0..pool_size, &preds, &explored, 1, None, 0);

        prop_assert_eq!(selected.len(), batch.min(pool_size - explored.len()));
        prop_assert!(selected.iter().all(|x| !explored.contains_key(x)));

        let unique: HashSet<usize> = selected.iter().copied().collect();
        prop_assert_eq!(unique.len(), selected.len());
    }
}
