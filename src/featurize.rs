//! Feature-matrix builder collaborator contract.
//!
//! Feature-space clustering needs a numeric vector per item; the
//! [`Featurizer`] converts opaque pool items into those vectors, and
//! [`feature_matrix`] assembles the clustering basis for a superset.

/// Converts a pool item into a numeric feature vector.
pub trait Featurizer<T> {
    /// Feature vector for one item.
    fn featurize(&self, item: &T) -> Vec<f64>;
}

impl<T, F> Featurizer<T> for F
where
    F: Fn(&T) -> Vec<f64>,
{
    fn featurize(&self, item: &T) -> Vec<f64> {
        self(item)
    }
}

/// Build the feature matrix for a set of items, aligned to input order.
pub fn feature_matrix<T>(items: &[T], featurizer: &dyn Featurizer<T>) -> Vec<Vec<f64>> {
    items.iter().map(|x| featurizer.featurize(x)).collect()
}
