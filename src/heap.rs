//! Bounded priority selection.
//!
//! [`BoundedMinHeap`] is the workhorse of every selection path: a
//! fixed-capacity min-heap keyed by utility, so that pushing through an
//! arbitrarily large stream leaves the top-`capacity` items by utility.
//! Insert-and-evict-minimum is O(log capacity) per item.
//!
//! Ordering over `f64` utilities uses `f64::total_cmp`. Exact utility ties
//! are broken by insertion sequence: the later-pushed item ranks higher.
//! This keeps selection deterministic without requiring `T: Ord`.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct Entry<T> {
    utility: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utility
            .total_cmp(&other.utility)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A min-heap of `(utility, item)` pairs that never grows past its capacity.
///
/// When full, a push evicts the current minimum if the incoming entry ranks
/// above it; otherwise the incoming entry is discarded. Draining the heap
/// therefore yields the top-`capacity` entries seen.
///
/// # Examples
///
/// ```
/// use adquirir::heap::BoundedMinHeap;
///
/// let mut heap = BoundedMinHeap::new(2);
/// for (u, x) in [(0.3, "a"), (0.9, "b"), (0.1, "c"), (0.7, "d")] {
///     heap.push(u, x);
/// }
/// let top = heap.into_sorted_desc();
/// assert_eq!(top, vec![(0.9, "b"), (0.7, "d")]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedMinHeap<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    capacity: usize,
    next_seq: u64,
}

impl<T> BoundedMinHeap<T> {
    /// Create an empty heap with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
            capacity,
            next_seq: 0,
        }
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The fixed capacity bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push an entry, evicting the minimum when at capacity.
    pub fn push(&mut self, utility: f64, item: T) {
        if self.capacity == 0 {
            return;
        }
        let entry = Entry {
            utility,
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(entry));
            return;
        }
        // push-then-pop-minimum, without the intermediate over-capacity state
        if let Some(Reverse(min)) = self.heap.peek() {
            if entry > *min {
                self.heap.pop();
                self.heap.push(Reverse(entry));
            }
        }
    }

    /// Drain into `(utility, item)` pairs in unspecified (heap) order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(f64, T)> {
        self.heap
            .into_iter()
            .map(|Reverse(e)| (e.utility, e.item))
            .collect()
    }

    /// Drain into `(utility, item)` pairs sorted by descending utility.
    #[must_use]
    pub fn into_sorted_desc(self) -> Vec<(f64, T)> {
        let mut entries: Vec<Entry<T>> = self.heap.into_iter().map(|Reverse(e)| e).collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|e| (e.utility, e.item)).collect()
    }

    /// Iterate over the held items in unspecified order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|Reverse(e)| &e.item)
    }
}

/// An unbounded per-cluster heap with a nominal capacity, used by the
/// temperature-based rescaling surface.
///
/// Unlike [`BoundedMinHeap`] this collects every entry it is given; the
/// capacity records how many entries the cluster was originally allotted so
/// rescaling can shrink it by a decay factor.
#[derive(Debug, Clone)]
pub struct ClusterHeap<T> {
    entries: Vec<(f64, T)>,
    capacity: usize,
}

impl<T> ClusterHeap<T> {
    /// Create an empty cluster heap with a nominal capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Add an entry.
    pub fn push(&mut self, utility: f64, item: T) {
        self.entries.push((utility, item));
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The nominal capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Best utility among entries with finite scores.
    ///
    /// Entries forced to `+inf` (epsilon-greedy overrides) or scored `NaN`
    /// do not count as a cluster's local maximum.
    #[must_use]
    pub fn best_finite(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|(u, _)| *u)
            .filter(|u| u.is_finite())
            .max_by(f64::total_cmp)
    }

    /// Shrink to the `new_capacity` largest-scoring entries and record the
    /// new capacity.
    pub fn shrink_to_largest(&mut self, new_capacity: usize) {
        self.entries.sort_by(|a, b| b.0.total_cmp(&a.0));
        self.entries.truncate(new_capacity);
        self.capacity = new_capacity;
    }

    /// Borrow the entries.
    #[must_use]
    pub fn entries(&self) -> &[(f64, T)] {
        &self.entries
    }

    /// Consume into the underlying entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<(f64, T)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_exceeds_capacity() {
        let mut heap = BoundedMinHeap::new(3);
        for i in 0..100 {
            heap.push(f64::from(i), i);
            assert!(heap.len() <= 3);
        }
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_keeps_top_k() {
        let mut heap = BoundedMinHeap::new(3);
        for u in [0.5, 0.1, 0.9, 0.3, 0.7, 0.2] {
            heap.push(u, u);
        }
        let mut kept: Vec<f64> = heap.into_entries().iter().map(|(u, _)| *u).collect();
        kept.sort_by(f64::total_cmp);
        assert_eq!(kept, vec![0.5, 0.7, 0.9]);
    }

    #[test]
    fn test_under_capacity_keeps_everything() {
        let mut heap = BoundedMinHeap::new(10);
        for u in [0.5, 0.1] {
            heap.push(u, ());
        }
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_zero_capacity_ignores_pushes() {
        let mut heap = BoundedMinHeap::new(0);
        heap.push(1.0, "x");
        assert!(heap.is_empty());
    }

    #[test]
    fn test_sorted_desc_order() {
        let mut heap = BoundedMinHeap::new(4);
        for (u, x) in [(0.2, 'b'), (0.9, 'a'), (0.4, 'c'), (0.1, 'd')] {
            heap.push(u, x);
        }
        let sorted = heap.into_sorted_desc();
        assert_eq!(sorted, vec![(0.9, 'a'), (0.4, 'c'), (0.2, 'b'), (0.1, 'd')]);
    }

    #[test]
    fn test_tie_broken_by_insertion_order() {
        let mut heap = BoundedMinHeap::new(1);
        heap.push(0.5, "first");
        heap.push(0.5, "second");
        // the later push ranks above the earlier one at equal utility
        assert_eq!(heap.into_entries()[0].1, "second");
    }

    #[test]
    fn test_neg_infinity_evicted_first() {
        let mut heap = BoundedMinHeap::new(2);
        heap.push(f64::NEG_INFINITY, "worst");
        heap.push(0.0, "mid");
        heap.push(1.0, "best");
        let items: Vec<&str> = heap.into_sorted_desc().into_iter().map(|(_, x)| x).collect();
        assert_eq!(items, vec!["best", "mid"]);
    }

    #[test]
    fn test_infinity_always_retained() {
        let mut heap = BoundedMinHeap::new(2);
        heap.push(f64::INFINITY, "forced");
        for i in 0..50 {
            heap.push(f64::from(i), "model");
        }
        assert!(heap.items().any(|&x| x == "forced"));
    }

    #[test]
    fn test_cluster_heap_best_finite_skips_inf_and_nan() {
        let mut heap = ClusterHeap::new(4);
        heap.push(f64::INFINITY, 0);
        heap.push(f64::NAN, 1);
        heap.push(0.4, 2);
        heap.push(0.8, 3);
        assert_eq!(heap.best_finite(), Some(0.8));
    }

    #[test]
    fn test_cluster_heap_shrink_keeps_largest() {
        let mut heap = ClusterHeap::new(4);
        for (u, x) in [(0.1, 'a'), (0.9, 'b'), (0.5, 'c'), (0.7, 'd')] {
            heap.push(u, x);
        }
        heap.shrink_to_largest(2);
        assert_eq!(heap.capacity(), 2);
        let items: Vec<char> = heap.entries().iter().map(|&(_, x)| x).collect();
        assert_eq!(items, vec!['b', 'd']);
    }

    #[test]
    fn test_cluster_heap_all_non_finite() {
        let mut heap: ClusterHeap<u8> = ClusterHeap::new(2);
        heap.push(f64::INFINITY, 0);
        assert_eq!(heap.best_finite(), None);
    }
}
