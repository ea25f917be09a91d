//! Pareto-front tracking for multi-objective acquisition.
//!
//! The acquirer owns a front for its lifetime and feeds it every fully
//! defined (NaN-free) evaluated outcome once per round when `dim > 1`.
//! [`ParetoFront`] is the collaborator contract; [`NonDominatedFront`] is a
//! straightforward maximization-dominance tracker used as the default.

/// Contract for a non-dominated frontier over multi-objective outcomes.
pub trait ParetoFront {
    /// Merge a set of evaluated objective vectors into the tracked frontier.
    fn update_front(&mut self, outcomes: &[Vec<f64>]);

    /// The current non-dominated points, in unspecified order.
    fn front(&self) -> &[Vec<f64>];

    /// Objective dimensionality this front tracks.
    fn num_objectives(&self) -> usize;
}

/// Basic Pareto tracker under maximization dominance.
///
/// A point dominates another when it is at least as good in every objective
/// and strictly better in at least one.
///
/// # Examples
///
/// ```
/// use adquirir::pareto::{NonDominatedFront, ParetoFront};
///
/// let mut front = NonDominatedFront::new(2);
/// front.update_front(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]]);
/// assert_eq!(front.front().len(), 3);
/// front.update_front(&[vec![2.0, 2.0]]);
/// assert_eq!(front.front(), &[vec![2.0, 2.0]]);
/// ```
#[derive(Debug, Clone)]
pub struct NonDominatedFront {
    points: Vec<Vec<f64>>,
    num_objectives: usize,
}

impl NonDominatedFront {
    /// Create an empty front over `num_objectives` objectives.
    #[must_use]
    pub fn new(num_objectives: usize) -> Self {
        Self {
            points: Vec::new(),
            num_objectives,
        }
    }
}

/// True if `a` dominates `b` under maximization.
fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x < y {
            return false;
        }
        if x > y {
            strictly_better = true;
        }
    }
    strictly_better
}

impl ParetoFront for NonDominatedFront {
    fn update_front(&mut self, outcomes: &[Vec<f64>]) {
        for outcome in outcomes {
            if outcome.len() != self.num_objectives {
                continue;
            }
            if self.points.iter().any(|p| dominates(p, outcome) || p == outcome) {
                continue;
            }
            self.points.retain(|p| !dominates(outcome, p));
            self.points.push(outcome.clone());
        }
    }

    fn front(&self) -> &[Vec<f64>] {
        &self.points
    }

    fn num_objectives(&self) -> usize {
        self.num_objectives
    }
}
