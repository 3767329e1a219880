//! Provides the most basic evaluator possible: every move is equally likely
//! and every position is a draw.
//!
//! While useless for playing, this evaluator is great for testing search and
//! other infrastructure, because it is stable, easy to reason about and
//! deterministic. With it the search degenerates to plain visit-count
//! balancing plus the proven outcomes it discovers.

use super::{Evaluator, Prediction};
use crate::environment::Environment;

/// Returns `1 / action_space` for every action and value `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Uniform {
    action_space: usize,
}

impl Uniform {
    /// Creates the evaluator for an action space of the given size.
    ///
    /// # Panics
    ///
    /// Panics if `action_space` is zero.
    #[must_use]
    pub fn new(action_space: usize) -> Self {
        assert!(action_space > 0, "action space can not be empty");
        Self { action_space }
    }

    /// The weight assigned to every action.
    #[must_use]
    pub fn weight(&self) -> f32 {
        1.0 / self.action_space as f32
    }
}

impl<E: Environment> Evaluator<E> for Uniform {
    fn evaluate(&mut self, _observation: &E::Observation) -> anyhow::Result<Prediction> {
        Ok(Prediction {
            probabilities: vec![self.weight(); self.action_space],
            value: 0.0,
        })
    }
}
