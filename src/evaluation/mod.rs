//! This module implements the "static" [evaluation] side of the search: a
//! policy-value estimator that predicts move priors and the expected outcome of
//! a position without looking ahead.
//!
//! The estimator is usually a neural network, but the search only depends on
//! the [`Evaluator`] capability, so any deterministic stub works as well.
//!
//! [evaluation]: https://www.chessprogramming.org/Evaluation

use crate::environment::Environment;

mod uniform;
pub use uniform::Uniform;

/// Output of the [`Evaluator`] for a single position.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Probability weight for each action in the full action space, including
    /// illegal ones. The search masks out illegal moves and takes the rest
    /// as-is, without renormalization.
    pub probabilities: Vec<f32>,
    /// Expected outcome in `[-1, 1]` from the perspective of the side to move.
    pub value: f32,
}

/// Policy-value estimator consumed by the search.
///
/// Errors are not handled by the search in any way: they are propagated to
/// the caller unmodified.
pub trait Evaluator<E: Environment> {
    /// Predicts move priors and value for the given observation.
    fn evaluate(&mut self, observation: &E::Observation) -> anyhow::Result<Prediction>;
}

impl<E, F> Evaluator<E> for F
where
    E: Environment,
    F: FnMut(&E::Observation) -> anyhow::Result<Prediction>,
{
    fn evaluate(&mut self, observation: &E::Observation) -> anyhow::Result<Prediction> {
        self(observation)
    }
}
