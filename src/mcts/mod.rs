//! Implements AlphaZero's [Monte Carlo Tree Search] (MCTS) algorithm.
//!
//! 1. Selection: Start from the root node and descend into the child with the
//!    highest [`Bound`] until an unexpanded or terminal node is reached.
//! 2. Expansion: Ask the evaluator for move priors and a value estimate and
//!    create a child for every legal move.
//! 3. Backpropagation: Update visit counts, running values and confidence
//!    bounds on the path from the expanded node back to the root.
//!
//! Unlike the original algorithm there is no random rollout: the evaluator's
//! value replaces simulation. Proven wins and losses found during the search
//! are tracked separately and prune the exploration beneath them.
//!
//! [Monte Carlo Tree Search]: https://en.wikipedia.org/wiki/Monte_Carlo_tree_search

mod node;
mod score;
mod tree;

pub use node::{Node, NodeIndex};
pub use score::Bound;
pub use tree::{Step, Tree};

/// Parameters for MCTS search algorithm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Exploration constant ($c_{puct}$ in the original paper).
    pub cpuct: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self { cpuct: 1.0 }
    }
}
