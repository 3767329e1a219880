//! [Monte Carlo Tree Search] guided by a learned policy-value estimator, in
//! the style of [AlphaZero].
//!
//! The search builds a game tree rooted at a given position and expands it
//! incrementally. Every expansion asks an [`evaluation::Evaluator`] for move
//! priors and a value estimate, and the visit statistics accumulated during
//! the search are turned into a move distribution that can be used both for
//! picking the next move and as a training target for the evaluator.
//!
//! The game rules are provided by the caller through
//! [`environment::Environment`].
//!
//! [Monte Carlo Tree Search]: https://en.wikipedia.org/wiki/Monte_Carlo_tree_search
//! [AlphaZero]: https://arxiv.org/abs/1712.01815

// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Performance is extremely important.
#![deny(clippy::perf)]

pub mod environment;
pub mod evaluation;
pub mod mcts;

pub use mcts::{Bound, Config, Node, NodeIndex, Step, Tree};
