//! Interface for Reinforcement Learning environment to abstract the game rules
//! implementation away from the search.

use std::fmt;
use std::hash::Hash;
use std::ops::Not;

/// Two-player zero-sum games are played between the first player (having the
/// advantage of the first turn) and the second one.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Returns `+1` for [`Player::First`] and `-1` for [`Player::Second`].
    ///
    /// Multiplying an absolute game outcome by the sign converts it to the
    /// player's perspective.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::First => 1.0,
            Self::Second => -1.0,
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Self::First => '+',
                Self::Second => '-',
            }
        )
    }
}

/// Move identifier. Used as a key in the search tree, so it has to be cheap to
/// copy and compare.
pub trait Action: Copy + Eq + Hash + fmt::Debug {}

impl<T: Copy + Eq + Hash + fmt::Debug> Action for T {}

/// Standard gym-like Reinforcement Learning environment interface.
///
/// [`Clone`] must produce an independent copy: applying a move to the clone
/// can not affect the original.
pub trait Environment: Clone {
    /// Move identifier.
    type Action: Action;
    /// Input of the [`crate::evaluation::Evaluator`].
    type Observation;

    /// Final score of the game or `None` if it is still in progress.
    ///
    /// The sign is absolute: positive values favor [`Player::First`].
    fn result(&self) -> Option<f32>;

    /// The player whose turn it is. Once the game is over, this is expected to
    /// stay the player who made the final move, so that `result() *
    /// player().sign()` is positive when the last move won the game.
    fn player(&self) -> Player;

    /// Snapshot of the state from the perspective of [`Environment::player`].
    fn observation(&self) -> Self::Observation;

    /// Legal moves in a stable order that matches the order of `true` entries
    /// in [`Environment::action_mask`].
    fn actions(&self) -> Vec<Self::Action>;

    /// Legality mask aligned with the evaluator's full action space.
    fn action_mask(&self) -> Vec<bool>;

    /// Plays the move, mutating the environment in place.
    fn apply(&mut self, action: &Self::Action);
}
