use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::Neg;

/// Selection score of a node: either a heuristic confidence bound or a proven
/// outcome (forced win or loss).
///
/// Proven outcomes act as `+infinity`/`-infinity` in comparisons, but never
/// take part in arithmetic, so there is no way for an infinity or NaN to leak
/// into the statistics.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Bound {
    /// Forced loss is reachable from the node.
    Loss,
    /// Heuristic confidence bound.
    Estimate(f32),
    /// Forced win is reachable from the node.
    Win,
}

impl Bound {
    /// Bound of a finished game given the outcome from the perspective that the
    /// node values use. Draws are not proven outcomes: they get a neutral
    /// estimate that is refined by the siblings' statistics.
    #[must_use]
    pub fn from_outcome(value: f32) -> Self {
        match value.partial_cmp(&0.0) {
            Some(Ordering::Greater) => Self::Win,
            Some(Ordering::Less) => Self::Loss,
            _ => Self::Estimate(0.0),
        }
    }

    /// Returns `true` if the bound is a proven win or loss.
    #[must_use]
    pub const fn is_proven(&self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

impl Default for Bound {
    fn default() -> Self {
        Self::Estimate(0.0)
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Estimate(lhs), Self::Estimate(rhs)) => lhs.partial_cmp(rhs),
            (Self::Loss, Self::Loss) | (Self::Win, Self::Win) => Some(Ordering::Equal),
            (Self::Loss, _) | (_, Self::Win) => Some(Ordering::Less),
            (Self::Win, _) | (_, Self::Loss) => Some(Ordering::Greater),
        }
    }
}

impl Neg for Bound {
    type Output = Self;

    /// Mirrors the bound to the other player's perspective.
    fn neg(self) -> Self::Output {
        match self {
            Self::Loss => Self::Win,
            Self::Estimate(value) => Self::Estimate(-value),
            Self::Win => Self::Loss,
        }
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loss => write!(f, "loss"),
            Self::Estimate(value) => write!(f, "{value:.3}"),
            Self::Win => write!(f, "win"),
        }
    }
}

/// PUCT confidence bound from [AlphaZero]:
///
/// `U = V + cpuct * P * sqrt(N_parent) / (1 + N)`
///
/// The exploration bonus decays as the node accumulates visits.
///
/// [AlphaZero]: https://arxiv.org/abs/1712.01815
#[must_use]
pub(crate) fn puct(value: f32, prior: f32, visits: u32, parent_visits: u32, cpuct: f32) -> f32 {
    let exploration = cpuct * prior * (parent_visits as f32).sqrt() / (1.0 + visits as f32);
    value + exploration
}
