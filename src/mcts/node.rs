use super::Bound;
use crate::environment::Environment;

/// Index of a [`Node`] in the [`super::Tree`] arena.
pub type NodeIndex = usize;

/// Vertex of the search tree.
///
/// Each node owns the environment snapshot it represents. Children are owned
/// by the [`super::Tree`] arena and referenced by index; the parent link is
/// only used for walking back up during backpropagation.
#[derive(Clone, Debug)]
pub struct Node<E: Environment> {
    pub(super) state: E,
    pub(super) parent: Option<NodeIndex>,
    /// Populated at most once, during expansion. Stays empty for terminal
    /// nodes.
    pub(super) children: Vec<(E::Action, NodeIndex)>,
    /// Evaluator's prior for the move that led here, 0 for the root.
    pub(super) prior: f32,
    pub(super) visits: u32,
    /// Running mean of the backed-up values.
    pub(super) value: f32,
    pub(super) bound: Bound,
    /// Negated evaluator value recorded at expansion.
    pub(super) prior_value: f32,
    /// Absolute game score, present iff the game is over.
    pub(super) outcome: Option<f32>,
}

impl<E: Environment> Node<E> {
    pub(super) fn new(state: E, parent: Option<NodeIndex>, prior: f32) -> Self {
        let outcome = state.result();
        let (value, bound) = match outcome {
            Some(score) => {
                let value = score * state.player().sign();
                (value, Bound::from_outcome(value))
            },
            None => (0.0, Bound::default()),
        };
        Self {
            state,
            parent,
            children: Vec::new(),
            prior,
            visits: 0,
            value,
            bound,
            prior_value: 0.0,
            outcome,
        }
    }

    /// Clears the parent link so that the node can become a new search root.
    pub(super) fn detach_mother(&mut self) {
        self.parent = None;
    }

    /// Environment snapshot this node represents.
    #[must_use]
    pub const fn state(&self) -> &E {
        &self.state
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Moves leading to the children and the children themselves, in the order
    /// reported by [`Environment::actions`].
    #[must_use]
    pub fn children(&self) -> &[(E::Action, NodeIndex)] {
        &self.children
    }

    /// Prior probability of the move leading to this node.
    #[must_use]
    pub const fn prior(&self) -> f32 {
        self.prior
    }

    /// Number of search iterations that went through this node.
    #[must_use]
    pub const fn visits(&self) -> u32 {
        self.visits
    }

    /// Mean backed-up value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Selection score used to pick among siblings.
    #[must_use]
    pub const fn bound(&self) -> Bound {
        self.bound
    }

    /// Evaluator's value at expansion time, negated. Kept for training.
    #[must_use]
    pub const fn prior_value(&self) -> f32 {
        self.prior_value
    }

    /// Absolute score of the game if it is over.
    #[must_use]
    pub const fn outcome(&self) -> Option<f32> {
        self.outcome
    }

    /// Returns `true` once the node has children.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if the game is over at this node.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}
