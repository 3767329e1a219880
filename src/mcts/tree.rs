use anyhow::{bail, ensure};
use itertools::Itertools;
use log::{debug, trace, warn};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use super::score::puct;
use super::{Bound, Config, Node, NodeIndex};
use crate::environment::Environment;
use crate::evaluation::Evaluator;

/// The root always occupies the first slot of the arena.
const ROOT: NodeIndex = 0;

// Marks nodes that are released when the root advances.
const TOMBSTONE: NodeIndex = NodeIndex::MAX;

/// Result of [`Tree::next`]: the sampled move together with the search
/// statistics that are useful as training targets.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<A> {
    /// Sampled move.
    pub action: A,
    /// Root's backed-up value, negated.
    pub value: f32,
    /// Root's value recorded at expansion, negated. This is the raw evaluator
    /// output for the side to move at the root.
    pub prior_value: f32,
    /// Normalized visit-based distribution over the root's children.
    pub policy: Vec<f32>,
    /// Evaluator priors of the root's children.
    pub priors: Vec<f32>,
    /// Moves leading to the root's children, in the same order as `policy`
    /// and `priors`.
    pub actions: Vec<A>,
}

/// Search tree rooted at the position the search started from.
///
/// Nodes are stored in an arena and refer to each other by [`NodeIndex`]. The
/// tree is never shrunk during the search: memory is only released when the
/// root [advances](Tree::advance).
#[derive(Clone, Debug)]
pub struct Tree<E: Environment> {
    nodes: Vec<Node<E>>,
    config: Config,
}

impl<E: Environment> Tree<E> {
    /// Creates a tree with a single unexpanded root.
    #[must_use]
    pub fn new(root: E, config: Config) -> Self {
        Self {
            nodes: vec![Node::new(root, None, 0.0)],
            config,
        }
    }

    /// Node the search starts from.
    #[must_use]
    pub fn root(&self) -> &Node<E> {
        &self.nodes[ROOT]
    }

    /// Returns the node stored at `index`, if any.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&Node<E>> {
        self.nodes.get(index)
    }

    /// Finds the child of `index` reached by playing `action`.
    #[must_use]
    pub fn child(&self, index: NodeIndex, action: &E::Action) -> Option<NodeIndex> {
        self.nodes
            .get(index)?
            .children
            .iter()
            .find_map(|(candidate, child)| (candidate == action).then_some(*child))
    }

    /// Number of nodes in the tree, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Search parameters.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs `iterations` rounds of [`Tree::explore`].
    pub fn search(
        &mut self,
        evaluator: &mut impl Evaluator<E>,
        iterations: usize,
        rng: &mut impl Rng,
    ) -> anyhow::Result<()> {
        for _ in 0..iterations {
            self.explore(evaluator, rng)?;
        }
        debug!(
            "searched {iterations} iterations: {} nodes, root value {:.3}",
            self.node_count(),
            self.root().value
        );
        Ok(())
    }

    /// Performs a single search iteration: selection, expansion of the reached
    /// node (unless it is terminal) and backpropagation.
    ///
    /// # Errors
    ///
    /// Fails if the game at the root is already over, and propagates
    /// evaluator errors.
    pub fn explore(
        &mut self,
        evaluator: &mut impl Evaluator<E>,
        rng: &mut impl Rng,
    ) -> anyhow::Result<()> {
        if let Some(score) = self.root().outcome {
            bail!("game has ended with score {score}");
        }

        let current = self.select(rng);
        let node = &self.nodes[current];
        if !node.is_expanded() && !node.is_terminal() {
            self.expand(current, evaluator)?;
        }
        self.nodes[current].visits += 1;
        trace!("explored node {current}, value {:.3}", self.nodes[current].value);

        self.backup(current);
        Ok(())
    }

    /// Descends from the root via the highest bound and returns the node where
    /// the iteration stops.
    ///
    /// If all children of a node are proven, the node itself becomes proven
    /// (with the opposite sign) and the descent stops there.
    fn select(&mut self, rng: &mut impl Rng) -> NodeIndex {
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current];
            if !node.is_expanded() || node.is_terminal() {
                return current;
            }

            let Some(max) = node
                .children
                .iter()
                .map(|&(_, child)| self.nodes[child].bound)
                .reduce(|max, bound| if bound > max { bound } else { max })
            else {
                return current;
            };
            let candidates = node
                .children
                .iter()
                .filter(|&&(_, child)| self.nodes[child].bound == max)
                .collect_vec();
            let chosen = if let Some(&&(_, child)) = candidates.choose(rng) {
                child
            } else {
                warn!("no children of node {current} match the maximum bound {max}");
                match node.children.choose(rng) {
                    Some(&(_, child)) => child,
                    None => return current,
                }
            };

            match max {
                Bound::Loss => {
                    debug!("node {current} is a proven win");
                    let node = &mut self.nodes[current];
                    node.bound = Bound::Win;
                    node.value = 1.0;
                    return current;
                },
                Bound::Win => {
                    debug!("node {current} is a proven loss");
                    let node = &mut self.nodes[current];
                    node.bound = Bound::Loss;
                    node.value = -1.0;
                    return current;
                },
                Bound::Estimate(_) => current = chosen,
            }
        }
    }

    /// Creates a child for every legal move using the evaluator's priors.
    ///
    /// # Panics
    ///
    /// Panics if the node is already expanded or the game is over.
    fn expand(&mut self, index: NodeIndex, evaluator: &mut impl Evaluator<E>) -> anyhow::Result<()> {
        let node = &self.nodes[index];
        assert!(!node.is_expanded(), "node {index} is already expanded");
        assert!(!node.is_terminal(), "terminal node {index} can not be expanded");

        trace!("expanding node {index}, {} to move", node.state.player());
        let actions = node.state.actions();
        let mask = node.state.action_mask();
        ensure!(!actions.is_empty(), "game is not over but there are no legal moves");
        debug_assert!(actions.iter().all_unique());

        let prediction = evaluator.evaluate(&node.state.observation())?;
        ensure!(
            prediction.probabilities.len() == mask.len(),
            "evaluator returned {} probabilities, action space has {} moves",
            prediction.probabilities.len(),
            mask.len()
        );
        let priors = prediction
            .probabilities
            .iter()
            .zip(&mask)
            .filter_map(|(&probability, &legal)| legal.then_some(probability))
            .collect_vec();
        ensure!(
            priors.len() == actions.len(),
            "action mask allows {} moves, environment reported {} legal moves",
            priors.len(),
            actions.len()
        );

        let mut children = Vec::with_capacity(actions.len());
        for (action, prior) in actions.into_iter().zip_eq(priors) {
            let mut state = self.nodes[index].state.clone();
            state.apply(&action);
            children.push((action, self.nodes.len()));
            self.nodes.push(Node::new(state, Some(index), prior));
        }

        // The evaluator predicts for the side to move, node values are from
        // the perspective of the player who made the move into the node.
        let node = &mut self.nodes[index];
        node.children = children;
        node.prior_value = -prediction.value;
        node.value = -prediction.value;
        Ok(())
    }

    /// Walks from `current` to the root, updating visit counts, running values
    /// and the bounds of every sibling on the way.
    fn backup(&mut self, mut current: NodeIndex) {
        while let Some(mother) = self.nodes[current].parent {
            let child_value = self.nodes[current].value;
            let node = &mut self.nodes[mother];
            node.visits += 1;
            // Players alternate between mother and child.
            node.value += (-child_value - node.value) / node.visits as f32;
            let visits = node.visits;

            for position in 0..self.nodes[mother].children.len() {
                let (_, sibling) = self.nodes[mother].children[position];
                let sibling = &mut self.nodes[sibling];
                if sibling.bound.is_proven() {
                    continue;
                }
                sibling.bound = Bound::Estimate(puct(
                    sibling.value,
                    sibling.prior,
                    sibling.visits,
                    visits,
                    self.config.cpuct,
                ));
            }

            current = mother;
        }
    }

    /// Normalized move distribution over the root's children.
    ///
    /// Proven winning moves take all the weight if there are any. Otherwise
    /// the weights are visit counts sharpened by `1 / temperature`: a
    /// temperature of 1 is proportional to visits, temperatures close to 0
    /// approach picking the most visited move.
    ///
    /// # Errors
    ///
    /// Fails if the game at the root is over, the root has not been expanded
    /// or the temperature is not positive.
    pub fn distribution(&self, temperature: f32) -> anyhow::Result<Vec<f32>> {
        let root = self.root();
        if let Some(score) = root.outcome {
            bail!("game has ended with score {score}");
        }
        ensure!(root.is_expanded(), "no children found and game hasn't ended");
        ensure!(
            temperature > 0.0,
            "temperature should be positive, got {temperature}"
        );

        let children = root
            .children
            .iter()
            .map(|&(_, child)| &self.nodes[child])
            .collect_vec();
        let mut weights = if children.iter().any(|child| child.bound == Bound::Win) {
            children
                .iter()
                .map(|child| if child.bound == Bound::Win { 1.0 } else { 0.0 })
                .collect_vec()
        } else {
            // Dividing by the maximum keeps the powers in a sane range.
            let max_visits = children.iter().map(|child| child.visits).max().unwrap_or(0) + 1;
            children
                .iter()
                .map(|child| (child.visits as f32 / max_visits as f32).powf(temperature.recip()))
                .collect_vec()
        };

        let total: f32 = weights.iter().sum();
        if total > 0.0 {
            for weight in &mut weights {
                *weight /= total;
            }
        } else {
            warn!("move weights sum to {total}, falling back to uniform distribution");
            weights = vec![1.0 / weights.len() as f32; weights.len()];
        }
        Ok(weights)
    }

    /// Samples the next move from [`Tree::distribution`] and collects the
    /// statistics for training.
    ///
    /// # Errors
    ///
    /// Same as [`Tree::distribution`].
    pub fn next(&self, temperature: f32, rng: &mut impl Rng) -> anyhow::Result<Step<E::Action>> {
        let policy = self.distribution(temperature)?;
        let sampled = match WeightedIndex::new(&policy) {
            Ok(weights) => weights.sample(rng),
            Err(e) => {
                warn!("can not sample from {policy:?}: {e}, picking uniformly");
                rng.gen_range(0..policy.len())
            },
        };

        let root = self.root();
        Ok(Step {
            action: root.children[sampled].0,
            value: -root.value,
            prior_value: -root.prior_value,
            priors: root
                .children
                .iter()
                .map(|&(_, child)| self.nodes[child].prior)
                .collect(),
            actions: root.children.iter().map(|&(action, _)| action).collect(),
            policy,
        })
    }

    /// Makes the child reached by `action` the new root, keeping its subtree
    /// and the statistics gathered there. The rest of the tree is released.
    ///
    /// # Errors
    ///
    /// Fails if `action` does not lead to a child of the root.
    pub fn advance(&mut self, action: &E::Action) -> anyhow::Result<()> {
        let Some(new_root) = self.child(ROOT, action) else {
            bail!("{action:?} does not lead to a child of the root");
        };
        self.nodes[new_root].detach_mother();

        let mut remap = vec![TOMBSTONE; self.nodes.len()];
        let mut stack = vec![new_root];
        while let Some(index) = stack.pop() {
            remap[index] = index;
            stack.extend(self.nodes[index].children.iter().map(|&(_, child)| child));
        }
        // Children are always allocated after their parents, so keeping the
        // arena order puts the new root first.
        let mut kept = 0;
        for slot in &mut remap {
            if *slot != TOMBSTONE {
                *slot = kept;
                kept += 1;
            }
        }

        let released = self.nodes.len() - kept;
        self.nodes = std::mem::take(&mut self.nodes)
            .into_iter()
            .zip(&remap)
            .filter(|&(_, &slot)| slot != TOMBSTONE)
            .map(|(mut node, _)| {
                node.parent = node.parent.map(|parent| remap[parent]);
                for (_, child) in &mut node.children {
                    *child = remap[*child];
                }
                node
            })
            .collect();
        debug!("advanced root by {action:?}: kept {kept} nodes, released {released}");
        Ok(())
    }
}
