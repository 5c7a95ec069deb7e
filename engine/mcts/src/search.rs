//! The search driver: select, expand, evaluate, back up.
//!
//! One `MctsSearch` produces one decision. It expands the root, mixes
//! Dirichlet noise into the root priors when configured, runs the
//! requested number of simulations, and extracts a policy target plus
//! an acting choice from the resulting visit counts.

use game_core::GameState;
use rand::Rng;
use rand_distr::{Distribution, Gamma};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::evaluator::{normalize_priors, Evaluator, EvaluatorError};
use crate::node::NodeId;
use crate::policy::{choose_action, visit_policy};
use crate::select::select_leaf;
use crate::tree::SearchTree;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    #[error("cannot search a state with no legal actions")]
    NoLegalActions,

    #[error("game rejected action {0} reported as legal")]
    IllegalAction(usize),
}

impl From<game_core::IllegalAction> for SearchError {
    fn from(err: game_core::IllegalAction) -> Self {
        SearchError::IllegalAction(err.action)
    }
}

/// Outcome of one completed search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Action chosen to play.
    pub action: usize,

    /// Policy target over the full action space, derived from root
    /// visit counts. Sums to 1.
    pub policy: Vec<f32>,

    /// Root mean value after the search, from the root mover's
    /// perspective.
    pub value: f32,

    /// Number of simulations actually run.
    pub simulations: u32,
}

/// A single-decision search over one root state.
pub struct MctsSearch<'a, G: GameState, E: Evaluator<G>> {
    tree: SearchTree<G>,
    evaluator: &'a E,
    config: &'a MctsConfig,
}

impl<'a, G: GameState, E: Evaluator<G>> MctsSearch<'a, G, E> {
    pub fn new(root_state: G, evaluator: &'a E, config: &'a MctsConfig) -> Self {
        Self {
            tree: SearchTree::new(root_state),
            evaluator,
            config,
        }
    }

    /// Run the configured number of simulations and extract the result.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<SearchResult, SearchError> {
        let root = self.tree.root();
        if self.tree.get(root).is_terminal {
            return Err(SearchError::NoLegalActions);
        }

        // The root expansion does not count as a simulation; its value
        // estimate is discarded so that the root's statistics come
        // entirely from backed-up simulations.
        self.expand_node(root)?;
        if self.config.add_dirichlet_noise {
            self.add_root_noise(rng);
        }

        for _ in 0..self.config.num_simulations {
            self.simulate()?;
        }

        let num_actions = self.tree.get(root).state.num_actions();
        let policy = visit_policy(
            &self.tree,
            num_actions,
            self.config.temperature,
            self.config.argmax_tree_policy,
        );
        let action = choose_action(&self.tree, &policy, self.config, rng)
            .ok_or(SearchError::NoLegalActions)?;
        let value = self.tree.get(root).mean_value();

        debug!(
            action,
            value,
            simulations = self.config.num_simulations,
            tree_nodes = self.tree.len(),
            "search complete"
        );

        Ok(SearchResult {
            action,
            policy,
            value,
            simulations: self.config.num_simulations,
        })
    }

    /// One simulation: walk to a leaf, resolve its value, back it up.
    fn simulate(&mut self) -> Result<(), SearchError> {
        let leaf = select_leaf(&self.tree, self.config);
        let node = self.tree.get(leaf);

        let value = if node.is_terminal {
            node.terminal_value
        } else {
            self.expand_node(leaf)?
        };

        self.tree.backup(leaf, value, self.config.turn_based_flip);
        Ok(())
    }

    /// Evaluate a node, create one child per legal action with the
    /// renormalized priors, and return the evaluator's value estimate
    /// (in the node's mover perspective).
    fn expand_node(&mut self, node_id: NodeId) -> Result<f32, SearchError> {
        let (state, legal) = {
            let node = self.tree.get(node_id);
            (node.state.clone(), node.state.legal_actions())
        };
        if legal.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let evaluation = self.evaluator.evaluate(&state)?;
        if evaluation.prior.len() != state.num_actions() {
            return Err(EvaluatorError::MalformedPrior {
                expected: state.num_actions(),
                actual: evaluation.prior.len(),
            }
            .into());
        }
        let priors = normalize_priors(&evaluation.prior, &legal);

        for (&action, &prior) in legal.iter().zip(priors.iter()) {
            let child_state = state.apply(action)?;
            self.tree.add_child(node_id, action, prior, child_state);
        }
        self.tree.get_mut(node_id).expanded = true;

        trace!(
            node = node_id.0,
            children = legal.len(),
            value = evaluation.value,
            "expanded node"
        );
        Ok(evaluation.value)
    }

    /// Mix Dirichlet noise into the root children's priors:
    /// `P' = (1 - epsilon) * P + epsilon * noise`. The Dirichlet draw is
    /// built from independent Gamma(alpha, 1) samples normalized to sum
    /// to 1. Skipped when the parameters make noise a no-op.
    fn add_root_noise<R: Rng>(&mut self, rng: &mut R) {
        let alpha = self.config.dirichlet_noise;
        let epsilon = self.config.dirichlet_epsilon;
        if alpha <= 0.0 || epsilon <= 0.0 {
            return;
        }
        let gamma = match Gamma::new(alpha, 1.0) {
            Ok(g) => g,
            Err(_) => return,
        };

        let children: Vec<NodeId> = self
            .tree
            .get(self.tree.root())
            .children
            .iter()
            .map(|&(_, id)| id)
            .collect();
        if children.len() < 2 {
            return;
        }

        let mut noise: Vec<f32> = children.iter().map(|_| gamma.sample(rng)).collect();
        let total: f32 = noise.iter().sum();
        if total <= 0.0 {
            return;
        }
        for n in &mut noise {
            *n /= total;
        }

        for (child_id, n) in children.into_iter().zip(noise) {
            let node = self.tree.get_mut(child_id);
            node.prior = (1.0 - epsilon) * node.prior + epsilon * n;
        }
    }

    /// The underlying tree, for inspection after a run.
    pub fn tree(&self) -> &SearchTree<G> {
        &self.tree
    }
}

/// Build a search over `root_state`, run it, and return the result.
pub fn run_mcts<G: GameState, E: Evaluator<G>, R: Rng>(
    root_state: G,
    evaluator: &E,
    config: &MctsConfig,
    rng: &mut R,
) -> Result<SearchResult, SearchError> {
    MctsSearch::new(root_state, evaluator, config).run(rng)
}
