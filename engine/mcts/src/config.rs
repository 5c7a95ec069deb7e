//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// Configuration for Monte Carlo Tree Search.
///
/// The defaults are the self-play (training) settings. Evaluation
/// matches use [`MctsConfig::for_evaluation`], which overlays the
/// deterministic settings on top of the training defaults without
/// changing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Number of simulations to run per decision.
    pub num_simulations: u32,

    /// Exploration constant in the PUCT formula. Higher values favor
    /// high-prior, low-visit actions over high-value ones.
    pub puct_coefficient: f32,

    /// Temperature applied to root visit counts when extracting the
    /// policy target. 1.0 is proportional to visits; values below 1e-6
    /// collapse to a one-hot on the most-visited action.
    pub temperature: f32,

    /// Whether to mix Dirichlet noise into the root priors. Enabled
    /// during self-play data generation, disabled for evaluation.
    pub add_dirichlet_noise: bool,

    /// Concentration parameter of the root Dirichlet noise.
    pub dirichlet_noise: f32,

    /// Fraction of the root prior replaced by Dirichlet noise:
    /// `P' = (1 - epsilon) * P + epsilon * noise`.
    pub dirichlet_epsilon: f32,

    /// Force the acting choice (and the policy target) to the one-hot
    /// argmax over visit counts, regardless of temperature.
    pub argmax_tree_policy: bool,

    /// Act by the child with the highest mean value instead of the most
    /// visits. Used at evaluation time to prefer the search's most
    /// trusted value over its most explored branch.
    pub argmax_child_value: bool,

    /// Probability of overriding the computed policy with a uniformly
    /// random legal action. An exploration floor independent of the
    /// tree statistics.
    pub epsilon: f32,

    /// Negate the backed-up value at each change of player-to-move so
    /// that every node's statistics are from its own mover's
    /// perspective. Required for alternating-move games; disable for
    /// single-perspective games.
    pub turn_based_flip: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 150,
            puct_coefficient: 1.0,
            temperature: 1.5,
            add_dirichlet_noise: true,
            dirichlet_noise: 0.03,
            dirichlet_epsilon: 0.25,
            argmax_tree_policy: false,
            argmax_child_value: true,
            epsilon: 0.05,
            turn_based_flip: true,
        }
    }
}

impl MctsConfig {
    /// Self-play settings (root noise and sampling enabled).
    pub fn for_training() -> Self {
        Self::default()
    }

    /// Evaluation-time overlay: deterministic root policy, no root
    /// noise, no random-action floor. All other fields keep their
    /// training defaults, so a fixed evaluator and seed give identical
    /// searches.
    pub fn for_evaluation() -> Self {
        Self {
            argmax_tree_policy: true,
            add_dirichlet_noise: false,
            epsilon: 0.0,
            ..Self::default()
        }
    }

    /// A small deterministic config for tests.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 50,
            temperature: 0.0,
            add_dirichlet_noise: false,
            argmax_tree_policy: true,
            argmax_child_value: false,
            epsilon: 0.0,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the PUCT exploration constant.
    pub fn with_puct_coefficient(mut self, c: f32) -> Self {
        self.puct_coefficient = c;
        self
    }

    /// Builder pattern: set temperature.
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    /// Builder pattern: enable Dirichlet noise with the given
    /// concentration and mixing fraction.
    pub fn with_dirichlet_noise(mut self, alpha: f32, epsilon: f32) -> Self {
        self.add_dirichlet_noise = true;
        self.dirichlet_noise = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }

    /// Builder pattern: disable Dirichlet noise.
    pub fn without_dirichlet_noise(mut self) -> Self {
        self.add_dirichlet_noise = false;
        self
    }

    /// Builder pattern: set the random-action override probability.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder pattern: enable or disable alternating-sign backup.
    pub fn with_turn_based_flip(mut self, flip: bool) -> Self {
        self.turn_based_flip = flip;
        self
    }

    /// Builder pattern: act by max child value instead of visit count.
    pub fn with_argmax_child_value(mut self, argmax: bool) -> Self {
        self.argmax_child_value = argmax;
        self
    }
}
