//! Evaluator interface for position evaluation.
//!
//! The evaluator maps an observation to a prior over the full action
//! space and a scalar value estimate from the mover's perspective. In
//! production this is a neural network; [`UniformEvaluator`] ships for
//! tests and benches. Priors need not be normalized: the engine masks
//! them to the legal actions and renormalizes at expansion time.

use game_core::GameState;
use thiserror::Error;

/// Errors produced by an evaluator. None of these are recoverable
/// inside the engine: a failed evaluation aborts the current decision's
/// search rather than producing a statistically invalid policy target.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("prior has wrong shape: expected {expected} entries, got {actual}")]
    MalformedPrior { expected: usize, actual: usize },
}

/// Result of evaluating one game state.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Unnormalized prior over the full action space (index i is
    /// action i). Entries on illegal actions are ignored.
    pub prior: Vec<f32>,

    /// Value estimate in [-1, 1] from the perspective of the player to
    /// move at the evaluated state.
    pub value: f32,
}

/// Trait for position evaluators.
pub trait Evaluator<G: GameState>: Send + Sync {
    fn evaluate(&self, state: &G) -> Result<Evaluation, EvaluatorError>;
}

/// Mask a raw prior to the legal actions and renormalize so it sums to
/// 1 over them. Negative entries are treated as zero mass. If no legal
/// action carries mass (a plausible degenerate evaluator output, e.g.
/// identical logits rounded away), fall back to a uniform distribution
/// instead of dividing by zero.
///
/// Returns one probability per entry of `legal_actions`, in order.
pub fn normalize_priors(raw: &[f32], legal_actions: &[usize]) -> Vec<f32> {
    let mut masked: Vec<f32> = legal_actions
        .iter()
        .map(|&a| raw.get(a).copied().unwrap_or(0.0).max(0.0))
        .collect();

    let total: f32 = masked.iter().sum();
    if total > 0.0 {
        for p in &mut masked {
            *p /= total;
        }
    } else {
        let uniform = 1.0 / legal_actions.len() as f32;
        for p in &mut masked {
            *p = uniform;
        }
    }
    masked
}

/// Assigns equal prior mass to every legal action and a neutral value.
/// Useful for exercising the search without a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformEvaluator;

impl UniformEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl<G: GameState> Evaluator<G> for UniformEvaluator {
    fn evaluate(&self, state: &G) -> Result<Evaluation, EvaluatorError> {
        let mut prior = vec![0.0; state.num_actions()];
        for action in state.legal_actions() {
            prior[action] = 1.0;
        }
        Ok(Evaluation { prior, value: 0.0 })
    }
}
