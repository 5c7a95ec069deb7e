//! One self-play episode: search, act, record, backfill.

use anyhow::{Context, Result};
use game_core::{GameState, Player};
use mcts::{Evaluator, MctsConfig, MctsSearch};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One decision point's worth of training data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Observation the evaluator saw at this state.
    pub observation: Vec<f32>,

    /// Visit-count policy target over the full action space.
    pub mcts_policy: Vec<f32>,

    /// Action actually played.
    pub action: usize,

    /// Root mean value after the search, in the mover's perspective.
    pub root_value: f32,

    /// Player who made this decision.
    pub player: Player,

    /// Terminal outcome from this decision's mover perspective. `None`
    /// until the episode ends, and stays `None` if it is truncated.
    pub value_label: Option<f32>,
}

/// A completed (or truncated) self-play episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub records: Vec<DecisionRecord>,

    /// Terminal value of the final state, in the perspective of the
    /// player nominally to move there. `None` if the episode hit the
    /// step cap before terminating.
    pub outcome: Option<f32>,

    pub steps: usize,
}

impl Episode {
    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Play one episode from `initial`, running a fresh search at every
/// decision and stepping the real environment with the chosen action.
/// On termination each record's `value_label` is backfilled with the
/// terminal outcome re-signed into that record's mover perspective.
pub fn run_episode<G, E, R>(
    initial: G,
    evaluator: &E,
    config: &MctsConfig,
    max_steps: usize,
    rng: &mut R,
) -> Result<Episode>
where
    G: GameState,
    E: Evaluator<G>,
    R: Rng,
{
    let mut state = initial;
    let mut records = Vec::new();

    for step in 0..max_steps {
        if state.terminal_value().is_some() {
            break;
        }

        let observation = state.observation();
        let player = state.player_to_move();

        let mut search = MctsSearch::new(state.clone(), evaluator, config);
        let result = search
            .run(rng)
            .with_context(|| format!("search failed at step {step}"))?;

        debug!(
            step,
            action = result.action,
            root_value = result.value,
            "decision made"
        );

        records.push(DecisionRecord {
            observation,
            mcts_policy: result.policy,
            action: result.action,
            root_value: result.value,
            player,
            value_label: None,
        });

        state = state
            .apply(result.action)
            .with_context(|| format!("environment rejected searched action at step {step}"))?;
    }

    let outcome = state.terminal_value();
    if let Some(terminal) = outcome {
        let final_player = state.player_to_move();
        for record in &mut records {
            // Re-sign the outcome into the recorder's perspective. The
            // comparison is by player, not by ply parity, so games where
            // one side moves twice in a row stay correct.
            record.value_label = Some(if record.player == final_player {
                terminal
            } else {
                -terminal
            });
        }
    }

    let steps = records.len();
    info!(
        steps,
        complete = outcome.is_some(),
        outcome = outcome.unwrap_or(f32::NAN),
        "episode finished"
    );

    Ok(Episode {
        records,
        outcome,
        steps,
    })
}
