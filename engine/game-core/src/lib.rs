//! Core game-state abstraction shared by the search engine and self-play.
//!
//! This crate defines the boundary between a game implementation and the
//! search: legal-action enumeration, terminal detection, a forward step,
//! and an observation encoding for the evaluator. Games implement
//! [`GameState`]; everything above this crate is game-agnostic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the two players in a turn-based game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Error returned when a step is attempted with an action that is not
/// legal in the current state. This is a caller contract violation, not
/// a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("action {action} is not legal in the current state")]
pub struct IllegalAction {
    pub action: usize,
}

/// A point-in-time snapshot of a two-player, turn-based game.
///
/// Implementations are value types: `apply` returns a new state and the
/// original is untouched, so the search can explore freely on clones
/// without ever mutating the real environment. Cloning a state is the
/// snapshot mechanism; a clone must be cheap relative to a search
/// simulation.
///
/// # Value convention
///
/// `terminal_value` reports the outcome from the perspective of the
/// player whose turn it would be at that state: a state in which the
/// previous mover has just won reports a negative value, since the
/// player nominally to move has lost. The same convention applies to
/// evaluator value estimates built on `observation`. Every consumer of
/// game values in this workspace assumes this convention; it is never
/// mixed with an absolute (player-one) outcome.
pub trait GameState: Clone + Send + std::fmt::Debug {
    /// Size of the full (fixed) action space. Action indices are in
    /// `0..num_actions()`.
    fn num_actions(&self) -> usize;

    /// Legal action indices at this state, in ascending order.
    ///
    /// A non-terminal state must have at least one legal action; a state
    /// with none must classify itself as terminal. Returning an empty
    /// set from a non-terminal state is a contract violation that the
    /// search rejects outright.
    fn legal_actions(&self) -> Vec<usize>;

    /// `Some(outcome)` if the game is over, `None` otherwise. The
    /// outcome is from the perspective of the player to move (see the
    /// trait-level value convention).
    fn terminal_value(&self) -> Option<f32>;

    /// The player whose turn it is at this state. Must be derived from
    /// the actual game state; callers never assume strict alternation
    /// by ply, so games where one side moves several times in a row are
    /// supported.
    fn player_to_move(&self) -> Player;

    /// Apply an action, returning the successor state.
    fn apply(&self, action: usize) -> Result<Self, IllegalAction>;

    /// Observation encoding fed to the evaluator (neural-network input
    /// layout is game-defined; the search treats it as opaque).
    fn observation(&self) -> Vec<f32>;
}
