//! TicTacToe implementation of the [`game_core::GameState`] trait.
//!
//! The simplest alternating-move game with a decisive tactical signal,
//! used throughout the workspace to exercise and test the search
//! engine.
//!
//! # Usage
//!
//! ```rust
//! use game_core::GameState;
//! use games_tictactoe::State;
//!
//! let state = State::new().apply(4).unwrap();
//! assert_eq!(state.legal_actions().len(), 8);
//! ```

use game_core::{GameState, IllegalAction, Player};

/// Winning positions (rows, columns, diagonals).
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Final outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// TicTacToe game state.
///
/// Player One is X and moves first; actions are board positions 0-8 in
/// row-major order. The player to move alternates after every move,
/// including the last one, so a won state is always observed from the
/// loser's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    board: [Option<Player>; 9],
    current_player: Player,
    outcome: Option<Outcome>,
}

impl State {
    /// Create a new initial game state.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current_player: Player::One,
            outcome: None,
        }
    }

    /// Check if the game is over.
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    /// Final outcome, `None` while the game is ongoing.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Piece at a board position.
    pub fn cell(&self, position: usize) -> Option<Player> {
        self.board[position]
    }

    fn check_outcome(board: &[Option<Player>; 9]) -> Option<Outcome> {
        for [a, b, c] in LINES {
            if let Some(player) = board[a] {
                if board[b] == Some(player) && board[c] == Some(player) {
                    return Some(Outcome::Win(player));
                }
            }
        }
        if board.iter().all(|cell| cell.is_some()) {
            return Some(Outcome::Draw);
        }
        None
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for State {
    fn num_actions(&self) -> usize {
        9
    }

    fn legal_actions(&self) -> Vec<usize> {
        if self.is_done() {
            return Vec::new();
        }
        (0..9).filter(|&pos| self.board[pos].is_none()).collect()
    }

    fn terminal_value(&self) -> Option<f32> {
        self.outcome.map(|outcome| match outcome {
            Outcome::Draw => 0.0,
            Outcome::Win(player) if player == self.current_player => 1.0,
            Outcome::Win(_) => -1.0,
        })
    }

    fn player_to_move(&self) -> Player {
        self.current_player
    }

    fn apply(&self, action: usize) -> Result<Self, IllegalAction> {
        if self.is_done() || action >= 9 || self.board[action].is_some() {
            return Err(IllegalAction { action });
        }

        let mut next = *self;
        next.board[action] = Some(self.current_player);
        next.outcome = Self::check_outcome(&next.board);
        // The mover always hands the turn over, even on the final move:
        // terminal values are read from the perspective of the player
        // who would move next.
        next.current_player = self.current_player.opponent();
        Ok(next)
    }

    /// 29 floats: one-hot X positions (9), one-hot O positions (9),
    /// legal-move mask (9), player-to-move indicator (2).
    fn observation(&self) -> Vec<f32> {
        let mut obs = vec![0.0; 29];
        for (i, cell) in self.board.iter().enumerate() {
            match cell {
                Some(Player::One) => obs[i] = 1.0,
                Some(Player::Two) => obs[i + 9] = 1.0,
                None => {}
            }
        }
        for action in self.legal_actions() {
            obs[18 + action] = 1.0;
        }
        match self.current_player {
            Player::One => obs[27] = 1.0,
            Player::Two => obs[28] = 1.0,
        }
        obs
    }
}
