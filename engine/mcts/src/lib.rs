//! Monte Carlo Tree Search for two-player, alternating-move games.
//!
//! The search follows the AlphaZero recipe: an evaluator supplies a
//! prior over actions and a value estimate for each expanded node, PUCT
//! selection balances those priors against accumulated values, and the
//! root visit counts become a training policy target.
//!
//! # Example
//!
//! ```
//! use games_tictactoe::State;
//! use mcts::{run_mcts, MctsConfig, UniformEvaluator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let config = MctsConfig::for_testing();
//! let mut rng = ChaCha20Rng::seed_from_u64(0);
//! let result = run_mcts(State::new(), &UniformEvaluator, &config, &mut rng).unwrap();
//! assert!(result.action < 9);
//! ```

pub mod config;
pub mod evaluator;
pub mod node;
pub mod policy;
pub mod search;
pub mod select;
pub mod tree;

pub use config::MctsConfig;
pub use evaluator::{normalize_priors, Evaluation, Evaluator, EvaluatorError, UniformEvaluator};
pub use node::{Node, NodeId};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::SearchTree;
