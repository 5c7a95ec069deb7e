//! Self-play rollout layer.
//!
//! Drives one environment at a time: a fresh search per decision, the
//! chosen action applied to the real environment, and one
//! [`DecisionRecord`] accumulated per move. When the episode terminates
//! the outcome is backfilled into every record as a value label, giving
//! the training loop `(observation, policy, value)` triples.

pub mod episode;

pub use episode::{run_episode, DecisionRecord, Episode};
