//! Self-play demo: generate TicTacToe training episodes with a uniform
//! evaluator and log per-episode statistics.
//!
//! Usage: `selfplay [num_episodes] [seed]`

use anyhow::{Context, Result};
use games_tictactoe::State;
use mcts::{MctsConfig, UniformEvaluator};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use selfplay::run_episode;
use tracing::info;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let num_episodes: u64 = match args.next() {
        Some(arg) => arg.parse().context("num_episodes must be an integer")?,
        None => 10,
    };
    let seed: u64 = match args.next() {
        Some(arg) => arg.parse().context("seed must be an integer")?,
        None => 0,
    };

    let config = MctsConfig::for_training();
    let evaluator = UniformEvaluator::new();

    info!(num_episodes, seed, simulations = config.num_simulations, "starting self-play");

    let mut decisive = 0u64;
    let mut drawn = 0u64;
    let mut total_records = 0usize;

    for index in 0..num_episodes {
        let mut rng = ChaCha20Rng::seed_from_u64(seed.wrapping_add(index));
        let episode = run_episode(State::new(), &evaluator, &config, 9, &mut rng)
            .with_context(|| format!("episode {index} failed"))?;

        match episode.outcome {
            Some(outcome) if outcome != 0.0 => decisive += 1,
            Some(_) => drawn += 1,
            None => {}
        }
        total_records += episode.records.len();
    }

    info!(decisive, drawn, total_records, "self-play complete");
    Ok(())
}
