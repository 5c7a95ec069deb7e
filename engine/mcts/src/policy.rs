//! Root policy extraction and action choice.
//!
//! After a search finishes, the root children's visit counts become the
//! policy target stored for training, and one action is chosen to
//! actually play. The two are related but not identical: the policy
//! target always reflects visit counts (tempered or one-hot), while the
//! acting choice can additionally be overridden by a random-action
//! floor or by the max-value child.

use game_core::GameState;
use rand::Rng;

use crate::config::MctsConfig;
use crate::select::child_q;
use crate::tree::SearchTree;

/// Below this the temperature is treated as zero and the policy
/// collapses to a one-hot on the most-visited action.
const TEMPERATURE_FLOOR: f32 = 1e-6;

/// Extract the policy target over the full action space from the root
/// children's visit counts.
///
/// With `argmax` (or a temperature under the floor) the result is
/// one-hot on the most-visited action, lowest action index on ties.
/// Otherwise each child gets mass proportional to `N^(1/temperature)`;
/// counts are divided by the max count before exponentiation so large
/// counts under small temperatures cannot overflow. Actions without a
/// root child get 0.
pub fn visit_policy<G: GameState>(
    tree: &SearchTree<G>,
    num_actions: usize,
    temperature: f32,
    argmax: bool,
) -> Vec<f32> {
    let mut policy = vec![0.0; num_actions];
    let root = tree.get(tree.root());
    if root.children.is_empty() {
        return policy;
    }

    if argmax || temperature < TEMPERATURE_FLOOR {
        if let Some(action) = best_action_by_visits(tree) {
            policy[action] = 1.0;
        }
        return policy;
    }

    let max_visits = root
        .children
        .iter()
        .map(|&(_, id)| tree.get(id).visit_count)
        .max()
        .unwrap_or(0)
        .max(1) as f32;

    let mut total = 0.0;
    for &(action, child_id) in &root.children {
        let n = tree.get(child_id).visit_count as f32;
        let weight = (n / max_visits).powf(1.0 / temperature);
        policy[action] = weight;
        total += weight;
    }
    if total > 0.0 {
        for p in &mut policy {
            *p /= total;
        }
    }
    policy
}

/// Sample an action index from a probability distribution over the full
/// action space. Falls back to the last positive entry if floating point
/// round-off leaves the cumulative sum short of the drawn point.
pub fn sample_action<R: Rng>(policy: &[f32], rng: &mut R) -> Option<usize> {
    let total: f32 = policy.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let point = rng.gen::<f32>() * total;
    let mut cumulative = 0.0;
    for (action, &p) in policy.iter().enumerate() {
        cumulative += p;
        if point < cumulative {
            return Some(action);
        }
    }
    policy.iter().rposition(|&p| p > 0.0)
}

/// Most-visited root child's action, lowest action index on ties.
pub fn best_action_by_visits<G: GameState>(tree: &SearchTree<G>) -> Option<usize> {
    let root = tree.get(tree.root());
    let mut best: Option<(usize, u32)> = None;
    for &(action, child_id) in &root.children {
        let visits = tree.get(child_id).visit_count;
        match best {
            Some((_, best_visits)) if visits <= best_visits => {}
            _ => best = Some((action, visits)),
        }
    }
    best.map(|(action, _)| action)
}

/// Action of the root child with the highest mean value, seen from the
/// root mover's perspective. Lowest action index on ties; unvisited
/// children count as 0.
pub fn best_action_by_value<G: GameState>(
    tree: &SearchTree<G>,
    turn_based_flip: bool,
) -> Option<usize> {
    let root = tree.get(tree.root());
    let mut best: Option<(usize, f32)> = None;
    for &(action, child_id) in &root.children {
        let q = child_q(root, tree.get(child_id), turn_based_flip);
        match best {
            Some((_, best_q)) if q <= best_q => {}
            _ => best = Some((action, q)),
        }
    }
    best.map(|(action, _)| action)
}

/// Uniformly random legal action at the root state.
pub fn random_legal_action<G: GameState, R: Rng>(
    tree: &SearchTree<G>,
    rng: &mut R,
) -> Option<usize> {
    let legal = tree.get(tree.root()).state.legal_actions();
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.gen_range(0..legal.len())])
}

/// Choose the action to play, applying the overrides in order:
/// random-action floor (`epsilon`), max-value child
/// (`argmax_child_value`), one-hot visits (`argmax_tree_policy` or zero
/// temperature), then tempered sampling from `policy`.
pub fn choose_action<G: GameState, R: Rng>(
    tree: &SearchTree<G>,
    policy: &[f32],
    config: &MctsConfig,
    rng: &mut R,
) -> Option<usize> {
    if config.epsilon > 0.0 && rng.gen::<f32>() < config.epsilon {
        return random_legal_action(tree, rng);
    }
    if config.argmax_child_value {
        return best_action_by_value(tree, config.turn_based_flip);
    }
    if config.argmax_tree_policy || config.temperature < TEMPERATURE_FLOOR {
        return best_action_by_visits(tree);
    }
    sample_action(policy, rng)
}
