//! PUCT action selection.
//!
//! During each simulation the tree is walked from the root by picking,
//! at every expanded non-terminal node, the child maximizing
//!
//! `score(a) = Q(a) + puct_coefficient * P(a) * sqrt(N_parent) / (1 + N(a))`
//!
//! where `Q(a)` is the child's mean value converted to the parent's
//! perspective. Ties break deterministically on the lowest action index
//! so that searches are reproducible under a fixed seed.

use game_core::GameState;

use crate::config::MctsConfig;
use crate::node::{Node, NodeId};
use crate::tree::SearchTree;

/// Walk from the root to the first unexpanded or terminal node,
/// descending through PUCT-maximal children.
pub fn select_leaf<G: GameState>(tree: &SearchTree<G>, config: &MctsConfig) -> NodeId {
    let mut current = tree.root();

    loop {
        let node = tree.get(current);
        if node.is_leaf() {
            return current;
        }

        match select_child(tree, current, config) {
            Some(child) => current = child,
            // Expanded non-terminal nodes always have children; treat an
            // empty child list as a leaf rather than looping.
            None => return current,
        }
    }
}

/// Pick the PUCT-maximal child of `node_id`, or `None` if it has no
/// children. The first maximum in ascending action order wins ties.
pub fn select_child<G: GameState>(
    tree: &SearchTree<G>,
    node_id: NodeId,
    config: &MctsConfig,
) -> Option<NodeId> {
    let parent = tree.get(node_id);
    // sqrt(0) = 0: before the parent has any visits the exploration
    // term vanishes and children rank purely by prior.
    let sqrt_parent = (parent.visit_count as f32).sqrt();

    let mut best: Option<(NodeId, f32)> = None;
    for &(_, child_id) in &parent.children {
        let score = puct_score(parent, tree.get(child_id), sqrt_parent, config);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((child_id, score)),
        }
    }
    best.map(|(id, _)| id)
}

/// PUCT score of one child, from the parent's perspective.
fn puct_score<G: GameState>(
    parent: &Node<G>,
    child: &Node<G>,
    sqrt_parent: f32,
    config: &MctsConfig,
) -> f32 {
    let q = child_q(parent, child, config.turn_based_flip);
    let u = config.puct_coefficient * child.prior * sqrt_parent / (1.0 + child.visit_count as f32);
    q + u
}

/// A child's mean value seen from the parent's perspective.
///
/// Node statistics are stored in each node's own mover perspective, so
/// when the player changes across the edge (and `turn_based_flip` is
/// on) the sign inverts: a position that is winning for the child's
/// mover is losing for the parent's. Unvisited children contribute 0.
pub fn child_q<G: GameState>(parent: &Node<G>, child: &Node<G>, turn_based_flip: bool) -> f32 {
    if child.visit_count == 0 {
        return 0.0;
    }
    let q = child.mean_value();
    if turn_based_flip && parent.player != child.player {
        -q
    } else {
        q
    }
}
