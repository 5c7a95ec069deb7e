//! Search-tree node representation.
//!
//! Each node represents a game state reached by taking one action from
//! its parent, and carries the visit/value statistics that drive PUCT
//! selection and the final policy target.
//!
//! All value statistics on a node (`value_sum`, `terminal_value`) are
//! expressed from the perspective of the player to move at that node.
//! The backup walk in [`crate::tree`] maintains this by flipping the
//! propagated value at each change of player when `turn_based_flip` is
//! enabled.

use game_core::{GameState, Player};

/// Index into the node arena. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct Node<G: GameState> {
    /// Parent node index (NONE for the root).
    pub parent: NodeId,

    /// Action that led to this node from its parent (0 for the root,
    /// where it carries no meaning).
    pub action: usize,

    /// Snapshot of the game state this node represents. Immutable once
    /// the node is created.
    pub state: G,

    /// Player to move at this state, derived from the state itself.
    pub player: Player,

    /// Number of completed simulations that passed through this node.
    pub visit_count: u32,

    /// Sum of values backed up through this node, in this node's
    /// mover perspective. `Q = value_sum / visit_count`.
    pub value_sum: f32,

    /// Prior probability assigned by the evaluator at expansion time.
    /// The root carries 1.0.
    pub prior: f32,

    /// Whether the state is terminal.
    pub is_terminal: bool,

    /// Terminal outcome, valid only when `is_terminal`. From the
    /// perspective of the player to move at this node.
    pub terminal_value: f32,

    /// Set once the evaluator has been queried and children created.
    /// Terminal nodes are never expanded.
    pub expanded: bool,

    /// Children as (action, node) pairs, in ascending action order.
    /// Once expanded, holds exactly the legal actions at this state.
    pub children: Vec<(usize, NodeId)>,
}

impl<G: GameState> Node<G> {
    /// Create a root node from a game state.
    pub fn new_root(state: G) -> Self {
        Self::new(NodeId::NONE, 0, 1.0, state)
    }

    /// Create a child node reached by `action` from `parent`.
    pub fn new_child(parent: NodeId, action: usize, prior: f32, state: G) -> Self {
        Self::new(parent, action, prior, state)
    }

    fn new(parent: NodeId, action: usize, prior: f32, state: G) -> Self {
        let player = state.player_to_move();
        let terminal = state.terminal_value();
        Self {
            parent,
            action,
            player,
            visit_count: 0,
            value_sum: 0.0,
            prior,
            is_terminal: terminal.is_some(),
            terminal_value: terminal.unwrap_or(0.0),
            expanded: false,
            children: Vec::new(),
            state,
        }
    }

    /// Mean value `Q = W / N`, always recomputed from the sums and
    /// defined as 0 when unvisited.
    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }

    /// A leaf is a node the selection walk stops at: unexpanded or
    /// terminal.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal || !self.expanded
    }
}
