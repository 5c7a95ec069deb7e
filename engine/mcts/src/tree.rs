//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous `Vec` and referenced by `NodeId`
//! indices; parent links are indices as well, never owning references.
//! A tree is built for one decision and dropped whole afterwards, which
//! disposes of every node it owns.

use game_core::GameState;

use crate::node::{Node, NodeId};

/// Arena-backed search tree rooted at one game state.
#[derive(Debug)]
pub struct SearchTree<G: GameState> {
    nodes: Vec<Node<G>>,
    root: NodeId,
}

impl<G: GameState> SearchTree<G> {
    /// Create a tree holding only a root node for the given state.
    pub fn new(root_state: G) -> Self {
        Self {
            nodes: vec![Node::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Root node ID (always 0).
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<G> {
        &self.nodes[id.0 as usize]
    }

    /// Mutably borrow a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<G> {
        &mut self.nodes[id.0 as usize]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a child of `parent_id` reached by `action`, registering it
    /// in the parent's child list. Children are appended in the order
    /// they are created; expansion iterates legal actions in ascending
    /// order, so the child list stays action-sorted.
    pub fn add_child(&mut self, parent_id: NodeId, action: usize, prior: f32, state: G) -> NodeId {
        let child = Node::new_child(parent_id, action, prior, state);
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(child);
        self.get_mut(parent_id).children.push((action, child_id));
        child_id
    }

    /// Propagate a value from a leaf to the root, incrementing each
    /// visit count by exactly 1.
    ///
    /// `value` is in the leaf node's mover perspective. With
    /// `turn_based_flip` the carried value is negated each time the walk
    /// crosses a change of player-to-move, keeping every node's
    /// `value_sum` in its own mover's perspective. The walk is iterative
    /// so stack depth stays bounded and the flip point is auditable.
    pub fn backup(&mut self, leaf_id: NodeId, value: f32, turn_based_flip: bool) {
        let mut current = leaf_id;
        let mut value = value;

        loop {
            let (parent, player) = {
                let node = self.get_mut(current);
                node.visit_count += 1;
                node.value_sum += value;
                (node.parent, node.player)
            };

            if parent.is_none() {
                break;
            }
            if turn_based_flip && self.get(parent).player != player {
                value = -value;
            }
            current = parent;
        }
    }

    /// Sum of the root children's visit counts. Equals the number of
    /// completed simulations after a full search.
    pub fn root_child_visits(&self) -> u32 {
        self.get(self.root)
            .children
            .iter()
            .map(|&(_, id)| self.get(id).visit_count)
            .sum()
    }
}
