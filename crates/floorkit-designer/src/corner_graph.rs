//! Floor topology: corners connected by walls.
//!
//! Nodes live in an arena of reusable slots and are looked up by the corner
//! shape's id, so a corner that is removed and reinserted by undo keeps the
//! same key. Each node maps neighbouring corner ids to the id of the wall
//! shape joining them; an undirected wall is stored on both endpoints.

use floorkit_core::ShapeId;
use std::collections::{BTreeMap, HashMap};

/// Slot of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

#[derive(Debug, Clone)]
struct CornerNode {
    corner: ShapeId,
    /// neighbour corner -> wall
    edges: BTreeMap<ShapeId, ShapeId>,
}

#[derive(Debug, Clone, Default)]
pub struct CornerGraph {
    nodes: Vec<Option<CornerNode>>,
    free: Vec<usize>,
    index: HashMap<ShapeId, NodeIndex>,
}

impl CornerGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an empty node for `corner`. Returns `false` if one exists.
    pub fn add_corner(&mut self, corner: ShapeId) -> bool {
        if self.index.contains_key(&corner) {
            return false;
        }
        let node = CornerNode {
            corner,
            edges: BTreeMap::new(),
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.index.insert(corner, NodeIndex(slot));
        true
    }

    /// Drop the node for `corner` together with its outgoing edges.
    ///
    /// Neighbours keep their edges pointing at the removed corner; callers
    /// that want them gone remove the walls first.
    pub fn remove_corner(&mut self, corner: ShapeId) -> bool {
        let Some(NodeIndex(slot)) = self.index.remove(&corner) else {
            return false;
        };
        self.nodes[slot] = None;
        self.free.push(slot);
        true
    }

    pub fn contains(&self, corner: ShapeId) -> bool {
        self.index.contains_key(&corner)
    }

    pub fn node_index(&self, corner: ShapeId) -> Option<NodeIndex> {
        self.index.get(&corner).copied()
    }

    fn node(&self, corner: ShapeId) -> Option<&CornerNode> {
        let NodeIndex(slot) = *self.index.get(&corner)?;
        self.nodes.get(slot)?.as_ref()
    }

    fn node_mut(&mut self, corner: ShapeId) -> Option<&mut CornerNode> {
        let NodeIndex(slot) = *self.index.get(&corner)?;
        self.nodes.get_mut(slot)?.as_mut()
    }

    /// Connect two corners through `wall` in both directions.
    ///
    /// Does nothing and returns `false` unless both corners have nodes.
    pub fn link(&mut self, a: ShapeId, b: ShapeId, wall: ShapeId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        if let Some(node) = self.node_mut(a) {
            node.edges.insert(b, wall);
        }
        if let Some(node) = self.node_mut(b) {
            node.edges.insert(a, wall);
        }
        true
    }

    /// Disconnect two corners on whichever side still has a node. Returns
    /// the wall that joined them, if any.
    pub fn unlink(&mut self, a: ShapeId, b: ShapeId) -> Option<ShapeId> {
        let from_a = self.node_mut(a).and_then(|node| node.edges.remove(&b));
        let from_b = self.node_mut(b).and_then(|node| node.edges.remove(&a));
        from_a.or(from_b)
    }

    pub fn wall_between(&self, a: ShapeId, b: ShapeId) -> Option<ShapeId> {
        self.node(a)?.edges.get(&b).copied()
    }

    /// Neighbouring corners of `corner` with the walls leading to them.
    pub fn neighbours(&self, corner: ShapeId) -> impl Iterator<Item = (ShapeId, ShapeId)> + '_ {
        self.node(corner)
            .into_iter()
            .flat_map(|node| node.edges.iter().map(|(n, w)| (*n, *w)))
    }

    pub fn degree(&self, corner: ShapeId) -> usize {
        self.node(corner).map_or(0, |node| node.edges.len())
    }

    /// Corner ids in slot order.
    pub fn corners(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.nodes.iter().flatten().map(|node| node.corner)
    }

    /// Every directed edge as `(corner, neighbour, wall)`.
    pub fn edges(&self) -> impl Iterator<Item = (ShapeId, ShapeId, ShapeId)> + '_ {
        self.nodes.iter().flatten().flat_map(|node| {
            node.edges
                .iter()
                .map(move |(neighbour, wall)| (node.corner, *neighbour, *wall))
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.index.clear();
    }
}
