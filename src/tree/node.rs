//! Tree skeleton storage.
//!
//! Nodes live in a flat arena and refer to their children by index, so a
//! tree has no back references and drops as one allocation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a node inside its [`TreeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Growth role of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root growth of a tree; flared, wide fan-out.
    #[default]
    Trunk,
    /// Any recursively spawned child; may carry leaves.
    Branch,
}

/// One straight piece of a trunk or branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
    pub thickness: f32,
    pub kind: NodeKind,
}

impl Segment {
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

/// Outline variant of a leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeafShape {
    /// Pointed diamond
    Lance,
    /// Rounded, six-sided
    Oval,
    /// Single narrow triangle
    Sliver,
}

impl LeafShape {
    pub const ALL: [LeafShape; 3] = [LeafShape::Lance, LeafShape::Oval, LeafShape::Sliver];

    pub fn from_index(index: u32) -> Self {
        Self::ALL[index as usize % Self::ALL.len()]
    }
}

/// A single leaf placed near a branch sub-segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafCluster {
    pub position: Vec2,
    pub angle: f32,
    pub length: f32,
    pub width: f32,
    pub shape: LeafShape,
}

/// A trunk or branch: its growth inputs, and after growth its segments,
/// leaves and children.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub origin: Vec2,
    /// Initial growth direction (radians, y down in pixel space)
    pub angle: f32,
    pub length: f32,
    pub thickness: f32,
    /// Remaining branching levels; children have `depth - 1`
    pub depth: u32,
    pub kind: NodeKind,
    pub segments: Vec<Segment>,
    pub leaves: Vec<LeafCluster>,
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub fn new(origin: Vec2, angle: f32, length: f32, thickness: f32, depth: u32, kind: NodeKind) -> Self {
        Self {
            origin,
            angle,
            length,
            thickness,
            depth,
            kind,
            segments: Vec::new(),
            leaves: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Flat storage for the nodes of one tree.
#[derive(Clone, Debug, Default)]
pub struct TreeArena {
    nodes: Vec<TreeNode>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A fully grown tree: an arena plus the id of its trunk.
#[derive(Clone, Debug)]
pub struct Tree {
    pub arena: TreeArena,
    pub root: NodeId,
}

impl Tree {
    /// Node ids in depth-first pre-order, with each node's generation below the root
    pub fn pre_order(&self) -> Vec<(NodeId, u32)> {
        let mut order = Vec::with_capacity(self.arena.len());
        let mut stack = vec![(self.root, 0u32)];
        while let Some((id, generation)) = stack.pop() {
            order.push((id, generation));
            for &child in self.arena.get(id).children.iter().rev() {
                stack.push((child, generation + 1));
            }
        }
        order
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of branching generations below the trunk
    pub fn depth_span(&self) -> u32 {
        self.pre_order().iter().map(|&(_, g)| g).max().unwrap_or(0)
    }

    /// All segments in pre-order
    pub fn segments(&self) -> Vec<Segment> {
        self.pre_order()
            .iter()
            .flat_map(|&(id, _)| self.arena.get(id).segments.iter().copied())
            .collect()
    }

    /// All leaves in pre-order
    pub fn leaves(&self) -> Vec<LeafCluster> {
        self.pre_order()
            .iter()
            .flat_map(|&(id, _)| self.arena.get(id).leaves.iter().copied())
            .collect()
    }

    /// Every segment paired with the segment its start joins: the previous
    /// segment of the same node, or for a node's first segment the last
    /// segment of its parent.
    pub fn connected_segments(&self) -> Vec<(Segment, Option<Segment>)> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, Option<Segment>)> = vec![(self.root, None)];

        while let Some((id, parent_last)) = stack.pop() {
            let node = self.arena.get(id);
            let mut previous = parent_last;
            for segment in &node.segments {
                out.push((*segment, previous));
                previous = Some(*segment);
            }
            let last = node.segments.last().copied();
            for &child in node.children.iter().rev() {
                stack.push((child, last));
            }
        }

        out
    }
}
