//! Recursive trunk and branch growth.
//!
//! A node walks its length in short sub-segments whose heading drifts a
//! little each step, tapering as it goes. When it still has depth left it
//! fans out into child branches from its final point, each grown before it
//! is attached (depth-first pre-order). Depth drops by one per generation,
//! so recursion is bounded by the trunk's depth.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::node::{LeafCluster, LeafShape, NodeId, NodeKind, Segment, Tree, TreeArena, TreeNode};
use crate::core::rng::RngExt;

/// Upper bound on sub-segments per node, whatever the node length.
pub const MAX_SUB_SEGMENTS: usize = 256;

/// Fan-out rule applied when a node spawns children.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchRule {
    pub min_children: u32,
    /// Child count is `min_children + U{0..extra_children}`
    pub extra_children: u32,
    /// Total angular spread of children around the parent's final heading
    pub spread: f32,
    /// Length multiplier `min + U[0, span)`, drawn once per parent
    pub length_min: f32,
    pub length_span: f32,
    /// Thickness multiplier `min + U[0, span)`, drawn once per parent
    pub thickness_min: f32,
    pub thickness_span: f32,
}

impl BranchRule {
    pub fn max_children(&self) -> u32 {
        self.min_children + self.extra_children.saturating_sub(1)
    }
}

/// Shape constants for tree growth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Target pixel length of one sub-segment
    pub sub_segment_length: f32,
    pub min_sub_segments: u32,
    /// Heading drift per sub-segment, uniform in `[-span/2, span/2)`
    pub angle_jitter: f32,
    /// Thickness lost over the node's run (0.7 ends at 30%)
    pub taper: f32,
    /// Extra width multiplier for trunk nodes
    pub trunk_flare: f32,
    /// Per sub-segment chance that a branch sprouts leaves
    pub leaf_chance: f32,
    /// Only branches with depth at or below this carry leaves
    pub leaf_max_depth: u32,
    pub trunk_rule: BranchRule,
    pub branch_rule: BranchRule,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            sub_segment_length: 20.0,
            min_sub_segments: 3,
            angle_jitter: 0.3,
            taper: 0.7,
            trunk_flare: 2.2,
            leaf_chance: 0.18,
            leaf_max_depth: 2,
            trunk_rule: BranchRule {
                min_children: 2,
                extra_children: 4,
                spread: PI * 0.6,
                length_min: 0.6,
                length_span: 0.3,
                thickness_min: 0.5,
                thickness_span: 0.2,
            },
            branch_rule: BranchRule {
                min_children: 1,
                extra_children: 3,
                spread: PI * 0.4,
                length_min: 0.5,
                length_span: 0.2,
                thickness_min: 0.4,
                thickness_span: 0.2,
            },
        }
    }
}

impl GrowthParams {
    pub fn rule_for(&self, kind: NodeKind) -> &BranchRule {
        match kind {
            NodeKind::Trunk => &self.trunk_rule,
            NodeKind::Branch => &self.branch_rule,
        }
    }

    /// Number of sub-segments a node of `length` is divided into
    pub fn sub_segment_count(&self, length: f32) -> usize {
        let by_length = if self.sub_segment_length > 0.0 {
            (length / self.sub_segment_length).floor().max(0.0) as usize
        } else {
            0
        };
        by_length
            .max(self.min_sub_segments.max(1) as usize)
            .min(MAX_SUB_SEGMENTS)
    }

    /// Largest fan-out either rule can produce
    pub fn max_fan_out(&self) -> u32 {
        self.trunk_rule.max_children().max(self.branch_rule.max_children())
    }
}

/// Plant a trunk and grow the whole tree.
pub fn grow_tree<R: Rng + ?Sized>(
    origin: Vec2,
    angle: f32,
    length: f32,
    thickness: f32,
    depth: u32,
    params: &GrowthParams,
    rng: &mut R,
) -> Tree {
    let mut arena = TreeArena::new();
    let root = arena.push(TreeNode::new(origin, angle, length, thickness, depth, NodeKind::Trunk));
    grow(&mut arena, root, params, rng);
    Tree { arena, root }
}

/// Grow node `id` in place: fill its segments and leaves, then its children.
pub fn grow<R: Rng + ?Sized>(arena: &mut TreeArena, id: NodeId, params: &GrowthParams, rng: &mut R) {
    let node = arena.get(id);
    let (origin, mut angle, length, thickness, depth, kind) =
        (node.origin, node.angle, node.length, node.thickness, node.depth, node.kind);

    let count = params.sub_segment_count(length);
    let step = length / count as f32;
    let flare = match kind {
        NodeKind::Trunk => params.trunk_flare,
        NodeKind::Branch => 1.0,
    };
    let leafy = kind == NodeKind::Branch && depth <= params.leaf_max_depth;

    let mut segments = Vec::with_capacity(count);
    let mut leaves = Vec::new();
    let mut point = origin;

    for i in 0..count {
        let progress = i as f32 / count as f32;
        angle += rng.centered(params.angle_jitter);
        let end = point + Vec2::from_angle(angle) * step;

        segments.push(Segment {
            start: point,
            end,
            thickness: thickness * flare * (1.0 - progress * params.taper),
            kind,
        });

        if leafy && rng.unit() < params.leaf_chance {
            sprout_leaves(end, angle, rng, &mut leaves);
        }
        point = end;
    }

    let node = arena.get_mut(id);
    node.segments = segments;
    node.leaves = leaves;

    if depth > 0 {
        create_branches(arena, id, point, angle, params, rng);
    }
}

/// Spawn, grow and attach the children of `id`, rooted at `tip`.
fn create_branches<R: Rng + ?Sized>(
    arena: &mut TreeArena,
    id: NodeId,
    tip: Vec2,
    heading: f32,
    params: &GrowthParams,
    rng: &mut R,
) {
    let parent = arena.get(id);
    let (length, thickness, depth) = (parent.length, parent.thickness, parent.depth);
    let rule = *params.rule_for(parent.kind);

    let count = rng.pick(rule.min_children, rule.extra_children.max(1));
    let length_mul = rng.offset(rule.length_min, rule.length_span);
    let thickness_mul = rng.offset(rule.thickness_min, rule.thickness_span);

    for _ in 0..count {
        let angle = heading + rng.centered(rule.spread);
        let child = arena.push(TreeNode::new(
            tip,
            angle,
            length * length_mul,
            thickness * thickness_mul,
            depth - 1,
            NodeKind::Branch,
        ));
        grow(arena, child, params, rng);
        arena.get_mut(id).children.push(child);
    }
}

/// Scatter 2-4 leaves around a sub-segment end point.
fn sprout_leaves<R: Rng + ?Sized>(at: Vec2, heading: f32, rng: &mut R, out: &mut Vec<LeafCluster>) {
    let count = rng.pick(2, 3);
    for _ in 0..count {
        let angle = heading + rng.centered(0.9);
        let length = rng.offset(10.0, 10.0);
        let width = rng.offset(4.0, 4.0);
        let side = if rng.unit() < 0.5 { 10.0 } else { -10.0 };
        let distance = rng.centered(28.0) + side;
        let shape = LeafShape::from_index(rng.pick(0, 3));
        out.push(LeafCluster {
            position: at + Vec2::from_angle(angle) * distance,
            angle,
            length,
            width,
            shape,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::seeded;
    use std::f32::consts::FRAC_PI_2;

    fn tree(seed: u64, depth: u32) -> Tree {
        grow_tree(
            Vec2::new(400.0, 570.0),
            -FRAC_PI_2,
            228.0,
            21.6,
            depth,
            &GrowthParams::default(),
            &mut seeded(seed),
        )
    }

    #[test]
    fn test_recursion_is_bounded() {
        let params = GrowthParams::default();
        let fan = params.max_fan_out() as usize;
        for depth in 0..=5 {
            for seed in 0..8 {
                let t = tree(seed, depth);
                assert!(t.depth_span() <= depth);
                let bound: usize = (0..=depth).map(|k| fan.pow(k)).sum();
                assert!(t.node_count() <= bound, "depth {} nodes {} > {}", depth, t.node_count(), bound);
            }
        }
    }

    #[test]
    fn test_depth_zero_has_no_children() {
        let t = tree(1, 0);
        assert_eq!(t.node_count(), 1);
        assert!(t.arena.get(t.root).children.is_empty());
    }

    #[test]
    fn test_children_decrement_depth() {
        let t = tree(3, 4);
        for (id, _) in t.pre_order() {
            let node = t.arena.get(id);
            for &child in &node.children {
                let c = t.arena.get(child);
                assert_eq!(c.depth + 1, node.depth);
                assert_eq!(c.kind, NodeKind::Branch);
            }
        }
        assert!(t.depth_span() >= 1);
    }

    #[test]
    fn test_trunk_fan_out_range() {
        let params = GrowthParams::default();
        for seed in 0..32 {
            let t = tree(seed, 3);
            let root = t.arena.get(t.root);
            let n = root.children.len() as u32;
            assert!(n >= params.trunk_rule.min_children && n <= params.trunk_rule.max_children());
        }
    }

    #[test]
    fn test_sub_segment_count_is_capped() {
        let mut params = GrowthParams::default();
        assert_eq!(params.sub_segment_count(1.0e30), MAX_SUB_SEGMENTS);
        assert_eq!(params.sub_segment_count(f32::INFINITY), MAX_SUB_SEGMENTS);
        params.min_sub_segments = u32::MAX;
        assert_eq!(params.sub_segment_count(10.0), MAX_SUB_SEGMENTS);

        let t = grow_tree(Vec2::new(0.0, 0.0), -FRAC_PI_2, 1.0e9, 20.0, 0, &GrowthParams::default(), &mut seeded(4));
        assert_eq!(t.segments().len(), MAX_SUB_SEGMENTS);
    }

    #[test]
    fn test_sub_segment_count() {
        let params = GrowthParams::default();
        assert_eq!(params.sub_segment_count(0.0), 3);
        assert_eq!(params.sub_segment_count(59.0), 3);
        assert_eq!(params.sub_segment_count(228.0), 11);
        let t = tree(2, 0);
        assert_eq!(t.arena.get(t.root).segments.len(), 11);
    }

    #[test]
    fn test_trunk_flare_and_taper() {
        let t = tree(4, 0);
        let segments = &t.arena.get(t.root).segments;
        assert!((segments[0].thickness - 21.6 * 2.2).abs() < 1e-3);
        for pair in segments.windows(2) {
            assert!(pair[1].thickness < pair[0].thickness);
        }
        let last = segments.last().map(|s| s.thickness).unwrap_or(0.0);
        assert!(last > 21.6 * 2.2 * 0.3);
    }

    #[test]
    fn test_segments_form_a_chain() {
        let t = tree(5, 3);
        for (id, _) in t.pre_order() {
            let node = t.arena.get(id);
            assert_eq!(node.segments[0].start, node.origin);
            for pair in node.segments.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            let tip = node.segments.last().map(|s| s.end).unwrap_or(node.origin);
            for &child in &node.children {
                assert_eq!(t.arena.get(child).origin, tip);
            }
        }
    }

    #[test]
    fn test_heading_drift_is_small() {
        let t = tree(6, 0);
        let segments = &t.arena.get(t.root).segments;
        for pair in segments.windows(2) {
            let a = (pair[0].end - pair[0].start).to_angle();
            let b = (pair[1].end - pair[1].start).to_angle();
            let mut d = (b - a).abs();
            if d > PI {
                d = 2.0 * PI - d;
            }
            assert!(d <= 0.15 + 1e-4);
        }
    }

    #[test]
    fn test_leaves_only_on_shallow_branches() {
        let mut found = false;
        for seed in 0..16 {
            let t = tree(seed, 4);
            for (id, _) in t.pre_order() {
                let node = t.arena.get(id);
                if !node.leaves.is_empty() {
                    found = true;
                    assert_eq!(node.kind, NodeKind::Branch);
                    assert!(node.depth <= 2);
                }
            }
        }
        assert!(found, "expected some leaves across seeds");
    }

    #[test]
    fn test_same_seed_same_tree() {
        let a = tree(99, 4);
        let b = tree(99, 4);
        assert_eq!(a.segments(), b.segments());
        assert_eq!(a.leaves(), b.leaves());
    }
}
