//! Ribbon tessellation of connected segments.
//!
//! Each segment becomes a quad (two triangles) spanned by left/right rail
//! points at both ends. When a segment continues another, its start rails
//! are the previous segment's end rails, so joints never open a gap even
//! where thickness or heading jumps. Sharp turns leave a small overlap,
//! which is invisible in a flat silhouette.

use glam::Vec2;

use super::node::{Segment, Tree};

/// Two triangles per segment.
pub const VERTICES_PER_SEGMENT: usize = 6;

/// Half-thickness perpendicular of a segment, or `None` when it has no length.
fn rail_offset(segment: &Segment) -> Option<Vec2> {
    let d = segment.end - segment.start;
    let length = d.length();
    if length <= 0.0 || !length.is_finite() {
        return None;
    }
    Some(d.perp() / length * (segment.thickness * 0.5))
}

/// Triangulate one segment. Zero-length segments yield no vertices.
pub fn tessellate(segment: &Segment, previous: Option<&Segment>) -> Vec<Vec2> {
    let mut out = Vec::with_capacity(VERTICES_PER_SEGMENT);
    tessellate_into(segment, previous, &mut out);
    out
}

/// Append one segment's two triangles to `out`; returns false for a
/// degenerate segment.
pub fn tessellate_into(segment: &Segment, previous: Option<&Segment>, out: &mut Vec<Vec2>) -> bool {
    let Some(perp) = rail_offset(segment) else {
        return false;
    };

    let (start_left, start_right) = match previous.and_then(|p| rail_offset(p).map(|pp| (p, pp))) {
        Some((prev, prev_perp)) => (prev.end + prev_perp, prev.end - prev_perp),
        None => (segment.start + perp, segment.start - perp),
    };
    let end_left = segment.end + perp;
    let end_right = segment.end - perp;

    out.extend_from_slice(&[
        start_left, start_right, end_left,
        start_right, end_right, end_left,
    ]);
    true
}

/// Append the full ribbon of a tree (every connected segment) to `out`.
pub fn tessellate_tree(tree: &Tree, out: &mut Vec<Vec2>) {
    for (segment, previous) in tree.connected_segments() {
        tessellate_into(&segment, previous.as_ref(), out);
    }
}

/// Total area of a triangle list.
pub fn triangle_list_area(vertices: &[Vec2]) -> f32 {
    vertices
        .chunks_exact(3)
        .map(|t| ((t[1] - t[0]).perp_dot(t[2] - t[0]) * 0.5).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::seeded;
    use crate::tree::growth::{grow_tree, GrowthParams};
    use crate::tree::node::NodeKind;

    fn seg(start: Vec2, end: Vec2, thickness: f32) -> Segment {
        Segment { start, end, thickness, kind: NodeKind::Branch }
    }

    #[test]
    fn test_zero_length_is_empty() {
        let s = seg(Vec2::new(3.0, 4.0), Vec2::new(3.0, 4.0), 5.0);
        assert!(tessellate(&s, None).is_empty());
    }

    #[test]
    fn test_quad_area() {
        let s = seg(Vec2::new(10.0, 10.0), Vec2::new(40.0, 50.0), 6.0);
        let verts = tessellate(&s, None);
        assert_eq!(verts.len(), VERTICES_PER_SEGMENT);
        let area = triangle_list_area(&verts);
        assert!((area - 50.0 * 6.0).abs() < 1e-2, "area {}", area);
    }

    #[test]
    fn test_start_rails_follow_previous() {
        let prev = seg(Vec2::new(0.0, 0.0), Vec2::new(0.0, -10.0), 8.0);
        let next = seg(Vec2::new(0.0, -10.0), Vec2::new(5.0, -20.0), 4.0);
        let prev_verts = tessellate(&prev, None);
        let next_verts = tessellate(&next, Some(&prev));
        // prev end_left / end_right are vertices 2 and 4
        assert_eq!(next_verts[0], prev_verts[2]);
        assert_eq!(next_verts[1], prev_verts[4]);
        assert_eq!(next_verts[3], prev_verts[4]);
    }

    #[test]
    fn test_degenerate_previous_is_ignored() {
        let prev = seg(Vec2::ZERO, Vec2::ZERO, 8.0);
        let next = seg(Vec2::ZERO, Vec2::new(0.0, 10.0), 2.0);
        assert_eq!(tessellate(&next, Some(&prev)), tessellate(&next, None));
    }

    #[test]
    fn test_tree_ribbon_size() {
        let tree = grow_tree(
            Vec2::new(100.0, 500.0),
            -std::f32::consts::FRAC_PI_2,
            200.0,
            20.0,
            3,
            &GrowthParams::default(),
            &mut seeded(12),
        );
        let mut verts = Vec::new();
        tessellate_tree(&tree, &mut verts);
        assert_eq!(verts.len(), tree.segments().len() * VERTICES_PER_SEGMENT);
        assert!(verts.iter().all(|v| v.is_finite()));
    }
}
