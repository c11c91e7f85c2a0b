//! Leaf outlines as triangle lists.

use glam::Vec2;

use super::node::{LeafCluster, LeafShape};

/// Outline points around an oval leaf.
const OVAL_SIDES: usize = 6;

/// Vertices emitted for one leaf of `shape`.
pub fn vertex_count(shape: LeafShape) -> usize {
    match shape {
        LeafShape::Lance => 6,
        LeafShape::Oval => OVAL_SIDES * 3,
        LeafShape::Sliver => 3,
    }
}

/// Append a triangle list for every leaf to `out`.
pub fn tessellate_leaves(leaves: &[LeafCluster], out: &mut Vec<Vec2>) {
    for leaf in leaves {
        tessellate_leaf(leaf, out);
    }
}

/// Append one leaf. The leaf grows from `position` along `angle`.
pub fn tessellate_leaf(leaf: &LeafCluster, out: &mut Vec<Vec2>) {
    if leaf.length <= 0.0 || leaf.width <= 0.0 {
        return;
    }
    let axis = Vec2::from_angle(leaf.angle);
    let side = axis.perp() * (leaf.width * 0.5);
    let base = leaf.position;
    let tip = base + axis * leaf.length;

    match leaf.shape {
        LeafShape::Lance => {
            let mid = base + axis * (leaf.length * 0.4);
            out.extend_from_slice(&[base, mid + side, tip, base, tip, mid - side]);
        }
        LeafShape::Oval => {
            let centre = base + axis * (leaf.length * 0.5);
            let half_len = leaf.length * 0.5;
            let point = |i: usize| {
                let a = i as f32 / OVAL_SIDES as f32 * std::f32::consts::TAU;
                centre + axis * (a.cos() * half_len) + side * a.sin()
            };
            for i in 0..OVAL_SIDES {
                out.extend_from_slice(&[centre, point(i), point(i + 1)]);
            }
        }
        LeafShape::Sliver => {
            out.extend_from_slice(&[base + side * 0.5, tip, base - side * 0.5]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tessellate::triangle_list_area;

    fn leaf(shape: LeafShape) -> LeafCluster {
        LeafCluster {
            position: Vec2::new(5.0, 5.0),
            angle: 0.3,
            length: 16.0,
            width: 6.0,
            shape,
        }
    }

    #[test]
    fn test_vertex_counts() {
        for shape in LeafShape::ALL {
            let mut out = Vec::new();
            tessellate_leaf(&leaf(shape), &mut out);
            assert_eq!(out.len(), vertex_count(shape));
            assert_eq!(out.len() % 3, 0);
        }
    }

    #[test]
    fn test_shapes_have_area() {
        let mut areas = Vec::new();
        for shape in LeafShape::ALL {
            let mut out = Vec::new();
            tessellate_leaf(&leaf(shape), &mut out);
            areas.push(triangle_list_area(&out));
        }
        // Lance 0.5*L*W, oval approximates an ellipse, sliver is the thinnest
        assert!((areas[0] - 0.5 * 16.0 * 6.0).abs() < 1e-2);
        assert!(areas[1] > areas[0]);
        assert!(areas[2] < areas[0]);
    }

    #[test]
    fn test_degenerate_leaf_skipped() {
        let mut l = leaf(LeafShape::Oval);
        l.width = 0.0;
        let mut out = Vec::new();
        tessellate_leaf(&l, &mut out);
        assert!(out.is_empty());
    }
}
