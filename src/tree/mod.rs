//! Procedural silhouette trees.
//!
//! Rows of trees are sampled as seeds, grown recursively into an arena of
//! trunk and branch nodes, and baked into pixel-space triangle ribbons. Row
//! geometry is only rebuilt on resize or refresh; per frame it is translated.

pub mod growth;
pub mod leaf;
pub mod node;
pub mod row;
pub mod tessellate;

pub use growth::{grow, grow_tree, BranchRule, GrowthParams, MAX_SUB_SEGMENTS};
pub use leaf::tessellate_leaves;
pub use node::{LeafCluster, LeafShape, NodeId, NodeKind, Segment, Tree, TreeArena, TreeNode};
pub use row::{build_tree_row, sample_tree_row, TreeLayerConfig, TreeRowMesh, TreeSeed, DEFAULT_JITTER_PX, EDGE_PAD};
pub use tessellate::{tessellate, tessellate_into, tessellate_tree, VERTICES_PER_SEGMENT};
