//! 3D k-d tree over unit-sphere points.
//!
//! Built once from a point set and queried read-only afterwards, so a single
//! tree can be shared across threads without locking.
//!
//! Construction sorts every subset fully on the current axis and takes the
//! element at `len / 2` as the node. This is `O(n log² n)` instead of the
//! `O(n log n)` a selection algorithm would give, but it fixes which of
//! several equal coordinates becomes the median, and therefore the tree
//! shape and the winner among equidistant neighbors.

use projection::{distance_sq, Cartesian};

use crate::error::{try_with_capacity, Result};

/// Number of spatial dimensions.
const DIMS: usize = 3;

#[derive(Debug, Clone)]
struct KdNode {
    /// Position of the point in the input slice.
    source_index: usize,
    point: Cartesian,
    /// Splitting axis: 0 = x, 1 = y, 2 = z.
    axis: u8,
    left: Option<usize>,
    right: Option<usize>,
}

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Index of the point in the slice the tree was built from.
    pub index: usize,
    /// Euclidean distance to the query.
    pub distance: f64,
    /// The matched point.
    pub point: Cartesian,
}

/// A static k-d tree answering single nearest-neighbor queries.
#[derive(Debug, Clone)]
pub struct KdTree {
    /// Node arena; the root is node 0.
    nodes: Vec<KdNode>,
    /// Private copy of the input points, in input order.
    points: Vec<Cartesian>,
}

impl KdTree {
    /// Build a tree from Cartesian points.
    ///
    /// The points are copied, so the caller's buffer may be dropped or reused.
    /// Duplicate points are allowed. An empty slice yields an empty tree.
    pub fn build(points: &[Cartesian]) -> Result<Self> {
        let n = points.len();

        let mut stored = try_with_capacity("kd-tree points", n)?;
        stored.extend_from_slice(points);

        let mut nodes = try_with_capacity("kd-tree nodes", n)?;
        if n > 0 {
            let mut indices = try_with_capacity("kd-tree index scratch", n)?;
            indices.extend(0..n);
            build_recursive(&stored, &mut indices, 0, &mut nodes);
        }

        let tree = Self {
            nodes,
            points: stored,
        };
        tracing::debug!(size = n, depth = tree.depth(), "built kd-tree");
        Ok(tree)
    }

    /// Number of points in the tree.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point `index` as passed to [`KdTree::build`].
    pub fn point(&self, index: usize) -> Option<&Cartesian> {
        self.points.get(index)
    }

    /// Find the nearest point to `query`.
    ///
    /// Returns `(index, distance)`. On an empty tree this is the sentinel
    /// `(0, f64::INFINITY)`. Among equidistant points the first one reached
    /// by the traversal wins.
    pub fn query_nearest(&self, query: &Cartesian) -> (usize, f64) {
        match self.nearest(query) {
            Some(hit) => (hit.index, hit.distance),
            None => (0, f64::INFINITY),
        }
    }

    /// Find the nearest point to `query`, or `None` if the tree is empty.
    ///
    /// A query with NaN components matches nothing and reports an infinite
    /// distance against the root's index.
    pub fn nearest(&self, query: &Cartesian) -> Option<Nearest> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut best_dist_sq = f64::INFINITY;
        let mut best_node = 0;
        self.nearest_recursive(0, query, &mut best_dist_sq, &mut best_node);

        let node = &self.nodes[best_node];
        Some(Nearest {
            index: node.source_index,
            distance: best_dist_sq.sqrt(),
            point: node.point,
        })
    }

    /// Height of the tree (0 when empty).
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    fn nearest_recursive(
        &self,
        node_idx: usize,
        query: &Cartesian,
        best_dist_sq: &mut f64,
        best_node: &mut usize,
    ) {
        let node = &self.nodes[node_idx];

        let dist_sq = distance_sq(query, &node.point);
        if dist_sq < *best_dist_sq {
            *best_dist_sq = dist_sq;
            *best_node = node_idx;
        }

        let axis = node.axis as usize;
        let diff = query[axis] - node.point[axis];
        let (first, second) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = first {
            self.nearest_recursive(child, query, best_dist_sq, best_node);
        }

        // The far side can only hold a closer point if the splitting plane
        // is nearer than the current best. A NaN split value orders nothing,
        // so both sides are searched.
        let plane_dist_sq = diff * diff;
        if plane_dist_sq.is_nan() || plane_dist_sq < *best_dist_sq {
            if let Some(child) = second {
                self.nearest_recursive(child, query, best_dist_sq, best_node);
            }
        }
    }
}

/// Recursively build the subtree for `indices`, returning its arena slot.
fn build_recursive(
    points: &[Cartesian],
    indices: &mut [usize],
    depth: usize,
    nodes: &mut Vec<KdNode>,
) -> usize {
    let axis = depth % DIMS;

    indices.sort_by(|&a, &b| points[a][axis].total_cmp(&points[b][axis]));

    let median = indices.len() / 2;
    let source_index = indices[median];

    let node_idx = nodes.len();
    nodes.push(KdNode {
        source_index,
        point: points[source_index],
        axis: axis as u8,
        left: None,
        right: None,
    });

    let (left, rest) = indices.split_at_mut(median);
    let right = &mut rest[1..];

    if !left.is_empty() {
        let child = build_recursive(points, left, depth + 1, nodes);
        nodes[node_idx].left = Some(child);
    }

    if !right.is_empty() {
        let child = build_recursive(points, right, depth + 1, nodes);
        nodes[node_idx].right = Some(child);
    }

    node_idx
}
