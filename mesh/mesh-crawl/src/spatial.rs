//! Nearest-neighbor index over world-space target positions.
//!
//! Backed by a kiddo immutable KD-tree, which is balanced at construction
//! and accepts any number of points sharing a coordinate (flat faces,
//! welded seams, coincident vertices). Queries are deterministic: when
//! several stored points are exactly equally close, the one with the lowest
//! stored index wins.

use crate::{CrawlError, CrawlResult};
use kiddo::SquaredEuclidean;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use nalgebra::Point3;
use std::cmp::Ordering;
use std::fmt;

/// Items per leaf.
const BUCKET_SIZE: usize = 32;

/// Relative widening of the best distance when gathering tie candidates.
const TIE_SLACK: f64 = 1e-9;

/// Absolute floor for the tie search radius (squared units).
const TIE_FLOOR: f64 = 1e-18;

type PointTree = ImmutableKdTree<f64, u64, 3, BUCKET_SIZE>;

/// Result of a nearest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Position of the closest stored point.
    pub point: Point3<f64>,
    /// Index of the closest stored point in build order.
    pub index: usize,
    /// Euclidean distance from the query to `point`.
    pub distance: f64,
}

/// A balanced nearest-neighbor index over a fixed point set.
///
/// The index is immutable once built. A crawl builds one per step from the
/// target's evaluated positions and drops it when the step ends.
///
/// # Example
///
/// ```
/// use mesh_crawl::SpatialIndex;
/// use nalgebra::Point3;
///
/// let index = SpatialIndex::build(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(5.0, 0.0, 0.0),
/// ])
/// .unwrap();
///
/// let hit = index.nearest(&Point3::new(4.0, 0.0, 0.0));
/// assert_eq!(hit.index, 1);
/// assert!((hit.distance - 1.0).abs() < 1e-12);
/// ```
pub struct SpatialIndex {
    tree: PointTree,
    points: Vec<Point3<f64>>,
}

impl SpatialIndex {
    /// Builds an index over `points`.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::EmptyTargetMesh`] if `points` is empty.
    pub fn build(points: Vec<Point3<f64>>) -> CrawlResult<Self> {
        if points.is_empty() {
            return Err(CrawlError::EmptyTargetMesh);
        }

        let coords: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
        let tree = PointTree::new_from_slice(&coords);

        Ok(Self { tree, points })
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; an index cannot be built empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Finds the stored point closest to `query`.
    ///
    /// Exact ties resolve to the lowest stored index.
    #[must_use]
    pub fn nearest(&self, query: &Point3<f64>) -> Nearest {
        let q = [query.x, query.y, query.z];
        let best = self.tree.nearest_one::<SquaredEuclidean>(&q);

        // The tree may report any member of a tie, so re-rank every point
        // that could share the best distance.
        let radius = best.distance.mul_add(1.0 + TIE_SLACK, TIE_FLOOR);
        let (index, distance_sq) = self
            .tree
            .within::<SquaredEuclidean>(&q, radius)
            .into_iter()
            .map(|n| n.item)
            .chain(std::iter::once(best.item))
            .map(|item| {
                #[allow(clippy::cast_possible_truncation)]
                let index = item as usize;
                (index, (self.points[index] - query).norm_squared())
            })
            .min_by(|a, b| rank(*a, *b))
            .unwrap_or_else(|| {
                #[allow(clippy::cast_possible_truncation)]
                let index = best.item as usize;
                (index, best.distance)
            });

        Nearest {
            point: self.points[index],
            index,
            distance: distance_sq.sqrt(),
        }
    }
}

/// Orders candidates by squared distance, then by stored index.
fn rank(a: (usize, f64), b: (usize, f64)) -> Ordering {
    a.1.total_cmp(&b.1).then(a.0.cmp(&b.0))
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("points", &self.points.len())
            .finish_non_exhaustive()
    }
}
