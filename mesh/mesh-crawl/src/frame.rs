//! Rigid motion from three ordered point correspondences.
//!
//! Each ordered triple `(a, b, c)` defines a right-handed orthonormal frame
//! anchored at `a`:
//!
//! - `x` points from `a` towards `b`
//! - `z` is normal to the plane of the triple (`x × (c − a)`)
//! - `y = z × x` completes the basis
//!
//! The rotation maps the source frame onto the target frame and the
//! translation carries `a` onto `a'`. The first point of each triple is
//! therefore distinguished: reordering the seeds changes the result.

use crate::{CrawlError, CrawlResult, MeshRole, RigidTransform};
use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion};

/// A right-handed orthonormal frame attached to a point triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Frame origin (the first point of the triple).
    pub origin: Point3<f64>,
    /// Basis vectors `(x, y, z)` as matrix columns.
    pub basis: Matrix3<f64>,
}

impl Frame {
    /// Build the frame of an ordered point triple.
    ///
    /// `tolerance` bounds the sine of the angle between `b − a` and `c − a`;
    /// anything smaller is treated as collinear. Coincident points are
    /// rejected regardless of the tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::DegenerateSeed`] tagged with `role` when the
    /// triple does not span a plane.
    pub fn from_triple(
        points: &[Point3<f64>; 3],
        role: MeshRole,
        tolerance: f64,
    ) -> CrawlResult<Self> {
        let [a, b, c] = points;
        let degenerate = || CrawlError::DegenerateSeed { role };

        let x = (b - a).try_normalize(f64::EPSILON).ok_or_else(degenerate)?;
        let towards_c = (c - a).try_normalize(f64::EPSILON).ok_or_else(degenerate)?;
        let z = x
            .cross(&towards_c)
            .try_normalize(tolerance.max(f64::EPSILON))
            .ok_or_else(degenerate)?;
        let y = z.cross(&x);

        Ok(Self {
            origin: *a,
            basis: Matrix3::from_columns(&[x, y, z]),
        })
    }
}

/// Computes the rigid transform carrying one ordered triple onto another.
///
/// `R = F_target · F_sourceᵀ` and `T = a' − R·a`. The frames are
/// orthonormal, so the transpose is the inverse.
///
/// # Errors
///
/// Returns [`CrawlError::DegenerateSeed`] if either triple is coincident or
/// collinear within `tolerance`.
///
/// # Example
///
/// ```
/// use mesh_crawl::rigid_from_triples;
/// use nalgebra::{Point3, Vector3};
///
/// let source = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let target = source.map(|p| p + Vector3::new(1.0, 2.0, 3.0));
///
/// let transform = rigid_from_triples(&source, &target, 1e-9).unwrap();
/// assert!((transform.translation - Vector3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
/// ```
pub fn rigid_from_triples(
    source: &[Point3<f64>; 3],
    target: &[Point3<f64>; 3],
    tolerance: f64,
) -> CrawlResult<RigidTransform> {
    let from = Frame::from_triple(source, MeshRole::Source, tolerance)?;
    let to = Frame::from_triple(target, MeshRole::Target, tolerance)?;

    let rotation_matrix = to.basis * from.basis.transpose();
    let rotation =
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation_matrix));
    let translation = to.origin.coords - rotation * from.origin.coords;

    Ok(RigidTransform::new(rotation, translation))
}
