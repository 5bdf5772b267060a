//! Host-facing mesh traits.
//!
//! These traits are the whole surface an editing environment has to expose
//! for correspondence crawling: read access to positions, topology and the
//! object transform, write access to local positions, and an ordered vertex
//! selection.

use nalgebra::{Affine3, Point3};

/// Read access to a placed mesh.
///
/// Implementors must keep vertex indices stable for as long as a crawl
/// session refers to them.
pub trait MeshAccess {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the stored object-local position of a vertex.
    ///
    /// Returns `None` if the index is out of bounds.
    fn local_position(&self, index: u32) -> Option<Point3<f64>>;

    /// Get the object-to-world transform.
    fn world_transform(&self) -> Affine3<f64>;

    /// Iterate over the edge-connected neighbors of a vertex.
    fn one_ring(&self, index: u32) -> impl Iterator<Item = u32> + '_;

    /// Get the world-space position of a vertex from its stored position.
    fn world_position(&self, index: u32) -> Option<Point3<f64>> {
        let world = self.world_transform();
        self.local_position(index).map(|p| world * p)
    }

    /// Get world-space positions after any runtime deformation.
    ///
    /// The default applies the world transform to the stored positions.
    /// Hosts that evaluate modifiers or animation override this.
    fn evaluated_world_positions(&self) -> Vec<Point3<f64>> {
        (0..self.vertex_count())
            .filter_map(|i| u32::try_from(i).ok())
            .filter_map(|i| self.world_position(i))
            .collect()
    }
}

/// Write access to a mesh's stored vertex positions.
pub trait MeshEdit: MeshAccess {
    /// Set the object-local position of a vertex.
    ///
    /// Out-of-range indices are ignored.
    fn set_local_position(&mut self, index: u32, position: Point3<f64>);
}

/// Ordered vertex selection, as recorded by the host's picking history.
pub trait VertexSelection {
    /// Selected vertices in the order they were picked, without repeats.
    fn ordered_selected_vertices(&self) -> Vec<u32>;

    /// Replace the selection with exactly these vertices.
    fn select_only(&mut self, indices: &[u32]);
}
