//! A mesh placed in a scene.

use crate::{IndexedMesh, MeshAccess, MeshEdit, VertexAdjacency, VertexSelection};
use nalgebra::{Affine3, Point3, Translation3, Vector3};

/// A mesh with an object-to-world transform, an optional runtime
/// deformation and an ordered vertex selection.
///
/// This is the in-memory stand-in for a host scene object. Adjacency is
/// built once at construction; position edits keep it valid because they
/// never change topology.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshAccess, MeshObject, Vector3};
///
/// let cube = MeshObject::new(unit_cube())
///     .with_translation(Vector3::new(10.0, 0.0, 0.0));
///
/// let p = cube.world_position(0).unwrap();
/// assert!((p.x - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct MeshObject {
    mesh: IndexedMesh,
    world: Affine3<f64>,
    adjacency: VertexAdjacency,
    deformation: Option<Vec<Vector3<f64>>>,
    selection: Vec<u32>,
}

impl MeshObject {
    /// Place a mesh at the world origin.
    #[must_use]
    pub fn new(mesh: IndexedMesh) -> Self {
        let adjacency = mesh.adjacency();
        Self {
            mesh,
            world: Affine3::identity(),
            adjacency,
            deformation: None,
            selection: Vec::new(),
        }
    }

    /// Set the object-to-world transform.
    #[must_use]
    pub fn with_world_transform(mut self, world: Affine3<f64>) -> Self {
        self.world = world;
        self
    }

    /// Set the object-to-world transform to a pure translation.
    #[must_use]
    pub fn with_translation(self, offset: Vector3<f64>) -> Self {
        let world = Affine3::from_matrix_unchecked(Translation3::from(offset).to_homogeneous());
        self.with_world_transform(world)
    }

    /// Set a per-vertex local-space offset applied only to evaluated positions.
    ///
    /// Vertices without an entry are left undeformed.
    #[must_use]
    pub fn with_deformation(mut self, offsets: Vec<Vector3<f64>>) -> Self {
        self.deformation = Some(offsets);
        self
    }

    /// Borrow the underlying mesh.
    #[must_use]
    pub const fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    /// Borrow the one-ring adjacency.
    #[must_use]
    pub const fn adjacency(&self) -> &VertexAdjacency {
        &self.adjacency
    }

    /// Append a vertex to the pick history.
    pub fn select(&mut self, index: u32) {
        self.selection.push(index);
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Check whether a vertex is currently selected.
    #[must_use]
    pub fn is_selected(&self, index: u32) -> bool {
        self.selection.contains(&index)
    }
}

impl MeshAccess for MeshObject {
    fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    fn local_position(&self, index: u32) -> Option<Point3<f64>> {
        let i = usize::try_from(index).ok()?;
        self.mesh.vertices.get(i).map(|v| v.position)
    }

    fn world_transform(&self) -> Affine3<f64> {
        self.world
    }

    fn one_ring(&self, index: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency.neighbors(index).iter().copied()
    }

    fn evaluated_world_positions(&self) -> Vec<Point3<f64>> {
        let offsets = self.deformation.as_deref().unwrap_or(&[]);
        self.mesh
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let offset = offsets.get(i).copied().unwrap_or_else(Vector3::zeros);
                self.world * (v.position + offset)
            })
            .collect()
    }
}

impl MeshEdit for MeshObject {
    fn set_local_position(&mut self, index: u32, position: Point3<f64>) {
        let Ok(i) = usize::try_from(index) else {
            return;
        };
        if let Some(vertex) = self.mesh.vertices.get_mut(i) {
            vertex.position = position;
        }
    }
}

impl VertexSelection for MeshObject {
    fn ordered_selected_vertices(&self) -> Vec<u32> {
        let mut seen = Vec::with_capacity(self.selection.len());
        for &v in &self.selection {
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        seen
    }

    fn select_only(&mut self, indices: &[u32]) {
        self.selection.clear();
        self.selection.extend_from_slice(indices);
    }
}
