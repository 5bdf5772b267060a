//! Host-facing mesh types for correspondence crawling.
//!
//! This crate provides the data a crawl engine needs from its host
//! environment, and nothing else:
//!
//! - [`Vertex`] and [`IndexedMesh`] - Vertex positions and triangle faces
//! - [`VertexAdjacency`] - One-ring neighbor lookups
//! - [`MeshObject`] - A mesh placed in a scene with a world transform,
//!   optional runtime deformation and an ordered selection
//! - [`MeshAccess`], [`MeshEdit`], [`VertexSelection`] - The traits a host
//!   implements to expose its own mesh storage
//!
//! # Coordinate System
//!
//! Vertex positions are stored in object-local space. A mesh is placed in
//! the world by an affine object-to-world transform
//! ([`nalgebra::Affine3`]). "Evaluated" positions are world-space positions
//! after any runtime deformation the host applies.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, MeshAccess, MeshObject, Vector3};
//!
//! let target = MeshObject::new(unit_cube()).with_translation(Vector3::new(10.0, 0.0, 0.0));
//!
//! assert_eq!(target.vertex_count(), 8);
//! assert_eq!(target.one_ring(0).count(), 6);
//! assert_eq!(target.evaluated_world_positions()[0].x, 10.0);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod adjacency;
mod mesh;
mod object;
mod traits;
mod vertex;

pub use adjacency::VertexAdjacency;
pub use mesh::{IndexedMesh, unit_cube};
pub use object::MeshObject;
pub use traits::{MeshAccess, MeshEdit, VertexSelection};
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Affine3, Point3, Vector3};
