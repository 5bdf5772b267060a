//! Error types for correspondence crawling.

use std::fmt;
use thiserror::Error;

/// Which of the two meshes an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshRole {
    /// The mesh whose vertices are moved.
    Source,
    /// The mesh being matched against.
    Target,
}

impl fmt::Display for MeshRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors that can occur while seeding or advancing a crawl session.
///
/// Every error is raised before the session or either mesh is modified, so
/// the caller can always retry with corrected input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CrawlError {
    /// Seed lists are empty, have different lengths, or are too short.
    #[error(
        "invalid seed count: {source_count} source / {target_count} target; need equal counts of at least {required}"
    )]
    InvalidSeedCount {
        /// Number of source seeds supplied.
        source_count: usize,
        /// Number of target seeds supplied.
        target_count: usize,
        /// Minimum number of pairs required.
        required: usize,
    },

    /// The transform-defining seed triple does not span a plane.
    #[error("{role} seed triple is degenerate (coincident or collinear points)")]
    DegenerateSeed {
        /// Mesh whose seed points are degenerate.
        role: MeshRole,
    },

    /// Nearest-neighbor search was requested against a mesh with no vertices.
    #[error("target mesh has no vertices")]
    EmptyTargetMesh,

    /// A step was requested before the session was seeded.
    #[error("session has not been seeded")]
    UninitializedSession,

    /// Seeding was requested on a session that is already initialized.
    #[error("session is already initialized; reset it before seeding again")]
    AlreadyInitialized,

    /// A vertex index does not exist in the mesh.
    #[error("{role} vertex index {index} out of bounds for mesh with {vertex_count} vertices")]
    VertexOutOfBounds {
        /// Mesh the index refers to.
        role: MeshRole,
        /// The invalid index.
        index: u32,
        /// The number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The object-to-world transform cannot be inverted.
    #[error("{role} object-to-world transform is not invertible")]
    NonInvertibleTransform {
        /// Mesh whose transform is singular.
        role: MeshRole,
    },

    /// The source mesh vertex count changed since the session was seeded.
    #[error("source mesh topology changed: seeded with {expected} vertices, found {found}")]
    TopologyChanged {
        /// Vertex count recorded at seeding.
        expected: usize,
        /// Current vertex count.
        found: usize,
    },
}

/// Result type for crawl operations.
pub type CrawlResult<T> = Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_mesh() {
        let err = CrawlError::DegenerateSeed {
            role: MeshRole::Target,
        };
        assert!(err.to_string().starts_with("target seed triple"));

        let err = CrawlError::VertexOutOfBounds {
            role: MeshRole::Source,
            index: 12,
            vertex_count: 8,
        };
        assert_eq!(
            err.to_string(),
            "source vertex index 12 out of bounds for mesh with 8 vertices"
        );
    }

    #[test]
    fn seed_count_message_names_both_lists() {
        let err = CrawlError::InvalidSeedCount {
            source_count: 3,
            target_count: 2,
            required: 1,
        };
        assert_eq!(
            err.to_string(),
            "invalid seed count: 3 source / 2 target; need equal counts of at least 1"
        );
    }
}
