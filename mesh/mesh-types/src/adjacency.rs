//! Vertex one-ring adjacency.
//!
//! Provides edge-connected neighbor lookups built once from a face list.

/// One-ring adjacency for every vertex of a mesh.
///
/// Neighbor lists are sorted and free of duplicates, so iteration order is
/// stable for a given face list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexAdjacency {
    neighbors: Vec<Vec<u32>>,
}

impl VertexAdjacency {
    /// Build adjacency from triangle faces.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::VertexAdjacency;
    ///
    /// let faces = vec![[0, 1, 2], [1, 3, 2]];
    /// let adj = VertexAdjacency::build(&faces, 4);
    ///
    /// assert_eq!(adj.neighbors(1), &[0, 2, 3]);
    /// assert_eq!(adj.edge_count(), 5);
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]], vertex_count: usize) -> Self {
        Self::from_polygons(faces.iter(), vertex_count)
    }

    /// Build adjacency from polygons of any arity.
    ///
    /// Each polygon contributes the edges between consecutive corners,
    /// closing back to the first corner. Edges that reference a vertex
    /// outside `0..vertex_count` and self-loops are skipped.
    #[must_use]
    pub fn from_polygons<I, F>(polygons: I, vertex_count: usize) -> Self
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u32]>,
    {
        let mut neighbors: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];

        for polygon in polygons {
            let corners = polygon.as_ref();
            for (i, &v0) in corners.iter().enumerate() {
                let v1 = corners[(i + 1) % corners.len()];
                if v0 == v1 {
                    continue;
                }
                let (Some(a), Some(b)) = (index_in(v0, vertex_count), index_in(v1, vertex_count))
                else {
                    continue;
                };
                neighbors[a].push(v1);
                neighbors[b].push(v0);
            }
        }

        for ring in &mut neighbors {
            ring.sort_unstable();
            ring.dedup();
        }

        Self { neighbors }
    }

    /// Get the one-ring of a vertex.
    ///
    /// Returns an empty slice for isolated or out-of-range vertices.
    #[must_use]
    pub fn neighbors(&self, v: u32) -> &[u32] {
        usize::try_from(v)
            .ok()
            .and_then(|i| self.neighbors.get(i))
            .map_or(&[], Vec::as_slice)
    }

    /// Number of vertices covered by this adjacency.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of unique undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }
}

#[inline]
fn index_in(v: u32, vertex_count: usize) -> Option<usize> {
    usize::try_from(v).ok().filter(|&i| i < vertex_count)
}
