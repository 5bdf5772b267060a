//! One-ring queries over a mesh's current topology.

use hashbrown::HashSet;
use mesh_types::MeshAccess;

/// Collect the edge-connected neighbors of `vertex`.
///
/// Out-of-range vertices have no neighbors.
pub fn neighbors<M: MeshAccess>(mesh: &M, vertex: u32) -> HashSet<u32> {
    mesh.one_ring(vertex).collect()
}

/// Collect every vertex adjacent to `visited` that is not itself visited.
///
/// # Example
///
/// ```
/// use hashbrown::HashSet;
/// use mesh_crawl::one_ring_frontier;
/// use mesh_types::{unit_cube, MeshObject};
///
/// let cube = MeshObject::new(unit_cube());
/// let visited: HashSet<u32> = [0, 1, 3].into_iter().collect();
///
/// let frontier = one_ring_frontier(&cube, &visited);
/// let mut sorted: Vec<u32> = frontier.into_iter().collect();
/// sorted.sort_unstable();
/// assert_eq!(sorted, vec![2, 4, 5, 6, 7]);
/// ```
pub fn one_ring_frontier<M: MeshAccess>(mesh: &M, visited: &HashSet<u32>) -> HashSet<u32> {
    visited
        .iter()
        .flat_map(|&v| mesh.one_ring(v))
        .filter(|n| !visited.contains(n))
        .collect()
}
