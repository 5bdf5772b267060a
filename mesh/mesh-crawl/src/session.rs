//! Correspondence state carried between crawl operations.

use crate::{CrawlError, CrawlResult, RigidTransform, SeedMode};
use hashbrown::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One user-asserted correspondence between a source and a target vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeedPair {
    /// Vertex index on the source mesh.
    pub source: u32,
    /// Vertex index on the target mesh.
    pub target: u32,
}

impl SeedPair {
    /// Pair a source vertex with a target vertex.
    #[must_use]
    pub const fn new(source: u32, target: u32) -> Self {
        Self { source, target }
    }
}

/// An ordered, non-empty list of seed pairs.
///
/// Order matters: in [`SeedMode::Rigid`] the first three pairs define the
/// placement guess, with the first pair as the frame origin.
///
/// # Example
///
/// ```
/// use mesh_crawl::SeedCorrespondence;
///
/// let seeds = SeedCorrespondence::from_lists(&[0, 1, 3], &[4, 5, 7]).unwrap();
/// assert_eq!(seeds.len(), 3);
/// assert_eq!(seeds.pairs()[0].target, 4);
///
/// assert!(SeedCorrespondence::from_lists(&[0, 1], &[4]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCorrespondence {
    pairs: Vec<SeedPair>,
}

impl SeedCorrespondence {
    /// Zip two ordered index lists into seed pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::InvalidSeedCount`] if either list is empty or
    /// the lengths differ.
    pub fn from_lists(source: &[u32], target: &[u32]) -> CrawlResult<Self> {
        if source.is_empty() || target.is_empty() || source.len() != target.len() {
            return Err(CrawlError::InvalidSeedCount {
                source_count: source.len(),
                target_count: target.len(),
                required: 1,
            });
        }

        let pairs = source
            .iter()
            .zip(target)
            .map(|(&s, &t)| SeedPair::new(s, t))
            .collect();
        Ok(Self { pairs })
    }

    /// The pairs in order.
    #[must_use]
    pub fn pairs(&self) -> &[SeedPair] {
        &self.pairs
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false; construction rejects empty lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Not yet seeded.
    Init,
    /// Seeded, with vertices still waiting on the frontier.
    Crawling,
    /// Seeded, and the frontier is exhausted.
    Complete,
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::Crawling => f.write_str("crawling"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

/// Progress of one incremental correspondence crawl.
///
/// The session is owned by the caller and passed to each operation along
/// with the two meshes. It never holds a reference to either mesh; the
/// caller must not let two sessions drive the same source mesh at once.
///
/// The matched and frontier sets are disjoint, and every frontier vertex is
/// a one-ring neighbor of a matched vertex. The placement transform is set
/// when the session is seeded and stays fixed until [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorrespondenceSession {
    pub(crate) seeds: Vec<SeedPair>,
    pub(crate) matched: HashSet<u32>,
    pub(crate) frontier: HashSet<u32>,
    pub(crate) transform: Option<RigidTransform>,
    pub(crate) mode: SeedMode,
    pub(crate) source_vertex_count: usize,
}

impl CorrespondenceSession {
    /// Create an empty, unseeded session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the unseeded state. Calling this twice is harmless.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the session has been seeded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.transform.is_some()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> CrawlPhase {
        if !self.is_initialized() {
            CrawlPhase::Init
        } else if self.frontier.is_empty() {
            CrawlPhase::Complete
        } else {
            CrawlPhase::Crawling
        }
    }

    /// Whether the session is seeded and has nothing left to visit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == CrawlPhase::Complete
    }

    /// Source vertices whose positions have been fixed.
    #[must_use]
    pub const fn matched(&self) -> &HashSet<u32> {
        &self.matched
    }

    /// Source vertices to be snapped by the next step.
    #[must_use]
    pub const fn frontier(&self) -> &HashSet<u32> {
        &self.frontier
    }

    /// Matched vertices in ascending order.
    #[must_use]
    pub fn matched_sorted(&self) -> Vec<u32> {
        sorted(&self.matched)
    }

    /// Frontier vertices in ascending order.
    #[must_use]
    pub fn frontier_sorted(&self) -> Vec<u32> {
        sorted(&self.frontier)
    }

    /// The placement transform, once seeded.
    #[must_use]
    pub const fn transform(&self) -> Option<&RigidTransform> {
        self.transform.as_ref()
    }

    /// The seed pairs the session was initialized from.
    #[must_use]
    pub fn seeds(&self) -> &[SeedPair] {
        &self.seeds
    }

    /// The seed mode the session was initialized with.
    #[must_use]
    pub const fn mode(&self) -> SeedMode {
        self.mode
    }

    /// Source vertex count recorded at seeding (zero before).
    #[must_use]
    pub const fn source_vertex_count(&self) -> usize {
        self.source_vertex_count
    }
}

fn sorted(set: &HashSet<u32>) -> Vec<u32> {
    let mut v: Vec<u32> = set.iter().copied().collect();
    v.sort_unstable();
    v
}
