//! Reports returned by crawl operations.

// Vertex counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use crate::RigidTransform;

/// Outcome of seeding a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    /// Number of seed pairs snapped.
    pub pairs: usize,
    /// Number of distinct source vertices matched by the seeds.
    pub matched: usize,
    /// Size of the first frontier.
    pub frontier: usize,
    /// Placement transform the session will use.
    pub transform: RigidTransform,
}

impl std::fmt::Display for SeedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Seeded: {} pairs, {} matched, {} on frontier",
            self.pairs, self.matched, self.frontier
        )
    }
}

/// Outcome of one crawl step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Number of vertices snapped by this step.
    pub snapped: usize,
    /// Total matched vertices after the step.
    pub matched: usize,
    /// Size of the frontier for the next step.
    pub next_frontier: usize,
    /// RMS distance between placement guesses and their snap targets.
    pub rms_snap_distance: f64,
    /// Largest distance between a placement guess and its snap target.
    pub max_snap_distance: f64,
}

impl StepReport {
    /// A step that found nothing to do.
    #[must_use]
    pub const fn idle(matched: usize) -> Self {
        Self {
            snapped: 0,
            matched,
            next_frontier: 0,
            rms_snap_distance: 0.0,
            max_snap_distance: 0.0,
        }
    }

    /// Whether the crawl has nothing left to visit.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.next_frontier == 0
    }
}

impl std::fmt::Display for StepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Step: {} snapped, {} matched, {} next (rms {:.4}, max {:.4})",
            self.snapped,
            self.matched,
            self.next_frontier,
            self.rms_snap_distance,
            self.max_snap_distance
        )
    }
}

/// Outcome of running a crawl until the frontier is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionReport {
    /// Number of steps that snapped at least one vertex.
    pub steps: usize,
    /// Total matched vertices at the end.
    pub matched: usize,
    /// Vertices snapped across all steps.
    pub snapped: usize,
}

impl CompletionReport {
    /// Fraction of `vertex_count` that ended up matched.
    #[must_use]
    pub fn coverage(&self, vertex_count: usize) -> f64 {
        if vertex_count == 0 {
            0.0
        } else {
            self.matched as f64 / vertex_count as f64
        }
    }
}

impl std::fmt::Display for CompletionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Crawl complete: {} matched after {} steps ({} snapped)",
            self.matched, self.steps, self.snapped
        )
    }
}
