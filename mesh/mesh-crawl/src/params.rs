//! Parameters for seeding and advancing a crawl.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the placement guess is derived from the seed pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeedMode {
    /// Estimate a rigid motion from the first three seed pairs.
    #[default]
    Rigid,
    /// Skip estimation; each source vertex looks for its match at its own
    /// world position. Suited to meshes that already overlap.
    Direct,
}

impl SeedMode {
    /// Minimum number of seed pairs this mode needs.
    #[must_use]
    pub const fn min_seeds(self) -> usize {
        match self {
            Self::Rigid => 3,
            Self::Direct => 1,
        }
    }
}

/// Parameters for correspondence crawling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CrawlParams {
    /// How the placement guess is computed (default: [`SeedMode::Rigid`]).
    pub seed_mode: SeedMode,
    /// Smallest sine of the angle between the two edges of a seed triple
    /// before it is considered collinear (default: 1e-9).
    pub collinearity_tolerance: f64,
    /// Whether the controller selects the frontier on the source mesh after
    /// each operation (default: true).
    pub select_frontier: bool,
}

impl Default for CrawlParams {
    fn default() -> Self {
        Self {
            seed_mode: SeedMode::Rigid,
            collinearity_tolerance: 1e-9,
            select_frontier: true,
        }
    }
}

impl CrawlParams {
    /// Creates new crawl parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed mode.
    #[must_use]
    pub const fn with_seed_mode(mut self, mode: SeedMode) -> Self {
        self.seed_mode = mode;
        self
    }

    /// Sets the collinearity tolerance.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // abs is not const fn
    pub fn with_collinearity_tolerance(mut self, tolerance: f64) -> Self {
        self.collinearity_tolerance = tolerance.abs();
        self
    }

    /// Enables or disables frontier selection feedback.
    #[must_use]
    pub const fn with_select_frontier(mut self, enabled: bool) -> Self {
        self.select_frontier = enabled;
        self
    }
}
