//! Seeding and frontier advancement.
//!
//! A crawl starts from a handful of user-asserted vertex pairs, snaps them
//! exactly, then grows outwards one ring at a time. Each step places every
//! frontier vertex by mapping its world position through the session's
//! placement transform and snapping to the nearest evaluated target vertex.
//!
//! Both operations validate everything they need before touching the
//! session or the source mesh, so a failed call leaves both unchanged.

use crate::ring::one_ring_frontier;
use crate::{
    CorrespondenceSession, CrawlError, CrawlParams, CrawlResult, MeshRole, RigidTransform,
    SeedCorrespondence, SeedMode, SeedReport, SpatialIndex, StepReport, rigid_from_triples,
};
use hashbrown::HashSet;
use mesh_types::{MeshAccess, MeshEdit};
use nalgebra::{Affine3, Point3};
use tracing::{debug, info, warn};

impl CorrespondenceSession {
    /// Initialize the session from ordered seed pairs.
    ///
    /// Every source seed vertex is moved onto the world position of its
    /// target counterpart. In [`SeedMode::Rigid`] the first three pairs also
    /// define the placement transform used by later steps; further pairs
    /// are snapped but do not influence it. Seeding reads stored target
    /// positions, not evaluated ones.
    ///
    /// # Errors
    ///
    /// - [`CrawlError::AlreadyInitialized`] if the session was seeded before
    /// - [`CrawlError::InvalidSeedCount`] if there are fewer pairs than the
    ///   seed mode needs
    /// - [`CrawlError::VertexOutOfBounds`] if a seed index is not a vertex
    /// - [`CrawlError::NonInvertibleTransform`] if the source object
    ///   transform is singular
    /// - [`CrawlError::DegenerateSeed`] if a transform-defining triple does
    ///   not span a plane
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_crawl::{CorrespondenceSession, CrawlParams, SeedCorrespondence};
    /// use mesh_types::{unit_cube, MeshObject, Vector3};
    ///
    /// let mut source = MeshObject::new(unit_cube());
    /// let target = MeshObject::new(unit_cube()).with_translation(Vector3::new(10.0, 0.0, 0.0));
    ///
    /// let seeds = SeedCorrespondence::from_lists(&[0, 1, 3], &[0, 1, 3]).unwrap();
    /// let mut session = CorrespondenceSession::new();
    /// let report = session
    ///     .seed(&mut source, &target, &seeds, &CrawlParams::default())
    ///     .unwrap();
    ///
    /// assert_eq!(report.matched, 3);
    /// assert_eq!(session.frontier_sorted(), vec![2, 4, 5, 6, 7]);
    /// ```
    pub fn seed<S, T>(
        &mut self,
        source: &mut S,
        target: &T,
        seeds: &SeedCorrespondence,
        params: &CrawlParams,
    ) -> CrawlResult<SeedReport>
    where
        S: MeshEdit,
        T: MeshAccess,
    {
        if self.is_initialized() {
            return Err(CrawlError::AlreadyInitialized);
        }

        let mode = params.seed_mode;
        let required = mode.min_seeds();
        if seeds.len() < required {
            return Err(CrawlError::InvalidSeedCount {
                source_count: seeds.len(),
                target_count: seeds.len(),
                required,
            });
        }

        let mut source_world = Vec::with_capacity(seeds.len());
        let mut target_world = Vec::with_capacity(seeds.len());
        for pair in seeds.pairs() {
            source_world.push(world_position(&*source, pair.source, MeshRole::Source)?);
            target_world.push(world_position(target, pair.target, MeshRole::Target)?);
        }

        let source_inverse = inverse_world(&*source)?;

        let transform = match mode {
            SeedMode::Rigid => {
                let ([a, b, c, ..], [ta, tb, tc, ..]) =
                    (source_world.as_slice(), target_world.as_slice())
                else {
                    return Err(CrawlError::InvalidSeedCount {
                        source_count: seeds.len(),
                        target_count: seeds.len(),
                        required,
                    });
                };
                rigid_from_triples(
                    &[*a, *b, *c],
                    &[*ta, *tb, *tc],
                    params.collinearity_tolerance,
                )?
            }
            SeedMode::Direct => RigidTransform::identity(),
        };

        // Validation done; mutate from here on.
        for (pair, goal) in seeds.pairs().iter().zip(&target_world) {
            source.set_local_position(pair.source, source_inverse * *goal);
        }

        let matched: HashSet<u32> = seeds.pairs().iter().map(|p| p.source).collect();
        let frontier = one_ring_frontier(&*source, &matched);

        let report = SeedReport {
            pairs: seeds.len(),
            matched: matched.len(),
            frontier: frontier.len(),
            transform,
        };

        self.seeds = seeds.pairs().to_vec();
        self.matched = matched;
        self.frontier = frontier;
        self.transform = Some(transform);
        self.mode = mode;
        self.source_vertex_count = source.vertex_count();

        info!(
            pairs = report.pairs,
            matched = report.matched,
            frontier = report.frontier,
            mode = ?mode,
            "Seeded correspondence session"
        );

        Ok(report)
    }

    /// Snap the current frontier and advance to the next ring.
    ///
    /// Frontier vertices are visited in ascending index order. Every guess
    /// is computed before any vertex moves, so the order does not affect the
    /// result. On a complete session this is a no-op.
    ///
    /// # Errors
    ///
    /// - [`CrawlError::UninitializedSession`] if the session was never seeded
    /// - [`CrawlError::TopologyChanged`] if the source vertex count differs
    ///   from the count at seeding
    /// - [`CrawlError::EmptyTargetMesh`] if the target evaluates to no vertices
    /// - [`CrawlError::NonInvertibleTransform`] if the source object
    ///   transform has become singular
    pub fn step<S, T>(&mut self, source: &mut S, target: &T) -> CrawlResult<StepReport>
    where
        S: MeshEdit,
        T: MeshAccess,
    {
        let transform = self.transform.ok_or(CrawlError::UninitializedSession)?;

        let found = source.vertex_count();
        if found != self.source_vertex_count {
            return Err(CrawlError::TopologyChanged {
                expected: self.source_vertex_count,
                found,
            });
        }

        let target_points = target.evaluated_world_positions();
        if target_points.is_empty() {
            return Err(CrawlError::EmptyTargetMesh);
        }

        if self.frontier.is_empty() {
            warn!(
                matched = self.matched.len(),
                "Step requested on a complete session"
            );
            return Ok(StepReport::idle(self.matched.len()));
        }

        let source_inverse = inverse_world(&*source)?;
        let index = SpatialIndex::build(target_points)?;

        let mut order: Vec<u32> = self.frontier.iter().copied().collect();
        order.sort_unstable();

        let mut planned = Vec::with_capacity(order.len());
        let mut next = HashSet::new();
        let mut sum_sq = 0.0;
        let mut max_distance: f64 = 0.0;

        for &v in &order {
            let world = world_position(&*source, v, MeshRole::Source)?;
            let guess = transform.transform_point(&world);
            let hit = index.nearest(&guess);

            sum_sq += hit.distance * hit.distance;
            max_distance = max_distance.max(hit.distance);
            planned.push((v, source_inverse * hit.point));

            next.extend(
                source
                    .one_ring(v)
                    .filter(|n| !self.matched.contains(n) && !self.frontier.contains(n)),
            );
        }

        for (v, position) in planned {
            source.set_local_position(v, position);
        }

        let snapped = order.len();
        let frontier = std::mem::replace(&mut self.frontier, next);
        self.matched.extend(frontier);

        #[allow(clippy::cast_precision_loss)]
        let rms_snap_distance = (sum_sq / snapped as f64).sqrt();

        let report = StepReport {
            snapped,
            matched: self.matched.len(),
            next_frontier: self.frontier.len(),
            rms_snap_distance,
            max_snap_distance: max_distance,
        };

        debug!(
            snapped = report.snapped,
            matched = report.matched,
            next_frontier = report.next_frontier,
            rms = format!("{:.4}", report.rms_snap_distance),
            "Crawl step"
        );

        if report.is_complete() {
            info!(matched = report.matched, "Correspondence crawl complete");
        }

        Ok(report)
    }
}

/// World position of a vertex, or an out-of-bounds error naming the mesh.
fn world_position<M: MeshAccess>(mesh: &M, index: u32, role: MeshRole) -> CrawlResult<Point3<f64>> {
    mesh.world_position(index)
        .ok_or_else(|| CrawlError::VertexOutOfBounds {
            role,
            index,
            vertex_count: mesh.vertex_count(),
        })
}

/// Inverse of the source object transform.
fn inverse_world<M: MeshAccess>(mesh: &M) -> CrawlResult<Affine3<f64>> {
    mesh.world_transform()
        .try_inverse()
        .ok_or(CrawlError::NonInvertibleTransform {
            role: MeshRole::Source,
        })
}
