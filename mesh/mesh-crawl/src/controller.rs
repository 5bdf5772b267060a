//! Selection-driven entry points.
//!
//! These mirror what an editor exposes as buttons: seed from the current
//! picks, grow by one ring, grow until done, start over. Each reads and
//! writes the hosts' vertex selections; the engine itself never does.

use crate::{
    CompletionReport, CorrespondenceSession, CrawlParams, CrawlResult, SeedCorrespondence,
    SeedReport, StepReport,
};
use mesh_types::{MeshAccess, MeshEdit, VertexSelection};
use tracing::info;

/// Seed a fresh session from the ordered selections on both meshes.
///
/// The existing session is replaced only if seeding succeeds, so a failed
/// attempt keeps any previous crawl intact.
///
/// # Errors
///
/// Returns any error from [`SeedCorrespondence::from_lists`] or
/// [`CorrespondenceSession::seed`].
///
/// # Example
///
/// ```
/// use mesh_crawl::{controller, CorrespondenceSession, CrawlParams};
/// use mesh_types::{unit_cube, MeshObject, Vector3, VertexSelection};
///
/// let mut source = MeshObject::new(unit_cube());
/// let mut target = MeshObject::new(unit_cube()).with_translation(Vector3::new(10.0, 0.0, 0.0));
/// source.select_only(&[0, 1, 3]);
/// target.select_only(&[0, 1, 3]);
///
/// let params = CrawlParams::default();
/// let mut session = CorrespondenceSession::new();
/// controller::initialize_from_selection(&mut session, &mut source, &target, &params).unwrap();
/// let report = controller::advance_to_completion(&mut session, &mut source, &target, &params).unwrap();
///
/// assert_eq!(report.matched, 8);
/// ```
pub fn initialize_from_selection<S, T>(
    session: &mut CorrespondenceSession,
    source: &mut S,
    target: &T,
    params: &CrawlParams,
) -> CrawlResult<SeedReport>
where
    S: MeshEdit + VertexSelection,
    T: MeshAccess + VertexSelection,
{
    let seeds = SeedCorrespondence::from_lists(
        &source.ordered_selected_vertices(),
        &target.ordered_selected_vertices(),
    )?;

    let mut fresh = CorrespondenceSession::new();
    let report = fresh.seed(source, target, &seeds, params)?;
    *session = fresh;

    if params.select_frontier {
        source.select_only(&session.frontier_sorted());
    }

    Ok(report)
}

/// Advance the session by one ring.
///
/// # Errors
///
/// Returns any error from [`CorrespondenceSession::step`].
pub fn advance_one_ring<S, T>(
    session: &mut CorrespondenceSession,
    source: &mut S,
    target: &T,
    params: &CrawlParams,
) -> CrawlResult<StepReport>
where
    S: MeshEdit + VertexSelection,
    T: MeshAccess,
{
    let report = session.step(source, target)?;

    if params.select_frontier {
        source.select_only(&session.frontier_sorted());
    }

    Ok(report)
}

/// Step until the frontier is exhausted.
///
/// Each step matches at least one new vertex, so this stops within as many
/// steps as the source has vertices.
///
/// # Errors
///
/// Returns the first error from [`CorrespondenceSession::step`]. Steps that
/// already ran stay applied.
pub fn advance_to_completion<S, T>(
    session: &mut CorrespondenceSession,
    source: &mut S,
    target: &T,
    params: &CrawlParams,
) -> CrawlResult<CompletionReport>
where
    S: MeshEdit + VertexSelection,
    T: MeshAccess,
{
    let mut report = CompletionReport::default();

    loop {
        let step = session.step(source, target)?;
        if step.snapped > 0 {
            report.steps += 1;
            report.snapped += step.snapped;
        }
        if step.is_complete() {
            break;
        }
    }
    report.matched = session.matched().len();

    if params.select_frontier {
        source.select_only(&session.matched_sorted());
    }

    info!(
        steps = report.steps,
        matched = report.matched,
        "Matched all reachable vertices"
    );

    Ok(report)
}

/// Clear the session. Calling this on a cleared session is harmless.
pub fn reset(session: &mut CorrespondenceSession) {
    session.reset();
}
