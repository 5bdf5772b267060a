//! End-to-end crawl scenarios on small synthetic meshes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::cast_possible_truncation)]

use approx::assert_relative_eq;
use mesh_crawl::{
    CorrespondenceSession, CrawlError, CrawlParams, CrawlPhase, MeshRole, SeedCorrespondence,
    SeedMode, neighbors,
};
use mesh_types::{Affine3, IndexedMesh, MeshAccess, MeshObject, Vector3, Vertex, unit_cube};
use nalgebra::{Isometry3, Translation3, UnitQuaternion};

// =============================================================================
// Fixtures
// =============================================================================

/// An `n × n` vertex grid with a little relief so it is not planar.
fn grid(n: u32) -> IndexedMesh {
    grid_with_height(n, |x, y| 0.1 * (x * 0.7).sin() * y)
}

/// An `n × n` vertex grid lying in the `z = 0` plane.
fn flat_grid(n: u32) -> IndexedMesh {
    grid_with_height(n, |_, _| 0.0)
}

fn grid_with_height(n: u32, height: impl Fn(f64, f64) -> f64) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    for i in 0..n {
        for j in 0..n {
            let x = f64::from(i);
            let y = f64::from(j);
            mesh.vertices.push(Vertex::from_coords(x, y, height(x, y)));
        }
    }
    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let a = i * n + j;
            mesh.faces.push([a, a + n, a + 1]);
            mesh.faces.push([a + 1, a + n, a + n + 1]);
        }
    }
    mesh
}

fn placed(mesh: IndexedMesh, rotation: UnitQuaternion<f64>, shift: Vector3<f64>) -> MeshObject {
    let iso = Isometry3::from_parts(Translation3::from(shift), rotation);
    MeshObject::new(mesh).with_world_transform(Affine3::from_matrix_unchecked(iso.to_homogeneous()))
}

fn shifted_cube() -> MeshObject {
    MeshObject::new(unit_cube()).with_translation(Vector3::new(10.0, 0.0, 0.0))
}

fn seeds(source: &[u32], target: &[u32]) -> SeedCorrespondence {
    SeedCorrespondence::from_lists(source, target).unwrap()
}

fn run_to_completion(
    session: &mut CorrespondenceSession,
    source: &mut MeshObject,
    target: &MeshObject,
) -> usize {
    let mut steps = 0;
    while !session.is_complete() {
        session.step(source, target).unwrap();
        steps += 1;
        assert!(steps <= source.vertex_count(), "crawl did not converge");
    }
    steps
}

// =============================================================================
// Whole crawls
// =============================================================================

#[test]
fn cube_offset_by_ten_matches_every_vertex() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();

    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();
    let steps = run_to_completion(&mut session, &mut source, &target);

    assert_eq!(steps, 1);
    assert_eq!(session.matched().len(), 8);
    assert!(session.frontier().is_empty());
    assert_eq!(session.phase(), CrawlPhase::Complete);

    for v in 0..8 {
        let moved = source.local_position(v).unwrap();
        let goal = target.world_position(v).unwrap();
        assert_relative_eq!(moved.coords, goal.coords, epsilon = 1e-9);
    }
}

#[test]
fn rotated_grid_matches_index_for_index() {
    let n = 8;
    let rotation = UnitQuaternion::from_euler_angles(0.6, -0.4, 2.2);
    let shift = Vector3::new(-20.0, 3.5, 12.0);
    let target = placed(grid(n), rotation, shift);
    let mut source = MeshObject::new(grid(n));
    let mut session = CorrespondenceSession::new();

    let report = session
        .seed(&mut source, &target, &seeds(&[0, 1, n], &[0, 1, n]), &CrawlParams::default())
        .unwrap();

    let transform = report.transform;
    assert_relative_eq!(transform.translation, shift, epsilon = 1e-9);
    assert!(rotation.angle_to(&transform.rotation) < 1e-6);

    run_to_completion(&mut session, &mut source, &target);

    assert_eq!(session.matched().len(), (n * n) as usize);
    for v in 0..n * n {
        let moved = source.local_position(v).unwrap();
        let goal = target.world_position(v).unwrap();
        assert_relative_eq!(moved.coords, goal.coords, epsilon = 1e-9);
    }
}

#[test]
fn flat_grid_matches_index_for_index() {
    // A turn about z keeps every target vertex on one plane in world space.
    let n = 40;
    let rotation = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.9);
    let shift = Vector3::new(3.0, -7.0, 0.0);
    let target = placed(flat_grid(n), rotation, shift);
    let mut source = MeshObject::new(flat_grid(n));
    let mut session = CorrespondenceSession::new();

    session
        .seed(&mut source, &target, &seeds(&[0, 1, n], &[0, 1, n]), &CrawlParams::default())
        .unwrap();
    run_to_completion(&mut session, &mut source, &target);

    assert_eq!(session.matched().len(), 1600);
    for v in 0..n * n {
        let moved = source.local_position(v).unwrap();
        let goal = target.world_position(v).unwrap();
        assert_relative_eq!(moved.coords, goal.coords, epsilon = 1e-9);
    }
}

#[test]
fn source_with_its_own_placement_lands_in_world_space() {
    let source_rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.8);
    let mut source = placed(unit_cube(), source_rotation, Vector3::new(0.0, 4.0, 0.0));
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();

    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();
    run_to_completion(&mut session, &mut source, &target);

    for v in 0..8 {
        let moved = source.world_position(v).unwrap();
        let goal = target.world_position(v).unwrap();
        assert_relative_eq!(moved.coords, goal.coords, epsilon = 1e-9);
    }
}

#[test]
fn extra_seeds_are_snapped_but_do_not_move_the_guess() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();

    // Pair 6 with the wrong corner on purpose.
    let report = session
        .seed(
            &mut source,
            &target,
            &seeds(&[0, 1, 3, 6], &[0, 1, 3, 5]),
            &CrawlParams::default(),
        )
        .unwrap();

    assert_eq!(report.pairs, 4);
    assert_relative_eq!(
        report.transform.translation,
        Vector3::new(10.0, 0.0, 0.0),
        epsilon = 1e-9
    );
    assert_relative_eq!(
        source.local_position(6).unwrap().coords,
        target.world_position(5).unwrap().coords,
        epsilon = 1e-12
    );
    assert_eq!(session.seeds().len(), 4);
    assert_eq!(session.frontier_sorted(), vec![2, 4, 5, 7]);
}

#[test]
fn direct_mode_crawls_overlapping_meshes_from_one_seed() {
    let mut source = MeshObject::new(unit_cube());
    let target =
        MeshObject::new(unit_cube()).with_translation(Vector3::new(0.1, -0.05, 0.02));
    let params = CrawlParams::new().with_seed_mode(SeedMode::Direct);
    let mut session = CorrespondenceSession::new();

    let report = session
        .seed(&mut source, &target, &seeds(&[0], &[0]), &params)
        .unwrap();
    assert!(report.transform.is_identity(1e-12));
    assert_eq!(session.mode(), SeedMode::Direct);
    assert_eq!(session.frontier_sorted(), vec![1, 2, 3, 4, 5, 7]);

    let steps = run_to_completion(&mut session, &mut source, &target);
    assert_eq!(steps, 2);

    for v in 0..8 {
        assert_relative_eq!(
            source.local_position(v).unwrap().coords,
            target.world_position(v).unwrap().coords,
            epsilon = 1e-12
        );
    }
}

// =============================================================================
// Evaluated versus stored positions
// =============================================================================

#[test]
fn steps_snap_to_deformed_target_but_seeds_do_not() {
    let mut offsets = vec![Vector3::zeros(); 8];
    offsets[0] = Vector3::new(0.0, 0.0, 0.3);
    offsets[6] = Vector3::new(0.0, 0.0, 0.2);
    let target = shifted_cube().with_deformation(offsets);
    let mut source = MeshObject::new(unit_cube());
    let mut session = CorrespondenceSession::new();

    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();
    assert_relative_eq!(
        source.local_position(0).unwrap().coords,
        Vector3::new(10.0, 0.0, 0.0),
        epsilon = 1e-12
    );

    let step = session.step(&mut source, &target).unwrap();
    assert!(step.is_complete());
    assert_relative_eq!(step.max_snap_distance, 0.2, epsilon = 1e-9);
    assert_relative_eq!(
        source.local_position(6).unwrap().coords,
        Vector3::new(11.0, 1.0, 1.2),
        epsilon = 1e-9
    );
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn frontier_stays_disjoint_adjacent_and_growth_is_monotonic() {
    let n = 9;
    let target = placed(
        grid(n),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.3),
        Vector3::new(5.0, 5.0, 5.0),
    );
    let mut source = MeshObject::new(grid(n));
    let mut session = CorrespondenceSession::new();
    let centre = 4 * n + 4;

    session
        .seed(
            &mut source,
            &target,
            &seeds(&[centre, centre + 1, centre + n], &[centre, centre + 1, centre + n]),
            &CrawlParams::default(),
        )
        .unwrap();

    let mut previous = session.matched().len();
    let mut steps = 0;
    loop {
        for v in session.frontier() {
            assert!(!session.matched().contains(v));
            let ring = neighbors(&source, *v);
            assert!(ring.iter().any(|w| session.matched().contains(w)));
        }
        if session.is_complete() {
            break;
        }

        let report = session.step(&mut source, &target).unwrap();
        steps += 1;
        assert!(report.matched > previous);
        assert_eq!(report.matched, session.matched().len());
        previous = report.matched;
        assert!(steps <= source.vertex_count());
    }

    assert_eq!(session.matched().len(), (n * n) as usize);
}

#[test]
fn disconnected_vertices_are_never_reached() {
    let mut mesh = unit_cube();
    mesh.vertices.push(Vertex::from_coords(5.0, 5.0, 5.0));
    let mut source = MeshObject::new(mesh.clone());
    let target = MeshObject::new(mesh).with_translation(Vector3::new(10.0, 0.0, 0.0));
    let mut session = CorrespondenceSession::new();

    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();
    run_to_completion(&mut session, &mut source, &target);

    assert_eq!(session.matched().len(), 8);
    assert!(!session.matched().contains(&8));
    assert_relative_eq!(source.local_position(8).unwrap().x, 5.0);
}

#[test]
fn step_on_complete_session_is_a_no_op() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();
    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();
    run_to_completion(&mut session, &mut source, &target);

    let before_session = session.clone();
    let before_mesh = source.mesh().clone();
    let report = session.step(&mut source, &target).unwrap();

    assert_eq!(report.snapped, 0);
    assert_eq!(report.matched, 8);
    assert!(report.is_complete());
    assert_eq!(session, before_session);
    assert_eq!(source.mesh(), &before_mesh);
}

#[test]
fn reset_is_idempotent_and_allows_reseeding() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();
    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();

    session.reset();
    assert_eq!(session, CorrespondenceSession::new());
    session.reset();
    assert_eq!(session, CorrespondenceSession::new());

    let mut fresh = MeshObject::new(unit_cube());
    session
        .seed(&mut fresh, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();
    assert!(session.is_initialized());
}

// =============================================================================
// Errors leave everything untouched
// =============================================================================

#[test]
fn collinear_seeds_are_rejected_without_mutation() {
    let n = 5;
    let mut source = MeshObject::new(grid(n));
    let target = placed(grid(n), UnitQuaternion::identity(), Vector3::new(1.0, 1.0, 1.0));
    let before = source.mesh().clone();
    let mut session = CorrespondenceSession::new();

    // Vertices 0, 1 and 2 lie on the line x = 0, z = 0.
    let result = session.seed(
        &mut source,
        &target,
        &seeds(&[0, 1, 2], &[0, 1, n]),
        &CrawlParams::default(),
    );

    assert_eq!(
        result,
        Err(CrawlError::DegenerateSeed {
            role: MeshRole::Source
        })
    );
    assert_eq!(source.mesh(), &before);
    assert_eq!(session, CorrespondenceSession::new());
}

#[test]
fn out_of_bounds_seed_is_rejected_without_mutation() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let before = source.mesh().clone();
    let mut session = CorrespondenceSession::new();

    let result = session.seed(
        &mut source,
        &target,
        &seeds(&[0, 1, 3], &[0, 1, 42]),
        &CrawlParams::default(),
    );

    assert_eq!(
        result,
        Err(CrawlError::VertexOutOfBounds {
            role: MeshRole::Target,
            index: 42,
            vertex_count: 8,
        })
    );
    assert_eq!(source.mesh(), &before);
    assert!(!session.is_initialized());
}

#[test]
fn seeding_twice_is_rejected() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();
    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();

    let before_session = session.clone();
    let before_mesh = source.mesh().clone();
    let result = session.seed(
        &mut source,
        &target,
        &seeds(&[4, 5, 7], &[4, 5, 7]),
        &CrawlParams::default(),
    );

    assert_eq!(result, Err(CrawlError::AlreadyInitialized));
    assert_eq!(session, before_session);
    assert_eq!(source.mesh(), &before_mesh);
}

#[test]
fn step_before_seeding_is_rejected() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();

    assert_eq!(
        session.step(&mut source, &target),
        Err(CrawlError::UninitializedSession)
    );
    assert_eq!(session.phase(), CrawlPhase::Init);
}

#[test]
fn step_against_different_topology_is_rejected() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();
    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();
    let before = session.clone();

    let mut other = MeshObject::new(grid(3));
    let result = session.step(&mut other, &target);

    assert_eq!(
        result,
        Err(CrawlError::TopologyChanged {
            expected: 8,
            found: 9,
        })
    );
    assert_eq!(session, before);
}

#[test]
fn step_against_empty_target_is_rejected() {
    let mut source = MeshObject::new(unit_cube());
    let target = shifted_cube();
    let mut session = CorrespondenceSession::new();
    session
        .seed(&mut source, &target, &seeds(&[0, 1, 3], &[0, 1, 3]), &CrawlParams::default())
        .unwrap();
    let before_session = session.clone();
    let before_mesh = source.mesh().clone();

    let empty = MeshObject::new(IndexedMesh::new());
    let result = session.step(&mut source, &empty);

    assert_eq!(result, Err(CrawlError::EmptyTargetMesh));
    assert_eq!(session, before_session);
    assert_eq!(source.mesh(), &before_mesh);
}
