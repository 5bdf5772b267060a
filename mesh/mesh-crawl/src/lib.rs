//! Ring-by-ring vertex correspondence between two meshes.
//!
//! Given a few vertex pairs that the user asserts correspond, this crate
//! moves the source mesh's vertices onto the target mesh one topological
//! ring at a time:
//!
//! - **Seeding** - snap the seed pairs exactly and estimate a rigid
//!   placement guess from the first three
//! - **Stepping** - for every frontier vertex, map its world position
//!   through the guess and snap it to the nearest target vertex, then move
//!   the frontier out by one ring
//! - **Completion** - repeat until every vertex reachable from the seeds
//!   has been matched
//!
//! The two meshes may differ by a rigid motion; they must share topology
//! near the seeds for the result to be meaningful.
//!
//! # Quick Start
//!
//! ```
//! use mesh_crawl::{CorrespondenceSession, CrawlParams, SeedCorrespondence};
//! use mesh_types::{unit_cube, MeshAccess, MeshObject, Vector3};
//!
//! let mut source = MeshObject::new(unit_cube());
//! let target = MeshObject::new(unit_cube()).with_translation(Vector3::new(10.0, 0.0, 0.0));
//!
//! // Three adjacent corners, in matching order.
//! let seeds = SeedCorrespondence::from_lists(&[0, 1, 3], &[0, 1, 3]).unwrap();
//!
//! let mut session = CorrespondenceSession::new();
//! session.seed(&mut source, &target, &seeds, &CrawlParams::default()).unwrap();
//!
//! while !session.is_complete() {
//!     let step = session.step(&mut source, &target).unwrap();
//!     println!("{step}");
//! }
//!
//! assert_eq!(session.matched().len(), 8);
//! let moved = source.local_position(6).unwrap();
//! assert!((moved.x - 11.0).abs() < 1e-9);
//! ```
//!
//! # Editor Workflow
//!
//! The [`controller`] module wraps the session in selection-driven calls:
//! seed from the current picks, advance one ring, or match everything. By
//! default each call selects the new frontier so the user can watch the
//! crawl spread.
//!
//! # Seed Modes
//!
//! | Mode | Seeds | Placement guess |
//! |------|-------|-----------------|
//! | [`SeedMode::Rigid`] | 3 or more | Frame fit on the first three pairs |
//! | [`SeedMode::Direct`] | 1 or more | Identity (meshes already overlap) |
//!
//! The guess is never refined; it only has to land each frontier vertex
//! closer to its counterpart than to any other target vertex.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod controller;
mod crawl;
mod error;
mod frame;
mod params;
mod result;
mod ring;
mod session;
mod spatial;
mod transform;

pub use error::{CrawlError, CrawlResult, MeshRole};
pub use frame::{Frame, rigid_from_triples};
pub use params::{CrawlParams, SeedMode};
pub use result::{CompletionReport, SeedReport, StepReport};
pub use ring::{neighbors, one_ring_frontier};
pub use session::{CorrespondenceSession, CrawlPhase, SeedCorrespondence, SeedPair};
pub use spatial::{Nearest, SpatialIndex};
pub use transform::RigidTransform;
