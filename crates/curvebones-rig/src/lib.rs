//! CurveBones Rig Library
//!
//! This crate turns curve objects into hair-style bone chains: one skeleton
//! per curve, one chain per spline, one bone per pair of consecutive points.
//!
//! # Overview
//!
//! - **Extraction**: control points of each spline, mapped into world space
//! - **Chains**: bones laid between consecutive points, parented root-first
//!   in either the forward or the reverse direction
//! - **Assembly**: every chain of a curve merged into one named skeleton
//! - **Batch**: many curves processed against a [`SceneHost`], with a
//!   per-curve [`BatchReport`]
//!
//! # Example
//!
//! ```
//! use curvebones_rig::{run_batch, BuildOptions, CurveData, SceneDocument, Spline};
//!
//! let curve = CurveData::new(
//!     "Bangs",
//!     vec![Spline::poly([[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 2.0]])],
//! );
//!
//! let mut scene = SceneDocument::default();
//! let outcome = run_batch(&mut scene, &[curve], &BuildOptions::default()).unwrap();
//!
//! assert!(outcome.report.ok);
//! let skeleton = scene.skeleton_named("Bangs_Armature").unwrap();
//! assert_eq!(skeleton.bone_count(), 2);
//! assert_eq!(scene.active.as_deref(), Some("Bangs_Armature"));
//! ```
//!
//! # Modules
//!
//! - [`math`]: Points and row-major world transforms
//! - [`curve`]: Spline representations and the [`CurveObject`] trait
//! - [`extract`]: Point extraction from one spline
//! - [`chain`]: Bone chain construction and [`Direction`]
//! - [`skeleton`]: Skeleton storage, name qualification, and validation
//! - [`assemble`]: Per-curve skeleton assembly
//! - [`host`]: The [`SceneHost`] trait
//! - [`batch`]: Batch orchestration and reports
//! - [`scene`]: JSON scene documents
//! - [`options`]: Build options
//! - [`error`]: Error types and codes

pub mod assemble;
pub mod batch;
pub mod chain;
pub mod curve;
pub mod error;
pub mod extract;
pub mod host;
pub mod math;
pub mod naming;
pub mod options;
pub mod scene;
pub mod skeleton;

// Re-export commonly used types at the crate root
pub use assemble::{assemble_skeleton, skeleton_name, Assembly, EditSession};
pub use batch::{run_batch, BatchOutcome, BatchReport, CurveReport, ReportIssue};
pub use chain::{bone_name, build_chain, Chain, ChainBone, Direction, DEFAULT_BONE_PREFIX};
pub use curve::{BezierPoint, CurveObject, Spline, SplineKind, SplinePoint};
pub use error::{BatchError, CurveError, HostError, RigError, RigResult, SceneError};
pub use extract::extract_points;
pub use host::{SceneHost, SkeletonHandle};
pub use math::{Point, Transform};
pub use naming::unique_name;
pub use options::BuildOptions;
pub use scene::{CurveData, SceneDocument};
pub use skeleton::{Bone, ChainSpan, Skeleton, SkeletonIssue};
