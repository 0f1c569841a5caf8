//! curvebones End-to-End Test Infrastructure
//!
//! This crate provides integration tests across the rig library and the CLI:
//!
//! - **Build**: curves -> skeletons, including transforms and naming
//! - **Reverse**: regression coverage for reverse-direction chains
//! - **Properties**: proptest checks of the chain invariants
//! - **CLI**: scene files written, built, renamed, and read back
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p curvebones-tests
//! ```

pub mod fixtures;

pub use fixtures::{
    bone_segments, sample_scene, segment_set, straight_points, strand, SceneFixture,
    EXAMPLE_POINTS,
};
