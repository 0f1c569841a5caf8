//! Property-based tests for chain construction using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p curvebones-tests --test proptest_chain
//! ```

use proptest::prelude::*;

use curvebones_rig::{build_chain, Direction, Point, Skeleton};
use curvebones_tests::segment_set;

/// Finite coordinates in a range typical of scene units.
fn point() -> impl Strategy<Value = Point> {
    prop::array::uniform3(-100.0f64..100.0)
}

fn points(min: usize, max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(point(), min..max)
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Reverse)]
}

proptest! {
    /// N >= 2 points always give N - 1 bones.
    #[test]
    fn bone_count_is_points_minus_one(pts in points(2, 64), dir in direction()) {
        let chain = build_chain(&pts, dir, "HairBone");
        prop_assert_eq!(chain.len(), pts.len() - 1);
    }

    /// Fewer than two points give an empty chain.
    #[test]
    fn degenerate_input_gives_no_bones(pts in points(0, 2), dir in direction()) {
        prop_assert!(build_chain(&pts, dir, "HairBone").is_empty());
    }

    /// Forward and reverse cover the same segments, bone k mirroring bone N-2-k.
    #[test]
    fn reverse_is_geometrically_equivalent(pts in points(2, 48)) {
        let forward = build_chain(&pts, Direction::Forward, "HairBone");
        let reverse = build_chain(&pts, Direction::Reverse, "HairBone");
        let n = forward.len();

        for k in 0..n {
            prop_assert_eq!(reverse.bones()[k].head, forward.bones()[n - 1 - k].tail);
            prop_assert_eq!(reverse.bones()[k].tail, forward.bones()[n - 1 - k].head);
        }

        let fwd = segment_set(forward.bones().iter().map(|b| (&b.head, &b.tail)));
        let rev = segment_set(reverse.bones().iter().map(|b| (&b.head, &b.tail)));
        prop_assert_eq!(fwd, rev);
    }

    /// Exactly one root; bone k reaches it in k steps.
    #[test]
    fn single_root_and_depth(pts in points(2, 48), dir in direction()) {
        let chain = build_chain(&pts, dir, "HairBone");
        let roots = chain.bones().iter().filter(|b| b.parent.is_none()).count();
        prop_assert_eq!(roots, 1);
        for k in 0..chain.len() {
            prop_assert_eq!(chain.depth(k), Some(k));
        }
    }

    /// Root head is the first point forward and the last point in reverse.
    #[test]
    fn root_locality(pts in points(2, 48), dir in direction()) {
        let chain = build_chain(&pts, dir, "HairBone");
        let expected = match dir {
            Direction::Forward => pts[0],
            Direction::Reverse => pts[pts.len() - 1],
        };
        prop_assert_eq!(chain.root().map(|b| b.head), Some(expected));
    }

    /// Identical inputs give identical chains.
    #[test]
    fn build_is_deterministic(pts in points(0, 32), dir in direction()) {
        prop_assert_eq!(
            build_chain(&pts, dir, "HairBone"),
            build_chain(&pts, dir, "HairBone")
        );
    }

    /// Merging many chains keeps names unique and the skeleton valid.
    #[test]
    fn skeleton_stays_valid(
        strands in prop::collection::vec(points(2, 12), 1..6),
        dir in direction(),
    ) {
        let mut skeleton = Skeleton::new("Hair_Armature");
        for (index, pts) in strands.iter().enumerate() {
            skeleton.add_chain(index, build_chain(pts, dir, "HairBone"));
        }
        let expected: usize = strands.iter().map(|s| s.len() - 1).sum();
        prop_assert_eq!(skeleton.bone_count(), expected);
        prop_assert_eq!(skeleton.roots().count(), strands.len());
        prop_assert!(skeleton.validate().is_empty());

        skeleton.qualify_bone_names();
        prop_assert!(skeleton.validate().is_empty());
        prop_assert!(skeleton.bones().iter().all(|b| b.name.starts_with("Hair_Armature.")));
    }
}
