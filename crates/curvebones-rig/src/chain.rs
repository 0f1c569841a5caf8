//! Bone chain construction from an ordered point sequence.
//!
//! A chain built from `N` points has `N - 1` bones, one per segment. The
//! [`Direction`] decides which end of the curve becomes the root:
//!
//! - **Forward** (scalp to tip): bone `i` spans `P[i] -> P[i+1]`, so the root
//!   sits on the first authored point.
//! - **Reverse** (tip to scalp): bone `k` spans `P[N-1-k] -> P[N-2-k]`, so the
//!   root sits on the last authored point.
//!
//! In both modes bone `k` (k >= 1) is parented to bone `k - 1`, the bone
//! created just before it. Flipping the points without also walking the
//! parent links from the new root would root the tree at the wrong end; the
//! two modes trace the same polyline and differ only in orientation and
//! hierarchy.

use serde::{Deserialize, Serialize};

use crate::math::{distance, Point};

/// Bone name prefix used when none is configured.
pub const DEFAULT_BONE_PREFIX: &str = "HairBone";

/// Which end of the authored point order becomes the chain root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Root at the first authored point.
    #[default]
    Forward,
    /// Root at the last authored point.
    Reverse,
}

impl Direction {
    /// Maps a `reverse_direction` flag to a direction.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Returns true for [`Direction::Reverse`].
    pub fn is_reverse(&self) -> bool {
        matches!(self, Direction::Reverse)
    }

    /// Returns the direction as its serialized string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

/// Name of the bone at `index` within its chain.
pub fn bone_name(prefix: &str, index: usize) -> String {
    format!("{}_{}", prefix, index)
}

/// One bone of a chain. `parent` is an index into the same chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainBone {
    /// Chain-local name.
    pub name: String,
    /// Head position (world space).
    pub head: Point,
    /// Tail position (world space).
    pub tail: Point,
    /// Index of the parent bone, `None` for the root.
    pub parent: Option<usize>,
}

/// A linear bone chain built from one spline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain {
    direction: Direction,
    bones: Vec<ChainBone>,
}

impl Chain {
    /// Direction the chain was built with.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Bones in creation order; the root is first.
    pub fn bones(&self) -> &[ChainBone] {
        &self.bones
    }

    /// Consumes the chain, returning its bones.
    pub fn into_bones(self) -> Vec<ChainBone> {
        self.bones
    }

    /// Number of bones.
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Returns true if the chain has no bones.
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// The root bone, if any.
    pub fn root(&self) -> Option<&ChainBone> {
        self.bones.iter().find(|b| b.parent.is_none())
    }

    /// Number of parent links from bone `index` to the root.
    ///
    /// Returns `None` for an out-of-range index or a parent link that would
    /// revisit a bone.
    pub fn depth(&self, index: usize) -> Option<usize> {
        let mut current = self.bones.get(index)?;
        let mut steps = 0;
        while let Some(parent) = current.parent {
            steps += 1;
            if steps > self.bones.len() {
                return None;
            }
            current = self.bones.get(parent)?;
        }
        Some(steps)
    }

    /// Total length of all segments.
    pub fn length(&self) -> f64 {
        self.bones.iter().map(|b| distance(b.head, b.tail)).sum()
    }
}

/// Builds a bone chain over `points`.
///
/// Fewer than two points produce an empty chain; skipping it is up to the
/// caller.
pub fn build_chain(points: &[Point], direction: Direction, prefix: &str) -> Chain {
    let segments: Vec<(Point, Point)> = match direction {
        Direction::Forward => points.windows(2).map(|w| (w[0], w[1])).collect(),
        // walk from the last point back: head on the tip side, tail toward the root
        Direction::Reverse => points.windows(2).rev().map(|w| (w[1], w[0])).collect(),
    };

    let bones = segments
        .into_iter()
        .enumerate()
        .map(|(k, (head, tail))| ChainBone {
            name: bone_name(prefix, k),
            head,
            tail,
            parent: k.checked_sub(1),
        })
        .collect();

    Chain { direction, bones }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strand() -> Vec<Point> {
        vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 2.0]]
    }

    #[test]
    fn test_forward_example() {
        let chain = build_chain(&strand(), Direction::Forward, DEFAULT_BONE_PREFIX);
        assert_eq!(
            chain.bones(),
            &[
                ChainBone {
                    name: "HairBone_0".to_string(),
                    head: [0.0, 0.0, 0.0],
                    tail: [0.0, 0.0, 1.0],
                    parent: None,
                },
                ChainBone {
                    name: "HairBone_1".to_string(),
                    head: [0.0, 0.0, 1.0],
                    tail: [0.0, 0.0, 2.0],
                    parent: Some(0),
                },
            ]
        );
    }

    #[test]
    fn test_reverse_example() {
        let chain = build_chain(&strand(), Direction::Reverse, DEFAULT_BONE_PREFIX);
        assert_eq!(
            chain.bones(),
            &[
                ChainBone {
                    name: "HairBone_0".to_string(),
                    head: [0.0, 0.0, 2.0],
                    tail: [0.0, 0.0, 1.0],
                    parent: None,
                },
                ChainBone {
                    name: "HairBone_1".to_string(),
                    head: [0.0, 0.0, 1.0],
                    tail: [0.0, 0.0, 0.0],
                    parent: Some(0),
                },
            ]
        );
    }

    #[test]
    fn test_bone_count_is_points_minus_one() {
        for n in 2..8 {
            let points: Vec<Point> = (0..n).map(|i| [i as f64, 0.0, 0.0]).collect();
            assert_eq!(build_chain(&points, Direction::Forward, "B").len(), n - 1);
            assert_eq!(build_chain(&points, Direction::Reverse, "B").len(), n - 1);
        }
    }

    #[test]
    fn test_degenerate_input_gives_empty_chain() {
        assert!(build_chain(&[], Direction::Forward, "B").is_empty());
        assert!(build_chain(&[[1.0, 1.0, 1.0]], Direction::Reverse, "B").is_empty());
        assert!(build_chain(&[], Direction::Reverse, "B").root().is_none());
    }

    #[test]
    fn test_root_locality() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 0.5, 0.0], [2.0, 0.0, 1.0], [3.0, 1.0, 1.0]];

        let forward = build_chain(&points, Direction::Forward, "B");
        assert_eq!(forward.root().unwrap().head, points[0]);

        let reverse = build_chain(&points, Direction::Reverse, "B");
        assert_eq!(reverse.root().unwrap().head, points[3]);
    }

    #[test]
    fn test_reverse_mirrors_forward_segments() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 0.5, 0.0], [2.0, 0.0, 1.0], [3.0, 1.0, 1.0]];
        let forward = build_chain(&points, Direction::Forward, "B");
        let reverse = build_chain(&points, Direction::Reverse, "B");

        let n = forward.len();
        for (k, bone) in reverse.bones().iter().enumerate() {
            let mirrored = &forward.bones()[n - 1 - k];
            assert_eq!(bone.head, mirrored.tail);
            assert_eq!(bone.tail, mirrored.head);
        }
        assert!((forward.length() - reverse.length()).abs() < 1e-12);
    }

    #[test]
    fn test_children_start_at_parent_tail() {
        let points = vec![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 2.0, 3.0]];
        for direction in [Direction::Forward, Direction::Reverse] {
            let chain = build_chain(&points, direction, "B");
            for bone in chain.bones() {
                if let Some(parent) = bone.parent {
                    assert_eq!(bone.head, chain.bones()[parent].tail);
                }
            }
        }
    }

    #[test]
    fn test_depth_matches_index() {
        let points: Vec<Point> = (0..6).map(|i| [0.0, i as f64, 0.0]).collect();
        for direction in [Direction::Forward, Direction::Reverse] {
            let chain = build_chain(&points, direction, "B");
            let roots = chain.bones().iter().filter(|b| b.parent.is_none()).count();
            assert_eq!(roots, 1);
            for k in 0..chain.len() {
                assert_eq!(chain.depth(k), Some(k));
            }
            assert_eq!(chain.depth(chain.len()), None);
        }
    }

    #[test]
    fn test_names_restart_per_chain_and_use_prefix() {
        let chain = build_chain(&strand(), Direction::Reverse, "Strand");
        let names: Vec<&str> = chain.bones().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Strand_0", "Strand_1"]);
        assert_eq!(chain.direction(), Direction::Reverse);
    }

    #[test]
    fn test_build_is_deterministic() {
        let points = vec![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9]];
        let a = build_chain(&points, Direction::Reverse, DEFAULT_BONE_PREFIX);
        let b = build_chain(&points, Direction::Reverse, DEFAULT_BONE_PREFIX);
        assert_eq!(a, b);
    }

    #[test]
    fn test_direction_flag() {
        assert_eq!(Direction::from_reverse(false), Direction::Forward);
        assert_eq!(Direction::from_reverse(true), Direction::Reverse);
        assert!(Direction::Reverse.is_reverse());
        assert_eq!(Direction::default(), Direction::Forward);
        assert_eq!(
            serde_json::to_string(&Direction::Reverse).unwrap(),
            "\"reverse\""
        );
    }
}
