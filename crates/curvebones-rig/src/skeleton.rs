//! Skeleton container: pooled bones of every chain built from one curve.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::{Chain, Direction};
use crate::math::Point;
use crate::naming::unique_name;

/// A bone in a skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    /// Unique bone name within the skeleton.
    pub name: String,
    /// Bone head position [X, Y, Z] (world space).
    pub head: Point,
    /// Bone tail position [X, Y, Z] (world space).
    pub tail: Point,
    /// Parent bone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Where one chain lives inside the skeleton's bone list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSpan {
    /// Index of the spline the chain was built from.
    pub spline_index: usize,
    /// Direction the chain was built with.
    pub direction: Direction,
    /// Index of the chain's first (root) bone.
    pub start: usize,
    /// Number of bones in the chain.
    pub len: usize,
}

impl ChainSpan {
    /// Bone index range covered by this chain.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

/// A structural problem found by [`Skeleton::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonIssue {
    #[error("duplicate bone name '{0}'")]
    DuplicateBoneName(String),

    #[error("bone '{bone}' references missing parent '{parent}'")]
    MissingParent { bone: String, parent: String },

    #[error("bone '{bone}' is created before its parent '{parent}'")]
    ParentAfterChild { bone: String, parent: String },

    #[error("bone '{bone}' is parented across chains to '{parent}'")]
    CrossChainParent { bone: String, parent: String },

    #[error("chain {chain} has {roots} root bone(s), expected 1")]
    RootCount { chain: usize, roots: usize },

    #[error("chain spans cover bones {covered} of {total}")]
    SpanMismatch { covered: usize, total: usize },

    #[error("bone '{bone}' head does not meet its parent's tail")]
    Gap { bone: String },
}

/// A named container owning the bones of every chain built from one curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    name: String,
    #[serde(default)]
    bones: Vec<Bone>,
    #[serde(default)]
    chains: Vec<ChainSpan>,
}

impl Skeleton {
    /// Creates an empty skeleton.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bones: Vec::new(),
            chains: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All bones; each chain's bones are contiguous, root first.
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn chains(&self) -> &[ChainSpan] {
        &self.chains
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Looks up a bone by name.
    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }

    pub fn contains_bone(&self, name: &str) -> bool {
        self.bone(name).is_some()
    }

    /// Bones of one chain.
    pub fn chain_bones(&self, chain: usize) -> Option<&[Bone]> {
        let span = self.chains.get(chain)?;
        self.bones.get(span.range())
    }

    /// Bones without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter().filter(|b| b.parent.is_none())
    }

    /// The parent of `bone`, if it has one and it exists.
    pub fn parent_of(&self, bone: &Bone) -> Option<&Bone> {
        bone.parent.as_deref().and_then(|p| self.bone(p))
    }

    /// Number of parent links from the named bone to its root.
    ///
    /// Returns `None` for an unknown bone, a missing parent, or a cycle.
    pub fn depth(&self, name: &str) -> Option<usize> {
        let mut current = self.bone(name)?;
        let mut steps = 0;
        while let Some(parent) = current.parent.as_deref() {
            steps += 1;
            if steps > self.bones.len() {
                return None;
            }
            current = self.bone(parent)?;
        }
        Some(steps)
    }

    /// Appends a chain built from spline `spline_index`.
    ///
    /// Chain-local names that collide with bones already in the skeleton get
    /// the first free `.NNN` suffix, and parent links are rewritten to the
    /// final names. Returns the span the chain occupies.
    pub fn add_chain(&mut self, spline_index: usize, chain: Chain) -> ChainSpan {
        let direction = chain.direction();
        let start = self.bones.len();

        for bone in chain.into_bones() {
            let name = unique_name(&bone.name, |n| self.contains_bone(n));
            // parents always precede their child within a chain
            let parent = bone.parent.map(|p| self.bones[start + p].name.clone());
            self.bones.push(Bone {
                name,
                head: bone.head,
                tail: bone.tail,
                parent,
            });
        }

        let span = ChainSpan {
            spline_index,
            direction,
            start,
            len: self.bones.len() - start,
        };
        self.chains.push(span);
        span
    }

    /// Prefixes every bone name with `<skeleton name>.` and rewrites parents.
    ///
    /// Unlike a prefix-everything rename, bones that already carry the prefix
    /// are left alone, so a second run changes nothing. Returns the
    /// `(old, new)` pairs of the bones that were renamed.
    pub fn qualify_bone_names(&mut self) -> Vec<(String, String)> {
        let prefix = format!("{}.", self.name);
        let mut renames: HashMap<String, String> = HashMap::new();
        let mut renamed = Vec::new();
        let mut taken: HashSet<String> = HashSet::new();

        for bone in &mut self.bones {
            let candidate = if bone.name.starts_with(&prefix) {
                bone.name.clone()
            } else {
                format!("{}{}", prefix, bone.name)
            };
            let new_name = unique_name(&candidate, |n| taken.contains(n));
            taken.insert(new_name.clone());

            if new_name != bone.name {
                let old_name = std::mem::replace(&mut bone.name, new_name.clone());
                renames.insert(old_name.clone(), new_name.clone());
                renamed.push((old_name, new_name));
            }
        }

        for bone in &mut self.bones {
            if let Some(parent) = bone.parent.as_mut() {
                if let Some(new_name) = renames.get(parent.as_str()) {
                    *parent = new_name.clone();
                }
            }
        }

        renamed
    }

    /// Checks the structural invariants and returns every violation found.
    pub fn validate(&self) -> Vec<SkeletonIssue> {
        let mut issues = Vec::new();

        let mut index_of: HashMap<&str, usize> = HashMap::new();
        for (i, bone) in self.bones.iter().enumerate() {
            if index_of.insert(bone.name.as_str(), i).is_some() {
                issues.push(SkeletonIssue::DuplicateBoneName(bone.name.clone()));
            }
        }

        let covered: usize = self.chains.iter().map(|c| c.len).sum();
        let contiguous = self
            .chains
            .iter()
            .try_fold(0, |next, c| (c.start == next).then_some(next + c.len))
            .is_some();
        if covered != self.bones.len() || !contiguous {
            issues.push(SkeletonIssue::SpanMismatch {
                covered,
                total: self.bones.len(),
            });
        }

        for (chain_index, span) in self.chains.iter().enumerate() {
            let Some(bones) = self.bones.get(span.range()) else {
                continue;
            };

            let roots = bones.iter().filter(|b| b.parent.is_none()).count();
            if span.len > 0 && roots != 1 {
                issues.push(SkeletonIssue::RootCount {
                    chain: chain_index,
                    roots,
                });
            }

            for (offset, bone) in bones.iter().enumerate() {
                let Some(parent_name) = bone.parent.as_deref() else {
                    continue;
                };
                let Some(&parent_index) = index_of.get(parent_name) else {
                    issues.push(SkeletonIssue::MissingParent {
                        bone: bone.name.clone(),
                        parent: parent_name.to_string(),
                    });
                    continue;
                };

                let bone_index = span.start + offset;
                if parent_index >= bone_index {
                    issues.push(SkeletonIssue::ParentAfterChild {
                        bone: bone.name.clone(),
                        parent: parent_name.to_string(),
                    });
                } else if !span.range().contains(&parent_index) {
                    issues.push(SkeletonIssue::CrossChainParent {
                        bone: bone.name.clone(),
                        parent: parent_name.to_string(),
                    });
                } else if self.bones[parent_index].tail != bone.head {
                    issues.push(SkeletonIssue::Gap {
                        bone: bone.name.clone(),
                    });
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{build_chain, DEFAULT_BONE_PREFIX};
    use pretty_assertions::assert_eq;

    fn strand(x: f64) -> Vec<Point> {
        vec![[x, 0.0, 0.0], [x, 0.0, 1.0], [x, 0.0, 2.0]]
    }

    fn two_chain_skeleton(direction: Direction) -> Skeleton {
        let mut skeleton = Skeleton::new("Hair_Armature");
        skeleton.add_chain(0, build_chain(&strand(0.0), direction, DEFAULT_BONE_PREFIX));
        skeleton.add_chain(1, build_chain(&strand(1.0), direction, DEFAULT_BONE_PREFIX));
        skeleton
    }

    #[test]
    fn test_second_chain_gets_suffixed_names() {
        let skeleton = two_chain_skeleton(Direction::Forward);
        let names: Vec<&str> = skeleton.bones().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["HairBone_0", "HairBone_1", "HairBone_0.001", "HairBone_1.001"]
        );

        let bone = skeleton.bone("HairBone_1.001").unwrap();
        assert_eq!(bone.parent.as_deref(), Some("HairBone_0.001"));
        assert_eq!(bone.head, [1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_chains_do_not_share_parents() {
        let skeleton = two_chain_skeleton(Direction::Reverse);
        assert_eq!(skeleton.chain_count(), 2);
        assert_eq!(skeleton.roots().count(), 2);

        let second = skeleton.chain_bones(1).unwrap();
        assert_eq!(second[0].parent, None);
        assert_eq!(second[0].head, [1.0, 0.0, 2.0]);
        assert_eq!(second[1].parent.as_deref(), Some("HairBone_0.001"));
        assert!(skeleton.validate().is_empty());
    }

    #[test]
    fn test_depth_and_parent_lookup() {
        let mut skeleton = Skeleton::new("S");
        let points: Vec<Point> = (0..5).map(|i| [0.0, i as f64, 0.0]).collect();
        skeleton.add_chain(0, build_chain(&points, Direction::Forward, "B"));

        assert_eq!(skeleton.depth("B_0"), Some(0));
        assert_eq!(skeleton.depth("B_3"), Some(3));
        assert_eq!(skeleton.depth("missing"), None);

        let bone = skeleton.bone("B_2").unwrap();
        assert_eq!(skeleton.parent_of(bone).unwrap().name, "B_1");
    }

    #[test]
    fn test_empty_chain_records_empty_span() {
        let mut skeleton = Skeleton::new("S");
        let span = skeleton.add_chain(4, build_chain(&[], Direction::Forward, "B"));
        assert_eq!(span.len, 0);
        assert_eq!(span.spline_index, 4);
        assert!(skeleton.is_empty());
        assert!(skeleton.validate().is_empty());
    }

    #[test]
    fn test_qualify_bone_names() {
        let mut skeleton = two_chain_skeleton(Direction::Forward);
        let renamed = skeleton.qualify_bone_names();
        assert_eq!(renamed.len(), 4);
        assert_eq!(
            renamed[0],
            (
                "HairBone_0".to_string(),
                "Hair_Armature.HairBone_0".to_string()
            )
        );

        let bone = skeleton.bone("Hair_Armature.HairBone_1.001").unwrap();
        assert_eq!(
            bone.parent.as_deref(),
            Some("Hair_Armature.HairBone_0.001")
        );
        assert!(skeleton.validate().is_empty());

        // already qualified names are left alone
        assert!(skeleton.qualify_bone_names().is_empty());
    }

    #[test]
    fn test_validate_reports_broken_skeletons() {
        let json = r#"{
            "name": "Broken",
            "bones": [
                { "name": "A", "head": [0.0, 0.0, 0.0], "tail": [0.0, 0.0, 1.0] },
                { "name": "A", "head": [0.0, 0.0, 1.0], "tail": [0.0, 0.0, 2.0], "parent": "A" },
                { "name": "C", "head": [0.0, 0.0, 5.0], "tail": [0.0, 0.0, 6.0], "parent": "Z" }
            ],
            "chains": [
                { "spline_index": 0, "direction": "forward", "start": 0, "len": 3 }
            ]
        }"#;
        let skeleton: Skeleton = serde_json::from_str(json).unwrap();
        let issues = skeleton.validate();

        assert!(issues.contains(&SkeletonIssue::DuplicateBoneName("A".to_string())));
        assert!(issues.contains(&SkeletonIssue::MissingParent {
            bone: "C".to_string(),
            parent: "Z".to_string(),
        }));
    }

    #[test]
    fn test_validate_reports_gap_and_span_mismatch() {
        let json = r#"{
            "name": "Gappy",
            "bones": [
                { "name": "A", "head": [0.0, 0.0, 0.0], "tail": [0.0, 0.0, 1.0] },
                { "name": "B", "head": [0.0, 0.0, 1.5], "tail": [0.0, 0.0, 2.0], "parent": "A" },
                { "name": "C", "head": [0.0, 0.0, 2.0], "tail": [0.0, 0.0, 3.0], "parent": "B" }
            ],
            "chains": [
                { "spline_index": 0, "direction": "forward", "start": 0, "len": 2 }
            ]
        }"#;
        let skeleton: Skeleton = serde_json::from_str(json).unwrap();
        let issues = skeleton.validate();

        assert!(issues.contains(&SkeletonIssue::Gap {
            bone: "B".to_string()
        }));
        assert!(issues.contains(&SkeletonIssue::SpanMismatch {
            covered: 2,
            total: 3,
        }));
    }
}
