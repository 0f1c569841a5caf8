//! JSON scene document: an in-memory host for curves and skeletons.
//!
//! A scene document carries the source curves, the skeletons already in the
//! scene, and the selection state. It implements [`SceneHost`], so a batch
//! can run directly against it and the result can be written back out.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::{CurveObject, Spline};
use crate::error::{HostError, SceneError};
use crate::host::{SceneHost, SkeletonHandle};
use crate::math::Transform;
use crate::naming::unique_name;
use crate::skeleton::Skeleton;

/// A curve object stored in a scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveData {
    /// Object name.
    pub name: String,
    /// Object-to-world matrix, row-major. Identity when omitted.
    #[serde(default)]
    pub matrix_world: Transform,
    /// Splines in authored order.
    #[serde(default)]
    pub splines: Vec<Spline>,
}

impl CurveData {
    /// Creates a curve with an identity transform.
    pub fn new(name: impl Into<String>, splines: Vec<Spline>) -> Self {
        Self {
            name: name.into(),
            matrix_world: Transform::IDENTITY,
            splines,
        }
    }

    /// Sets the world matrix.
    pub fn with_transform(mut self, matrix_world: Transform) -> Self {
        self.matrix_world = matrix_world;
        self
    }
}

impl CurveObject for CurveData {
    fn name(&self) -> &str {
        &self.name
    }

    fn world_transform(&self) -> Transform {
        self.matrix_world
    }

    fn splines(&self) -> &[Spline] {
        &self.splines
    }
}

/// Curves, skeletons, and selection state of one scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub curves: Vec<CurveData>,
    #[serde(default)]
    pub skeletons: Vec<Skeleton>,
    /// Names of selected objects (curves or skeletons).
    #[serde(default)]
    pub selected: Vec<String>,
    /// Name of the active object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
}

impl SceneDocument {
    /// Parses a scene from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the scene to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a scene file.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Writes the scene to a file.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn curve(&self, name: &str) -> Option<&CurveData> {
        self.curves.iter().find(|c| c.name == name)
    }

    pub fn skeleton_named(&self, name: &str) -> Option<&Skeleton> {
        self.skeletons.iter().find(|s| s.name() == name)
    }

    pub fn skeleton_named_mut(&mut self, name: &str) -> Option<&mut Skeleton> {
        self.skeletons.iter_mut().find(|s| s.name() == name)
    }

    /// True if any curve or skeleton uses `name`.
    pub fn contains_object(&self, name: &str) -> bool {
        self.curve(name).is_some() || self.skeleton_named(name).is_some()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    /// Selected curves, in document order.
    pub fn selected_curves(&self) -> Vec<&CurveData> {
        self.curves
            .iter()
            .filter(|c| self.is_selected(&c.name))
            .collect()
    }

    /// Names of selected skeletons, in document order.
    pub fn selected_skeleton_names(&self) -> Vec<String> {
        self.skeletons
            .iter()
            .filter(|s| self.is_selected(s.name()))
            .map(|s| s.name().to_string())
            .collect()
    }
}

impl SceneHost for SceneDocument {
    fn unique_skeleton_name(&self, base: &str) -> String {
        unique_name(base, |n| self.contains_object(n))
    }

    fn link_skeleton(&mut self, skeleton: Skeleton) -> Result<SkeletonHandle, HostError> {
        if self.contains_object(skeleton.name()) {
            return Err(HostError::DuplicateSkeletonName(
                skeleton.name().to_string(),
            ));
        }

        let duplicate = {
            let mut seen = HashSet::new();
            skeleton
                .bones()
                .iter()
                .find(|b| !seen.insert(b.name.as_str()))
                .map(|b| b.name.clone())
        };
        if let Some(bone) = duplicate {
            return Err(HostError::DuplicateBoneName {
                skeleton: skeleton.name().to_string(),
                bone,
            });
        }

        self.skeletons.push(skeleton);
        Ok(SkeletonHandle(self.skeletons.len() - 1))
    }

    fn skeleton(&self, handle: SkeletonHandle) -> Option<&Skeleton> {
        self.skeletons.get(handle.0)
    }

    fn clear_selection(&mut self) {
        self.selected.clear();
        self.active = None;
    }

    fn select(&mut self, handle: SkeletonHandle) -> Result<(), HostError> {
        let name = self
            .skeletons
            .get(handle.0)
            .ok_or(HostError::UnknownSkeleton(handle.0))?
            .name()
            .to_string();
        if !self.is_selected(&name) {
            self.selected.push(name);
        }
        Ok(())
    }

    fn set_active(&mut self, handle: SkeletonHandle) -> Result<(), HostError> {
        let skeleton = self
            .skeletons
            .get(handle.0)
            .ok_or(HostError::UnknownSkeleton(handle.0))?;
        self.active = Some(skeleton.name().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{build_chain, Direction};
    use pretty_assertions::assert_eq;

    const SCENE: &str = r#"{
        "curves": [
            {
                "name": "Bangs",
                "matrix_world": [[1,0,0,0],[0,1,0,0],[0,0,1,10],[0,0,0,1]],
                "splines": [
                    { "type": "poly", "points": [ { "co": [0,0,0,1] }, { "co": [0,0,-1,1] } ] }
                ]
            },
            { "name": "Ponytail" }
        ],
        "selected": ["Bangs"],
        "active": "Bangs"
    }"#;

    #[test]
    fn test_parse_scene_defaults() {
        let scene = SceneDocument::from_json(SCENE).unwrap();
        assert_eq!(scene.curves.len(), 2);
        assert!(scene.skeletons.is_empty());
        assert_eq!(scene.active.as_deref(), Some("Bangs"));

        let ponytail = scene.curve("Ponytail").unwrap();
        assert_eq!(ponytail.matrix_world, Transform::IDENTITY);
        assert!(ponytail.splines.is_empty());

        let bangs = scene.curve("Bangs").unwrap();
        assert_eq!(
            bangs.world_transform().transform_point([0.0, 0.0, 0.0]),
            [0.0, 0.0, 10.0]
        );
    }

    #[test]
    fn test_selected_curves() {
        let scene = SceneDocument::from_json(SCENE).unwrap();
        let selected: Vec<&str> = scene
            .selected_curves()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(selected, vec!["Bangs"]);
    }

    #[test]
    fn test_link_and_select() {
        let mut scene = SceneDocument::from_json(SCENE).unwrap();
        let mut skeleton = Skeleton::new("Bangs_Armature");
        skeleton.add_chain(
            0,
            build_chain(&[[0.0; 3], [0.0, 0.0, 1.0]], Direction::Forward, "B"),
        );

        let handle = scene.link_skeleton(skeleton).unwrap();
        scene.clear_selection();
        scene.select(handle).unwrap();
        scene.set_active(handle).unwrap();

        assert_eq!(scene.selected, vec!["Bangs_Armature".to_string()]);
        assert_eq!(scene.active.as_deref(), Some("Bangs_Armature"));
        assert_eq!(scene.skeleton(handle).unwrap().bone_count(), 1);
        assert_eq!(scene.selected_skeleton_names(), vec!["Bangs_Armature"]);
    }

    #[test]
    fn test_unique_skeleton_name_avoids_objects() {
        let mut scene = SceneDocument::from_json(SCENE).unwrap();
        assert_eq!(scene.unique_skeleton_name("Bangs_Armature"), "Bangs_Armature");
        assert_eq!(scene.unique_skeleton_name("Bangs"), "Bangs.001");

        scene.link_skeleton(Skeleton::new("Bangs_Armature")).unwrap();
        assert_eq!(
            scene.unique_skeleton_name("Bangs_Armature"),
            "Bangs_Armature.001"
        );
    }

    #[test]
    fn test_link_rejects_taken_name() {
        let mut scene = SceneDocument::from_json(SCENE).unwrap();
        let err = scene.link_skeleton(Skeleton::new("Ponytail")).unwrap_err();
        assert_eq!(err, HostError::DuplicateSkeletonName("Ponytail".to_string()));
    }

    #[test]
    fn test_unknown_handle() {
        let mut scene = SceneDocument::default();
        assert_eq!(
            scene.select(SkeletonHandle(3)).unwrap_err(),
            HostError::UnknownSkeleton(3)
        );
        assert!(scene.set_active(SkeletonHandle(0)).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let scene = SceneDocument::from_json(SCENE).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");

        scene.save(&path).unwrap();
        let loaded = SceneDocument::load(&path).unwrap();
        assert_eq!(loaded, scene);
    }
}
