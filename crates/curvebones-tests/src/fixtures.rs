//! Shared curves, scenes, and helpers for integration tests.

use std::path::{Path, PathBuf};

use curvebones_rig::{Bone, CurveData, Point, SceneDocument, Spline, SplinePoint, Transform};
use tempfile::TempDir;

/// Three points along +Z, the canonical worked example.
pub const EXAMPLE_POINTS: [Point; 3] = [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 2.0]];

/// `count` points spaced `step` apart along +Z.
pub fn straight_points(count: usize, step: f64) -> Vec<Point> {
    (0..count).map(|i| [0.0, 0.0, i as f64 * step]).collect()
}

/// A single-spline poly curve.
pub fn strand(name: &str, points: &[Point]) -> CurveData {
    CurveData::new(name, vec![Spline::poly(points.iter().copied())])
}

/// A scene with three curves:
///
/// - `Bangs`: a bezier and a poly spline, identity transform
/// - `Ponytail`: a weighted NURBS spline under a translation
/// - `Stub`: a single-point spline (no usable chains)
///
/// `Bangs` and `Ponytail` are selected.
pub fn sample_scene() -> SceneDocument {
    let bangs = CurveData::new(
        "Bangs",
        vec![
            Spline::bezier(EXAMPLE_POINTS),
            Spline::poly([[1.0, 0.0, 0.0], [1.0, 0.0, 0.5]]),
        ],
    );
    let ponytail = CurveData::new(
        "Ponytail",
        vec![Spline::nurbs([
            SplinePoint::new([0.0, 0.0, 0.0]),
            SplinePoint::new([0.0, 0.0, -1.0]),
            SplinePoint::weighted([0.0, 0.0, -2.0], 0.5),
        ])],
    )
    .with_transform(Transform::from_translation([0.0, 2.0, 10.0]));
    let stub = strand("Stub", &[[5.0, 5.0, 5.0]]);

    SceneDocument {
        curves: vec![bangs, ponytail, stub],
        selected: vec!["Bangs".to_string(), "Ponytail".to_string()],
        active: Some("Bangs".to_string()),
        ..SceneDocument::default()
    }
}

/// Segments as unordered `{head, tail}` pairs, sorted for comparison.
pub fn segment_set<'a>(bones: impl IntoIterator<Item = (&'a Point, &'a Point)>) -> Vec<[Point; 2]> {
    let mut segments: Vec<[Point; 2]> = bones
        .into_iter()
        .map(|(a, b)| {
            let mut pair = [*a, *b];
            pair.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
            pair
        })
        .collect();
    segments.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    segments
}

/// Segments of skeleton bones.
pub fn bone_segments(bones: &[Bone]) -> Vec<[Point; 2]> {
    segment_set(bones.iter().map(|b| (&b.head, &b.tail)))
}

/// A scene document written to a temporary directory.
pub struct SceneFixture {
    pub root: TempDir,
    pub path: PathBuf,
}

impl SceneFixture {
    /// Writes `scene` to `<tmp>/scene.json`.
    pub fn new(scene: &SceneDocument) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let path = root.path().join("scene.json");
        scene.save(&path).expect("Failed to write scene");
        Self { root, path }
    }

    /// A path inside the fixture directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Writes a raw file next to the scene.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Reads a scene back.
    pub fn load(&self, path: &Path) -> SceneDocument {
        SceneDocument::load(path).expect("Failed to load scene")
    }
}
