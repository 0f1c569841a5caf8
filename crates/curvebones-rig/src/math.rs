//! Points and affine world transforms.

use serde::{Deserialize, Serialize};

/// A position in 3D space [X, Y, Z].
pub type Point = [f64; 3];

/// A 4x4 affine transform stored row-major, applied to column vectors.
///
/// Serializes as a plain `[[f64; 4]; 4]` array, the same layout a host
/// exports for an object's world matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform {
    pub rows: [[f64; 4]; 4],
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a pure translation.
    pub fn from_translation(offset: [f64; 3]) -> Self {
        let mut t = Self::IDENTITY;
        t.rows[0][3] = offset[0];
        t.rows[1][3] = offset[1];
        t.rows[2][3] = offset[2];
        t
    }

    /// Creates a per-axis scale.
    pub fn from_scale(scale: [f64; 3]) -> Self {
        let mut t = Self::IDENTITY;
        t.rows[0][0] = scale[0];
        t.rows[1][1] = scale[1];
        t.rows[2][2] = scale[2];
        t
    }

    /// Maps a 3D point (implicit `w = 1`).
    pub fn transform_point(&self, p: Point) -> Point {
        self.transform_homogeneous([p[0], p[1], p[2], 1.0])
    }

    /// Maps a homogeneous point and keeps the first three components.
    ///
    /// No perspective divide: for a weighted NURBS vertex the translation is
    /// scaled by `w`.
    pub fn transform_homogeneous(&self, p: [f64; 4]) -> Point {
        let mut out = [0.0; 3];
        for (r, value) in out.iter_mut().enumerate() {
            let row = &self.rows[r];
            *value = row[0] * p[0] + row[1] * p[1] + row[2] * p[2] + row[3] * p[3];
        }
        out
    }
}

/// `a * b` applies `b` first, then `a`.
impl std::ops::Mul for Transform {
    type Output = Transform;

    fn mul(self, other: Transform) -> Transform {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[r][k] * other.rows[k][c]).sum();
            }
        }
        Transform { rows }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
