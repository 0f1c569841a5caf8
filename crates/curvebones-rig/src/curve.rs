//! Source curve types and the capability trait the rig reads curves through.

use serde::{Deserialize, Serialize};

use crate::math::{Point, Transform};

/// Control representation of a spline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplineKind {
    /// Smooth-interpolated spline read from its bezier control points.
    Bezier,
    /// Piecewise-linear spline read from its vertices.
    Poly,
    /// NURBS spline read from its weighted control vertices.
    Nurbs,
    /// Any representation the rig cannot read.
    #[serde(other)]
    Unsupported,
}

impl SplineKind {
    /// Returns the kind as its serialized string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SplineKind::Bezier => "bezier",
            SplineKind::Poly => "poly",
            SplineKind::Nurbs => "nurbs",
            SplineKind::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for SplineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bezier control point. Handles are carried through but never sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    /// Control point position [X, Y, Z] in curve space.
    pub co: Point,
    /// Left handle position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle_left: Option<Point>,
    /// Right handle position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle_right: Option<Point>,
}

impl BezierPoint {
    /// Creates a control point without handles.
    pub fn new(co: Point) -> Self {
        Self {
            co,
            handle_left: None,
            handle_right: None,
        }
    }
}

/// A poly or NURBS vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplinePoint {
    /// Homogeneous position [X, Y, Z, W] in curve space; W is the NURBS weight.
    pub co: [f64; 4],
}

impl SplinePoint {
    /// Creates an unweighted vertex (`w = 1`).
    pub fn new(co: Point) -> Self {
        Self {
            co: [co[0], co[1], co[2], 1.0],
        }
    }

    /// Creates a weighted vertex.
    pub fn weighted(co: Point, w: f64) -> Self {
        Self {
            co: [co[0], co[1], co[2], w],
        }
    }
}

/// One continuous strand of a source curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    /// Control representation.
    #[serde(rename = "type")]
    pub kind: SplineKind,
    /// Bezier control points (read when `kind` is bezier).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bezier_points: Vec<BezierPoint>,
    /// Vertices (read when `kind` is poly or nurbs).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<SplinePoint>,
}

impl Spline {
    /// Creates a poly spline from curve-space positions.
    pub fn poly(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            kind: SplineKind::Poly,
            bezier_points: Vec::new(),
            points: points.into_iter().map(SplinePoint::new).collect(),
        }
    }

    /// Creates a NURBS spline from weighted vertices.
    pub fn nurbs(points: impl IntoIterator<Item = SplinePoint>) -> Self {
        Self {
            kind: SplineKind::Nurbs,
            bezier_points: Vec::new(),
            points: points.into_iter().collect(),
        }
    }

    /// Creates a bezier spline from control point positions.
    pub fn bezier(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            kind: SplineKind::Bezier,
            bezier_points: points.into_iter().map(BezierPoint::new).collect(),
            points: Vec::new(),
        }
    }

    /// Number of points in the representation selected by `kind`.
    pub fn point_count(&self) -> usize {
        match self.kind {
            SplineKind::Bezier => self.bezier_points.len(),
            SplineKind::Poly | SplineKind::Nurbs => self.points.len(),
            SplineKind::Unsupported => 0,
        }
    }
}

/// Read access to a source curve object owned by the host.
///
/// This is all the rig needs from a host curve: a name for the skeleton, the
/// world matrix, and the splines with their curve-space points.
pub trait CurveObject {
    /// Object name; the skeleton is named after it.
    fn name(&self) -> &str;

    /// Object-to-world transform.
    fn world_transform(&self) -> Transform;

    /// Splines in authored order.
    fn splines(&self) -> &[Spline];
}

impl<T: CurveObject + ?Sized> CurveObject for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn world_transform(&self) -> Transform {
        (**self).world_transform()
    }

    fn splines(&self) -> &[Spline] {
        (**self).splines()
    }
}
