//! Point extraction: spline control points to world-space positions.

use crate::curve::{Spline, SplineKind};
use crate::error::CurveError;
use crate::math::{Point, Transform};

/// Extracts the ordered world-space points of one spline.
///
/// Bezier splines yield their control points, poly and NURBS splines their
/// vertices. Authored order is preserved exactly; it encodes which end is the
/// root.
///
/// # Errors
///
/// Returns [`CurveError::EmptyCurve`] for an unsupported representation or a
/// spline with no points. The caller is expected to skip the spline.
pub fn extract_points(
    spline: &Spline,
    spline_index: usize,
    world: &Transform,
) -> Result<Vec<Point>, CurveError> {
    let points: Vec<Point> = match spline.kind {
        SplineKind::Bezier => spline
            .bezier_points
            .iter()
            .map(|p| world.transform_point(p.co))
            .collect(),
        SplineKind::Poly | SplineKind::Nurbs => spline
            .points
            .iter()
            .map(|p| world.transform_homogeneous(p.co))
            .collect(),
        SplineKind::Unsupported => Vec::new(),
    };

    if points.is_empty() {
        return Err(CurveError::EmptyCurve {
            spline_index,
            kind: spline.kind,
        });
    }

    Ok(points)
}
