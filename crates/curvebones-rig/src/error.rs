//! Error types for curve extraction, chain building, and batch runs.

use thiserror::Error;

use crate::curve::SplineKind;

/// Result type for batch-level operations.
pub type RigResult<T> = Result<T, BatchError>;

/// Common trait for rig errors.
///
/// Every error reported by this crate carries a stable code (e.g. `RIG_002`)
/// so reports stay machine-readable, plus a category used for grouping.
pub trait RigError: std::error::Error {
    /// Get the error code for reporting.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category ("curve", "batch", "host").
    fn category(&self) -> &'static str;
}

/// Non-fatal problems with a single sub-curve or source curve.
///
/// None of these abort a batch: the offending sub-curve (or curve) is
/// skipped and recorded in the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The sub-curve has an unsupported representation or no points.
    #[error("spline {spline_index} ({kind}) has no usable control points")]
    EmptyCurve {
        spline_index: usize,
        kind: SplineKind,
    },

    /// The sub-curve has fewer than two points, so no bone can span it.
    #[error("spline {spline_index} has {point_count} point(s); at least 2 are needed for a bone")]
    DegenerateChain {
        spline_index: usize,
        point_count: usize,
    },

    /// Every sub-curve of a source curve was skipped.
    #[error("curve '{curve}' has no usable splines ({spline_count} skipped)")]
    NoUsableSubCurves { curve: String, spline_count: usize },
}

impl RigError for CurveError {
    fn code(&self) -> &'static str {
        match self {
            CurveError::EmptyCurve { .. } => "RIG_002",
            CurveError::DegenerateChain { .. } => "RIG_003",
            CurveError::NoUsableSubCurves { .. } => "RIG_004",
        }
    }

    fn category(&self) -> &'static str {
        "curve"
    }
}

/// Errors raised by a scene host while linking or selecting skeletons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The skeleton handed to the host contains two bones with the same name.
    #[error("skeleton '{skeleton}' contains duplicate bone name '{bone}'")]
    DuplicateBoneName { skeleton: String, bone: String },

    /// Another object in the scene already uses the skeleton's name.
    #[error("an object named '{0}' already exists")]
    DuplicateSkeletonName(String),

    /// A handle did not refer to any skeleton known to the host.
    #[error("unknown skeleton handle {0}")]
    UnknownSkeleton(usize),

    /// The host refused the skeleton for a host-specific reason.
    #[error("host rejected skeleton '{skeleton}': {reason}")]
    Rejected { skeleton: String, reason: String },
}

impl HostError {
    /// Creates a new rejection error.
    pub fn rejected(skeleton: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            skeleton: skeleton.into(),
            reason: reason.into(),
        }
    }
}

impl RigError for HostError {
    fn code(&self) -> &'static str {
        match self {
            HostError::DuplicateBoneName { .. } => "HOST_001",
            HostError::DuplicateSkeletonName(_) => "HOST_002",
            HostError::UnknownSkeleton(_) => "HOST_003",
            HostError::Rejected { .. } => "HOST_004",
        }
    }

    fn category(&self) -> &'static str {
        "host"
    }
}

/// Terminal errors for a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The batch was invoked with an empty curve list.
    #[error("no curve objects selected")]
    NoInputSelected,
}

impl RigError for BatchError {
    fn code(&self) -> &'static str {
        match self {
            BatchError::NoInputSelected => "RIG_001",
        }
    }

    fn category(&self) -> &'static str {
        "batch"
    }
}

/// Errors loading or saving a scene document.
#[derive(Debug, Error)]
pub enum SceneError {
    /// JSON parsing or serialization failed.
    #[error("scene JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::EmptyCurve {
            spline_index: 2,
            kind: SplineKind::Unsupported,
        };
        assert_eq!(
            err.to_string(),
            "spline 2 (unsupported) has no usable control points"
        );

        let err = CurveError::DegenerateChain {
            spline_index: 0,
            point_count: 1,
        };
        assert!(err.to_string().contains("1 point(s)"));

        let err = BatchError::NoInputSelected;
        assert_eq!(err.to_string(), "no curve objects selected");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(BatchError::NoInputSelected.code(), "RIG_001");
        assert_eq!(
            CurveError::EmptyCurve {
                spline_index: 0,
                kind: SplineKind::Bezier,
            }
            .code(),
            "RIG_002"
        );
        assert_eq!(
            CurveError::DegenerateChain {
                spline_index: 0,
                point_count: 0,
            }
            .code(),
            "RIG_003"
        );
        assert_eq!(
            CurveError::NoUsableSubCurves {
                curve: "Hair".to_string(),
                spline_count: 3,
            }
            .code(),
            "RIG_004"
        );
        assert_eq!(
            HostError::DuplicateSkeletonName("Hair_Armature".to_string()).code(),
            "HOST_002"
        );
        assert_eq!(HostError::UnknownSkeleton(7).code(), "HOST_003");
        assert_eq!(HostError::rejected("Hair", "locked").code(), "HOST_004");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(BatchError::NoInputSelected.category(), "batch");
        assert_eq!(HostError::UnknownSkeleton(0).category(), "host");
        assert_eq!(
            CurveError::DegenerateChain {
                spline_index: 0,
                point_count: 0,
            }
            .category(),
            "curve"
        );
    }
}
