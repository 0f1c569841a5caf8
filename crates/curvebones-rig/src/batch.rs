//! Batch orchestration across source curves.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::assemble::{assemble_skeleton, skeleton_name};
use crate::chain::Direction;
use crate::curve::CurveObject;
use crate::error::{BatchError, CurveError, RigError, RigResult};
use crate::host::{SceneHost, SkeletonHandle};
use crate::options::BuildOptions;

/// A coded message attached to a curve report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportIssue {
    /// Stable error code (e.g. "RIG_003").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Spline index, for spline-level issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spline_index: Option<usize>,
}

impl ReportIssue {
    /// Creates an issue from any rig error.
    pub fn from_error<E: RigError>(err: &E) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message(),
            spline_index: None,
        }
    }

    fn from_curve_error(err: &CurveError) -> Self {
        let spline_index = match err {
            CurveError::EmptyCurve { spline_index, .. }
            | CurveError::DegenerateChain { spline_index, .. } => Some(*spline_index),
            CurveError::NoUsableSubCurves { .. } => None,
        };
        Self {
            spline_index,
            ..Self::from_error(err)
        }
    }
}

/// Outcome for one source curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveReport {
    /// Source curve name.
    pub curve: String,
    /// Whether a skeleton was created.
    pub ok: bool,
    /// Name of the created skeleton.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<String>,
    /// Number of chains built.
    pub chain_count: usize,
    /// Number of bones built.
    pub bone_count: usize,
    /// Splines that were skipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<ReportIssue>,
    /// Why no skeleton was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportIssue>,
}

/// Summary of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// True if every curve produced a skeleton.
    pub ok: bool,
    /// Direction used for every chain.
    pub direction: Direction,
    /// Number of skeletons created.
    pub skeletons_created: usize,
    /// Per-curve outcomes in input order.
    pub curves: Vec<CurveReport>,
}

impl BatchReport {
    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Curves that did not produce a skeleton.
    pub fn failures(&self) -> impl Iterator<Item = &CurveReport> {
        self.curves.iter().filter(|c| !c.ok)
    }
}

/// Skeletons linked by a batch run, plus the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Handles of the created skeletons, in input order.
    pub handles: Vec<SkeletonHandle>,
    pub report: BatchReport,
}

/// Builds one skeleton per curve and links it into `host`.
///
/// The host selection is cleared first; afterwards every new skeleton is
/// selected and the first becomes active. Curves are processed strictly in
/// order. A curve without usable splines, or one the host refuses, is
/// reported and skipped; the batch carries on.
///
/// # Errors
///
/// Returns [`BatchError::NoInputSelected`] for an empty curve list, before
/// touching the host.
pub fn run_batch<H, C>(host: &mut H, curves: &[C], options: &BuildOptions) -> RigResult<BatchOutcome>
where
    H: SceneHost + ?Sized,
    C: CurveObject,
{
    if curves.is_empty() {
        return Err(BatchError::NoInputSelected);
    }

    host.clear_selection();

    let mut handles = Vec::new();
    let mut reports = Vec::with_capacity(curves.len());

    for curve in curves {
        let name = host.unique_skeleton_name(&skeleton_name(curve.name()));
        let assembly = assemble_skeleton(curve, &name, options);
        let skipped: Vec<ReportIssue> = assembly
            .skipped
            .iter()
            .map(ReportIssue::from_curve_error)
            .collect();

        if !assembly.is_usable() {
            let err = CurveError::NoUsableSubCurves {
                curve: curve.name().to_string(),
                spline_count: curve.splines().len(),
            };
            warn!("{}", err);
            reports.push(CurveReport {
                curve: curve.name().to_string(),
                ok: false,
                skeleton: None,
                chain_count: 0,
                bone_count: 0,
                skipped,
                error: Some(ReportIssue::from_curve_error(&err)),
            });
            continue;
        }

        let chain_count = assembly.skeleton.chain_count();
        let bone_count = assembly.skeleton.bone_count();

        match host.link_skeleton(assembly.skeleton) {
            Ok(handle) => {
                info!(
                    "Created skeleton {} for {} ({} chain(s), {} bone(s))",
                    name,
                    curve.name(),
                    chain_count,
                    bone_count
                );
                handles.push(handle);
                reports.push(CurveReport {
                    curve: curve.name().to_string(),
                    ok: true,
                    skeleton: Some(name),
                    chain_count,
                    bone_count,
                    skipped,
                    error: None,
                });
            }
            Err(err) => {
                warn!("{}: {}", curve.name(), err);
                reports.push(CurveReport {
                    curve: curve.name().to_string(),
                    ok: false,
                    skeleton: None,
                    chain_count,
                    bone_count,
                    skipped,
                    error: Some(ReportIssue::from_error(&err)),
                });
            }
        }
    }

    for &handle in &handles {
        if let Err(err) = host.select(handle) {
            warn!("could not select skeleton: {}", err);
        }
    }
    if let Some(&first) = handles.first() {
        if let Err(err) = host.set_active(first) {
            warn!("could not activate skeleton: {}", err);
        }
    }

    let report = BatchReport {
        ok: reports.iter().all(|r| r.ok),
        direction: options.direction(),
        skeletons_created: handles.len(),
        curves: reports,
    };

    Ok(BatchOutcome { handles, report })
}
