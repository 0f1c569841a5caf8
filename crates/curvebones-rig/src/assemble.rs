//! Skeleton assembly: every spline of one curve into one skeleton.

use log::{debug, info, warn};

use crate::chain::{build_chain, Direction};
use crate::curve::{CurveObject, Spline};
use crate::error::CurveError;
use crate::extract::extract_points;
use crate::math::Transform;
use crate::options::BuildOptions;
use crate::skeleton::Skeleton;

/// Default skeleton name for a curve.
pub fn skeleton_name(curve_name: &str) -> String {
    format!("{}_Armature", curve_name)
}

/// Result of assembling one curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// The finished skeleton (possibly without chains).
    pub skeleton: Skeleton,
    /// Splines that were skipped, with the reason.
    pub skipped: Vec<CurveError>,
}

impl Assembly {
    /// True if at least one chain was built.
    pub fn is_usable(&self) -> bool {
        self.skeleton.chain_count() > 0
    }
}

/// Private build state for one skeleton.
///
/// Bones are only reachable through [`EditSession::commit`], so nothing
/// outside the session observes a partially built skeleton.
pub struct EditSession<'a> {
    skeleton: Skeleton,
    world: Transform,
    direction: Direction,
    options: &'a BuildOptions,
    skipped: Vec<CurveError>,
}

impl<'a> EditSession<'a> {
    /// Opens a session for a skeleton named `name`, building in the frame
    /// given by `world`.
    pub fn begin(name: impl Into<String>, world: Transform, options: &'a BuildOptions) -> Self {
        Self {
            skeleton: Skeleton::new(name),
            world,
            direction: options.direction(),
            options,
            skipped: Vec::new(),
        }
    }

    /// Extracts one spline and appends its chain, or records why it was skipped.
    pub fn add_spline(&mut self, spline_index: usize, spline: &Spline) {
        let points = match extract_points(spline, spline_index, &self.world) {
            Ok(points) => points,
            Err(err) => {
                warn!("{}: skipping {}", self.skeleton.name(), err);
                self.skipped.push(err);
                return;
            }
        };

        if points.len() < 2 {
            let err = CurveError::DegenerateChain {
                spline_index,
                point_count: points.len(),
            };
            warn!("{}: skipping {}", self.skeleton.name(), err);
            self.skipped.push(err);
            return;
        }

        let chain = build_chain(&points, self.direction, &self.options.bone_prefix);
        let span = self.skeleton.add_chain(spline_index, chain);
        debug!(
            "{}: spline {} -> {} bone(s) ({})",
            self.skeleton.name(),
            spline_index,
            span.len,
            self.direction.as_str()
        );
    }

    /// Closes the session and hands out the finished skeleton.
    pub fn commit(mut self) -> Assembly {
        if self.options.qualify_names {
            for (old, new) in self.skeleton.qualify_bone_names() {
                info!("Renaming '{}' to '{}'", old, new);
            }
        }

        Assembly {
            skeleton: self.skeleton,
            skipped: self.skipped,
        }
    }
}

/// Builds the skeleton for `curve` under the name `name`.
///
/// Every spline is processed independently; defective splines are skipped
/// and listed in [`Assembly::skipped`].
pub fn assemble_skeleton<C: CurveObject + ?Sized>(
    curve: &C,
    name: &str,
    options: &BuildOptions,
) -> Assembly {
    let mut session = EditSession::begin(name, curve.world_transform(), options);
    for (index, spline) in curve.splines().iter().enumerate() {
        session.add_spline(index, spline);
    }
    session.commit()
}
