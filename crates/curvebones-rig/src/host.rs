//! Scene host capability trait.

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::skeleton::Skeleton;

/// Opaque reference to a skeleton linked into a host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkeletonHandle(pub usize);

/// The mutations the rig performs on a host scene.
///
/// Skeletons are only handed over once fully built, so a host never sees a
/// half-assembled bone set. Calls arrive strictly one curve at a time.
pub trait SceneHost {
    /// Returns `base` or, if another object already uses it, a free variant.
    fn unique_skeleton_name(&self, base: &str) -> String;

    /// Adds a finished skeleton to the scene.
    fn link_skeleton(&mut self, skeleton: Skeleton) -> Result<SkeletonHandle, HostError>;

    /// Looks up a linked skeleton.
    fn skeleton(&self, handle: SkeletonHandle) -> Option<&Skeleton>;

    /// Deselects everything and clears the active object.
    fn clear_selection(&mut self);

    /// Adds a skeleton to the selection.
    fn select(&mut self, handle: SkeletonHandle) -> Result<(), HostError>;

    /// Makes a skeleton the active object.
    fn set_active(&mut self, handle: SkeletonHandle) -> Result<(), HostError>;
}
