//! Build options applied uniformly to every curve in a run.

use serde::{Deserialize, Serialize};

use crate::chain::{Direction, DEFAULT_BONE_PREFIX};

/// Options for a build run.
///
/// All fields have defaults, so a partial JSON config is valid:
///
/// ```
/// use curvebones_rig::BuildOptions;
///
/// let options: BuildOptions = serde_json::from_str(r#"{ "reverse_direction": true }"#).unwrap();
/// assert!(options.reverse_direction);
/// assert_eq!(options.bone_prefix, "HairBone");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildOptions {
    /// Root each chain at the last authored point instead of the first.
    #[serde(default)]
    pub reverse_direction: bool,
    /// Prefix for chain bone names (`<prefix>_<index>`).
    #[serde(default = "default_bone_prefix")]
    pub bone_prefix: String,
    /// Prefix every bone with its skeleton name after building.
    #[serde(default)]
    pub qualify_names: bool,
}

fn default_bone_prefix() -> String {
    DEFAULT_BONE_PREFIX.to_string()
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            reverse_direction: false,
            bone_prefix: default_bone_prefix(),
            qualify_names: false,
        }
    }
}

impl BuildOptions {
    /// Direction implied by `reverse_direction`.
    pub fn direction(&self) -> Direction {
        Direction::from_reverse(self.reverse_direction)
    }

    /// Sets `reverse_direction`.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse_direction = reverse;
        self
    }

    /// Sets the bone name prefix.
    pub fn bone_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bone_prefix = prefix.into();
        self
    }

    /// Sets `qualify_names`.
    pub fn qualify_names(mut self, qualify: bool) -> Self {
        self.qualify_names = qualify;
        self
    }
}
