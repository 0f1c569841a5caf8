//! Build option resolution: config file first, then command-line overrides.

use std::path::Path;

use curvebones_rig::BuildOptions;

use crate::input::InputError;

/// Command-line flags that override the config file.
///
/// Boolean flags can only switch a setting on; leaving a flag off keeps the
/// config file's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    pub reverse: bool,
    pub prefix: Option<String>,
    pub qualify_names: bool,
}

impl OptionOverrides {
    /// Applies the overrides on top of `options`.
    pub fn apply(&self, options: BuildOptions) -> BuildOptions {
        let mut options = options;
        if self.reverse {
            options = options.reverse(true);
        }
        if let Some(prefix) = &self.prefix {
            options = options.bone_prefix(prefix.clone());
        }
        if self.qualify_names {
            options = options.qualify_names(true);
        }
        options
    }
}

/// Reads build options from a JSON config file.
pub fn load_options(path: &Path) -> Result<BuildOptions, InputError> {
    let json = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolves the options for one run.
pub fn resolve_options(
    config: Option<&Path>,
    overrides: &OptionOverrides,
) -> Result<BuildOptions, InputError> {
    let base = match config {
        Some(path) => load_options(path)?,
        None => BuildOptions::default(),
    };
    Ok(overrides.apply(base))
}
