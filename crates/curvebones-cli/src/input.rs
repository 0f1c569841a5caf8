//! Scene and config file I/O for the CLI.

use std::path::{Path, PathBuf};

use curvebones_rig::{SceneDocument, SceneError};
use thiserror::Error;

/// Errors that can occur while reading or writing CLI input files.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read a file.
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid scene or config document.
    #[error("invalid JSON in '{path}': {message}")]
    JsonParse { path: PathBuf, message: String },

    /// Failed to write a file.
    #[error("failed to write '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a document.
    #[error("failed to serialize '{path}': {message}")]
    JsonSerialize { path: PathBuf, message: String },
}

impl InputError {
    /// Path of the file involved.
    pub fn path(&self) -> &Path {
        match self {
            InputError::FileRead { path, .. }
            | InputError::JsonParse { path, .. }
            | InputError::FileWrite { path, .. }
            | InputError::JsonSerialize { path, .. } => path,
        }
    }
}

/// Loads a scene document from `path`.
pub fn load_scene(path: &Path) -> Result<SceneDocument, InputError> {
    SceneDocument::load(path).map_err(|e| match e {
        SceneError::Io(source) => InputError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        SceneError::Json(err) => InputError::JsonParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    })
}

/// Writes a scene document to `path`.
pub fn save_scene(scene: &SceneDocument, path: &Path) -> Result<(), InputError> {
    scene.save(path).map_err(|e| match e {
        SceneError::Io(source) => InputError::FileWrite {
            path: path.to_path_buf(),
            source,
        },
        SceneError::Json(err) => InputError::JsonSerialize {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    })
}
