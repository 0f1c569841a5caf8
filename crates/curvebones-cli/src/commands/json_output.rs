//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `build` and `rename` so scripts can
//! parse results without scraping colored text.

use curvebones_rig::{BatchReport, RigError};
use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// These codes are stable. Rig errors (`RIG_xxx`, `HOST_xxx`) pass through
/// unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error (scene or config)
    pub const JSON_PARSE: &str = "CLI_002";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_003";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_004";
    /// A named object is not in the scene
    pub const UNKNOWN_OBJECT: &str = "CLI_005";
    /// No skeletons to rename
    pub const NO_SKELETONS: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "RIG_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File involved (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Output of `curvebones build --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildOutput {
    /// Whether every selected curve produced a skeleton.
    pub success: bool,
    /// Errors that stopped the command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    /// Batch report, if the batch ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<BatchReport>,
    /// Path the updated scene was written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl BuildOutput {
    /// Creates a failed output carrying `errors`.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            report: None,
            output: None,
        }
    }
}

/// One skeleton processed by `curvebones rename`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenamedSkeleton {
    pub skeleton: String,
    /// `(old, new)` pairs, in bone order.
    pub renamed: Vec<(String, String)>,
}

/// Output of `curvebones rename --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameOutput {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skeletons: Vec<RenamedSkeleton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl RenameOutput {
    /// Creates a failed output carrying `errors`.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            skeletons: Vec::new(),
            output: None,
        }
    }
}

/// Converts an input error to a JSON error.
pub fn input_error_to_json(err: &InputError) -> JsonError {
    let code = match err {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::JsonParse { .. } => error_codes::JSON_PARSE,
        InputError::FileWrite { .. } => error_codes::FILE_WRITE,
        InputError::JsonSerialize { .. } => error_codes::JSON_SERIALIZE,
    };
    JsonError::new(code, err.to_string()).with_file(err.path().display().to_string())
}

/// Converts a rig error to a JSON error, keeping its code.
pub fn rig_error_to_json<E: RigError>(err: &E) -> JsonError {
    JsonError::new(err.code(), err.message())
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
