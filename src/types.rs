/// Shared serializable output types.
///
/// The install summary serializes `install::InstallReport` directly; these
/// cover the rest of what gets written as JSON.
use serde::{Deserialize, Serialize};

use crate::smufl::SmuflError;

/// One generated file, as reported by `build`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOutput {
    /// File name, e.g. "GlyphData.xml".
    pub file_name: String,
    /// Full path the file was written to.
    pub path: String,
    /// Size in bytes.
    pub bytes: usize,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Process exit code.
    pub exit_code: i32,
}

impl ErrorOutput {
    /// Construct from a `SmuflError`.
    #[must_use]
    pub fn from_error(err: &SmuflError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                exit_code: err.exit_code(),
            },
        }
    }
}
