/// Host platform checks and the Glyphs support directory.
use std::path::PathBuf;

use crate::smufl::SmuflError;

/// Glyphs' custom info directory, relative to the home directory.
pub const GLYPHS_INFO_DIR: &str = "Library/Application Support/Glyphs/Info";

/// Refuse to install anywhere but macOS.
///
/// # Errors
///
/// Returns `SmuflError::UnsupportedPlatform` on any other OS.
pub fn ensure_supported() -> Result<(), SmuflError> {
    if cfg!(target_os = "macos") {
        Ok(())
    } else {
        Err(SmuflError::UnsupportedPlatform)
    }
}

/// `~/Library/Application Support/Glyphs/Info`.
///
/// # Errors
///
/// Returns `SmuflError::NoHomeDirectory` if the home directory is unknown.
pub fn glyphs_info_dir() -> Result<PathBuf, SmuflError> {
    dirs::home_dir()
        .map(|home| home.join(GLYPHS_INFO_DIR))
        .ok_or(SmuflError::NoHomeDirectory)
}

/// Shown under the platform error.
#[must_use]
pub fn support_instructions() -> &'static str {
    "        Running on macOS and seeing this error?\n        \
     Please open an issue at https://github.com/delucis/smufl-glyphs-info"
}
