/// Errors from the installer.
use std::path::PathBuf;

use thiserror::Error;

/// Fatal installer failures. Copies completed before the failure are kept.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Unexpected filesystem error on `path`.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The prompt session could not be read or written.
    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}
