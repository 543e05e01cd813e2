/// Errors from loading, generating, and installing the SMuFL artifacts.
use std::path::PathBuf;

use thiserror::Error;

use crate::install::InstallError;

/// Errors that can abort a `smufl-glyphs` run.
#[derive(Debug, Error)]
pub enum SmuflError {
    /// The host OS is not the one Glyphs runs on.
    #[error("This tool is designed for use on macOS only")]
    UnsupportedPlatform,

    /// The user's home directory could not be determined.
    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    /// The metadata server answered with a non-success status.
    #[error("Failed to fetch {resource}: HTTP {status}")]
    Fetch {
        /// URL of the failing resource.
        resource: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Failed to fetch {resource}: {source}")]
    Network {
        /// URL of the failing resource.
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    /// A metadata resource was not valid SMuFL JSON.
    #[error("Failed to parse {resource}: {source}")]
    Parse {
        /// Name of the resource being parsed.
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing one of the XML documents failed.
    #[error("Failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Reading metadata or writing generated files failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path the operation was working on.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The installer aborted.
    #[error(transparent)]
    Install(#[from] InstallError),
}

impl SmuflError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedPlatform | Self::NoHomeDirectory => 1,
            Self::Fetch { .. } | Self::Network { .. } | Self::Parse { .. } => 2,
            Self::Xml(_) | Self::Io { .. } => 3,
            Self::Install(err) => match err {
                InstallError::Io { .. } => 3,
                InstallError::Prompt(_) => 4,
            },
        }
    }

    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedPlatform => "unsupported_platform",
            Self::NoHomeDirectory => "no_home_directory",
            Self::Fetch { .. } => "fetch_failed",
            Self::Network { .. } => "network_error",
            Self::Parse { .. } => "parse_error",
            Self::Xml(_) => "xml_error",
            Self::Io { .. } => "io_error",
            Self::Install(InstallError::Io { .. }) => "install_failed",
            Self::Install(InstallError::Prompt(_)) => "prompt_failed",
        }
    }
}
