/// Where SMuFL metadata comes from: the published specification or a local copy.
use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use super::errors::SmuflError;
use super::metadata::{GLYPHNAMES_RESOURCE, Metadata, RANGES_RESOURCE};

/// Published SMuFL metadata directory.
pub const DEFAULT_METADATA_URL: &str =
    "https://raw.githubusercontent.com/w3c/smufl/gh-pages/metadata";

/// Default timeout for metadata requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A provider of named metadata resources such as `ranges.json`.
pub trait MetadataSource {
    /// Load the full text of `resource`.
    ///
    /// # Errors
    ///
    /// Returns `SmuflError` naming the resource when it cannot be loaded.
    fn load(&self, resource: &str) -> Result<String, SmuflError>;
}

/// Fetches resources over HTTPS. No retries, no caching.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `SmuflError::Network` if the HTTP client cannot be initialised.
    pub fn new(base_url: &str) -> Result<Self, SmuflError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SmuflError::Network {
                resource: base_url.to_owned(),
                source,
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url_for(&self, resource: &str) -> String {
        format!("{}/{resource}", self.base_url)
    }
}

impl MetadataSource for HttpSource {
    fn load(&self, resource: &str) -> Result<String, SmuflError> {
        let url = self.url_for(resource);
        debug!("Fetching {url}");

        let network = |source| SmuflError::Network {
            resource: url.clone(),
            source,
        };
        let response = self.client.get(&url).send().map_err(network)?;
        ensure_success(&url, response.status())?;
        response.text().map_err(network)
    }
}

/// Reject any non-2xx status, naming the resource.
///
/// # Errors
///
/// Returns `SmuflError::Fetch` for every status outside `200..=299`.
pub fn ensure_success(resource: &str, status: StatusCode) -> Result<(), SmuflError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(SmuflError::Fetch {
            resource: resource.to_owned(),
            status: status.as_u16(),
        })
    }
}

/// Reads resources from a local directory, e.g. a checkout of the SMuFL repo.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MetadataSource for DirSource {
    fn load(&self, resource: &str) -> Result<String, SmuflError> {
        let path = self.dir.join(resource);
        debug!("Reading {}", path.display());
        std::fs::read_to_string(&path).map_err(|source| SmuflError::Io { path, source })
    }
}

/// Load and parse both metadata resources.
///
/// Nothing is returned unless both resources load and parse.
///
/// # Errors
///
/// Propagates the first load or parse failure.
pub fn load_metadata(source: &dyn MetadataSource) -> Result<Metadata, SmuflError> {
    let glyphnames = source.load(GLYPHNAMES_RESOURCE)?;
    let ranges = source.load(RANGES_RESOURCE)?;
    Metadata::from_json(&glyphnames, &ranges)
}
