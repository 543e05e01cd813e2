/// SMuFL domain layer: metadata loading and document generation.
pub mod errors;
pub mod glyph_data;
pub mod groups;
pub mod metadata;
pub mod source;
mod xml;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use errors::SmuflError;
pub use glyph_data::{GLYPH_DATA_FILE, generate_glyph_data};
pub use groups::{GROUPS_FILE, generate_groups};
pub use metadata::Metadata;
pub use source::{DEFAULT_METADATA_URL, DirSource, HttpSource, MetadataSource, load_metadata};

/// A rendered artifact and the file name it is installed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub file_name: &'static str,
    pub contents: String,
}

/// Render both artifacts from already-loaded metadata.
///
/// # Errors
///
/// Returns `SmuflError::Xml` if either writer fails.
pub fn generate_documents(metadata: &Metadata) -> Result<Vec<GeneratedDocument>, SmuflError> {
    let index = metadata.range_index();
    Ok(vec![
        GeneratedDocument {
            file_name: GLYPH_DATA_FILE,
            contents: generate_glyph_data(metadata, &index)?,
        },
        GeneratedDocument {
            file_name: GROUPS_FILE,
            contents: generate_groups(&metadata.ranges)?,
        },
    ])
}

/// Load metadata from `source` and render both artifacts, entirely in memory.
///
/// # Errors
///
/// Propagates fetch, parse, and writer failures. Nothing touches the disk
/// before both resources have loaded.
pub fn build_documents(source: &dyn MetadataSource) -> Result<Vec<GeneratedDocument>, SmuflError> {
    let metadata = load_metadata(source)?;
    debug!(
        "Loaded {} glyphs in {} ranges",
        metadata.glyphs.len(),
        metadata.ranges.len()
    );
    generate_documents(&metadata)
}

/// Write `documents` into `dir`, returning the written paths in order.
///
/// # Errors
///
/// Returns `SmuflError::Io` for the first file that cannot be written.
pub fn write_documents(documents: &[GeneratedDocument], dir: &Path) -> Result<Vec<PathBuf>, SmuflError> {
    documents
        .iter()
        .map(|doc| {
            let path = dir.join(doc.file_name);
            fs::write(&path, &doc.contents).map_err(|source| SmuflError::Io {
                path: path.clone(),
                source,
            })?;
            debug!("Wrote {}", path.display());
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLYPHNAMES: &str = r#"{"gClef": {"codepoint": "U+E050", "description": "G clef"}}"#;
    const RANGES: &str = r#"{"clefs": {"description": "Clefs", "glyphs": ["gClef"]}}"#;

    /// Serves fixed resources; any other resource fails like a 404.
    struct StubSource {
        glyphnames: Option<&'static str>,
        ranges: Option<&'static str>,
    }

    impl MetadataSource for StubSource {
        fn load(&self, resource: &str) -> Result<String, SmuflError> {
            let body = match resource {
                metadata::GLYPHNAMES_RESOURCE => self.glyphnames,
                metadata::RANGES_RESOURCE => self.ranges,
                _ => None,
            };
            body.map(str::to_owned).ok_or_else(|| SmuflError::Fetch {
                resource: format!("https://stub/{resource}"),
                status: 404,
            })
        }
    }

    #[test]
    fn test_build_and_write_documents() {
        let source = StubSource {
            glyphnames: Some(GLYPHNAMES),
            ranges: Some(RANGES),
        };
        let docs = build_documents(&source).unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.file_name).collect();
        assert_eq!(names, [GLYPH_DATA_FILE, GROUPS_FILE]);

        let dir = tempfile::tempdir().unwrap();
        let paths = write_documents(&docs, dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), docs[0].contents);
    }

    #[test]
    fn test_failed_fetch_aborts_before_writing() {
        let source = StubSource {
            glyphnames: Some(GLYPHNAMES),
            ranges: None,
        };
        let dir = tempfile::tempdir().unwrap();

        let result = build_documents(&source).and_then(|docs| write_documents(&docs, dir.path()));

        assert!(matches!(result, Err(SmuflError::Fetch { status: 404, .. })));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
