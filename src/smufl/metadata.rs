/// SMuFL metadata model: glyph names, ranges, and the glyph → range index.
///
/// The raw JSON shapes mirror `glyphnames.json` and `ranges.json` from the
/// SMuFL distribution. Both files are keyed objects whose key order is
/// meaningful for the generated documents, so they are parsed into
/// [`IndexMap`]s.
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;

use super::errors::SmuflError;

/// Resource name of the glyph-name table.
pub const GLYPHNAMES_RESOURCE: &str = "glyphnames.json";
/// Resource name of the range table.
pub const RANGES_RESOURCE: &str = "ranges.json";

/// One entry of `glyphnames.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGlyph {
    /// Codepoint in `U+XXXX` notation.
    pub codepoint: String,
    /// Human-readable description.
    pub description: String,
}

/// One entry of `ranges.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRange {
    /// Human-readable range name, e.g. "Clefs".
    pub description: String,
    /// Names of the glyphs in this range, in specification order.
    pub glyphs: Vec<String>,
}

/// A named grouping of glyphs. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeGroup {
    pub label: String,
    pub members: Vec<String>,
}

/// A glyph with its range label resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    pub name: String,
    /// Codepoint without the `U+` prefix, e.g. `E050`.
    pub codepoint_hex: String,
    pub description: String,
    /// `None` when no range lists this glyph.
    pub range_label: Option<String>,
}

/// Glyph name → range label lookup, built once from the range table.
#[derive(Debug, Clone, Default)]
pub struct RangeIndex {
    labels: HashMap<String, String>,
}

impl RangeIndex {
    /// Flatten every range's membership list into one lookup.
    ///
    /// A glyph listed in several ranges maps to the last one visited.
    #[must_use]
    pub fn build<'a>(ranges: impl IntoIterator<Item = &'a RangeGroup>) -> Self {
        let mut labels = HashMap::new();
        for range in ranges {
            for glyph in &range.members {
                labels.insert(glyph.clone(), range.label.clone());
            }
        }
        Self { labels }
    }

    /// Range label for `glyph`, if any range lists it.
    #[must_use]
    pub fn label(&self, glyph: &str) -> Option<&str> {
        self.labels.get(glyph).map(String::as_str)
    }
}

/// Parsed SMuFL metadata, in specification order.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub glyphs: IndexMap<String, RawGlyph>,
    pub ranges: IndexMap<String, RangeGroup>,
}

impl Metadata {
    /// Parse the two JSON documents.
    ///
    /// # Errors
    ///
    /// Returns `SmuflError::Parse` naming whichever resource is malformed.
    pub fn from_json(glyphnames: &str, ranges: &str) -> Result<Self, SmuflError> {
        let glyphs: IndexMap<String, RawGlyph> =
            serde_json::from_str(glyphnames).map_err(|source| SmuflError::Parse {
                resource: GLYPHNAMES_RESOURCE.to_owned(),
                source,
            })?;
        let raw_ranges: IndexMap<String, RawRange> =
            serde_json::from_str(ranges).map_err(|source| SmuflError::Parse {
                resource: RANGES_RESOURCE.to_owned(),
                source,
            })?;

        let ranges = raw_ranges
            .into_iter()
            .map(|(key, range)| {
                (
                    key,
                    RangeGroup {
                        label: range.description,
                        members: range.glyphs,
                    },
                )
            })
            .collect();

        Ok(Self { glyphs, ranges })
    }

    /// Build the glyph → range lookup for these ranges.
    #[must_use]
    pub fn range_index(&self) -> RangeIndex {
        RangeIndex::build(self.ranges.values())
    }

    /// Resolve every glyph against `index`, in specification order.
    pub fn entries<'a>(&'a self, index: &'a RangeIndex) -> impl Iterator<Item = GlyphEntry> + 'a {
        self.glyphs.iter().map(move |(name, raw)| GlyphEntry {
            name: name.clone(),
            codepoint_hex: strip_codepoint_prefix(&raw.codepoint).to_owned(),
            description: raw.description.clone(),
            range_label: index.label(name).map(str::to_owned),
        })
    }
}

/// `U+E050` → `E050`. Values without the prefix pass through unchanged.
#[must_use]
pub fn strip_codepoint_prefix(codepoint: &str) -> &str {
    codepoint.strip_prefix("U+").unwrap_or(codepoint)
}
