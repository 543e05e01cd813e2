/// `GlyphData.xml` generation.
///
/// Glyphs reads custom glyph info from this file: one empty `glyph` element per
/// glyph, described by the internal DTD at the top of the document.
use quick_xml::events::{BytesStart, BytesText, Event};
use tracing::warn;

use super::errors::SmuflError;
use super::metadata::{GlyphEntry, Metadata, RangeIndex};
use super::xml;

/// File name Glyphs looks for in its `Info` directory.
pub const GLYPH_DATA_FILE: &str = "GlyphData.xml";

/// Category assigned to every SMuFL glyph.
pub const CATEGORY: &str = "SMuFL";

/// Script assigned to every SMuFL glyph.
const SCRIPT: &str = "musical";

/// GlyphData attributes, in DTD order, with whether each is required.
const ATTLIST: &[(&str, bool)] = &[
    ("unicode", false),
    // Spelled as in the GlyphData.xml files Glyphs ships.
    ("unicodeLegacy", false),
    ("name", true),
    ("sortName", false),
    ("sortNameKeep", false),
    ("category", true),
    ("subCategory", false),
    ("script", false),
    ("description", false),
    ("production", false),
    ("altNames", false),
    ("decompose", false),
    ("anchors", false),
    ("accents", false),
];

/// Render `GlyphData.xml` for every glyph in `metadata`.
///
/// Glyphs that no range lists get no `subCategory` attribute; they are
/// counted and reported as a warning.
///
/// # Errors
///
/// Returns `SmuflError::Xml` if the writer fails.
pub fn generate_glyph_data(metadata: &Metadata, index: &RangeIndex) -> Result<String, SmuflError> {
    let mut writer = xml::new_document()?;
    writer.write_event(Event::DocType(BytesText::from_escaped(doctype())))?;
    xml::start(&mut writer, "glyphData")?;

    let mut unmatched = 0usize;
    for entry in metadata.entries(index) {
        if entry.range_label.is_none() {
            unmatched += 1;
        }
        writer.write_event(Event::Empty(glyph_element(&entry)))?;
    }

    xml::end(&mut writer, "glyphData")?;

    if unmatched > 0 {
        warn!("{unmatched} glyph(s) are not listed in any range and have no subCategory");
    }
    Ok(xml::finish(writer))
}

fn doctype() -> String {
    let mut dtd = String::from("glyphData [\n  <!ELEMENT glyphData (glyph)+>\n  <!ELEMENT glyph EMPTY>\n");
    for (att, required) in ATTLIST {
        let default = if *required { "#REQUIRED" } else { "#IMPLIED" };
        dtd.push_str(&format!("  <!ATTLIST glyph {att} CDATA {default}>\n"));
    }
    dtd.push(']');
    dtd
}

fn glyph_element(entry: &GlyphEntry) -> BytesStart<'static> {
    let sort_name = format!("SMuFL.{}", entry.name);
    let description = entry.description.to_uppercase();
    let production = format!("uni{}", entry.codepoint_hex);

    let mut element = BytesStart::new("glyph");
    element.push_attribute(("name", entry.name.as_str()));
    element.push_attribute(("sortName", sort_name.as_str()));
    element.push_attribute(("description", description.as_str()));
    element.push_attribute(("category", CATEGORY));
    if let Some(label) = &entry.range_label {
        element.push_attribute(("subCategory", label.as_str()));
    }
    element.push_attribute(("unicode", entry.codepoint_hex.as_str()));
    element.push_attribute(("production", production.as_str()));
    element.push_attribute(("script", SCRIPT));
    element
}
