/// `Groups.plist` generation: the SMuFL category for the Glyphs sidebar.
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, BytesText, Event};

use super::errors::SmuflError;
use super::glyph_data::CATEGORY;
use super::metadata::RangeGroup;
use super::xml::{self, XmlWriter};

/// File name Glyphs looks for in its `Info` directory.
pub const GROUPS_FILE: &str = "Groups.plist";

/// Sidebar icon shown next to the SMuFL category.
const ICON: &str = "MusicTemplate";

const PLIST_DOCTYPE: &str =
    r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Render `Groups.plist`: one `SMuFL` category with one subgroup per range.
///
/// Subgroups follow the range table's order and each `coverage` array keeps
/// the range's own glyph order.
///
/// # Errors
///
/// Returns `SmuflError::Xml` if the writer fails.
pub fn generate_groups(ranges: &IndexMap<String, RangeGroup>) -> Result<String, SmuflError> {
    let mut w = xml::new_document()?;
    w.write_event(Event::DocType(BytesText::from_escaped(PLIST_DOCTYPE)))?;

    let mut root = BytesStart::new("plist");
    root.push_attribute(("version", "1.0"));
    w.write_event(Event::Start(root))?;
    xml::start(&mut w, "dict")?;

    xml::text_element(&mut w, "key", "categories")?;
    xml::start(&mut w, "array")?;
    xml::start(&mut w, "dict")?;
    xml::text_element(&mut w, "key", "name")?;
    xml::text_element(&mut w, "string", CATEGORY)?;
    xml::text_element(&mut w, "key", "icon")?;
    xml::text_element(&mut w, "string", ICON)?;
    xml::text_element(&mut w, "key", "subGroup")?;
    xml::start(&mut w, "array")?;
    for range in ranges.values() {
        write_sub_group(&mut w, range)?;
    }
    xml::end(&mut w, "array")?;
    xml::end(&mut w, "dict")?;
    xml::end(&mut w, "array")?;

    xml::end(&mut w, "dict")?;
    xml::end(&mut w, "plist")?;
    Ok(xml::finish(w))
}

fn write_sub_group(w: &mut XmlWriter, range: &RangeGroup) -> quick_xml::Result<()> {
    xml::start(w, "dict")?;
    xml::text_element(w, "key", "name")?;
    xml::text_element(w, "string", &range.label)?;
    xml::text_element(w, "key", "coverage")?;
    if range.members.is_empty() {
        w.write_event(Event::Empty(BytesStart::new("array")))?;
    } else {
        xml::start(w, "array")?;
        for glyph in &range.members {
            xml::text_element(w, "string", glyph)?;
        }
        xml::end(w, "array")?;
    }
    xml::end(w, "dict")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use plist::Value;

    use super::*;

    fn ranges() -> IndexMap<String, RangeGroup> {
        let mut ranges = IndexMap::new();
        ranges.insert(
            "clefs".to_owned(),
            RangeGroup {
                label: "Clefs".to_owned(),
                members: vec!["gClef".to_owned(), "cClef".to_owned(), "fClef".to_owned()],
            },
        );
        ranges.insert(
            "noteheads".to_owned(),
            RangeGroup {
                label: "Noteheads".to_owned(),
                members: vec!["noteheadBlack".to_owned(), "noteheadHalf".to_owned()],
            },
        );
        ranges.insert(
            "reserved".to_owned(),
            RangeGroup {
                label: "Reserved & unused".to_owned(),
                members: Vec::new(),
            },
        );
        ranges
    }

    fn entry<'a>(value: &'a Value, key: &str) -> &'a Value {
        value.as_dictionary().and_then(|dict| dict.get(key)).unwrap()
    }

    #[test]
    fn test_every_range_member_appears_once_in_order() {
        let ranges = ranges();
        let doc = generate_groups(&ranges).unwrap();
        let root = Value::from_reader_xml(doc.as_bytes()).unwrap();

        let categories = entry(&root, "categories").as_array().unwrap();
        assert_eq!(categories.len(), 1);
        let smufl = &categories[0];
        assert_eq!(entry(smufl, "name").as_string(), Some("SMuFL"));
        assert_eq!(entry(smufl, "icon").as_string(), Some("MusicTemplate"));

        let sub_groups = entry(smufl, "subGroup").as_array().unwrap();
        assert_eq!(sub_groups.len(), ranges.len());
        for (group, range) in sub_groups.iter().zip(ranges.values()) {
            assert_eq!(entry(group, "name").as_string(), Some(range.label.as_str()));
            let coverage: Vec<&str> = entry(group, "coverage")
                .as_array()
                .unwrap()
                .iter()
                .map(|glyph| glyph.as_string().unwrap())
                .collect();
            assert_eq!(coverage, range.members);
        }
    }

    #[test]
    fn test_plist_preamble() {
        let doc = generate_groups(&ranges()).unwrap();
        assert!(doc.contains("<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\""));
        assert!(doc.contains("<plist version=\"1.0\">"));
        assert!(doc.contains("<string>Reserved &amp; unused</string>"));
    }
}
