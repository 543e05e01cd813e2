/// Small helpers shared by the GlyphData and property-list writers.
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Indentation width of generated documents.
const INDENT: usize = 2;

pub type XmlWriter = Writer<Vec<u8>>;

/// A pretty-printing writer that has already emitted the XML declaration.
pub fn new_document() -> quick_xml::Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

/// Finish the document with a trailing newline.
#[must_use]
pub fn finish(writer: XmlWriter) -> String {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    // The writer is only ever fed `&str` data.
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn start(writer: &mut XmlWriter, tag: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))
}

pub fn end(writer: &mut XmlWriter, tag: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))
}

/// `<tag>text</tag>` on a single line, with `text` escaped.
pub fn text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> quick_xml::Result<()> {
    start(writer, tag)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, tag)
}
