//! Descriptor rendering
//!
//! Output shape is fixed by the indexers that consume it: a one-line
//! declaration, every element on its own line, two spaces per depth level,
//! and explicit open/close pairs for empty elements. Indentation is derived
//! from tree depth so rendering the same tree always yields the same bytes.

use super::Element;
use crate::error::{RenderError, Result};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// XML declaration written on the first line of every descriptor
pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>"#;

const INDENT: &[u8] = b"  ";

/// Renders descriptor trees to text
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorSerializer;

impl DescriptorSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Render a descriptor tree, declaration included
    pub fn render(&self, root: &Element) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.get_mut().extend_from_slice(DECLARATION.as_bytes());
        writer.get_mut().push(b'\n');

        write_element(&mut writer, root, 0)?;

        let rendered = String::from_utf8(writer.into_inner()).map_err(RenderError::from)?;
        Ok(rendered)
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    depth: usize,
) -> std::result::Result<(), RenderError> {
    let name = element.name();

    let mut start = BytesStart::new(name);
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    writer
        .write_event(Event::Start(start))
        .map_err(|e| RenderError::write(name, e))?;

    if let Some(text) = element.text()
        && !text.is_empty()
    {
        writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
            .map_err(|e| RenderError::write(name, e))?;
    }

    if !element.children().is_empty() {
        for child in element.children() {
            line_break(writer, depth + 1);
            write_element(writer, child, depth + 1)?;
        }
        line_break(writer, depth);
    }

    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| RenderError::write(name, e))
}

fn line_break(writer: &mut Writer<Vec<u8>>, depth: usize) {
    let buffer = writer.get_mut();
    buffer.push(b'\n');
    for _ in 0..depth {
        buffer.extend_from_slice(INDENT);
    }
}
