//! Emit [`XmlNode`] trees as configuration documents.
//!
//! Output mirrors the export layout: an XML declaration, two-space
//! indentation, and self-closing tags for elements with no text or children.
//! Children are written in stored order, so a parse of the output yields an
//! equal tree.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::tree::XmlNode;

#[derive(Debug, Error)]
#[error("failed to emit <{tag}>: {source}")]
pub struct WriteError {
    /// Element being written when the failure occurred.
    pub tag: String,
    pub source: quick_xml::Error,
}

enum Step<'a> {
    Open(&'a XmlNode),
    Close(&'a str),
}

/// Serialize `root` as a standalone document.
pub fn write(root: &XmlNode) -> Result<Vec<u8>, WriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let declaration = BytesDecl::new("1.0", Some("UTF-8"), None);
    emit(&mut writer, Event::Decl(declaration), "?xml")?;

    let mut pending = vec![Step::Open(root)];
    while let Some(step) = pending.pop() {
        match step {
            Step::Close(tag) => emit(&mut writer, Event::End(BytesEnd::new(tag)), tag)?,
            Step::Open(node) => {
                let start = start_tag(node);
                if node.children.is_empty() && node.text.is_none() {
                    emit(&mut writer, Event::Empty(start), &node.tag)?;
                    continue;
                }
                emit(&mut writer, Event::Start(start), &node.tag)?;
                if let Some(text) = &node.text {
                    emit(&mut writer, Event::Text(BytesText::new(text)), &node.tag)?;
                }
                pending.push(Step::Close(&node.tag));
                pending.extend(node.children.iter().rev().map(Step::Open));
            }
        }
    }

    Ok(writer.into_inner())
}

fn start_tag(node: &XmlNode) -> BytesStart<'_> {
    BytesStart::new(node.tag.as_str()).with_attributes(
        node.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    )
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>, tag: &str) -> Result<(), WriteError> {
    writer
        .write_event(event)
        .map_err(|source| WriteError {
            tag: tag.to_string(),
            source: source.into(),
        })
}
