use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The tokenizer rejected the input at the given byte offset.
    #[error("failed to parse XML at byte {position}: {source}")]
    Syntax {
        position: u64,
        source: quick_xml::Error,
    },
    /// An attribute or text node could not be decoded.
    #[error("failed to decode XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Well-formed tokens that do not make a single-rooted document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into an [`XmlNode`] tree.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut builder = TreeBuilder::default();

    loop {
        match next_event(&mut reader, &mut buf)? {
            Event::Start(e) => builder.open(element(&e, &reader)?),
            Event::Empty(e) => builder.attach(element(&e, &reader)?)?,
            Event::Text(e) => builder.text(&e.unescape()?),
            Event::CData(e) => builder.text(std::str::from_utf8(e.as_ref())?),
            Event::End(_) => builder.close()?,
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    builder.finish()
}

/// Parse an XML file into an [`XmlNode`] tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

/// Report whether the document root has a direct child element named `tag`.
///
/// The whole document is read: input that is not a single well-formed
/// element tree is an error even when the child appears before the fault.
/// Tree construction is skipped, so large documents are checked without
/// holding them in memory.
pub fn probe_root_child(xml: &[u8], tag: &str) -> Result<bool, ParseError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut root_closed = false;
    let mut found = false;

    loop {
        match next_event(&mut reader, &mut buf)? {
            Event::Start(e) => {
                if root_closed {
                    return Err(multiple_roots());
                }
                found |= depth == 1 && e.name().as_ref() == tag.as_bytes();
                depth += 1;
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err(multiple_roots());
                }
                found |= depth == 1 && e.name().as_ref() == tag.as_bytes();
                root_closed = depth == 0;
            }
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                root_closed = depth == 0;
            }
            Event::Text(e) if depth == 0 && !e.iter().all(u8::is_ascii_whitespace) => {
                return Err(ParseError::Malformed(
                    "text outside the root element".to_string(),
                ));
            }
            Event::Eof if depth > 0 => {
                return Err(ParseError::Malformed(
                    "document ended before the root element closed".to_string(),
                ));
            }
            Event::Eof if !root_closed => {
                return Err(ParseError::Malformed("no root element found".to_string()));
            }
            Event::Eof => return Ok(found),
            _ => {}
        }
        buf.clear();
    }
}

fn multiple_roots() -> ParseError {
    ParseError::Malformed("multiple top-level elements found".to_string())
}

/// [`probe_root_child`] over the contents of a file.
pub fn probe_file_root_child(path: &Path, tag: &str) -> Result<bool, ParseError> {
    let bytes = fs::read(path)?;
    probe_root_child(&bytes, tag)
}

fn next_event<'b>(
    reader: &mut Reader<&[u8]>,
    buf: &'b mut Vec<u8>,
) -> Result<Event<'b>, ParseError> {
    let position = reader.buffer_position() as u64;
    reader
        .read_event_into(buf)
        .map_err(|source| ParseError::Syntax { position, source })
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<XmlNode>,
    root: Option<XmlNode>,
}

impl TreeBuilder {
    fn open(&mut self, node: XmlNode) {
        self.stack.push(node);
    }

    fn close(&mut self) -> Result<(), ParseError> {
        let node = self.stack.pop().ok_or_else(|| {
            ParseError::Malformed("encountered closing tag without open tag".to_string())
        })?;
        self.attach(node)
    }

    fn attach(&mut self, node: XmlNode) -> Result<(), ParseError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        if self.root.is_some() {
            return Err(ParseError::Malformed(
                "multiple top-level elements found".to_string(),
            ));
        }
        self.root = Some(node);
        Ok(())
    }

    fn text(&mut self, text: &str) {
        let Some(current) = self.stack.last_mut() else {
            return;
        };
        if text.trim().is_empty() {
            return;
        }
        match &mut current.text {
            Some(existing) => existing.push_str(text),
            None => current.text = Some(text.to_string()),
        }
    }

    fn finish(self) -> Result<XmlNode, ParseError> {
        if !self.stack.is_empty() {
            return Err(ParseError::Malformed(
                "unclosed element(s) at end of document".to_string(),
            ));
        }
        self.root
            .ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
    }
}

fn element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlNode, ParseError> {
    let mut node = XmlNode::new(qname_to_string(e.name())?);

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse, probe_root_child, ParseError};

    #[test]
    fn probe_finds_direct_child_only() {
        let xml = br#"<config version="10.1.0"><shared><panorama/></shared><panorama/></config>"#;
        assert!(probe_root_child(xml, "panorama").expect("probe"));

        let nested_only = br#"<config><shared><panorama/></shared></config>"#;
        assert!(!probe_root_child(nested_only, "panorama").expect("probe"));
    }

    #[test]
    fn probe_rejects_marker_document_that_breaks_later() {
        let truncated = b"<config><panorama></panorama><broken";
        assert!(probe_root_child(truncated, "panorama").is_err());

        let unclosed = br#"<config version="10.1.0"><panorama/><shared><address>"#;
        let err = probe_root_child(unclosed, "panorama").expect_err("unclosed");
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn probe_rejects_content_after_the_root() {
        let second_root = b"<config><panorama/></config><config/>";
        assert!(matches!(
            probe_root_child(second_root, "panorama"),
            Err(ParseError::Malformed(_))
        ));

        let trailing_text = b"<config><panorama/></config> trailing";
        assert!(probe_root_child(trailing_text, "panorama").is_err());
    }

    #[test]
    fn probe_accepts_prolog_comments_and_trailing_whitespace() {
        let xml = b"<?xml version=\"1.0\"?>\n<!-- export -->\n<config><panorama/></config>\n\n";
        assert!(probe_root_child(xml, "panorama").expect("probe"));
        assert!(!probe_root_child(xml, "shared").expect("probe"));
    }

    #[test]
    fn probe_agrees_with_parse_on_self_closing_root() {
        assert!(!probe_root_child(b"<config/>", "panorama").expect("probe"));
        assert!(parse(b"<config/>").expect("parse").children.is_empty());
    }

    #[test]
    fn probe_rejects_non_xml() {
        let err = probe_root_child(b"just some text", "panorama").expect_err("not xml");
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn parse_reports_unclosed_elements() {
        let err = parse(b"<config><shared>").expect_err("unclosed");
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn undefined_entity_is_reported_as_xml_error() {
        let err = parse(b"<config><description>&bogus;</description></config>")
            .expect_err("unknown entity");
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn parse_rejects_mismatched_close_with_position() {
        let err = parse(b"<config><a></b></config>").expect_err("mismatch");
        assert!(matches!(err, ParseError::Syntax { .. }));
    }
}
