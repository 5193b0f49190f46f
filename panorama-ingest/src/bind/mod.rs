//! Explicit XML-to-model bindings.
//!
//! Every entity implements [`FromXml`] and names the exact child elements it
//! reads. The binding rules are uniform across the schema:
//!
//! - identity comes from the `name` attribute and must be non-empty,
//! - a singular structure binds from a same-named child and is `None` when
//!   that child is absent,
//! - `<wrapper><member>..</member></wrapper>` binds to an ordered
//!   `Vec<String>` with one item per `<member>` (an empty `<member/>` is
//!   an empty string), empty when the wrapper is absent,
//! - `<wrapper><entry name=".."/></wrapper>` binds to an ordered list of
//!   entities (or of names, for device references),
//! - descriptions default to the empty string.
//!
//! Object containers also implement [`ToXml`] so they can be re-emitted with
//! their order intact.

mod devices;
mod objects;
mod rules;

use std::path::Path;

use thiserror::Error;
use xml_tree_core::{parse_file, XmlNode};

use crate::error::IngestError;
use crate::model::{ConfigurationDocument, DeviceEntry, Meta, Shared};

/// Root element of every export.
pub const ROOT_ELEMENT: &str = "config";

/// Build a model value from the element that represents it.
pub trait FromXml: Sized {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError>;
}

/// Emit a model value as the element that represents it.
pub trait ToXml {
    fn to_xml(&self) -> XmlNode;
}

/// A document that parsed as XML but does not fit the configuration schema.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("expected root element <config>, found <{found}>")]
    UnexpectedRoot { found: String },
    #[error("root element has no <{marker}> child")]
    MissingMarker { marker: String },
    #[error("<{element}> has no {attribute} attribute")]
    MissingAttribute { element: String, attribute: String },
    #[error("<{element}> has an empty name attribute")]
    EmptyName { element: String },
    #[error("in <{collection}> entry {index}: {source}")]
    Within {
        collection: String,
        index: usize,
        source: Box<BindError>,
    },
}

/// Map a parsed document onto the model.
///
/// The root must be `<config>` carrying a `version` attribute and a direct
/// `marker` child.
pub fn deserialize(root: &XmlNode, marker: &str) -> Result<ConfigurationDocument, BindError> {
    if root.tag != ROOT_ELEMENT {
        return Err(BindError::UnexpectedRoot {
            found: root.tag.clone(),
        });
    }
    if root.get_child(marker).is_none() {
        return Err(BindError::MissingMarker {
            marker: marker.to_string(),
        });
    }
    let version = root
        .attr("version")
        .ok_or_else(|| BindError::MissingAttribute {
            element: ROOT_ELEMENT.to_string(),
            attribute: "version".to_string(),
        })?
        .to_string();

    Ok(ConfigurationDocument {
        version,
        shared: child_of::<Shared>(root, "shared")?.unwrap_or_default(),
        devices: entries_of::<DeviceEntry>(root, "devices")?,
    })
}

/// Parse and deserialize the document at `path`.
pub fn deserialize_file(path: &Path, marker: &str) -> Result<ConfigurationDocument, IngestError> {
    let root = parse_file(path).map_err(|source| IngestError::MalformedDocument {
        path: path.display().to_string(),
        source,
    })?;
    deserialize(&root, marker).map_err(|source| IngestError::SchemaMismatch {
        path: path.display().to_string(),
        source,
    })
}

impl FromXml for Shared {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            objects: FromXml::from_xml(node)?,
            pre_rulebase: child_of(node, "pre-rulebase")?.unwrap_or_default(),
            post_rulebase: child_of(node, "post-rulebase")?.unwrap_or_default(),
        })
    }
}

/// Required, non-empty `name` attribute.
pub(crate) fn name_of(node: &XmlNode) -> Result<String, BindError> {
    let name = node
        .attr("name")
        .ok_or_else(|| BindError::MissingAttribute {
            element: node.tag.clone(),
            attribute: "name".to_string(),
        })?;
    if name.is_empty() {
        return Err(BindError::EmptyName {
            element: node.tag.clone(),
        });
    }
    Ok(name.to_string())
}

/// Text of a direct child element, verbatim.
pub(crate) fn text_of(node: &XmlNode, tag: &str) -> Option<String> {
    node.get_text(&[tag]).map(str::to_string)
}

/// Text at a nested child path, verbatim.
pub(crate) fn text_at(node: &XmlNode, path: &[&str]) -> Option<String> {
    node.get_text(path).map(str::to_string)
}

/// `<description>` and `<tag>` members of an entity.
pub(crate) fn meta_of(node: &XmlNode) -> Meta {
    Meta {
        description: text_of(node, "description").unwrap_or_default(),
        tags: members_of(node, "tag"),
    }
}

/// `<wrapper><member>..</member>..</wrapper>` as an ordered list.
pub(crate) fn members_of(node: &XmlNode, wrapper: &str) -> Vec<String> {
    node.get_child(wrapper)
        .map(member_texts)
        .unwrap_or_default()
}

/// Member list at a nested wrapper path.
pub(crate) fn members_at(node: &XmlNode, path: &[&str]) -> Vec<String> {
    node.find(path).map(member_texts).unwrap_or_default()
}

fn member_texts(wrapper: &XmlNode) -> Vec<String> {
    wrapper
        .children_named("member")
        .map(|member| member.text.clone().unwrap_or_default())
        .collect()
}

/// `<wrapper><entry name=".."/>..</wrapper>` as an ordered list of names.
/// Entries without a name are skipped.
pub(crate) fn entry_names_of(node: &XmlNode, wrapper: &str) -> Vec<String> {
    node.get_child(wrapper)
        .map(|w| {
            w.children_named("entry")
                .filter_map(|entry| entry.attr("name"))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `<wrapper><entry>..</entry>..</wrapper>` bound entry by entry.
pub(crate) fn entries_of<T: FromXml>(node: &XmlNode, wrapper: &str) -> Result<Vec<T>, BindError> {
    let Some(container) = node.get_child(wrapper) else {
        return Ok(Vec::new());
    };
    container
        .children_named("entry")
        .enumerate()
        .map(|(index, entry)| {
            T::from_xml(entry).map_err(|source| BindError::Within {
                collection: wrapper.to_string(),
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// A singular child structure; `None` when the child is absent.
pub(crate) fn child_of<T: FromXml>(node: &XmlNode, tag: &str) -> Result<Option<T>, BindError> {
    node.get_child(tag).map(T::from_xml).transpose()
}

/// `<entry name="..">`, the shape of every named element.
pub(crate) fn entry_node(name: &str) -> XmlNode {
    XmlNode::new("entry").with_attr("name", name)
}

/// `<tag><member>..</member></tag>`; bare when `members` is empty.
pub(crate) fn member_list(tag: &str, members: &[String]) -> XmlNode {
    members.iter().fold(XmlNode::new(tag), |list, member| {
        list.with_child(XmlNode::new("member").with_text(member.as_str()))
    })
}

/// Append a text child when `value` is present.
pub(crate) fn push_text(parent: &mut XmlNode, tag: &str, value: Option<&str>) {
    if let Some(value) = value {
        parent.children.push(XmlNode::new(tag).with_text(value));
    }
}

/// Append `<description>` and `<tag>` when populated.
pub(crate) fn push_meta(parent: &mut XmlNode, meta: &Meta) {
    if !meta.description.is_empty() {
        push_text(parent, "description", Some(meta.description.as_str()));
    }
    parent.push_if_populated(member_list("tag", &meta.tags));
}
