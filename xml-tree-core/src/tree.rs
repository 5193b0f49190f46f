use std::collections::BTreeMap;

/// An XML element with its attributes, child elements, and text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// XML attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
    /// Non-whitespace text content, if any.
    pub text: Option<String>,
}

impl XmlNode {
    /// Create an element with no attributes, children, or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: set text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append `child` only when it carries something worth writing.
    pub fn push_if_populated(&mut self, child: XmlNode) {
        if !child.is_empty() {
            self.children.push(child);
        }
    }

    /// True when the element has no attributes, children, or text.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty() && self.text.is_none()
    }

    /// Value of the named attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First child with the provided tag.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All children with the provided tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Walk a nested child path, taking the first match at each step.
    pub fn find(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter()
            .try_fold(self, |current, segment| current.get_child(segment))
    }

    /// Text of the element at the end of `path`, or this element's own text
    /// when `path` is empty.
    pub fn get_text<'a>(&'a self, path: &[&str]) -> Option<&'a str> {
        self.find(path)?.text.as_deref()
    }
}
