//! Order-preserving XML element trees for configuration ingestion.
//!
//! Documents are parsed into [`XmlNode`] values that keep child elements in
//! document order, which matters for rulebases where position is semantic.
//! [`probe_root_child`] answers "does the root carry this child element?"
//! without materialising the whole document, and [`write`] emits a tree
//! back out as a document.

pub mod parser;
pub mod tree;
pub mod writer;

pub use parser::{parse, parse_file, probe_file_root_child, probe_root_child, ParseError};
pub use tree::XmlNode;
pub use writer::{write, WriteError};
