//! Ingestion of Panorama management-server configuration exports.
//!
//! A Panorama export arrives as a gzip-compressed tar archive. This library
//! unpacks it with the system `gzip` and `tar`, finds the one XML document
//! that belongs to the management server, and binds that document into a
//! strongly typed model.
//!
//! # Architecture
//!
//! - [`archive`]: Stage a copy of the archive and run both extraction layers
//! - [`locate`]: Pick the document whose root carries the `<panorama>` marker
//! - [`bind`]: Explicit XML-to-model mapping, one impl per model type
//! - [`model`]: Shared objects, rulebases, device groups, templates
//! - [`version`]: Schema format version of a bound document
//! - [`ingest`](mod@ingest): The end-to-end pipeline
//!
//! Supporting modules:
//!
//! - [`settings`]: Tool commands and naming conventions, from TOML
//! - [`error`]: Pipeline failure classes
//! - [`summary`] / [`report`]: `key=value` output for the command line
//!
//! # Examples
//!
//! ```ignore
//! use panorama_ingest::ingest::{ingest, IngestRequest};
//! use panorama_ingest::settings::IngestSettings;
//!
//! let ingestion = ingest(&IngestRequest {
//!     archive: "site1.tgz".into(),
//!     work_dir: "work".into(),
//!     settings: IngestSettings::default(),
//! })?;
//! println!("version={}", ingestion.version());
//! ```
//!
//! # Built on xml-tree-core
//!
//! XML parsing and the root-child probe live in `xml-tree-core`. Everything
//! Panorama-specific is contained in this crate.

pub mod archive;
pub mod bind;
pub mod error;
pub mod ingest;
pub mod locate;
pub mod model;
mod path_guard;
pub mod report;
pub mod settings;
pub mod summary;
pub mod version;

pub use error::IngestError;
pub use ingest::{ingest, IngestRequest, Ingestion};
