//! End-to-end ingestion: archive, locate, deserialize.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::archive::extract_archive;
use crate::bind::deserialize_file;
use crate::error::IngestError;
use crate::locate::locate_document;
use crate::model::ConfigurationDocument;
use crate::settings::IngestSettings;
use crate::version::extract_version;

/// Inputs for one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub archive: PathBuf,
    pub work_dir: PathBuf,
    pub settings: IngestSettings,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct Ingestion {
    pub archive_name: String,
    pub configs_dir: PathBuf,
    pub document_path: PathBuf,
    pub document: ConfigurationDocument,
}

impl Ingestion {
    pub fn version(&self) -> &str {
        extract_version(&self.document)
    }
}

/// Run the full pipeline for `request`.
///
/// The archive extension is checked before anything touches the
/// filesystem; a rejected archive leaves the working directory untouched.
pub fn ingest(request: &IngestRequest) -> Result<Ingestion, IngestError> {
    let settings = &request.settings;
    if !settings.accepts(&request.archive) {
        return Err(IngestError::UnsupportedArchiveFormat {
            path: request.archive.display().to_string(),
            expected: settings.archive_extension.clone(),
        });
    }

    let extracted = extract_archive(&request.archive, &request.work_dir, settings)?;
    let document_path = locate_document(&extracted.configs_dir, &settings.marker_element)?
        .ok_or_else(|| IngestError::DocumentNotFound {
            path: extracted.configs_dir.display().to_string(),
            marker: settings.marker_element.clone(),
        })?;
    info!(document = %document_path.display(), "located configuration document");

    let document = deserialize_file(&document_path, &settings.marker_element)?;
    info!(
        archive = %extracted.archive_name,
        version = %document.version,
        "ingested configuration"
    );

    Ok(Ingestion {
        archive_name: extracted.archive_name,
        configs_dir: extracted.configs_dir,
        document_path,
        document,
    })
}
