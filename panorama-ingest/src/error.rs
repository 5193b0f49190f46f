use thiserror::Error;
use xml_tree_core::ParseError;

use crate::bind::BindError;
use crate::settings::SettingsError;

/// Pipeline-fatal ingestion failures.
///
/// Paths are carried as display strings so the error alone is enough to
/// diagnose a failed run. Artifacts already written under the working
/// directory are left in place.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("archive {path} is missing or unreadable: {source}")]
    ArchiveNotFound {
        path: String,
        source: std::io::Error,
    },
    #[error("unsupported archive {path}: expected a .{expected} file")]
    UnsupportedArchiveFormat { path: String, expected: String },
    #[error("{tool} failed ({status}): {stderr}")]
    ExternalToolFailure {
        tool: String,
        /// Exit status, or the reason the tool could not be started.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    #[error("unexpected layout under {path}: {reason}")]
    DirectoryLayoutMismatch { path: String, reason: String },
    #[error("no file under {path} has a <{marker}> element below its root")]
    DocumentNotFound { path: String, marker: String },
    #[error("configuration document {path} is not well-formed XML: {source}")]
    MalformedDocument { path: String, source: ParseError },
    #[error("configuration document {path} does not match the expected schema: {source}")]
    SchemaMismatch { path: String, source: BindError },
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl IngestError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Short stable identifier for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArchiveNotFound { .. } => "archive_not_found",
            Self::UnsupportedArchiveFormat { .. } => "unsupported_archive_format",
            Self::ExternalToolFailure { .. } => "external_tool_failure",
            Self::DirectoryLayoutMismatch { .. } => "directory_layout_mismatch",
            Self::DocumentNotFound { .. } => "document_not_found",
            Self::MalformedDocument { .. } => "malformed_document",
            Self::SchemaMismatch { .. } => "schema_mismatch",
            Self::Io { .. } => "io",
            Self::Settings(_) => "settings",
        }
    }
}
