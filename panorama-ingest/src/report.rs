use std::path::Path;

use colored::Colorize;

use crate::error::IngestError;
use crate::ingest::Ingestion;
use crate::model::ConfigurationDocument;
use crate::summary::{render as render_summary, summarize};
use crate::version::FormatVersion;

/// Render a finished ingestion as `key=value` lines.
pub fn render_ingestion(ingestion: &Ingestion) -> String {
    let mut out = vec![
        format!("archive={}", ingestion.archive_name),
        format!("configs_dir={}", ingestion.configs_dir.display()),
    ];
    out.push(render_document(&ingestion.document_path, &ingestion.document));
    out.join("\n")
}

/// Render a bound document: its path, version and entry counts.
pub fn render_document(path: &Path, document: &ConfigurationDocument) -> String {
    let mut out = vec![
        format!("document={}", path.display()),
        format!("version={}", document.version),
    ];
    if FormatVersion::parse(&document.version).is_none() {
        out.push(format!("{} version is not numeric", "note:".yellow()));
    }
    out.push(render_summary(summarize(document)));
    out.join("\n")
}

/// One-line failure report for stderr.
pub fn render_failure(err: &IngestError) -> String {
    format!("{} kind={} {}", "ingest failed:".red().bold(), err.kind(), err)
}
