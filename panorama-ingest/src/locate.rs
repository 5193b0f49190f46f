//! Find the management-server document in an extracted tree.
//!
//! Files are recognised by content: a candidate is any well-formed XML file
//! whose root has the marker element as a direct child. Anything else,
//! including a truncated copy of the management document, is skipped without
//! failing the scan.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use xml_tree_core::probe_file_root_child;

use crate::error::IngestError;

/// Return the first marker-bearing file under the first-level
/// subdirectories of `configs_dir`, or `None` when no file matches.
///
/// Subdirectories and their files are visited in name order, so the result
/// does not depend on filesystem enumeration order.
pub fn locate_document(configs_dir: &Path, marker: &str) -> Result<Option<PathBuf>, IngestError> {
    let subdirs = sorted_entries(configs_dir, |path| path.is_dir())?;
    if subdirs.is_empty() {
        return Err(IngestError::DirectoryLayoutMismatch {
            path: configs_dir.display().to_string(),
            reason: "no extracted subdirectory found".to_string(),
        });
    }

    for dir in subdirs {
        for file in sorted_entries(&dir, |path| path.is_file())? {
            match probe_file_root_child(&file, marker) {
                Ok(true) => {
                    debug!(path = %file.display(), marker, "found configuration document");
                    return Ok(Some(file));
                }
                Ok(false) => debug!(path = %file.display(), "no marker element; skipping"),
                Err(err) => {
                    debug!(path = %file.display(), error = %err, "not well-formed XML; skipping")
                }
            }
        }
    }

    Ok(None)
}

fn sorted_entries(
    dir: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>, IngestError> {
    let read = fs::read_dir(dir).map_err(|source| IngestError::DirectoryLayoutMismatch {
        path: dir.display().to_string(),
        reason: format!("cannot list directory: {source}"),
    })?;

    let mut entries = Vec::new();
    for entry in read {
        let entry = entry
            .map_err(|source| IngestError::io(format!("failed to list {}", dir.display()), source))?;
        let path = entry.path();
        if keep(&path) {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}
