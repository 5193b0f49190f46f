//! Two-layer archive extraction.
//!
//! A management export is a gzip stream wrapping a tar archive. Extraction
//! works on a copy staged in the working directory so the caller's file is
//! never touched:
//!
//! 1. copy `<name>.tgz` to `<work>/ingest-<name>.tgz`
//! 2. strip the gzip layer in place, leaving `<work>/ingest-<name>.tar`
//! 3. create `<work>/configs`
//! 4. extract the tar with `configs` as the working directory
//! 5. remove the intermediate tar (best effort)
//!
//! Both external tools block until they exit. Their stdout and stderr are
//! read to completion before the exit status is collected.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::path_guard::ensure_not_source;
use crate::settings::{IngestSettings, ToolSettings};

const COPY_PREFIX: &str = "ingest-";

/// Locations produced by a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedArchive {
    /// File name of the caller's archive.
    pub archive_name: String,
    /// The staged copy. After decompression this path no longer exists.
    pub copy_path: PathBuf,
    /// Directory holding the extracted tree.
    pub configs_dir: PathBuf,
}

/// Extract `archive` under `work_dir`.
///
/// Partial results are left on disk when a step fails.
pub fn extract_archive(
    archive: &Path,
    work_dir: &Path,
    settings: &IngestSettings,
) -> Result<ExtractedArchive, IngestError> {
    ensure_readable(archive)?;
    let archive_name = archive
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    fs::create_dir_all(work_dir).map_err(|source| {
        IngestError::io(format!("failed to create {}", work_dir.display()), source)
    })?;
    let work_dir = work_dir.canonicalize().map_err(|source| {
        IngestError::io(format!("canonicalize {}", work_dir.display()), source)
    })?;

    let stem = archive_stem(&archive_name, &settings.archive_extension);
    let copy_path = work_dir.join(format!(
        "{COPY_PREFIX}{stem}.{}",
        settings.archive_extension
    ));
    let tar_path = work_dir.join(format!(
        "{COPY_PREFIX}{stem}.{}",
        settings.intermediate_extension
    ));

    ensure_not_source(&copy_path, archive)?;
    fs::copy(archive, &copy_path).map_err(|source| {
        IngestError::io(
            format!(
                "failed to copy {} to {}",
                archive.display(),
                copy_path.display()
            ),
            source,
        )
    })?;
    info!(archive = %archive.display(), copy = %copy_path.display(), "staged archive copy");

    run_tool(&settings.decompress, &copy_path, &work_dir)?;
    if !tar_path.is_file() {
        return Err(IngestError::DirectoryLayoutMismatch {
            path: work_dir.display().to_string(),
            reason: format!(
                "decompression did not produce {}",
                tar_path.file_name().unwrap_or_default().to_string_lossy()
            ),
        });
    }

    let configs_dir = work_dir.join(&settings.configs_dir);
    fs::create_dir_all(&configs_dir).map_err(|source| {
        IngestError::io(format!("failed to create {}", configs_dir.display()), source)
    })?;
    let listing = run_tool(&settings.extract, &tar_path, &configs_dir)?;
    info!(
        configs = %configs_dir.display(),
        entries = listing.lines().count(),
        "extracted archive"
    );

    if let Err(err) = fs::remove_file(&tar_path) {
        warn!(path = %tar_path.display(), error = %err, "could not remove intermediate tar");
    }

    Ok(ExtractedArchive {
        archive_name,
        copy_path,
        configs_dir,
    })
}

fn ensure_readable(archive: &Path) -> Result<(), IngestError> {
    let not_found = |source: std::io::Error| IngestError::ArchiveNotFound {
        path: archive.display().to_string(),
        source,
    };
    let metadata = fs::metadata(archive).map_err(not_found)?;
    if !metadata.is_file() {
        return Err(not_found(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    File::open(archive).map_err(not_found)?;
    Ok(())
}

/// File name with the archive extension removed, falling back to the plain
/// file stem when the name does not carry it.
fn archive_stem<'a>(name: &'a str, extension: &str) -> &'a str {
    let suffix = format!(".{extension}");
    if name.len() > suffix.len() {
        let split = name.len() - suffix.len();
        if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(&suffix) {
            return &name[..split];
        }
    }
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

/// Run `tool` with `operand` appended, from `cwd`. Returns captured stdout.
fn run_tool(tool: &ToolSettings, operand: &Path, cwd: &Path) -> Result<String, IngestError> {
    debug!(
        program = %tool.program,
        args = ?tool.args,
        operand = %operand.display(),
        cwd = %cwd.display(),
        "running external tool"
    );
    let output = Command::new(&tool.program)
        .args(&tool.args)
        .arg(operand)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|err| IngestError::ExternalToolFailure {
            tool: tool.program.clone(),
            status: format!("could not start: {err}"),
            stderr: String::new(),
        })?;

    if !output.status.success() {
        return Err(IngestError::ExternalToolFailure {
            tool: tool.program.clone(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
