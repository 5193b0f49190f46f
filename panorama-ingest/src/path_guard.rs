use std::fs;
use std::path::Path;

use crate::error::IngestError;

/// Refuse to stage onto `working_copy` when it already resolves to the
/// caller's `source` archive.
///
/// The staged name never equals the source name, so a clash needs a
/// pre-existing entry at the staged path: typically a symlink left in the
/// working directory that points back at the archive. Copying through it
/// would truncate the source, and decompression would then replace it.
pub fn ensure_not_source(working_copy: &Path, source: &Path) -> Result<(), IngestError> {
    if fs::symlink_metadata(working_copy).is_err() {
        return Ok(());
    }
    let resolve = |path: &Path| {
        path.canonicalize()
            .map_err(|err| IngestError::io(format!("canonicalize {}", path.display()), err))
    };
    if resolve(working_copy)? == resolve(source)? {
        return Err(IngestError::io(
            format!(
                "refusing to stage archive over its source: {} resolves to {}",
                working_copy.display(),
                source.display()
            ),
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "working copy is the source"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::ensure_not_source;

    #[test]
    fn absent_staging_path_is_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("site1.tgz");
        fs::write(&source, b"archive").expect("write");

        ensure_not_source(&dir.path().join("ingest-site1.tgz"), &source).expect("distinct");
    }

    #[test]
    fn leftover_copy_of_another_file_is_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("site1.tgz");
        let staged = dir.path().join("ingest-site1.tgz");
        fs::write(&source, b"archive").expect("write");
        fs::write(&staged, b"stale copy").expect("write");

        ensure_not_source(&staged, &source).expect("stale copy is overwritten");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_back_to_source_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("site1.tgz");
        let staged = dir.path().join("ingest-site1.tgz");
        fs::write(&source, b"archive").expect("write");
        std::os::unix::fs::symlink(&source, &staged).expect("symlink");

        let err = ensure_not_source(&staged, &source).expect_err("aliases source");
        assert!(err.to_string().contains("refusing to stage archive"));
    }
}
