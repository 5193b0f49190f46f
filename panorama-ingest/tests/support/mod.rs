#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fixtures")
        .join(path)
}

pub fn fixture_text(path: &str) -> String {
    fs::read_to_string(fixture(path)).expect("read fixture")
}

/// Archive tests need the same external tools the pipeline runs.
pub fn archive_tools_available() -> bool {
    let available = which::which("tar").is_ok() && which::which("gzip").is_ok();
    if !available {
        eprintln!("skipping: tar or gzip not on PATH");
    }
    available
}

/// Build `<dir>/<name>` as a gzip-compressed tar of `files`, each given as
/// a path relative to the archive root and its contents.
pub fn build_export(dir: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let staging = dir.join(format!("{name}.staging"));
    for (relative, body) in files {
        let path = staging.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir staging");
        fs::write(&path, body).expect("write staged file");
    }

    let archive = dir.join(name);
    let status = Command::new("tar")
        .arg("-czf")
        .arg(&archive)
        .arg("-C")
        .arg(&staging)
        .arg(".")
        .status()
        .expect("run tar");
    assert!(status.success(), "tar -czf failed: {status}");
    archive
}
