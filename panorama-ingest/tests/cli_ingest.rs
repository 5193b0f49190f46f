mod support;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

use support::{archive_tools_available, build_export, fixture_text};

fn ingest_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("panorama-ingest"))
}

#[test]
fn ingest_reports_version_and_counts() {
    if !archive_tools_available() {
        return;
    }
    let dir = tempdir().expect("tempdir");
    let archive = build_export(
        dir.path(),
        "site1.tgz",
        &[
            ("export/0-firewall.xml", &fixture_text("firewall-running-config.xml")),
            ("export/running-config.xml", &fixture_text("panorama-running-config.xml")),
        ],
    );
    let work = dir.path().join("work");

    ingest_cmd()
        .arg("ingest")
        .arg(&archive)
        .arg("--work-dir")
        .arg(&work)
        .assert()
        .success()
        .stdout(predicate::str::contains("archive=site1.tgz"))
        .stdout(predicate::str::contains("running-config.xml"))
        .stdout(predicate::str::contains("version=10.1.0"))
        .stdout(predicate::str::contains(
            "ingest_summary device_groups=1 templates=1 template_stacks=1 objects=5 security_rules=1 nat_rules=1",
        ));

    assert!(archive.exists(), "source archive must survive");
    assert!(work.join("configs/export/running-config.xml").is_file());
    assert!(!work.join("ingest-site1.tar").exists(), "intermediate tar is removed");
}

#[test]
fn ingest_json_carries_archive_name_and_model() {
    if !archive_tools_available() {
        return;
    }
    let dir = tempdir().expect("tempdir");
    let archive = build_export(
        dir.path(),
        "site1.tgz",
        &[("export/running-config.xml", &fixture_text("panorama-running-config.xml"))],
    );

    ingest_cmd()
        .arg("ingest")
        .arg(&archive)
        .arg("--work-dir")
        .arg(dir.path().join("work"))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"archive_name\": \"site1.tgz\""))
        .stdout(predicate::str::contains("\"version\": \"10.1.0\""))
        .stdout(predicate::str::contains("\"fqdn\": \"updates.example.com\""));
}

#[test]
fn ingest_rejects_wrong_extension_without_touching_work_dir() {
    let dir = tempdir().expect("tempdir");
    let archive = dir.path().join("site1.zip");
    fs::write(&archive, b"PK\x03\x04").expect("write zip");
    let work = dir.path().join("work");

    ingest_cmd()
        .arg("ingest")
        .arg(&archive)
        .arg("--work-dir")
        .arg(&work)
        .assert()
        .failure()
        .stderr(predicate::str::contains("kind=unsupported_archive_format"))
        .stderr(predicate::str::contains("expected a .tgz file"));

    assert!(!work.exists());
}

#[test]
fn ingest_reports_missing_archive() {
    let dir = tempdir().expect("tempdir");

    ingest_cmd()
        .arg("ingest")
        .arg(dir.path().join("absent.tgz"))
        .arg("--work-dir")
        .arg(dir.path().join("work"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("kind=archive_not_found"));
}

#[test]
fn ingest_surfaces_decompression_failure() {
    if which::which("false").is_err() {
        return;
    }
    let dir = tempdir().expect("tempdir");
    let archive = dir.path().join("site1.tgz");
    fs::write(&archive, b"not gzip").expect("write archive");
    let settings = dir.path().join("ingest.toml");
    fs::write(
        &settings,
        r#"
archive_extension = "tgz"
intermediate_extension = "tar"
configs_dir = "configs"
marker_element = "panorama"

[decompress]
program = "false"

[extract]
program = "tar"
args = ["-xvf"]
"#,
    )
    .expect("write settings");
    let work = dir.path().join("work");

    ingest_cmd()
        .arg("ingest")
        .arg(&archive)
        .arg("--work-dir")
        .arg(&work)
        .arg("--settings")
        .arg(&settings)
        .assert()
        .failure()
        .stderr(predicate::str::contains("kind=external_tool_failure"));

    assert!(work.join("ingest-site1.tgz").is_file(), "partial copy is left in place");
    assert_eq!(fs::read(&archive).expect("read"), b"not gzip");
}

#[test]
fn ingest_reports_broken_settings_file() {
    let dir = tempdir().expect("tempdir");
    let settings = dir.path().join("ingest.toml");
    fs::write(&settings, "archive_extension = 5").expect("write settings");

    ingest_cmd()
        .arg("ingest")
        .arg(dir.path().join("site1.tgz"))
        .arg("--work-dir")
        .arg(dir.path().join("work"))
        .arg("--settings")
        .arg(&settings)
        .assert()
        .failure()
        .stderr(predicate::str::contains("kind=settings"));
}

#[test]
fn ingest_reports_document_not_found() {
    if !archive_tools_available() {
        return;
    }
    let dir = tempdir().expect("tempdir");
    let archive = build_export(
        dir.path(),
        "site1.tgz",
        &[("export/fw.xml", &fixture_text("firewall-running-config.xml"))],
    );

    ingest_cmd()
        .arg("ingest")
        .arg(&archive)
        .arg("--work-dir")
        .arg(dir.path().join("work"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("kind=document_not_found"));
}

#[test]
fn ingest_reports_flat_archive_as_layout_mismatch() {
    if !archive_tools_available() {
        return;
    }
    let dir = tempdir().expect("tempdir");
    let archive = build_export(
        dir.path(),
        "site1.tgz",
        &[("running-config.xml", &fixture_text("panorama-running-config.xml"))],
    );

    ingest_cmd()
        .arg("ingest")
        .arg(&archive)
        .arg("--work-dir")
        .arg(dir.path().join("work"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("kind=directory_layout_mismatch"));
}

#[test]
fn ingest_reports_schema_mismatch_for_missing_version() {
    if !archive_tools_available() {
        return;
    }
    let dir = tempdir().expect("tempdir");
    let archive = build_export(
        dir.path(),
        "site1.tgz",
        &[("export/running-config.xml", "<config><panorama/><shared/></config>")],
    );

    ingest_cmd()
        .arg("ingest")
        .arg(&archive)
        .arg("--work-dir")
        .arg(dir.path().join("work"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("kind=schema_mismatch"))
        .stderr(predicate::str::contains("version"));
}

#[test]
fn ingest_skips_truncated_copy_of_the_management_document() {
    if !archive_tools_available() {
        return;
    }
    let dir = tempdir().expect("tempdir");
    let archive = build_export(
        dir.path(),
        "site1.tgz",
        &[
            (
                "export/0-partial.xml",
                r#"<config version="9.0.0"><panorama/><shared><address>"#,
            ),
            ("export/running-config.xml", &fixture_text("panorama-running-config.xml")),
        ],
    );

    ingest_cmd()
        .arg("ingest")
        .arg(&archive)
        .arg("--work-dir")
        .arg(dir.path().join("work"))
        .assert()
        .success()
        .stdout(predicate::str::contains("running-config.xml"))
        .stdout(predicate::str::contains("version=10.1.0"));
}
