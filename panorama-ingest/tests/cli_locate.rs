mod support;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

use support::fixture_text;

#[test]
fn locate_prints_marker_document() {
    let dir = tempdir().expect("tempdir");
    let export = dir.path().join("configs/export");
    fs::create_dir_all(&export).expect("mkdir");
    fs::write(export.join("a-firewall.xml"), fixture_text("firewall-running-config.xml"))
        .expect("write firewall");
    fs::write(export.join("b-panorama.xml"), fixture_text("panorama-running-config.xml"))
        .expect("write panorama");
    fs::write(export.join("c-notes.txt"), "plain text").expect("write notes");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panorama-ingest"));
    cmd.arg("locate")
        .arg(dir.path().join("configs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("document="))
        .stdout(predicate::str::contains("b-panorama.xml"));
}

#[test]
fn locate_fails_when_no_file_has_the_marker() {
    let dir = tempdir().expect("tempdir");
    let export = dir.path().join("configs/export");
    fs::create_dir_all(&export).expect("mkdir");
    fs::write(export.join("fw.xml"), fixture_text("firewall-running-config.xml"))
        .expect("write firewall");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panorama-ingest"));
    cmd.arg("locate")
        .arg(dir.path().join("configs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("kind=document_not_found"));
}

#[test]
fn locate_honours_custom_marker() {
    let dir = tempdir().expect("tempdir");
    let export = dir.path().join("configs/export");
    fs::create_dir_all(&export).expect("mkdir");
    fs::write(export.join("fw.xml"), fixture_text("firewall-running-config.xml"))
        .expect("write firewall");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panorama-ingest"));
    cmd.arg("locate")
        .arg(dir.path().join("configs"))
        .arg("--marker")
        .arg("mgt-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("fw.xml"));
}

#[test]
fn verbose_logs_go_to_stderr_only() {
    let dir = tempdir().expect("tempdir");
    let export = dir.path().join("configs/export");
    fs::create_dir_all(&export).expect("mkdir");
    fs::write(export.join("running.xml"), fixture_text("panorama-running-config.xml"))
        .expect("write panorama");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panorama-ingest"));
    cmd.env_remove("RUST_LOG")
        .arg("-v")
        .arg("locate")
        .arg(dir.path().join("configs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("document="))
        .stdout(predicate::str::contains("found configuration document").not())
        .stderr(predicate::str::contains("found configuration document"));

    let mut quiet = Command::new(assert_cmd::cargo::cargo_bin!("panorama-ingest"));
    quiet
        .env_remove("RUST_LOG")
        .arg("locate")
        .arg(dir.path().join("configs"))
        .assert()
        .success()
        .stderr(predicate::str::contains("found configuration document").not());
}
