use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::json;

mod common;

use common::{parse_json, write_script};

#[test]
fn scan_reports_referenced_modules_as_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_script(
        temp.path(),
        "job.py",
        "import numpy\nfrom os.path import join\n",
    );

    let assert = cargo_bin_cmd!("vx")
        .current_dir(temp.path())
        .args(["--json", "scan", "job.py"])
        .assert()
        .success();

    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "ok");
    let modules = payload["details"]["modules"]
        .as_array()
        .expect("modules array");
    assert!(modules.contains(&json!("numpy")));
    assert!(modules.contains(&json!("os")));
}

#[test]
fn scan_uses_manifest_targets_when_no_args_given() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_script(temp.path(), "configured.py", "import requests\n");
    fs::write(
        temp.path().join("vx.toml"),
        "targets = [\"configured.py\"]\n",
    )
    .expect("write manifest");

    let assert = cargo_bin_cmd!("vx")
        .current_dir(temp.path())
        .args(["--json", "scan"])
        .assert()
        .success();

    let payload = parse_json(&assert);
    assert_eq!(payload["details"]["modules"], json!(["requests"]));
}

#[test]
fn scan_missing_file_exits_with_user_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    cargo_bin_cmd!("vx")
        .current_dir(temp.path())
        .args(["scan", "absent.py"])
        .assert()
        .code(1);
}

#[test]
fn scan_without_targets_exits_with_user_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let assert = cargo_bin_cmd!("vx")
        .current_dir(temp.path())
        .args(["--json", "scan"])
        .assert()
        .code(1);

    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "user-error");
    assert_eq!(payload["details"]["reason"], "no_targets");
}
