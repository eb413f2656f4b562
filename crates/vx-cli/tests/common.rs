#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::assert::Assert;
use serde_json::Value;

pub fn parse_json(assert: &Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json")
}

pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write script");
    path
}

/// Executable `bin/python` shell shim standing in for a real interpreter, so
/// the pipeline can run without python installed.
#[cfg(unix)]
pub fn fake_env(root: &Path, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = root.join("bin");
    fs::create_dir_all(&bin).expect("create bin dir");
    let python = bin.join("python");
    fs::write(&python, format!("#!/bin/sh\n{script}\n")).expect("write shim");
    fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).expect("chmod shim");
    root.to_path_buf()
}
