#![allow(dead_code)]

use std::path::Path;

use vx_domain::EnvHandle;

/// Writes an executable `bin/python` shell shim under `root` so subprocess
/// paths can be exercised without a real interpreter. The shim body runs with
/// the original invocation arguments.
#[cfg(unix)]
pub(crate) fn fake_env(root: &Path, script: &str) -> EnvHandle {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let bin = root.join("bin");
    fs::create_dir_all(&bin).expect("create bin dir");
    let python = bin.join("python");
    fs::write(&python, format!("#!/bin/sh\n{script}\n")).expect("write shim");
    fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).expect("chmod shim");
    EnvHandle::new(root)
}
