use std::collections::BTreeSet;

use anyhow::{bail, Result};
use tracing::{debug, info};
use vx_domain::EnvHandle;

use crate::core::cancel::CancelToken;
use crate::core::errors::InstallError;
use crate::core::process::{run_in_env, EnvRun};

/// Lower-cased names of every package installed in the environment, from
/// `pip freeze` output (one `name==version` per line). Empty output is an
/// empty set, not an error.
///
/// Returns the empty set when `cancel` trips mid-probe; callers are expected
/// to check the token between pipeline stages.
///
/// # Errors
///
/// Returns an error when the freeze subprocess cannot run or exits non-zero.
pub fn installed_packages(env: &EnvHandle, cancel: &CancelToken) -> Result<BTreeSet<String>> {
    let args = vec!["-m".to_string(), "pip".to_string(), "freeze".to_string()];
    let output = match run_in_env(env, &args, cancel)? {
        EnvRun::Completed(output) => output,
        EnvRun::Interrupted => return Ok(BTreeSet::new()),
    };
    if output.code != 0 {
        bail!(
            "pip freeze exited with status {}: {}",
            output.code,
            output.stderr.trim()
        );
    }
    let installed = parse_freeze(&output.stdout);
    debug!(count = installed.len(), "probed installed packages");
    Ok(installed)
}

fn parse_freeze(stdout: &str) -> BTreeSet<String> {
    stdout
        .lines()
        .filter_map(|line| line.split("==").next())
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Install every module in `missing` with one bulk `pip install` call.
///
/// An empty set spawns no subprocess at all. There is no per-package retry
/// and no partial-success handling. Returns `true` when an install ran to
/// completion, `false` on the no-op and interrupted paths.
///
/// # Errors
///
/// Fails with [`InstallError::PipFailed`] when the bulk install exits
/// non-zero.
pub fn install(env: &EnvHandle, missing: &BTreeSet<String>, cancel: &CancelToken) -> Result<bool> {
    if missing.is_empty() {
        info!("all referenced modules already installed");
        return Ok(false);
    }

    let names: Vec<String> = missing.iter().cloned().collect();
    info!(modules = %names.join(", "), "installing missing modules");
    let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
    args.extend(names);

    let output = match run_in_env(env, &args, cancel)? {
        EnvRun::Completed(output) => output,
        EnvRun::Interrupted => return Ok(false),
    };
    if output.code != 0 {
        return Err(InstallError::PipFailed {
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(true)
}
