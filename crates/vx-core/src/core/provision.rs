use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};
use vx_domain::EnvHandle;

use crate::core::errors::EnvError;
use crate::core::process::run_command;
use crate::core::python::detect_host_interpreter;

/// Create the virtualenv at `env` if it does not exist yet, pip included.
///
/// Returns `true` when a new environment was created. Existing environments
/// are left untouched, so calling this twice creates at most once.
///
/// # Errors
///
/// Fails with [`EnvError::NoHostInterpreter`] when no host python can be
/// found and [`EnvError::CreationFailed`] when `python -m venv` exits
/// non-zero.
pub fn ensure(env: &EnvHandle) -> Result<bool> {
    let root = env.root().display().to_string();
    if env.exists() {
        debug!(path = %root, "virtualenv already present");
        return Ok(false);
    }

    let host = detect_host_interpreter()?;
    info!(path = %root, %host, "creating virtualenv");
    let args = vec!["-m".to_string(), "venv".to_string(), root.clone()];
    let output = run_command(&host, &args, Path::new("."))?;
    if output.code != 0 {
        let detail = if output.stderr.trim().is_empty() {
            output.stdout.trim().to_string()
        } else {
            output.stderr.trim().to_string()
        };
        return Err(EnvError::CreationFailed { path: root, detail }.into());
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use which::which;

    fn find_python() -> Option<String> {
        for candidate in ["python3", "python"] {
            if let Ok(path) = which(candidate) {
                return path.into_os_string().into_string().ok();
            }
        }
        None
    }

    #[test]
    fn ensure_is_a_noop_when_the_root_exists() -> Result<()> {
        let temp = tempfile::tempdir().expect("tempdir");
        let env = EnvHandle::new(temp.path());
        assert!(!ensure(&env)?, "existing root must not be recreated");
        Ok(())
    }

    #[test]
    fn ensure_creates_a_usable_environment() -> Result<()> {
        if find_python().is_none() {
            eprintln!("skipping creation test (python not found)");
            return Ok(());
        }

        let temp = tempfile::tempdir().expect("tempdir");
        let env = EnvHandle::new(temp.path().join("venv"));
        assert!(ensure(&env)?, "first call must create");
        assert!(env.interpreter_exists(), "interpreter must exist after creation");
        assert!(!ensure(&env)?, "second call must be a no-op");
        Ok(())
    }
}
