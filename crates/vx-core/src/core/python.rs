use anyhow::{anyhow, Result};
use which::which;

use crate::core::errors::EnvError;

/// Detects the host interpreter used to create new virtualenvs.
///
/// # Errors
///
/// Returns [`EnvError::NoHostInterpreter`] when no compatible interpreter can
/// be found, or an error when the detected path is not valid UTF-8.
pub fn detect_host_interpreter() -> Result<String> {
    if let Ok(explicit) = std::env::var("VX_PYTHON") {
        return Ok(explicit);
    }

    for candidate in ["python3", "python"] {
        if let Ok(path) = which(candidate) {
            return path
                .into_os_string()
                .into_string()
                .map_err(|_| anyhow!("non-utf8 path"));
        }
    }

    Err(EnvError::NoHostInterpreter.into())
}
