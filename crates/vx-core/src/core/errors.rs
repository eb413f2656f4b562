/// Environment provisioning and lookup failures. All fatal: they abort the
/// run before any target executes.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("[VX100] failed to create virtualenv at {path}: {detail}")]
    CreationFailed { path: String, detail: String },
    #[error("[VX101] virtualenv python missing at {path}; the environment may be partially created")]
    InterpreterMissing { path: String },
    #[error("[VX102] no host python interpreter found; install python or set VX_PYTHON")]
    NoHostInterpreter,
}

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("[VX200] pip install exited with status {code}: {stderr}")]
    PipFailed { code: i32, stderr: String },
}

impl EnvError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            EnvError::CreationFailed { .. } => "VX100",
            EnvError::InterpreterMissing { .. } => "VX101",
            EnvError::NoHostInterpreter => "VX102",
        }
    }
}
