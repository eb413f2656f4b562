// Intended public API surface for `vx-core`.
//
// This module exists to keep the crate root small and make it explicit which
// types/functions are part of the stable interface used by the CLI.

pub use crate::core::cancel::CancelToken;
pub use crate::core::commands::{
    env_status, run_targets, scan_targets, sync_env, RunRequest, ScanRequest, SyncRequest,
};
pub use crate::core::config::context::CommandContext;
pub use crate::core::config::{
    Config, EnvTable, GlobalOptions, Manifest, DEFAULT_ENV_DIR, MANIFEST_FILE,
};
pub use crate::core::errors::{EnvError, InstallError};
pub use crate::core::exec::{run_all, summarize, RunSummary, TaskReport, TaskStatus};
pub use crate::core::outcome::{
    format_status_message, to_json_response, CommandGroup, CommandInfo, CommandStatus,
    ExecutionOutcome,
};
pub use crate::core::pip::{install, installed_packages};
pub use crate::core::process::{run_command, run_in_env, EnvRun, RunOutput};
pub use crate::core::provision::ensure;
pub use crate::core::python::detect_host_interpreter;
pub use crate::core::scan::scan_files;
