mod run;
mod scan;
mod status;
mod sync;

pub use run::{run_targets, RunRequest};
pub use scan::{scan_targets, ScanRequest};
pub use status::env_status;
pub use sync::{sync_env, SyncRequest};

use serde_json::json;

use crate::core::outcome::ExecutionOutcome;

/// Interrupts end the run on the success path, never as an error.
pub(crate) fn interrupted_outcome() -> ExecutionOutcome {
    ExecutionOutcome::success(
        "interrupt received; shutting down",
        json!({ "interrupted": true }),
    )
}
