use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use crate::core::config::context::CommandContext;
use crate::core::config::MANIFEST_FILE;
use crate::core::outcome::ExecutionOutcome;
use crate::core::scan::scan_files;

#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    pub files: Vec<PathBuf>,
}

/// Print the modules the targets reference, without touching the env.
pub fn scan_targets(ctx: &CommandContext, request: &ScanRequest) -> Result<ExecutionOutcome> {
    let files = ctx.resolve_targets(&request.files);
    if files.is_empty() {
        return Ok(ExecutionOutcome::user_error(
            "no files to scan",
            json!({
                "reason": "no_targets",
                "hint": format!("list target scripts in {MANIFEST_FILE} or pass them as arguments"),
            }),
        ));
    }

    match scan_files(&files) {
        Ok(modules) => Ok(ExecutionOutcome::success(
            format!(
                "{} module(s) referenced across {} file(s)",
                modules.len(),
                files.len()
            ),
            json!({
                "files": files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>(),
                "modules": &modules,
            }),
        )),
        Err(err) => Ok(ExecutionOutcome::user_error(
            format!("{err:#}"),
            json!({ "reason": "scan_failed" }),
        )),
    }
}
