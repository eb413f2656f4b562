use std::path::PathBuf;

use anyhow::Result;
use serde_json::{json, Value};

use crate::core::commands::sync::{provision_and_install, PipelineFlow};
use crate::core::config::context::CommandContext;
use crate::core::config::MANIFEST_FILE;
use crate::core::exec::{run_all, summarize, TaskReport, TaskStatus};
use crate::core::outcome::ExecutionOutcome;

#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub files: Vec<PathBuf>,
}

/// Full pipeline: provision → scan → probe → install, then one concurrent
/// execution unit per target.
pub fn run_targets(ctx: &CommandContext, request: &RunRequest) -> Result<ExecutionOutcome> {
    let env = ctx.env_handle();
    let files = ctx.resolve_targets(&request.files);

    let report = match provision_and_install(ctx, &env, &files) {
        PipelineFlow::Completed(report) => report,
        PipelineFlow::Halted(outcome) => return Ok(outcome),
    };

    if files.is_empty() {
        return Ok(ExecutionOutcome::success(
            "environment ready; no targets configured",
            json!({
                "env": env.root().display().to_string(),
                "created": report.env_created,
                "targets": [],
                "hint": format!("list target scripts in {MANIFEST_FILE} or pass them as arguments"),
            }),
        ));
    }

    let reports = run_all(&env, &files, ctx.cancel());
    let summary = summarize(&reports);

    if summary.interrupted > 0 || ctx.cancel().is_cancelled() {
        return Ok(ExecutionOutcome::success(
            "interrupt received; shutting down",
            json!({
                "interrupted": true,
                "summary": summary,
                "tasks": task_details(&reports),
            }),
        ));
    }

    let message = format!(
        "ran {} target(s): {} succeeded, {} failed",
        reports.len(),
        summary.succeeded,
        summary.failed
    );
    Ok(ExecutionOutcome::success(
        message,
        json!({
            "env": env.root().display().to_string(),
            "created": report.env_created,
            "missing": &report.missing,
            "summary": summary,
            "tasks": task_details(&reports),
        }),
    ))
}

fn task_details(reports: &[TaskReport]) -> Vec<Value> {
    reports
        .iter()
        .map(|report| {
            let status = match &report.status {
                TaskStatus::Completed(code) => json!({ "exit_code": code }),
                TaskStatus::Failed(error) => json!({ "error": error }),
                TaskStatus::Interrupted => json!({ "interrupted": true }),
            };
            json!({ "file": report.file.display().to_string(), "status": status })
        })
        .collect()
}
