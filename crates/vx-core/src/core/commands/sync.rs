use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use serde_json::{json, Value};
use vx_domain::{missing_modules, EnvHandle};

use crate::core::commands::interrupted_outcome;
use crate::core::config::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;
use crate::core::pip::{install, installed_packages};
use crate::core::provision::ensure;
use crate::core::scan::scan_files;

#[derive(Debug, Clone, Default)]
pub struct SyncRequest {
    pub files: Vec<PathBuf>,
}

pub(crate) struct SyncReport {
    pub(crate) env_created: bool,
    pub(crate) referenced: BTreeSet<String>,
    pub(crate) missing: BTreeSet<String>,
    pub(crate) installed: bool,
}

pub(crate) enum PipelineFlow {
    Completed(SyncReport),
    /// Halted early: an error or interrupt outcome to surface as-is.
    Halted(ExecutionOutcome),
}

/// Sequential front half of the pipeline: provision → scan → probe →
/// install. All four stages finish before anything executes.
pub(crate) fn provision_and_install(
    ctx: &CommandContext,
    env: &EnvHandle,
    files: &[PathBuf],
) -> PipelineFlow {
    use PipelineFlow::Halted;

    let env_created = match ensure(env) {
        Ok(created) => created,
        Err(err) => {
            return Halted(ExecutionOutcome::failure(
                format!("{err:#}"),
                json!({ "reason": "provisioning_failed" }),
            ))
        }
    };
    if ctx.cancel().is_cancelled() {
        return Halted(interrupted_outcome());
    }

    let referenced = match scan_files(files) {
        Ok(modules) => modules,
        Err(err) => {
            return Halted(ExecutionOutcome::user_error(
                format!("{err:#}"),
                json!({ "reason": "scan_failed" }),
            ))
        }
    };

    let installed_set = match installed_packages(env, ctx.cancel()) {
        Ok(packages) => packages,
        Err(err) => {
            return Halted(ExecutionOutcome::failure(
                format!("{err:#}"),
                json!({ "reason": "probe_failed" }),
            ))
        }
    };
    if ctx.cancel().is_cancelled() {
        return Halted(interrupted_outcome());
    }

    let missing = missing_modules(&referenced, &installed_set);
    let installed = match install(env, &missing, ctx.cancel()) {
        Ok(ran) => ran,
        Err(err) => {
            return Halted(ExecutionOutcome::failure(
                format!("{err:#}"),
                json!({ "reason": "install_failed", "missing": &missing }),
            ))
        }
    };
    if ctx.cancel().is_cancelled() {
        return Halted(interrupted_outcome());
    }

    PipelineFlow::Completed(SyncReport {
        env_created,
        referenced,
        missing,
        installed,
    })
}

/// Provision the environment and install missing imports, without running
/// anything.
pub fn sync_env(ctx: &CommandContext, request: &SyncRequest) -> Result<ExecutionOutcome> {
    let env = ctx.env_handle();
    let files = ctx.resolve_targets(&request.files);
    let report = match provision_and_install(ctx, &env, &files) {
        PipelineFlow::Completed(report) => report,
        PipelineFlow::Halted(outcome) => return Ok(outcome),
    };

    let message = if files.is_empty() {
        "environment ready; no targets configured".to_string()
    } else if report.installed {
        format!("installed {} missing module(s)", report.missing.len())
    } else {
        "all referenced modules already installed".to_string()
    };
    Ok(ExecutionOutcome::success(
        message,
        sync_details(&env, &report, &files),
    ))
}

fn sync_details(env: &EnvHandle, report: &SyncReport, files: &[PathBuf]) -> Value {
    json!({
        "env": env.root().display().to_string(),
        "created": report.env_created,
        "files": files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>(),
        "referenced": &report.referenced,
        "missing": &report.missing,
    })
}
