use anyhow::Result;
use serde_json::{json, Value};
use tracing::warn;

use crate::core::config::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;
use crate::core::pip::installed_packages;

/// Read-only report: env existence, interpreter health, installed count.
pub fn env_status(ctx: &CommandContext) -> Result<ExecutionOutcome> {
    let env = ctx.env_handle();
    let root = env.root().display().to_string();

    if !env.exists() {
        return Ok(ExecutionOutcome::success(
            format!("environment {root} does not exist"),
            json!({
                "env": root,
                "exists": false,
                "hint": "run `vx sync` to create it",
            }),
        ));
    }

    if !env.interpreter_exists() {
        return Ok(ExecutionOutcome::user_error(
            format!("environment {root} has no python interpreter"),
            json!({
                "env": root,
                "exists": true,
                "interpreter": Value::Null,
                "reason": "missing_interpreter",
                "hint": "delete the directory and run `vx sync` to recreate it",
            }),
        ));
    }

    let interpreter = env.python_path().display().to_string();
    let installed = match installed_packages(&env, ctx.cancel()) {
        Ok(packages) => Some(packages),
        Err(err) => {
            warn!("pip freeze failed: {err:#}");
            None
        }
    };

    let message = match &installed {
        Some(packages) => {
            format!("environment {root} ready ({} package(s) installed)", packages.len())
        }
        None => format!("environment {root} ready"),
    };
    Ok(ExecutionOutcome::success(
        message,
        json!({
            "env": root,
            "exists": true,
            "interpreter": interpreter,
            "installed": installed,
        }),
    ))
}
