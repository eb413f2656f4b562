use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;

use serde::Serialize;
use tracing::debug;
use vx_domain::EnvHandle;

use crate::core::cancel::CancelToken;
use crate::core::process::{run_in_env, EnvRun};

/// Result of one execution unit.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub file: PathBuf,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// The script ran to completion; carries its exit code.
    Completed(i32),
    /// The invocation itself failed before or during the run.
    Failed(String),
    /// The run was cancelled and the child terminated.
    Interrupted,
}

/// Run every target concurrently inside `env`, one OS thread per file, and
/// wait for all of them.
///
/// Per-task outcomes are collected, never discarded: a failing unit does not
/// stop its siblings. Captured stdout/stderr are echoed to the parent
/// streams as each unit finishes, with no ordering guarantee between units.
/// There is no concurrency cap.
pub fn run_all(env: &EnvHandle, files: &[PathBuf], cancel: &CancelToken) -> Vec<TaskReport> {
    thread::scope(|scope| {
        let handles: Vec<_> = files
            .iter()
            .map(|file| (file.clone(), scope.spawn(move || run_one(env, file, cancel))))
            .collect();

        handles
            .into_iter()
            .map(|(file, handle)| {
                let status = handle
                    .join()
                    .unwrap_or_else(|_| TaskStatus::Failed("execution thread panicked".to_string()));
                TaskReport { file, status }
            })
            .collect()
    })
}

fn run_one(env: &EnvHandle, file: &Path, cancel: &CancelToken) -> TaskStatus {
    debug!(file = %file.display(), "starting execution unit");
    let args = vec![file.display().to_string()];
    match run_in_env(env, &args, cancel) {
        Ok(EnvRun::Completed(output)) => {
            if !output.stdout.is_empty() {
                print!("{}", output.stdout);
                io::stdout().flush().ok();
            }
            if !output.stderr.is_empty() {
                eprint!("{}", output.stderr);
            }
            TaskStatus::Completed(output.code)
        }
        Ok(EnvRun::Interrupted) => TaskStatus::Interrupted,
        Err(err) => TaskStatus::Failed(format!("{err:#}")),
    }
}

/// Post-join aggregate of a parallel run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub interrupted: usize,
}

#[must_use]
pub fn summarize(reports: &[TaskReport]) -> RunSummary {
    let mut summary = RunSummary::default();
    for report in reports {
        match &report.status {
            TaskStatus::Completed(0) => summary.succeeded += 1,
            TaskStatus::Completed(_) | TaskStatus::Failed(_) => summary.failed += 1,
            TaskStatus::Interrupted => summary.interrupted += 1,
        }
    }
    summary
}
