use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use vx_domain::EnvHandle;

use crate::core::cancel::CancelToken;
use crate::core::errors::EnvError;

const DEFAULT_MAX_CAPTURE_BYTES: usize = 1024 * 1024;
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

fn max_capture_bytes() -> usize {
    std::env::var("VX_MAX_CAPTURE_BYTES")
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_MAX_CAPTURE_BYTES)
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Outcome of a cancellable invocation inside an environment.
#[derive(Debug, Clone)]
pub enum EnvRun {
    Completed(RunOutput),
    /// The cancellation token tripped; the child was killed, not abandoned.
    Interrupted,
}

/// Execute a program and capture stdout/stderr.
///
/// Non-zero exit is not an error; the code is returned for the caller to
/// interpret. This call blocks for the child's full runtime.
///
/// # Errors
///
/// Returns an error when the program cannot be spawned or the I/O streams
/// cannot be read entirely.
pub fn run_command(program: &str, args: &[String], cwd: &Path) -> Result<RunOutput> {
    let mut child = spawn_captured(program, args, cwd)?;
    let (stdout_handle, stderr_handle) = capture_streams(&mut child, program)?;

    let status = child
        .wait()
        .with_context(|| format!("failed to wait for {program}"))?;
    let stdout = join_capture(stdout_handle, "stdout")?;
    let stderr = join_capture(stderr_handle, "stderr")?;
    Ok(RunOutput {
        code: status.code().unwrap_or(-1),
        stdout,
        stderr,
    })
}

/// Execute `args` under the environment's interpreter, killing the child if
/// `cancel` trips while it runs.
///
/// # Errors
///
/// Fails with [`EnvError::InterpreterMissing`] when the environment's python
/// is not on disk (guards against partially created environments, distinct
/// from the environment directory itself missing), or when the child cannot
/// be spawned or its streams read.
pub fn run_in_env(env: &EnvHandle, args: &[String], cancel: &CancelToken) -> Result<EnvRun> {
    let python = env.python_path();
    if !env.interpreter_exists() {
        return Err(EnvError::InterpreterMissing {
            path: python.display().to_string(),
        }
        .into());
    }
    if cancel.is_cancelled() {
        return Ok(EnvRun::Interrupted);
    }

    let program = python.display().to_string();
    tracing::debug!(%program, ?args, "running in environment");
    let mut child = spawn_captured(&program, args, Path::new("."))?;
    let (stdout_handle, stderr_handle) = capture_streams(&mut child, &program)?;

    let code = loop {
        if cancel.is_cancelled() {
            child.kill().ok();
            child.wait().ok();
            break None;
        }
        match child
            .try_wait()
            .with_context(|| format!("failed to wait for {program}"))?
        {
            Some(status) => break Some(status.code().unwrap_or(-1)),
            None => thread::sleep(CANCEL_POLL_INTERVAL),
        }
    };

    let stdout = join_capture(stdout_handle, "stdout")?;
    let stderr = join_capture(stderr_handle, "stderr")?;
    match code {
        Some(code) => Ok(EnvRun::Completed(RunOutput {
            code,
            stdout,
            stderr,
        })),
        None => Ok(EnvRun::Interrupted),
    }
}

type CaptureHandle = thread::JoinHandle<std::io::Result<(String, bool)>>;

fn spawn_captured(program: &str, args: &[String], cwd: &Path) -> Result<Child> {
    Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start {program}"))
}

fn capture_streams(child: &mut Child, program: &str) -> Result<(CaptureHandle, CaptureHandle)> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("stdout missing for {program}"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!("stderr missing for {program}"))?;
    let limit = max_capture_bytes();
    let stdout_handle = thread::spawn(move || read_capped(stdout, limit));
    let stderr_handle = thread::spawn(move || read_capped(stderr, limit));
    Ok((stdout_handle, stderr_handle))
}

fn join_capture(handle: CaptureHandle, stream: &str) -> Result<String> {
    let (mut text, truncated) = handle
        .join()
        .map_err(|_| anyhow::anyhow!("{stream} capture thread panicked"))?
        .with_context(|| format!("failed to read child {stream}"))?;
    if truncated {
        text.push_str("\n[...truncated...]\n");
    }
    Ok(text)
}

/// Drains the reader fully but keeps at most `limit` bytes of it.
fn read_capped(mut reader: impl Read, limit: usize) -> std::io::Result<(String, bool)> {
    let mut buffer = Vec::new();
    let mut truncated = false;
    let mut chunk = [0u8; 8192];
    loop {
        let read = reader.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        if buffer.len() < limit {
            let take = (limit - buffer.len()).min(read);
            buffer.extend_from_slice(&chunk[..take]);
            truncated |= take < read;
        } else {
            truncated = true;
        }
    }
    Ok((String::from_utf8_lossy(&buffer).to_string(), truncated))
}
