//! Best-effort delegation to an out-of-process CP-SAT optimizer.
//!
//! At most one subprocess is spawned per solve call. The request document is
//! written to the child's stdin in a single bounded write, the stream is
//! closed, and stdout is read to end-of-stream. Stderr is logged for
//! operational visibility and never parsed for correctness.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::builder::SchedulingModel;

use super::wire;
use super::{BackendSolution, SolveOptions};

/// Interpreter invocation names tried, in order, by the availability probe.
pub const DEFAULT_INTERPRETERS: &[&str] = &["python3", "python"];

/// Default location of the solver script, relative to the working directory.
pub const DEFAULT_SOLVER_SCRIPT: &str = "scripts/cp_sat_solver.py";

/// Exit code by which the subprocess signals that its own internal solve
/// budget expired before any solution was found. Distinct from a crash.
pub const COOPERATIVE_TIMEOUT_EXIT: i32 = 124;

static PROBE_RESULT: OnceCell<Option<String>> = OnceCell::const_new();

/// Ways the bridge can fail. None of these abort the request: a cooperative
/// timeout is surfaced as a timed-out solve, everything else falls through to
/// the fallback solver.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Spawning or talking to the subprocess failed at the I/O level.
    #[error("solver subprocess I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The subprocess signalled that its internal solve budget expired.
    #[error("solver subprocess reported a cooperative timeout")]
    CooperativeTimeout,

    /// The subprocess exited with a non-zero status not attributable to a
    /// cooperative timeout.
    #[error("solver subprocess exited with status {code}")]
    Crashed {
        /// The exit code, or -1 when the process died without one.
        code: i32,
    },

    /// The subprocess's output was not a valid response document.
    #[error("solver subprocess produced unparsable output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

/// Tries each candidate interpreter in order and returns the first one that
/// answers a `--version` probe successfully.
pub async fn probe_interpreter(candidates: &[String]) -> Option<String> {
    for candidate in candidates {
        let status = Command::new(candidate)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        match status {
            Ok(status) if status.success() => {
                debug!(interpreter = %candidate, "solver interpreter available");
                return Some(candidate.clone());
            }
            _ => {
                debug!(interpreter = %candidate, "solver interpreter not available");
            }
        }
    }
    None
}

/// Like [`probe_interpreter`], but cached for the process lifetime.
///
/// The cache is a pure optimization: re-probing is always safe, and the first
/// caller's candidate list wins for the rest of the process.
pub async fn probe_interpreter_cached(candidates: &[String]) -> Option<String> {
    PROBE_RESULT
        .get_or_init(|| probe_interpreter(candidates))
        .await
        .clone()
}

/// A handle on one external optimizer invocation target.
#[derive(Debug, Clone)]
pub struct CpSatBridge {
    interpreter: String,
    script: PathBuf,
}

impl CpSatBridge {
    /// Creates a bridge that invokes `interpreter script`.
    pub fn new(interpreter: impl Into<String>, script: impl AsRef<Path>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.as_ref().to_path_buf(),
        }
    }

    /// Runs one solve through the subprocess.
    ///
    /// The child is spawned with kill-on-drop, so if the orchestrator aborts
    /// the surrounding task the subprocess dies with it.
    pub async fn solve(
        &self,
        model: &SchedulingModel,
        options: &SolveOptions,
    ) -> Result<BackendSolution, BridgeError> {
        let request = wire::encode_request(model, options);
        let payload = serde_json::to_vec(&request)?;

        let mut child = Command::new(&self.interpreter)
            .arg(&self.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;

        for line in String::from_utf8_lossy(&output.stderr).lines() {
            debug!(target: "shift_engine::bridge::stderr", "{line}");
        }

        if !output.status.success() {
            return match output.status.code() {
                Some(COOPERATIVE_TIMEOUT_EXIT) => Err(BridgeError::CooperativeTimeout),
                code => Err(BridgeError::Crashed {
                    code: code.unwrap_or(-1),
                }),
            };
        }

        let response: wire::BridgeResponse = serde_json::from_slice(&output.stdout)?;
        Ok(response.into())
    }
}
