//! Solve orchestration and the two solver backends.
//!
//! The orchestrator runs whichever backend applies inside a spawned task and
//! races it against a wall-clock ceiling slightly more generous than the
//! backend's own internal budget. On expiry the task is aborted (taking any
//! bridge subprocess with it) and a timed-out outcome is returned; a stuck
//! backend can never hang the caller. Backend crashes and malformed output
//! fall through to the randomized fallback rather than aborting the request.

pub mod bridge;
pub mod fallback;
pub mod wire;

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::builder::SchedulingModel;
use crate::models::BackendKind;

use bridge::{BridgeError, CpSatBridge};
use fallback::RandomFallback;

/// Extra wall-clock headroom the orchestrator grants beyond the backend's
/// internal budget before it terminates the solve (105 s budget, 110 s
/// ceiling by default).
pub const ORCHESTRATOR_GRACE: Duration = Duration::from_secs(5);

/// Options for one solve call.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// The backend's internal solve budget.
    pub time_budget: Duration,
    /// Parallelism hint forwarded to the backend.
    pub parallelism_hint: u32,
    /// Whether the backend should log search progress.
    pub verbose: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(105),
            parallelism_hint: 8,
            verbose: false,
        }
    }
}

impl SolveOptions {
    /// The orchestrator-level wall-clock ceiling for this solve.
    pub fn ceiling(&self) -> Duration {
        self.time_budget + ORCHESTRATOR_GRACE
    }
}

/// One assignment as reported by a backend, before post-processing.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedAssignment {
    /// The shift being staffed.
    pub shift_id: String,
    /// The employee assigned to it.
    pub employee_id: String,
}

/// Uniform solve metadata, shared by both backends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendMetadata {
    /// Backend-measured solve time, in milliseconds.
    pub solve_time_ms: u64,
    /// Number of constraints the backend worked with.
    pub constraints_added: usize,
    /// Number of variables the backend worked with.
    pub variables_created: usize,
    /// Whether the solution was proven optimal.
    pub optimal: bool,
}

/// Raw backend output, normalized to one shape for uniform downstream
/// handling.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSolution {
    /// Whether the backend claims a feasible solution. Never trusted as-is;
    /// the post-processor re-validates independently.
    pub success: bool,
    /// The reported assignments.
    pub assignments: Vec<SolvedAssignment>,
    /// Backend-side violation notes, informational only.
    pub violations: Vec<String>,
    /// Solve metadata.
    pub metadata: BackendMetadata,
}

impl From<wire::BridgeResponse> for BackendSolution {
    fn from(response: wire::BridgeResponse) -> Self {
        Self {
            success: response.success,
            assignments: response
                .assignments
                .into_iter()
                .map(|a| SolvedAssignment {
                    shift_id: a.shift_id,
                    employee_id: a.employee_id,
                })
                .collect(),
            violations: response.violations,
            metadata: BackendMetadata {
                solve_time_ms: response.metadata.solve_time,
                constraints_added: response.metadata.constraints_added,
                variables_created: response.metadata.variables_created,
                optimal: response.metadata.optimal,
            },
        }
    }
}

/// What the orchestrator resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A backend produced output.
    Solved {
        /// The backend's solution.
        solution: BackendSolution,
        /// Which backend produced it.
        backend: BackendKind,
    },
    /// The orchestrator ceiling or the backend's cooperative budget expired.
    TimedOut,
    /// The solve task itself failed (panic or abort).
    Failed {
        /// Why the task failed.
        reason: String,
    },
}

/// Runs the backend chain for one solve call under the orchestrator ceiling.
///
/// The model is moved into an isolated task that shares no mutable state with
/// the caller. If a bridge is supplied it is tried first; bridge failures
/// other than a cooperative timeout fall through to the fallback.
pub async fn run_solve(
    model: SchedulingModel,
    bridge: Option<CpSatBridge>,
    fallback: RandomFallback,
    options: &SolveOptions,
) -> SolveOutcome {
    let ceiling = options.ceiling();
    let options = options.clone();
    race_with_ceiling(
        ceiling,
        async move { execute(&model, bridge, fallback, &options).await },
    )
    .await
}

/// Races a solve future against the wall-clock ceiling.
///
/// On expiry the spawned task is aborted before returning, which drops any
/// bridge subprocess (spawned with kill-on-drop) rather than leaving it
/// running.
pub async fn race_with_ceiling<F>(ceiling: Duration, solve: F) -> SolveOutcome
where
    F: Future<Output = SolveOutcome> + Send + 'static,
{
    let mut handle = tokio::spawn(solve);
    tokio::select! {
        joined = &mut handle => match joined {
            Ok(outcome) => outcome,
            Err(err) if err.is_panic() => SolveOutcome::Failed {
                reason: "solver task panicked".to_string(),
            },
            Err(_) => SolveOutcome::Failed {
                reason: "solver task was cancelled".to_string(),
            },
        },
        _ = tokio::time::sleep(ceiling) => {
            handle.abort();
            SolveOutcome::TimedOut
        }
    }
}

async fn execute(
    model: &SchedulingModel,
    bridge: Option<CpSatBridge>,
    mut fallback: RandomFallback,
    options: &SolveOptions,
) -> SolveOutcome {
    if let Some(bridge) = bridge {
        match bridge.solve(model, options).await {
            Ok(solution) => {
                return SolveOutcome::Solved {
                    solution,
                    backend: BackendKind::Bridge,
                };
            }
            Err(BridgeError::CooperativeTimeout) => return SolveOutcome::TimedOut,
            Err(err) => {
                warn!(error = %err, "CP-SAT bridge failed, falling back to randomized solver");
            }
        }
    }

    let solution = fallback.solve(model);
    SolveOutcome::Solved {
        solution,
        backend: BackendKind::Fallback,
    }
}
