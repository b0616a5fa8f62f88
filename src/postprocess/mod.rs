//! Solution post-processing: normalization, independent re-validation, and
//! the deterministic manager pass.
//!
//! Whichever backend ran, its output is flattened into a de-duplicated
//! shift-to-employees mapping, every staffing rule is re-checked against that
//! mapping (solver-reported success is never trusted), and managers are
//! assigned by their level-1 preferences in a separate pass that runs even
//! when the solve itself failed.

mod manager_pass;
mod violations;

pub use manager_pass::apply_manager_pass;
pub use violations::detect_violations;

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use crate::models::{
    Assignment, BackendKind, Employee, PreferenceLevel, PreferenceSet, Shift, SolveDiagnostics,
    SolveResult, Violation, ViolationCategory,
};
use crate::solver::{SolveOutcome, SolvedAssignment};

/// De-duplicated mapping of shift id to the set of assigned employee ids.
///
/// Ordered on both axes so results are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftAssignments {
    by_shift: BTreeMap<String, BTreeSet<String>>,
}

impl ShiftAssignments {
    /// Adds one assignment. Returns false if it was already present.
    pub fn insert(&mut self, shift_id: impl Into<String>, employee_id: impl Into<String>) -> bool {
        self.by_shift
            .entry(shift_id.into())
            .or_default()
            .insert(employee_id.into())
    }

    /// The employees assigned to a shift, if any.
    pub fn assigned(&self, shift_id: &str) -> Option<&BTreeSet<String>> {
        self.by_shift.get(shift_id)
    }

    /// Number of employees assigned to a shift.
    pub fn assigned_count(&self, shift_id: &str) -> usize {
        self.by_shift.get(shift_id).map_or(0, BTreeSet::len)
    }

    /// Whether an employee is assigned to a shift.
    pub fn contains(&self, shift_id: &str, employee_id: &str) -> bool {
        self.by_shift
            .get(shift_id)
            .is_some_and(|set| set.contains(employee_id))
    }

    /// Iterates over `(shift_id, employees)` in shift-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.by_shift.iter()
    }

    /// Total number of assignments across all shifts.
    pub fn total(&self) -> usize {
        self.by_shift.values().map(BTreeSet::len).sum()
    }

    /// Whether no assignments exist at all.
    pub fn is_empty(&self) -> bool {
        self.by_shift.values().all(BTreeSet::is_empty)
    }
}

/// Flattens reported backend assignments into a de-duplicated mapping.
pub fn flatten(assignments: &[SolvedAssignment]) -> ShiftAssignments {
    let mut map = ShiftAssignments::default();
    for assignment in assignments {
        map.insert(assignment.shift_id.clone(), assignment.employee_id.clone());
    }
    map
}

/// Request-scoped context the post-processor needs alongside the raw backend
/// outcome.
pub struct PostProcessContext<'a> {
    /// The full roster, managers included.
    pub employees: &'a [Employee],
    /// The shift horizon.
    pub shifts: &'a [Shift],
    /// The preference lookup.
    pub preferences: &'a PreferenceSet,
    /// Variable count of the built model (0 when no model was built).
    pub variable_count: usize,
    /// Constraint count of the built model (0 when no model was built).
    pub constraint_count: usize,
    /// Engine-measured wall-clock time of the solve, in milliseconds.
    pub elapsed_ms: u64,
}

/// Turns a raw orchestrator outcome into the final [`SolveResult`].
pub fn finalize(outcome: &SolveOutcome, ctx: &PostProcessContext<'_>) -> SolveResult {
    match outcome {
        SolveOutcome::Solved { solution, backend } => {
            let map = flatten(&solution.assignments);
            let non_managers: Vec<Employee> = ctx
                .employees
                .iter()
                .filter(|e| e.is_schedulable())
                .cloned()
                .collect();

            let mut violations = detect_violations(&map, &non_managers, ctx.shifts);
            if solution.success && map.is_empty() {
                violations.push(Violation::new(
                    ViolationCategory::NoAssignments,
                    "Solver reported success but produced no assignments",
                ));
            }
            if !solution.success {
                violations.push(Violation::new(
                    ViolationCategory::SchedulingFailed,
                    "No feasible solution found for non-manager employees",
                ));
            }

            assemble(
                map,
                solution.success,
                violations,
                *backend,
                solution.metadata.optimal,
                false,
                ctx,
            )
        }
        SolveOutcome::TimedOut => {
            let violations = vec![Violation::new(
                ViolationCategory::SchedulingFailed,
                "Solve terminated: wall-clock budget exceeded",
            )];
            assemble(
                ShiftAssignments::default(),
                false,
                violations,
                BackendKind::None,
                false,
                true,
                ctx,
            )
        }
        SolveOutcome::Failed { reason } => {
            let violations = vec![Violation::new(
                ViolationCategory::SchedulingFailed,
                reason.clone(),
            )];
            assemble(
                ShiftAssignments::default(),
                false,
                violations,
                BackendKind::None,
                false,
                false,
                ctx,
            )
        }
    }
}

/// Builds a failed result without running any backend, for requests rejected
/// by pre-model checks. The manager pass still runs.
pub fn skipped(violation: Violation, ctx: &PostProcessContext<'_>) -> SolveResult {
    assemble(
        ShiftAssignments::default(),
        false,
        vec![violation],
        BackendKind::None,
        false,
        false,
        ctx,
    )
}

fn assemble(
    mut map: ShiftAssignments,
    solver_success: bool,
    violations: Vec<Violation>,
    backend: BackendKind,
    optimal: bool,
    timed_out: bool,
    ctx: &PostProcessContext<'_>,
) -> SolveResult {
    // The manager pass is unconditional: it runs even when the core solve
    // failed, as long as a shift list exists.
    if !ctx.shifts.is_empty() {
        apply_manager_pass(&mut map, ctx.employees, ctx.shifts, ctx.preferences);
    }

    let success = solver_success && violations.is_empty();
    let assigned_at = Utc::now();
    let assignments: Vec<Assignment> = map
        .iter()
        .flat_map(|(shift_id, employee_ids)| {
            employee_ids.iter().map(move |employee_id| Assignment {
                shift_id: shift_id.clone(),
                employee_id: employee_id.clone(),
                assigned_at,
                quality_score: quality_score(ctx.preferences, employee_id, shift_id),
            })
        })
        .collect();

    let mut report = vec![
        format!("Solved in {}ms", ctx.elapsed_ms),
        format!("Variables: {}", ctx.variable_count),
        format!("Constraints: {}", ctx.constraint_count),
        format!("Optimal: {optimal}"),
        format!("Status: {}", if solver_success { "SUCCESS" } else { "FAILED" }),
    ];
    if violations.is_empty() {
        report.push("No constraint violations detected for non-manager employees".to_string());
    } else {
        report.push(format!(
            "Found {} violations for non-manager employees:",
            violations.len()
        ));
        for violation in &violations {
            report.push(format!("  - {}", violation.message));
        }
    }
    report.push(format!(
        "Total assignments: {} (including managers)",
        assignments.len()
    ));

    SolveResult {
        success,
        assignments,
        violations,
        diagnostics: SolveDiagnostics {
            solve_time_ms: ctx.elapsed_ms,
            variable_count: ctx.variable_count,
            constraint_count: ctx.constraint_count,
            optimal,
            backend,
            timed_out,
        },
        report,
    }
}

/// Advisory quality score for one assignment, from the matched preference.
fn quality_score(preferences: &PreferenceSet, employee_id: &str, shift_id: &str) -> u8 {
    match preferences.level(employee_id, shift_id) {
        Some(PreferenceLevel::Preferred) => 100,
        Some(PreferenceLevel::Possible) => 50,
        Some(PreferenceLevel::Unavailable) => 0,
        None => 25,
    }
}
