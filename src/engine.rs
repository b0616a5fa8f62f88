//! The schedule engine: the single entry point tying validation, model
//! building, solve orchestration, and post-processing together.
//!
//! Only malformed input surfaces as `Err`. Solver failures, infeasibility,
//! and timeouts all come back as a failed [`SolveResult`] with diagnostics,
//! and the manager pass runs on every one of those paths.

use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::builder::build_model;
use crate::config::SolverTuning;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    PreferenceSet, ScheduleRequest, SolveResult, Violation, ViolationCategory,
};
use crate::postprocess::{self, PostProcessContext};
use crate::solver::bridge::{CpSatBridge, probe_interpreter_cached};
use crate::solver;

/// The shift-assignment engine.
///
/// Holds the pipeline tuning; each call to [`ScheduleEngine::generate_schedule`]
/// is independent and shares no mutable state with other calls.
///
/// # Example
///
/// ```no_run
/// use shift_engine::engine::ScheduleEngine;
/// use shift_engine::models::ScheduleRequest;
///
/// # async fn run(request: ScheduleRequest) -> Result<(), shift_engine::error::EngineError> {
/// let engine = ScheduleEngine::new();
/// let result = engine.generate_schedule(&request).await?;
/// println!("success: {}, assignments: {}", result.success, result.assignments.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    tuning: SolverTuning,
}

impl ScheduleEngine {
    /// Creates an engine with production tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with explicit tuning.
    pub fn with_tuning(tuning: SolverTuning) -> Self {
        Self { tuning }
    }

    /// The active tuning.
    pub fn tuning(&self) -> &SolverTuning {
        &self.tuning
    }

    /// Generates a schedule for one request.
    ///
    /// Returns `Err` only for malformed input (empty employee or shift lists,
    /// or a shift whose minimum exceeds its maximum). Everything else,
    /// including a backend that crashes or never answers, produces an `Ok`
    /// result describing what happened.
    pub async fn generate_schedule(&self, request: &ScheduleRequest) -> EngineResult<SolveResult> {
        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            employees = request.employees.len(),
            shifts = request.shifts.len(),
            preferences = request.preferences.len(),
            "Processing schedule request"
        );

        validate(request)?;

        let preferences = PreferenceSet::from_records(&request.preferences);
        let started = Instant::now();

        let schedulable_ids: Vec<&str> = request
            .employees
            .iter()
            .filter(|e| e.is_schedulable())
            .map(|e| e.id.as_str())
            .collect();

        if !preferences.any_signup_among(&schedulable_ids) {
            warn!(
                correlation_id = %correlation_id,
                "No schedulable employee has signed up for any shift"
            );
            let ctx = PostProcessContext {
                employees: &request.employees,
                shifts: &request.shifts,
                preferences: &preferences,
                variable_count: 0,
                constraint_count: 0,
                elapsed_ms: started.elapsed().as_millis() as u64,
            };
            return Ok(postprocess::skipped(
                Violation::new(
                    ViolationCategory::NoSignups,
                    "No employees have signed up for any shifts",
                ),
                &ctx,
            ));
        }

        let model = build_model(&request.employees, &request.shifts, &preferences);
        let variable_count = model.variable_count();
        let constraint_count = model.constraint_count();
        info!(
            correlation_id = %correlation_id,
            variables = variable_count,
            constraints = constraint_count,
            "Optimization model built"
        );

        let bridge = match probe_interpreter_cached(&self.tuning.interpreter_candidates).await {
            Some(interpreter) => Some(CpSatBridge::new(interpreter, &self.tuning.solver_script)),
            None => {
                warn!(
                    correlation_id = %correlation_id,
                    "No solver interpreter available, using randomized fallback"
                );
                None
            }
        };
        let fallback = self.tuning.fallback.solver();

        let outcome =
            solver::run_solve(model, bridge, fallback, &self.tuning.solve_options()).await;

        let ctx = PostProcessContext {
            employees: &request.employees,
            shifts: &request.shifts,
            preferences: &preferences,
            variable_count,
            constraint_count,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        let result = postprocess::finalize(&outcome, &ctx);

        info!(
            correlation_id = %correlation_id,
            success = result.success,
            assignments = result.assignments.len(),
            violations = result.violations.len(),
            backend = ?result.diagnostics.backend,
            timed_out = result.diagnostics.timed_out,
            solve_time_ms = result.diagnostics.solve_time_ms,
            "Schedule request completed"
        );

        Ok(result)
    }
}

/// Rejects structurally unusable input before any solving starts.
fn validate(request: &ScheduleRequest) -> EngineResult<()> {
    if request.employees.is_empty() {
        return Err(EngineError::EmptyRoster);
    }
    if request.shifts.is_empty() {
        return Err(EngineError::EmptyShiftList);
    }
    for shift in &request.shifts {
        shift.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AvailabilityPreference, BackendKind, ContractSize, Employee, EmployeeClass,
        PreferenceLevel, Shift, TimeSlot,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn employee(id: &str, class: EmployeeClass) -> Employee {
        Employee {
            id: id.to_string(),
            display_name: format!("Employee {id}"),
            employee_class: class,
            contract_size: ContractSize::Small,
            can_work_alone: true,
            is_active: true,
        }
    }

    fn shift(id: &str) -> Shift {
        Shift {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            time_slot: TimeSlot {
                start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            },
            min_workers: 1,
            max_workers: 2,
        }
    }

    fn preference(employee_id: &str, shift_id: &str, level: PreferenceLevel) -> AvailabilityPreference {
        AvailabilityPreference {
            employee_id: employee_id.to_string(),
            shift_id: shift_id.to_string(),
            level,
        }
    }

    /// Tuning that never finds an interpreter, so tests run hermetically on
    /// the seeded fallback.
    fn fallback_only_tuning(seed: u64) -> SolverTuning {
        let mut tuning = SolverTuning::default();
        tuning.interpreter_candidates =
            vec!["definitely-not-a-real-solver-interpreter".to_string()];
        tuning.fallback.seed = Some(seed);
        tuning.fallback.probability = 1.0;
        tuning
    }

    #[tokio::test]
    async fn test_empty_roster_is_rejected() {
        let engine = ScheduleEngine::new();
        let request = ScheduleRequest {
            employees: vec![],
            shifts: vec![shift("S1")],
            preferences: vec![],
            constraint_notes: vec![],
        };

        let err = engine.generate_schedule(&request).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyRoster));
    }

    #[tokio::test]
    async fn test_empty_shift_list_is_rejected() {
        let engine = ScheduleEngine::new();
        let request = ScheduleRequest {
            employees: vec![employee("E1", EmployeeClass::Regular)],
            shifts: vec![],
            preferences: vec![],
            constraint_notes: vec![],
        };

        let err = engine.generate_schedule(&request).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyShiftList));
    }

    #[tokio::test]
    async fn test_inverted_staffing_band_is_rejected() {
        let engine = ScheduleEngine::new();
        let mut bad = shift("S1");
        bad.min_workers = 3;
        bad.max_workers = 1;
        let request = ScheduleRequest {
            employees: vec![employee("E1", EmployeeClass::Regular)],
            shifts: vec![bad],
            preferences: vec![],
            constraint_notes: vec![],
        };

        let err = engine.generate_schedule(&request).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidShift { .. }));
    }

    #[tokio::test]
    async fn test_no_signups_yields_failed_result_not_error() {
        let engine = ScheduleEngine::with_tuning(fallback_only_tuning(1));
        let request = ScheduleRequest {
            employees: vec![employee("E1", EmployeeClass::Regular)],
            shifts: vec![shift("S1")],
            preferences: vec![],
            constraint_notes: vec![],
        };

        let result = engine.generate_schedule(&request).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.violations[0].category, ViolationCategory::NoSignups);
        assert_eq!(result.diagnostics.backend, BackendKind::None);
    }

    #[tokio::test]
    async fn test_manager_signup_alone_does_not_count_as_a_signup() {
        // Managers are not schedulable, so their preferences cannot satisfy
        // the signup check; the manager pass still assigns them.
        let engine = ScheduleEngine::with_tuning(fallback_only_tuning(1));
        let request = ScheduleRequest {
            employees: vec![
                employee("E1", EmployeeClass::Regular),
                employee("M1", EmployeeClass::Manager),
            ],
            shifts: vec![shift("S1")],
            preferences: vec![preference("M1", "S1", PreferenceLevel::Preferred)],
            constraint_notes: vec![],
        };

        let result = engine.generate_schedule(&request).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.violations[0].category, ViolationCategory::NoSignups);
        assert_eq!(result.assignments.len(), 1);
        assert_eq!(result.assignments[0].employee_id, "M1");
    }

    #[tokio::test]
    async fn test_end_to_end_on_seeded_fallback() {
        let engine = ScheduleEngine::with_tuning(fallback_only_tuning(42));
        let request = ScheduleRequest {
            employees: vec![employee("E1", EmployeeClass::Regular)],
            shifts: vec![shift("S1")],
            preferences: vec![preference("E1", "S1", PreferenceLevel::Preferred)],
            constraint_notes: vec![],
        };

        let result = engine.generate_schedule(&request).await.unwrap();
        // Probability 1.0: the single free variable is always assigned.
        assert_eq!(result.diagnostics.backend, BackendKind::Fallback);
        assert_eq!(result.assignments.len(), 1);
        assert_eq!(result.assignments[0].employee_id, "E1");
        assert_eq!(result.assignments[0].quality_score, 100);
        assert!(result.success);
        assert_eq!(result.diagnostics.variable_count, 1);
    }
}
