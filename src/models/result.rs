//! Result types returned by one solve call: assignments, violations,
//! diagnostics, and the solve result envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One employee-to-shift assignment in the final result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The shift being staffed.
    pub shift_id: String,
    /// The employee working the shift.
    pub employee_id: String,
    /// When the assignment was produced.
    pub assigned_at: DateTime<Utc>,
    /// Advisory quality score (0-100), derived from the matched preference
    /// level. Solver-dependent; never used for enforcement.
    pub quality_score: u8,
}

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// A mandatory staffing rule is broken or the solve failed outright.
    Critical,
    /// A rule breach the plan can ship with, flagged for a human.
    Warning,
}

/// The category of a detected violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    /// A shift has fewer assignees than its minimum worker count.
    Understaffed,
    /// A trainee is assigned with no experienced employee on the same shift.
    UnsupervisedTrainee,
    /// A single assignee who is not allowed to work alone.
    LoneWorker,
    /// An employee assigned to more than one shift on the same calendar date.
    MultipleShiftsPerDay,
    /// The solver claimed success but produced no assignments.
    NoAssignments,
    /// No schedulable employee signed up for any shift.
    NoSignups,
    /// The backend found no feasible solution, crashed, or timed out.
    SchedulingFailed,
}

impl ViolationCategory {
    /// The stable machine-checkable tag for this category.
    pub fn tag(&self) -> &'static str {
        match self {
            ViolationCategory::Understaffed => "UNDERSTAFFED",
            ViolationCategory::UnsupervisedTrainee => "TRAINEE_UNSUPERVISED",
            ViolationCategory::LoneWorker => "EMPLOYEE_ALONE",
            ViolationCategory::MultipleShiftsPerDay => "MULTIPLE_SHIFTS",
            ViolationCategory::NoAssignments => "NO_ASSIGNMENTS",
            ViolationCategory::NoSignups => "NO_SIGNUPS",
            ViolationCategory::SchedulingFailed => "SCHEDULING_FAILED",
        }
    }

    /// The severity this category carries.
    pub fn severity(&self) -> ViolationSeverity {
        match self {
            ViolationCategory::Understaffed
            | ViolationCategory::UnsupervisedTrainee
            | ViolationCategory::NoAssignments
            | ViolationCategory::NoSignups
            | ViolationCategory::SchedulingFailed => ViolationSeverity::Critical,
            ViolationCategory::LoneWorker | ViolationCategory::MultipleShiftsPerDay => {
                ViolationSeverity::Warning
            }
        }
    }
}

/// One rule violation found by the independent post-solve validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// How serious the violation is.
    pub severity: ViolationSeverity,
    /// The violation category.
    pub category: ViolationCategory,
    /// Human-readable description, prefixed with the category tag.
    pub message: String,
    /// The employee involved, when the violation is employee-specific.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The shift involved, when the violation is shift-specific.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<String>,
}

impl Violation {
    /// Creates a violation with the category's default severity and a
    /// tag-prefixed message.
    pub fn new(category: ViolationCategory, message: impl Into<String>) -> Self {
        Self {
            severity: category.severity(),
            category,
            message: format!("{}: {}", category.tag(), message.into()),
            employee_id: None,
            shift_id: None,
        }
    }

    /// Attaches the involved employee.
    pub fn with_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    /// Attaches the involved shift.
    pub fn with_shift(mut self, shift_id: impl Into<String>) -> Self {
        self.shift_id = Some(shift_id.into());
        self
    }
}

/// Which backend actually computed the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// The out-of-process CP-SAT bridge.
    Bridge,
    /// The in-process randomized fallback.
    Fallback,
    /// No backend ran (input rejected before solving, or timeout before any
    /// backend produced output).
    None,
}

/// Diagnostics attached to every solve result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveDiagnostics {
    /// Wall-clock time spent solving, in milliseconds.
    pub solve_time_ms: u64,
    /// Number of decision variables in the model.
    pub variable_count: usize,
    /// Number of constraints in the model.
    pub constraint_count: usize,
    /// Whether the backend proved the solution optimal.
    pub optimal: bool,
    /// Which backend produced the solution.
    pub backend: BackendKind,
    /// Whether the orchestrator ceiling or the backend budget expired.
    pub timed_out: bool,
}

/// The complete outcome of one solve call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// True only when the backend succeeded *and* the independent validation
    /// found zero violations among non-manager assignments.
    pub success: bool,
    /// The final assignment set, including manager-pass additions.
    pub assignments: Vec<Assignment>,
    /// All violations found by the independent validation.
    pub violations: Vec<Violation>,
    /// Solve diagnostics.
    pub diagnostics: SolveDiagnostics,
    /// Ordered human-readable narrative of how the result came to be.
    pub report: Vec<String>,
}
