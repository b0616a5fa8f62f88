//! The request envelope handed to the engine by the surrounding application.

use serde::{Deserialize, Serialize};

use super::{AvailabilityPreference, Employee, Shift};

/// A free-form constraint descriptor supplied by the caller.
///
/// Accepted for diagnostics and reporting only; enforcement is always
/// structural, via the fixed rule set of the model builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDescriptor {
    /// The kind of constraint being described (e.g. "max_shifts_per_day").
    pub kind: String,
    /// Free-form notes about the constraint.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Everything the engine needs for one solve call.
///
/// The caller (the excluded CRUD/API layer) is responsible for assembling
/// this from its datastore and for persisting whatever comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// The employee roster.
    pub employees: Vec<Employee>,
    /// The full shift list for the planning horizon.
    pub shifts: Vec<Shift>,
    /// The full availability-preference set.
    pub preferences: Vec<AvailabilityPreference>,
    /// Optional free-form constraint descriptors, diagnostics only.
    #[serde(default)]
    pub constraint_notes: Vec<ConstraintDescriptor>,
}
