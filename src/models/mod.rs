//! Domain model for the shift-assignment engine.
//!
//! These are the shared value types consumed and produced by one solve call:
//! employees, shifts, availability preferences, the request envelope, and the
//! result types (assignments, violations, diagnostics). Everything here is
//! constructed fresh per request and owns no persistent storage.

mod employee;
mod preference;
mod request;
mod result;
mod shift;

pub use employee::{ContractSize, Employee, EmployeeClass};
pub use preference::{AvailabilityPreference, PreferenceLevel, PreferenceSet};
pub use request::{ConstraintDescriptor, ScheduleRequest};
pub use result::{
    Assignment, BackendKind, SolveDiagnostics, SolveResult, Violation, ViolationCategory,
    ViolationSeverity,
};
pub use shift::{Shift, TimeSlot};
