//! Error types for the shift-assignment engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only input errors surface to the caller as `Err`; solver failures,
//! timeouts, and infeasible models are reported inside a normal
//! [`SolveResult`](crate::models::SolveResult) instead.

use thiserror::Error;

/// The main error type for the shift-assignment engine.
///
/// # Example
///
/// ```
/// use shift_engine::error::EngineError;
///
/// let error = EngineError::EmptyShiftList;
/// assert_eq!(error.to_string(), "No shifts provided for scheduling");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request contained no shifts; nothing can be scheduled.
    #[error("No shifts provided for scheduling")]
    EmptyShiftList,

    /// The request contained no employees; nothing can be scheduled.
    #[error("No employees provided for scheduling")]
    EmptyRoster,

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// Tuning file was not found at the specified path.
    #[error("Tuning file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Tuning file could not be parsed.
    #[error("Failed to parse tuning file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
