//! Shift model and related types.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The start and end time of a shift within its calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// The start time of the shift.
    pub start: NaiveTime,
    /// The end time of the shift.
    pub end: NaiveTime,
}

/// One staffing slot on one calendar date with a required worker-count band.
///
/// Shifts are immutable inputs to one solve call; the planning horizon is the
/// full set of shifts supplied in the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The time slot of the shift.
    pub time_slot: TimeSlot,
    /// The minimum number of workers the shift requires.
    pub min_workers: u32,
    /// The maximum number of workers the shift accepts.
    pub max_workers: u32,
}

impl Shift {
    /// Checks the `min_workers <= max_workers` invariant.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_workers > self.max_workers {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!(
                    "minWorkers ({}) exceeds maxWorkers ({})",
                    self.min_workers, self.max_workers
                ),
            });
        }
        Ok(())
    }
}
