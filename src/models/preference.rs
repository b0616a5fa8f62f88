//! Availability preferences and the keyed preference lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An employee's stated willingness to work a specific shift.
///
/// Serialized as the integers 1/2/3 on the wire. The *absence* of a
/// preference record for a pair is a distinct, meaningful state (neutral),
/// which is why there is no variant for it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PreferenceLevel {
    /// The employee prefers to work this shift.
    Preferred,
    /// The employee can work this shift.
    Possible,
    /// The employee cannot work this shift. Forces the decision variable to
    /// zero in the model.
    Unavailable,
}

impl TryFrom<u8> for PreferenceLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PreferenceLevel::Preferred),
            2 => Ok(PreferenceLevel::Possible),
            3 => Ok(PreferenceLevel::Unavailable),
            other => Err(format!("invalid preference level: {other} (expected 1, 2, or 3)")),
        }
    }
}

impl From<PreferenceLevel> for u8 {
    fn from(level: PreferenceLevel) -> u8 {
        match level {
            PreferenceLevel::Preferred => 1,
            PreferenceLevel::Possible => 2,
            PreferenceLevel::Unavailable => 3,
        }
    }
}

/// One availability record, keyed by (employee, shift).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityPreference {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The shift the record refers to.
    pub shift_id: String,
    /// The stated preference level.
    pub level: PreferenceLevel,
}

/// Keyed lookup over the full availability-preference set of one request.
///
/// Duplicate records for the same (employee, shift) pair are resolved by
/// last-record-wins, matching the order they were supplied.
#[derive(Debug, Clone, Default)]
pub struct PreferenceSet {
    by_pair: HashMap<(String, String), PreferenceLevel>,
}

impl PreferenceSet {
    /// Builds the lookup from a flat list of records.
    pub fn from_records(records: &[AvailabilityPreference]) -> Self {
        let mut by_pair = HashMap::with_capacity(records.len());
        for record in records {
            by_pair.insert(
                (record.employee_id.clone(), record.shift_id.clone()),
                record.level,
            );
        }
        Self { by_pair }
    }

    /// Looks up the preference for an (employee, shift) pair. `None` means no
    /// record exists: the neutral state, not "possible".
    pub fn level(&self, employee_id: &str, shift_id: &str) -> Option<PreferenceLevel> {
        self.by_pair
            .get(&(employee_id.to_string(), shift_id.to_string()))
            .copied()
    }

    /// Returns true if any record in the set has level 1 or 2 for one of the
    /// given employees. Used for the pre-model signup check.
    pub fn any_signup_among(&self, employee_ids: &[&str]) -> bool {
        self.by_pair.iter().any(|((employee_id, _), level)| {
            matches!(level, PreferenceLevel::Preferred | PreferenceLevel::Possible)
                && employee_ids.iter().any(|id| id == employee_id)
        })
    }
}
