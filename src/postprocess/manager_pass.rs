//! Preference-driven manager assignment.
//!
//! Managers are excluded from the optimization model entirely; they join
//! shifts after the solve, purely by their own level-1 preferences. The pass
//! is idempotent and runs regardless of how the solve itself went.

use tracing::debug;

use crate::models::{Employee, PreferenceLevel, PreferenceSet, Shift};

use super::ShiftAssignments;

/// Adds every active manager to every shift they marked as preferred.
///
/// Returns the number of assignments actually added; re-running the pass on
/// the same mapping adds nothing.
pub fn apply_manager_pass(
    map: &mut ShiftAssignments,
    employees: &[Employee],
    shifts: &[Shift],
    preferences: &PreferenceSet,
) -> usize {
    let mut added = 0;
    for manager in employees.iter().filter(|e| e.is_active && e.is_manager()) {
        for shift in shifts {
            if preferences.level(&manager.id, &shift.id) == Some(PreferenceLevel::Preferred)
                && map.insert(&shift.id, &manager.id)
            {
                added += 1;
                debug!(
                    employee_id = %manager.id,
                    shift_id = %shift.id,
                    "manager assigned by preference"
                );
            }
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityPreference, ContractSize, EmployeeClass, TimeSlot};
    use chrono::{NaiveDate, NaiveTime};

    fn manager(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            display_name: format!("Manager {id}"),
            employee_class: EmployeeClass::Manager,
            contract_size: ContractSize::Large,
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
            max_workers: 3,
        }
    }

    fn preference(employee_id: &str, shift_id: &str, level: PreferenceLevel) -> AvailabilityPreference {
        AvailabilityPreference {
            employee_id: employee_id.to_string(),
            shift_id: shift_id.to_string(),
            level,
        }
    }

    #[test]
    fn test_manager_joins_preferred_shifts_only() {
        let employees = vec![manager("M1")];
        let shifts = vec![shift("S1"), shift("S2"), shift("S3")];
        let prefs = PreferenceSet::from_records(&[
            preference("M1", "S1", PreferenceLevel::Preferred),
            preference("M1", "S2", PreferenceLevel::Possible),
        ]);

        let mut map = ShiftAssignments::default();
        let added = apply_manager_pass(&mut map, &employees, &shifts, &prefs);

        assert_eq!(added, 1);
        assert!(map.contains("S1", "M1"));
        assert!(!map.contains("S2", "M1"));
        assert!(!map.contains("S3", "M1"));
    }

    #[test]
    fn test_pass_is_idempotent() {
        let employees = vec![manager("M1")];
        let shifts = vec![shift("S1")];
        let prefs =
            PreferenceSet::from_records(&[preference("M1", "S1", PreferenceLevel::Preferred)]);

        let mut map = ShiftAssignments::default();
        assert_eq!(apply_manager_pass(&mut map, &employees, &shifts, &prefs), 1);
        assert_eq!(apply_manager_pass(&mut map, &employees, &shifts, &prefs), 0);
        assert_eq!(map.total(), 1);
    }

    #[test]
    fn test_inactive_and_non_manager_employees_are_skipped() {
        let mut inactive = manager("M1");
        inactive.is_active = false;
        let mut regular = manager("R1");
        regular.employee_class = EmployeeClass::Regular;
        let employees = vec![inactive, regular];
        let shifts = vec![shift("S1")];
        let prefs = PreferenceSet::from_records(&[
            preference("M1", "S1", PreferenceLevel::Preferred),
            preference("R1", "S1", PreferenceLevel::Preferred),
        ]);

        let mut map = ShiftAssignments::default();
        assert_eq!(apply_manager_pass(&mut map, &employees, &shifts, &prefs), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_manager_can_join_a_shift_that_already_has_staff() {
        let employees = vec![manager("M1")];
        let shifts = vec![shift("S1")];
        let prefs =
            PreferenceSet::from_records(&[preference("M1", "S1", PreferenceLevel::Preferred)]);

        let mut map = ShiftAssignments::default();
        map.insert("S1", "E1");
        apply_manager_pass(&mut map, &employees, &shifts, &prefs);

        assert_eq!(map.assigned_count("S1"), 2);
    }
}
