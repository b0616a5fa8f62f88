//! Independent re-validation of an assignment mapping against the staffing
//! rules. Runs on the raw (pre-manager-pass) mapping, so manager additions
//! never mask or cause violations.

use std::collections::HashMap;

use crate::builder::shifts_by_date;
use crate::models::{Employee, Shift, Violation, ViolationCategory};

use super::ShiftAssignments;

/// Checks every shift and employee against the staffing rules and returns
/// all violations found. `employees` is the non-manager roster.
pub fn detect_violations(
    map: &ShiftAssignments,
    employees: &[Employee],
    shifts: &[Shift],
) -> Vec<Violation> {
    let by_id: HashMap<&str, &Employee> = employees.iter().map(|e| (e.id.as_str(), e)).collect();
    let mut violations = Vec::new();

    for shift in shifts {
        let assigned: Vec<&Employee> = map
            .assigned(&shift.id)
            .into_iter()
            .flatten()
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .collect();

        if (assigned.len() as u32) < shift.min_workers {
            violations.push(
                Violation::new(
                    ViolationCategory::Understaffed,
                    format!(
                        "Shift {} has {} employees but requires {}",
                        shift.id,
                        assigned.len(),
                        shift.min_workers
                    ),
                )
                .with_shift(&shift.id),
            );
        }

        let has_trainee = assigned.iter().any(|e| e.is_trainee());
        let has_experienced = assigned.iter().any(|e| e.is_experienced());
        if has_trainee && !has_experienced {
            violations.push(
                Violation::new(
                    ViolationCategory::UnsupervisedTrainee,
                    format!("Shift {} has a trainee but no experienced employee", shift.id),
                )
                .with_shift(&shift.id),
            );
        }

        if let [only] = assigned.as_slice()
            && !only.can_work_alone
        {
            violations.push(
                Violation::new(
                    ViolationCategory::LoneWorker,
                    format!(
                        "{} is assigned alone to shift {} but cannot work alone",
                        only.display_name, shift.id
                    ),
                )
                .with_employee(&only.id)
                .with_shift(&shift.id),
            );
        }
    }

    for (date, day_shifts) in shifts_by_date(shifts) {
        for employee in employees {
            let worked = day_shifts
                .iter()
                .filter(|shift| map.contains(&shift.id, &employee.id))
                .count();
            if worked > 1 {
                violations.push(
                    Violation::new(
                        ViolationCategory::MultipleShiftsPerDay,
                        format!(
                            "{} is assigned {} shifts on {}",
                            employee.display_name, worked, date
                        ),
                    )
                    .with_employee(&employee.id),
                );
            }
        }
    }

    violations
}
