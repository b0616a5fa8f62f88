//! Model Builder: pure translation of a request into a declarative
//! optimization model.
//!
//! `(employees, shifts, preferences) -> (variables, constraints, objective)`,
//! with no I/O and no mutation of the inputs. One file per scheduling rule:
//! hard unavailability, the daily cap, staffing bands, trainee supervision,
//! the solo-work restriction, contract quotas, and the preference objective.
//! Employees and shifts are iterated in input order so identical inputs
//! always produce an identical model.

mod availability;
mod contract_quota;
mod daily_cap;
mod model;
mod objective;
mod solo_work;
mod staffing;
mod supervision;

pub use model::{ConstraintRecord, LinearConstraint, SchedulingModel, VarId, Variable};
pub use objective::{WEIGHT_NEUTRAL, WEIGHT_POSSIBLE, WEIGHT_PREFERRED, WEIGHT_UNAVAILABLE};

use chrono::NaiveDate;

use crate::models::{Employee, PreferenceSet, Shift};

/// The slice of the request a rule operates on: the schedulable roster in
/// input order, the shift horizon, and the preference lookup.
pub(crate) struct RuleContext<'a> {
    pub employees: &'a [&'a Employee],
    pub shifts: &'a [Shift],
    pub preferences: &'a PreferenceSet,
}

/// Builds the complete optimization model for one request.
///
/// Only active, non-manager employees get decision variables; managers are
/// handled by the deterministic pass after solving.
pub fn build_model(
    employees: &[Employee],
    shifts: &[Shift],
    preferences: &PreferenceSet,
) -> SchedulingModel {
    let schedulable: Vec<&Employee> = employees.iter().filter(|e| e.is_schedulable()).collect();

    let mut model = SchedulingModel::new();

    // Rule 1: one boolean variable per schedulable employee and shift.
    for employee in &schedulable {
        for shift in shifts {
            model.add_variable(&employee.id, &shift.id);
        }
    }

    let ctx = RuleContext {
        employees: &schedulable,
        shifts,
        preferences,
    };

    availability::apply(&mut model, &ctx);
    daily_cap::apply(&mut model, &ctx);
    staffing::apply(&mut model, &ctx);
    supervision::apply(&mut model, &ctx);
    solo_work::apply(&mut model, &ctx);
    contract_quota::apply(&mut model, &ctx);
    objective::apply(&mut model, &ctx);

    model
}

/// Groups shifts by calendar date, preserving the input order of both the
/// dates and the shifts within each date.
pub(crate) fn shifts_by_date(shifts: &[Shift]) -> Vec<(NaiveDate, Vec<&Shift>)> {
    let mut groups: Vec<(NaiveDate, Vec<&Shift>)> = Vec::new();
    for shift in shifts {
        match groups.iter_mut().find(|(date, _)| *date == shift.date) {
            Some((_, day_shifts)) => day_shifts.push(shift),
            None => groups.push((shift.date, vec![shift])),
        }
    }
    groups
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::models::{EmployeeClass, PreferenceLevel, PreferenceSet};
    use proptest::prelude::*;

    #[test]
    fn test_variables_only_for_schedulable_employees() {
        let mut inactive = employee("E2", EmployeeClass::Regular);
        inactive.is_active = false;
        let employees = vec![
            employee("E1", EmployeeClass::Regular),
            inactive,
            employee("M1", EmployeeClass::Manager),
        ];
        let shifts = vec![shift("S1"), shift("S2")];

        let model = build_model(&employees, &shifts, &PreferenceSet::default());

        // Only E1 is schedulable: 1 employee x 2 shifts.
        assert_eq!(model.variable_count(), 2);
        assert!(model.var("E1", "S1").is_some());
        assert!(model.var("E2", "S1").is_none());
        assert!(model.var("M1", "S1").is_none());
    }

    #[test]
    fn test_identical_inputs_build_identical_models() {
        let employees = vec![
            employee("E1", EmployeeClass::Experienced),
            employee("E2", EmployeeClass::Trainee),
        ];
        let shifts = vec![shift("S1"), shift("S2")];
        let prefs = PreferenceSet::from_records(&[preference(
            "E1",
            "S1",
            PreferenceLevel::Preferred,
        )]);

        let first = build_model(&employees, &shifts, &prefs);
        let second = build_model(&employees, &shifts, &prefs);

        assert_eq!(first.records(), second.records());
        assert_eq!(first.objective(), second.objective());
        assert_eq!(
            first.variables().iter().map(|v| &v.name).collect::<Vec<_>>(),
            second.variables().iter().map(|v| &v.name).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_shifts_by_date_preserves_input_order() {
        let d1 = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let d2 = chrono::NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let shifts = vec![shift_on("A", d2), shift_on("B", d1), shift_on("C", d2)];

        let groups = shifts_by_date(&shifts);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, d2);
        assert_eq!(groups[0].1.iter().map(|s| &s.id).collect::<Vec<_>>(), ["A", "C"]);
        assert_eq!(groups[1].1.iter().map(|s| &s.id).collect::<Vec<_>>(), ["B"]);
    }

    proptest! {
        // Every level-3 record always yields a fixed-zero variable, whatever
        // the rest of the preference set looks like.
        #[test]
        fn prop_unavailable_pairs_are_always_fixed_zero(
            levels in proptest::collection::vec(1u8..=3, 9)
        ) {
            let employees = vec![
                employee("E1", EmployeeClass::Regular),
                employee("E2", EmployeeClass::Regular),
                employee("E3", EmployeeClass::Regular),
            ];
            let shifts = vec![shift("S1"), shift("S2"), shift("S3")];

            let mut records = Vec::new();
            for (i, level) in levels.iter().enumerate() {
                let employee_id = format!("E{}", i % 3 + 1);
                let shift_id = format!("S{}", i / 3 + 1);
                records.push(preference(
                    &employee_id,
                    &shift_id,
                    crate::models::PreferenceLevel::try_from(*level).unwrap(),
                ));
            }
            let prefs = PreferenceSet::from_records(&records);
            let model = build_model(&employees, &shifts, &prefs);

            for employee in &employees {
                for shift in &shifts {
                    let var = model.var(&employee.id, &shift.id).unwrap();
                    if prefs.level(&employee.id, &shift.id)
                        == Some(crate::models::PreferenceLevel::Unavailable)
                    {
                        prop_assert!(model.is_fixed_zero(var));
                    }
                }
            }
        }
    }
}
