//! Staffing band: each shift's headcount must lie in
//! `[min_workers, max_workers]`.
//!
//! When a shift has no eligible employees at all, the band is omitted
//! entirely rather than emitted as an unsatisfiable bound; the shortfall
//! surfaces later as an understaffed violation instead of poisoning the
//! whole model.

use super::{RuleContext, SchedulingModel};

pub(crate) fn apply(model: &mut SchedulingModel, ctx: &RuleContext<'_>) {
    for shift in ctx.shifts {
        let terms: Vec<_> = ctx
            .employees
            .iter()
            .filter_map(|employee| model.var(&employee.id, &shift.id))
            .map(|var| (var, 1))
            .collect();
        if terms.is_empty() {
            continue;
        }
        model.add_constraint(
            terms,
            Some(shift.min_workers as i64),
            Some(shift.max_workers as i64),
            format!("Staffing band for shift {}", shift.id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::build_model;
    use crate::models::{EmployeeClass, PreferenceSet};

    #[test]
    fn test_band_covers_all_eligible_employees() {
        let employees = vec![
            employee("E1", EmployeeClass::Regular),
            employee("E2", EmployeeClass::Experienced),
        ];
        let mut s = shift("S1");
        s.min_workers = 1;
        s.max_workers = 2;

        let model = build_model(&employees, &[s], &PreferenceSet::default());

        let band = model
            .records()
            .into_iter()
            .find(|record| record.description == "Staffing band for shift S1")
            .unwrap();
        assert_eq!(band.variables.len(), 2);
        assert_eq!(band.relation, "in");
        assert_eq!(band.bound, "[1, 2]");
    }

    #[test]
    fn test_band_omitted_when_no_eligible_employees() {
        // Only a manager on the roster: no variables, no band.
        let employees = vec![employee("M1", EmployeeClass::Manager)];
        let model = build_model(&employees, &[shift("S1")], &PreferenceSet::default());

        assert_eq!(model.variable_count(), 0);
        assert!(
            model
                .records()
                .iter()
                .all(|record| !record.description.starts_with("Staffing band"))
        );
    }

    #[test]
    fn test_exact_headcount_band_is_equality() {
        let employees = vec![employee("E1", EmployeeClass::Regular)];
        let mut s = shift("S1");
        s.min_workers = 1;
        s.max_workers = 1;

        let model = build_model(&employees, &[s], &PreferenceSet::default());
        let band = model
            .records()
            .into_iter()
            .find(|record| record.description.starts_with("Staffing band"))
            .unwrap();
        assert_eq!(band.relation, "==");
        assert_eq!(band.bound, "1");
    }
}
