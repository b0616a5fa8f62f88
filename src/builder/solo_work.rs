//! Solo-work restriction: an employee with `can_work_alone == false` may only
//! work a shift when at least one other eligible employee works it too.

use super::{RuleContext, SchedulingModel};

pub(crate) fn apply(model: &mut SchedulingModel, ctx: &RuleContext<'_>) {
    for employee in ctx.employees.iter().filter(|e| !e.can_work_alone) {
        for shift in ctx.shifts {
            let employee_var = match model.var(&employee.id, &shift.id) {
                Some(var) => var,
                None => continue,
            };

            let others: Vec<_> = ctx
                .employees
                .iter()
                .filter(|other| other.id != employee.id)
                .filter_map(|other| model.var(&other.id, &shift.id))
                .collect();

            if others.is_empty() {
                model.fix_zero(
                    employee_var,
                    format!(
                        "No other employees available for {} in shift {}",
                        employee.display_name, shift.id
                    ),
                );
                continue;
            }

            // employee - sum(others) <= 0
            let mut terms = vec![(employee_var, 1)];
            terms.extend(others.into_iter().map(|var| (var, -1)));
            model.add_constraint(
                terms,
                None,
                Some(0),
                format!("{} cannot work alone in {}", employee.display_name, shift.id),
            );
        }
    }
}
