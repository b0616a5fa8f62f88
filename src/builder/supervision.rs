//! Trainee supervision: a trainee may only work a shift when at least one
//! experienced employee works it too.
//!
//! Encoded as `trainee <= sum(experienced on shift)`. When the roster has no
//! experienced employees at all, every trainee variable is forced to zero
//! unconditionally.

use super::{RuleContext, SchedulingModel};

pub(crate) fn apply(model: &mut SchedulingModel, ctx: &RuleContext<'_>) {
    let experienced: Vec<_> = ctx
        .employees
        .iter()
        .filter(|employee| employee.is_experienced())
        .collect();

    for trainee in ctx.employees.iter().filter(|employee| employee.is_trainee()) {
        for shift in ctx.shifts {
            let trainee_var = match model.var(&trainee.id, &shift.id) {
                Some(var) => var,
                None => continue,
            };

            if experienced.is_empty() {
                model.fix_zero(
                    trainee_var,
                    format!(
                        "No experienced staff for trainee {} in shift {}",
                        trainee.display_name, shift.id
                    ),
                );
                continue;
            }

            // trainee - sum(experienced) <= 0
            let mut terms = vec![(trainee_var, 1)];
            for exp in &experienced {
                if let Some(var) = model.var(&exp.id, &shift.id) {
                    terms.push((var, -1));
                }
            }
            model.add_constraint(
                terms,
                None,
                Some(0),
                format!(
                    "Trainee {} requires supervision in shift {}",
                    trainee.display_name, shift.id
                ),
            );
        }
    }
}
