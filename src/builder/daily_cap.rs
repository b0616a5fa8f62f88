//! Daily cap: at most one shift per employee per calendar date.

use super::{RuleContext, SchedulingModel, shifts_by_date};

pub(crate) fn apply(model: &mut SchedulingModel, ctx: &RuleContext<'_>) {
    let by_date = shifts_by_date(ctx.shifts);
    for employee in ctx.employees {
        for (date, day_shifts) in &by_date {
            let terms: Vec<_> = day_shifts
                .iter()
                .filter_map(|shift| model.var(&employee.id, &shift.id))
                .map(|var| (var, 1))
                .collect();
            if !terms.is_empty() {
                model.add_constraint(
                    terms,
                    None,
                    Some(1),
                    format!("Max one shift per day for {} on {date}", employee.display_name),
                );
            }
        }
    }
}
