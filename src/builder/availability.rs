//! Hard unavailability: a level-3 preference record forces the variable for
//! that (employee, shift) pair to zero.
//!
//! Absence of a record is the neutral state and leaves the variable free;
//! only an explicit "unavailable" restricts the domain.

use super::{RuleContext, SchedulingModel};
use crate::models::PreferenceLevel;

pub(crate) fn apply(model: &mut SchedulingModel, ctx: &RuleContext<'_>) {
    for employee in ctx.employees {
        for shift in ctx.shifts {
            if ctx.preferences.level(&employee.id, &shift.id)
                == Some(PreferenceLevel::Unavailable)
                && let Some(var) = model.var(&employee.id, &shift.id)
            {
                model.fix_zero(
                    var,
                    format!(
                        "{} is unavailable for shift {}",
                        employee.display_name, shift.id
                    ),
                );
            }
        }
    }
}
