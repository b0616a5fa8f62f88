//! The maximization objective: reward assignments that match stated
//! preferences.

use super::{RuleContext, SchedulingModel};
use crate::models::PreferenceLevel;

/// Weight for a level-1 (preferred) pair.
pub const WEIGHT_PREFERRED: i64 = 10;
/// Weight for a level-2 (possible) pair.
pub const WEIGHT_POSSIBLE: i64 = 5;
/// Weight for a pair with no preference record.
pub const WEIGHT_NEUTRAL: i64 = 1;
/// Weight for a level-3 (unavailable) pair. The variable is already fixed to
/// zero structurally; the penalty also covers backends that do not honor
/// variable domains.
pub const WEIGHT_UNAVAILABLE: i64 = -10_000;

pub(crate) fn apply(model: &mut SchedulingModel, ctx: &RuleContext<'_>) {
    for employee in ctx.employees {
        for shift in ctx.shifts {
            let var = match model.var(&employee.id, &shift.id) {
                Some(var) => var,
                None => continue,
            };
            let weight = match ctx.preferences.level(&employee.id, &shift.id) {
                Some(PreferenceLevel::Preferred) => WEIGHT_PREFERRED,
                Some(PreferenceLevel::Possible) => WEIGHT_POSSIBLE,
                Some(PreferenceLevel::Unavailable) => WEIGHT_UNAVAILABLE,
                None => WEIGHT_NEUTRAL,
            };
            model.add_objective_term(var, weight);
        }
    }
}
