//! Contract quota: every schedulable employee works an exact number of shifts
//! over the horizon, determined by contract size.
//!
//! This is an equality, not a range: small contracts get exactly 1 shift,
//! large contracts exactly 2. Flexible contracts are mapped to the large
//! quota; whether they should instead mean "no quota" is an open question
//! with the domain owners, and until that is settled this keeps the behavior
//! of the system it replaces.

use super::{RuleContext, SchedulingModel};

pub(crate) fn apply(model: &mut SchedulingModel, ctx: &RuleContext<'_>) {
    for employee in ctx.employees {
        let terms: Vec<_> = ctx
            .shifts
            .iter()
            .filter_map(|shift| model.var(&employee.id, &shift.id))
            .map(|var| (var, 1))
            .collect();
        if terms.is_empty() {
            continue;
        }
        let quota = employee.shift_quota();
        model.add_constraint(
            terms,
            Some(quota),
            Some(quota),
            format!(
                "Exact shifts for {} ({:?} contract)",
                employee.display_name, employee.contract_size
            ),
        );
    }
}
