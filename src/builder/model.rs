//! The declarative optimization model produced by the builder.
//!
//! Enforcement is structural: a variable is either fixed to zero or appears
//! in a [`LinearConstraint`] with explicit bounds. [`ConstraintRecord`] is a
//! purely diagnostic projection generated from the constraints after the
//! fact; nothing enforces through it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Handle to one boolean decision variable in a [`SchedulingModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

/// One boolean "employee works shift" decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Wire name of the variable, `assign:{employee_id}:{shift_id}`.
    pub name: String,
    /// The employee this variable belongs to.
    pub employee_id: String,
    /// The shift this variable belongs to.
    pub shift_id: String,
    /// Whether the variable's domain has been restricted to {0}.
    pub fixed_zero: bool,
}

/// A linear constraint: `lower <= sum(coefficient * variable) <= upper`.
///
/// A missing bound leaves that side open. `lower == upper` is an equality.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// The participating variables and their coefficients.
    pub terms: Vec<(VarId, i64)>,
    /// Inclusive lower bound on the weighted sum, if any.
    pub lower: Option<i64>,
    /// Inclusive upper bound on the weighted sum, if any.
    pub upper: Option<i64>,
    /// What the constraint means, for diagnostics.
    pub description: String,
}

/// Diagnostic projection of one constraint: participating variables, the
/// relation, the bound, and a description. Used for introspection and
/// debugging only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRecord {
    /// Names of the participating variables.
    pub variables: Vec<String>,
    /// The relation: `==`, `<=`, `>=`, or `in`.
    pub relation: String,
    /// The bound, rendered as text (`1`, or `[1, 2]` for a band).
    pub bound: String,
    /// What the constraint means.
    pub description: String,
}

/// The full declarative model: variables, constraints, and objective.
#[derive(Debug, Clone, Default)]
pub struct SchedulingModel {
    variables: Vec<Variable>,
    by_pair: HashMap<(String, String), VarId>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(VarId, i64)>,
}

impl SchedulingModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a boolean variable for an (employee, shift) pair.
    pub fn add_variable(&mut self, employee_id: &str, shift_id: &str) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            name: format!("assign:{employee_id}:{shift_id}"),
            employee_id: employee_id.to_string(),
            shift_id: shift_id.to_string(),
            fixed_zero: false,
        });
        self.by_pair
            .insert((employee_id.to_string(), shift_id.to_string()), id);
        id
    }

    /// Looks up the variable for an (employee, shift) pair.
    pub fn var(&self, employee_id: &str, shift_id: &str) -> Option<VarId> {
        self.by_pair
            .get(&(employee_id.to_string(), shift_id.to_string()))
            .copied()
    }

    /// Restricts a variable's domain to {0} and records an equality
    /// constraint for diagnostics.
    pub fn fix_zero(&mut self, var: VarId, description: impl Into<String>) {
        self.variables[var.0].fixed_zero = true;
        self.constraints.push(LinearConstraint {
            terms: vec![(var, 1)],
            lower: Some(0),
            upper: Some(0),
            description: description.into(),
        });
    }

    /// Adds a bounded linear constraint over the given terms.
    pub fn add_constraint(
        &mut self,
        terms: Vec<(VarId, i64)>,
        lower: Option<i64>,
        upper: Option<i64>,
        description: impl Into<String>,
    ) {
        debug_assert!(lower.is_some() || upper.is_some());
        self.constraints.push(LinearConstraint {
            terms,
            lower,
            upper,
            description: description.into(),
        });
    }

    /// Adds one weighted term to the maximization objective.
    pub fn add_objective_term(&mut self, var: VarId, weight: i64) {
        self.objective.push((var, weight));
    }

    /// All declared variables, in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The variable behind a handle.
    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.0]
    }

    /// Whether a variable has been fixed to zero.
    pub fn is_fixed_zero(&self, var: VarId) -> bool {
        self.variables[var.0].fixed_zero
    }

    /// All constraints, in the order they were added.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// The maximization objective terms.
    pub fn objective(&self) -> &[(VarId, i64)] {
        &self.objective
    }

    /// Number of declared variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Projects every constraint into its diagnostic record.
    pub fn records(&self) -> Vec<ConstraintRecord> {
        self.constraints
            .iter()
            .map(|constraint| {
                let variables = constraint
                    .terms
                    .iter()
                    .map(|(var, _)| self.variables[var.0].name.clone())
                    .collect();
                let (relation, bound) = match (constraint.lower, constraint.upper) {
                    (Some(lower), Some(upper)) if lower == upper => {
                        ("==".to_string(), lower.to_string())
                    }
                    (Some(lower), Some(upper)) => ("in".to_string(), format!("[{lower}, {upper}]")),
                    (Some(lower), None) => (">=".to_string(), lower.to_string()),
                    (None, Some(upper)) => ("<=".to_string(), upper.to_string()),
                    (None, None) => ("free".to_string(), String::new()),
                };
                ConstraintRecord {
                    variables,
                    relation,
                    bound,
                    description: constraint.description.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_naming_and_lookup() {
        let mut model = SchedulingModel::new();
        let var = model.add_variable("E1", "S1");
        assert_eq!(model.variable(var).name, "assign:E1:S1");
        assert_eq!(model.var("E1", "S1"), Some(var));
        assert_eq!(model.var("E1", "S2"), None);
    }

    #[test]
    fn test_fix_zero_sets_flag_and_records_constraint() {
        let mut model = SchedulingModel::new();
        let var = model.add_variable("E1", "S1");
        assert!(!model.is_fixed_zero(var));

        model.fix_zero(var, "E1 unavailable for S1");
        assert!(model.is_fixed_zero(var));
        assert_eq!(model.constraint_count(), 1);

        let record = &model.records()[0];
        assert_eq!(record.relation, "==");
        assert_eq!(record.bound, "0");
        assert_eq!(record.variables, vec!["assign:E1:S1".to_string()]);
    }

    #[test]
    fn test_band_constraint_projects_as_interval() {
        let mut model = SchedulingModel::new();
        let a = model.add_variable("E1", "S1");
        let b = model.add_variable("E2", "S1");
        model.add_constraint(vec![(a, 1), (b, 1)], Some(1), Some(2), "staffing band");

        let record = &model.records()[0];
        assert_eq!(record.relation, "in");
        assert_eq!(record.bound, "[1, 2]");
        assert_eq!(record.variables.len(), 2);
        assert_eq!(record.description, "staffing band");
    }

    #[test]
    fn test_upper_only_constraint_projects_as_le() {
        let mut model = SchedulingModel::new();
        let a = model.add_variable("E1", "S1");
        model.add_constraint(vec![(a, 1)], None, Some(1), "daily cap");

        let record = &model.records()[0];
        assert_eq!(record.relation, "<=");
        assert_eq!(record.bound, "1");
    }

    #[test]
    fn test_objective_terms_accumulate_in_order() {
        let mut model = SchedulingModel::new();
        let a = model.add_variable("E1", "S1");
        let b = model.add_variable("E1", "S2");
        model.add_objective_term(a, 10);
        model.add_objective_term(b, -10_000);
        assert_eq!(model.objective(), &[(a, 10), (b, -10_000)]);
    }
}
