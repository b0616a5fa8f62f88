//! The line-oriented JSON protocol spoken to the out-of-process optimizer.
//!
//! The request is one JSON document written to the subprocess's stdin:
//! variable declarations, constraints as linear expression strings, the
//! objective, and solver options. The response is exactly one JSON document
//! on stdout. Field names are camelCase on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::builder::SchedulingModel;

use super::SolveOptions;

/// Declaration of one solver variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    /// The variable type; always `bool` for assignment variables.
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional lower domain bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Optional upper domain bound. Fixed-zero variables carry `max: 0` so
    /// the domain restriction holds even for a solver that ignores the
    /// matching equality constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// One constraint as a linear expression string, e.g.
/// `assign:E1:S1 + assign:E2:S1 <= 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireConstraint {
    /// The rendered expression.
    pub expression: String,
    /// What the constraint means, for solver-side logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The objective expression and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireObjective {
    /// `maximize` or `minimize`.
    #[serde(rename = "type")]
    pub direction: String,
    /// The rendered weighted sum.
    pub expression: String,
}

/// Solver options forwarded to the subprocess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOptions {
    /// The subprocess's own internal solve budget, in seconds.
    pub max_time_in_seconds: u64,
    /// Number of parallel search workers.
    pub num_search_workers: u32,
    /// Whether the subprocess should log search progress to stderr.
    pub log_search_progress: bool,
}

/// The complete request document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    /// Variable declarations, keyed by name.
    pub variables: BTreeMap<String, VariableDecl>,
    /// All constraints.
    pub constraints: Vec<WireConstraint>,
    /// The objective, if the model has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<WireObjective>,
    /// Solver options.
    pub options: WireOptions,
}

/// One assignment reported by the subprocess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAssignment {
    /// The shift being staffed.
    pub shift_id: String,
    /// The employee assigned to it.
    pub employee_id: String,
}

/// Solve metadata reported by the subprocess.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireMetadata {
    /// Subprocess-measured solve time, in milliseconds.
    pub solve_time: u64,
    /// Number of constraints the subprocess added.
    pub constraints_added: usize,
    /// Number of variables the subprocess created.
    pub variables_created: usize,
    /// Whether the solution was proven optimal.
    pub optimal: bool,
}

/// The complete response document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    /// Whether the subprocess found a feasible solution.
    pub success: bool,
    /// The assignments of the solution.
    #[serde(default)]
    pub assignments: Vec<WireAssignment>,
    /// Solver-side violation notes; informational only, the engine always
    /// re-validates independently.
    #[serde(default)]
    pub violations: Vec<String>,
    /// Solve metadata.
    #[serde(default)]
    pub metadata: WireMetadata,
}

/// Serializes a model and options into the wire request document.
pub fn encode_request(model: &SchedulingModel, options: &SolveOptions) -> BridgeRequest {
    let mut variables = BTreeMap::new();
    for variable in model.variables() {
        variables.insert(
            variable.name.clone(),
            VariableDecl {
                kind: "bool".to_string(),
                min: Some(0),
                max: if variable.fixed_zero { Some(0) } else { Some(1) },
            },
        );
    }

    let mut constraints = Vec::new();
    for constraint in model.constraints() {
        let terms = render_terms(model, &constraint.terms);
        let description = Some(constraint.description.clone());
        match (constraint.lower, constraint.upper) {
            (Some(lower), Some(upper)) if lower == upper => constraints.push(WireConstraint {
                expression: format!("{terms} == {lower}"),
                description,
            }),
            (lower, upper) => {
                // A band becomes two wire constraints.
                if let Some(lower) = lower {
                    constraints.push(WireConstraint {
                        expression: format!("{terms} >= {lower}"),
                        description: description.clone(),
                    });
                }
                if let Some(upper) = upper {
                    constraints.push(WireConstraint {
                        expression: format!("{terms} <= {upper}"),
                        description,
                    });
                }
            }
        }
    }

    let objective = if model.objective().is_empty() {
        None
    } else {
        let weighted: Vec<(i64, &str)> = model
            .objective()
            .iter()
            .map(|(var, weight)| (*weight, model.variable(*var).name.as_str()))
            .collect();
        Some(WireObjective {
            direction: "maximize".to_string(),
            expression: render_linear(&weighted),
        })
    };

    BridgeRequest {
        variables,
        constraints,
        objective,
        options: WireOptions {
            max_time_in_seconds: options.time_budget.as_secs(),
            num_search_workers: options.parallelism_hint,
            log_search_progress: options.verbose,
        },
    }
}

fn render_terms(model: &SchedulingModel, terms: &[(crate::builder::VarId, i64)]) -> String {
    let weighted: Vec<(i64, &str)> = terms
        .iter()
        .map(|(var, coefficient)| (*coefficient, model.variable(*var).name.as_str()))
        .collect();
    render_linear(&weighted)
}

/// Renders a weighted sum as an expression string. Unit coefficients are
/// rendered bare; negatives use a `-` join.
fn render_linear(terms: &[(i64, &str)]) -> String {
    let mut out = String::new();
    for (i, (weight, name)) in terms.iter().enumerate() {
        let magnitude = weight.abs();
        if i == 0 {
            if *weight < 0 {
                out.push_str("-");
            }
        } else if *weight < 0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        if magnitude == 1 {
            out.push_str(name);
        } else {
            out.push_str(&format!("{magnitude} * {name}"));
        }
    }
    out
}
