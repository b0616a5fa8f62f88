//! In-process randomized fallback solver.
//!
//! Used only when the bridge is unavailable or fails. It assigns each free
//! variable with a fixed probability under a per-employee ceiling; it does
//! not re-derive the structural constraints of the model, so its output is
//! explicitly lower-confidence and everything it produces goes through the
//! same independent validation as bridge output. Availability over
//! optimality.

use std::collections::HashMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::builder::SchedulingModel;

use super::{BackendMetadata, BackendSolution, SolvedAssignment};

/// Probability with which each free variable is assigned.
pub const ASSIGN_PROBABILITY: f64 = 0.3;

/// Running-total ceiling of assigned shifts per employee, to avoid
/// degenerate over-assignment.
pub const MAX_SHIFTS_PER_EMPLOYEE: usize = 10;

/// The randomized fallback solver.
///
/// The RNG is pluggable: production uses OS entropy, tests use
/// [`RandomFallback::with_seed`] for deterministic output.
#[derive(Debug)]
pub struct RandomFallback {
    rng: StdRng,
    probability: f64,
    max_shifts_per_employee: usize,
}

impl RandomFallback {
    /// Creates a fallback solver seeded from OS entropy.
    pub fn new() -> Self {
        Self::configured(ASSIGN_PROBABILITY, MAX_SHIFTS_PER_EMPLOYEE, None)
    }

    /// Creates a deterministic fallback solver from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::configured(ASSIGN_PROBABILITY, MAX_SHIFTS_PER_EMPLOYEE, Some(seed))
    }

    /// Creates a fallback solver with explicit tuning.
    pub fn configured(probability: f64, max_shifts_per_employee: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            probability,
            max_shifts_per_employee,
        }
    }

    /// Produces some assignment set quickly, with no feasibility guarantee.
    ///
    /// Variables fixed to zero by the model are never assigned. Success is
    /// reported whenever at least one assignment was produced, with the same
    /// metadata shape as the bridge.
    pub fn solve(&mut self, model: &SchedulingModel) -> BackendSolution {
        let started = Instant::now();
        let mut per_employee: HashMap<&str, usize> = HashMap::new();
        let mut assignments = Vec::new();

        for variable in model.variables() {
            if variable.fixed_zero {
                continue;
            }
            let assigned = per_employee.entry(variable.employee_id.as_str()).or_insert(0);
            if *assigned >= self.max_shifts_per_employee {
                continue;
            }
            if self.rng.random_bool(self.probability) {
                *assigned += 1;
                assignments.push(SolvedAssignment {
                    shift_id: variable.shift_id.clone(),
                    employee_id: variable.employee_id.clone(),
                });
            }
        }

        BackendSolution {
            success: !assignments.is_empty(),
            assignments,
            violations: Vec::new(),
            metadata: BackendMetadata {
                solve_time_ms: started.elapsed().as_millis() as u64,
                constraints_added: model.constraint_count(),
                variables_created: model.variable_count(),
                optimal: false,
            },
        }
    }
}

impl Default for RandomFallback {
    fn default() -> Self {
        Self::new()
    }
}
