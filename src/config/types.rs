//! Configuration types for solve-pipeline tuning.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::solver::bridge::{DEFAULT_INTERPRETERS, DEFAULT_SOLVER_SCRIPT};
use crate::solver::fallback::{ASSIGN_PROBABILITY, MAX_SHIFTS_PER_EMPLOYEE, RandomFallback};
use crate::solver::SolveOptions;

/// Tuning for the whole solve pipeline.
///
/// Deserialized from YAML; every field is optional and falls back to the
/// production default, so an empty document yields [`SolverTuning::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverTuning {
    /// The backend's internal solve budget, in seconds.
    pub time_budget_secs: u64,
    /// Parallelism hint forwarded to the CP-SAT backend.
    pub parallelism_hint: u32,
    /// Whether the backend should log search progress.
    pub verbose: bool,
    /// Interpreter invocation names tried, in order, by the availability
    /// probe. An empty list disables the bridge entirely.
    pub interpreter_candidates: Vec<String>,
    /// Location of the CP-SAT solver script.
    pub solver_script: PathBuf,
    /// Tuning for the randomized fallback solver.
    pub fallback: FallbackTuning,
}

/// Tuning for the randomized fallback solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackTuning {
    /// Probability with which each free variable is assigned.
    pub probability: f64,
    /// Running-total ceiling of assigned shifts per employee.
    pub max_shifts_per_employee: usize,
    /// Fixed RNG seed. Unset in production; set for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SolverTuning {
    fn default() -> Self {
        Self {
            time_budget_secs: 105,
            parallelism_hint: 8,
            verbose: false,
            interpreter_candidates: DEFAULT_INTERPRETERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            solver_script: PathBuf::from(DEFAULT_SOLVER_SCRIPT),
            fallback: FallbackTuning::default(),
        }
    }
}

impl Default for FallbackTuning {
    fn default() -> Self {
        Self {
            probability: ASSIGN_PROBABILITY,
            max_shifts_per_employee: MAX_SHIFTS_PER_EMPLOYEE,
            seed: None,
        }
    }
}

impl SolverTuning {
    /// The per-solve options derived from this tuning.
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            time_budget: Duration::from_secs(self.time_budget_secs),
            parallelism_hint: self.parallelism_hint,
            verbose: self.verbose,
        }
    }
}

impl FallbackTuning {
    /// Builds a fallback solver from this tuning.
    pub fn solver(&self) -> RandomFallback {
        RandomFallback::configured(self.probability, self.max_shifts_per_employee, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_production_tuning() {
        let tuning = SolverTuning::default();
        assert_eq!(tuning.time_budget_secs, 105);
        assert_eq!(tuning.parallelism_hint, 8);
        assert!(!tuning.verbose);
        assert_eq!(tuning.interpreter_candidates, ["python3", "python"]);
        assert_eq!(tuning.solver_script, PathBuf::from("scripts/cp_sat_solver.py"));
        assert_eq!(tuning.fallback.probability, 0.3);
        assert_eq!(tuning.fallback.max_shifts_per_employee, 10);
        assert_eq!(tuning.fallback.seed, None);
    }

    #[test]
    fn test_solve_options_carry_budget_and_hints() {
        let tuning = SolverTuning {
            time_budget_secs: 30,
            parallelism_hint: 4,
            verbose: true,
            ..SolverTuning::default()
        };
        let options = tuning.solve_options();
        assert_eq!(options.time_budget, Duration::from_secs(30));
        assert_eq!(options.parallelism_hint, 4);
        assert!(options.verbose);
    }

    #[test]
    fn test_empty_document_deserializes_to_defaults() {
        let tuning: SolverTuning = serde_yaml::from_str("{}").unwrap();
        assert_eq!(tuning, SolverTuning::default());
    }

    #[test]
    fn test_partial_document_keeps_remaining_defaults() {
        let tuning: SolverTuning = serde_yaml::from_str(
            "time_budget_secs: 10\nfallback:\n  seed: 42\n",
        )
        .unwrap();
        assert_eq!(tuning.time_budget_secs, 10);
        assert_eq!(tuning.fallback.seed, Some(42));
        assert_eq!(tuning.parallelism_hint, 8);
        assert_eq!(tuning.fallback.probability, 0.3);
    }
}
