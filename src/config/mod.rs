//! Engine configuration.
//!
//! This module provides the [`SolverTuning`] type describing how the solve
//! pipeline is tuned, and a YAML loader for reading it from disk. Every field
//! has a production default, so a missing or partial file degrades gracefully
//! to the built-in tuning.

mod loader;
mod types;

pub use loader::load_tuning;
pub use types::{FallbackTuning, SolverTuning};
