//! YAML loading for [`SolverTuning`].

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::SolverTuning;

/// Loads solver tuning from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the tuning file (e.g., "./config/tuning.yaml")
///
/// # Returns
///
/// Returns the parsed tuning on success, or an error if the file is missing
/// or contains invalid YAML. Fields absent from the file keep their
/// production defaults.
///
/// # Example
///
/// ```no_run
/// use shift_engine::config::load_tuning;
///
/// let tuning = load_tuning("./config/tuning.yaml")?;
/// println!("Budget: {}s", tuning.time_budget_secs);
/// # Ok::<(), shift_engine::error::EngineError>(())
/// ```
pub fn load_tuning<P: AsRef<Path>>(path: P) -> EngineResult<SolverTuning> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}
