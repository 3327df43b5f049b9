//! Content-based hashing for run IDs.

use crate::types::RunType;
use sha2::{Digest, Sha256};

/// Deterministic run id from the scenario content, the run type, and the
/// solver version. Same inputs, same id, so the store doubles as a cache.
pub fn compute_run_id(scenario_json: &str, run_type: &RunType, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(scenario_json.as_bytes());

    let run_type_json = serde_json::to_string(run_type).unwrap_or_default();
    hasher.update(run_type_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{result:x}")
}
