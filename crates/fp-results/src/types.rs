//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

/// What kind of run produced a force series.
///
/// The perturbation is described with plain strings/floats rather than
/// fp-perturb types so a manifest stays readable even if the law set
/// evolves. `window_start`/`window_end` of `None` mean unbounded (JSON has
/// no infinities).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunType {
    Nominal,
    Perturbed {
        law: String,
        parameter: f64,
        window_start: Option<f64>,
        window_end: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_id: String,
    pub timestamp: String,
    pub run_type: RunType,
    pub solver_version: String,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    pub fn new(
        run_id: RunId,
        scenario_id: impl Into<String>,
        run_type: RunType,
        solver_version: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            scenario_id: scenario_id.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            run_type,
            solver_version: solver_version.into(),
        }
    }
}
