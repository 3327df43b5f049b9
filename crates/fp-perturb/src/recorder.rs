//! Append-only time series of nominal/perturbed force pairs.

use serde::{Deserialize, Serialize};

/// Column labels, in column order. Fixed for the life of a recorder,
/// including across [`ForceRecorder::reset`].
pub const FORCE_LABELS: [&str; 3] = ["time", "nominal", "perturbed"];

/// One logged derivative evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceSample {
    pub time: f64,
    pub nominal: f64,
    pub perturbed: f64,
}

/// Append-only recorder for `(time, nominal, perturbed)` triples.
///
/// Row order is append order. Time is *not* required to be monotonic:
/// an integrator re-evaluating at an earlier time during a step retry is
/// logged like any other evaluation. Growth is unbounded within a run;
/// call [`reset`](Self::reset) between independent runs.
#[derive(Clone, Debug, Default)]
pub struct ForceRecorder {
    rows: Vec<ForceSample>,
}

impl ForceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample; returns the new row's index.
    pub fn append(&mut self, time: f64, nominal: f64, perturbed: f64) -> usize {
        self.rows.push(ForceSample {
            time,
            nominal,
            perturbed,
        });
        self.rows.len() - 1
    }

    pub fn rows(&self) -> &[ForceSample] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Discard all rows. Labels are constant and unaffected.
    pub fn reset(&mut self) {
        self.rows.clear();
    }

    pub fn labels(&self) -> &'static [&'static str; 3] {
        &FORCE_LABELS
    }
}
