//! Active time window gating the perturbation.

use crate::error::{PerturbError, PerturbResult};
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` during which the law is applied.
///
/// The default spans the whole run. Outside the window the hook is a
/// transparent pass-through (the pair is still logged).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for ActiveWindow {
    fn default() -> Self {
        Self {
            start: f64::NEG_INFINITY,
            end: f64::INFINITY,
        }
    }
}

impl ActiveWindow {
    /// Validated constructor: rejects NaN bounds and `start > end`.
    /// Infinite bounds are fine; an empty window (`start == end`) is legal
    /// and simply never matches.
    pub fn new(start: f64, end: f64) -> PerturbResult<Self> {
        if start.is_nan() || end.is_nan() || start > end {
            return Err(PerturbError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Pure membership predicate, evaluated fresh on every hook call.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}
