//! Perturbation laws: how a nominal force maps to a perturbed force.

use serde::{Deserialize, Serialize};

/// Force-transformation law with its bound parameter.
///
/// Law and parameter travel together in one value, so replacing a
/// perturbation is a single assignment and can never be half-applied.
/// The closed sum type also makes an "unrecognized law" unrepresentable;
/// unknown tags are rejected at deserialization time instead.
///
/// | variant       | perturbed force   |
/// |---------------|-------------------|
/// | `Scale(p)`    | `f + p * f`       |
/// | `Delta(p)`    | `f + p`           |
/// | `Constant(p)` | `p`               |
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", content = "parameter", rename_all = "lowercase")]
pub enum Perturbation {
    /// Multiply the nominal force by `1 + p`. Typically `p` in [0, 1].
    Scale(f64),
    /// Add `p` to the nominal force.
    Delta(f64),
    /// Replace the nominal force with `p`.
    Constant(f64),
}

impl Perturbation {
    /// Apply the law to a nominal force. Pure, no side effects.
    pub fn apply(&self, nominal: f64) -> f64 {
        match *self {
            Perturbation::Scale(p) => nominal + p * nominal,
            Perturbation::Delta(p) => nominal + p,
            Perturbation::Constant(p) => p,
        }
    }

    /// The bound parameter, whichever law it belongs to.
    pub fn parameter(&self) -> f64 {
        match *self {
            Perturbation::Scale(p) | Perturbation::Delta(p) | Perturbation::Constant(p) => p,
        }
    }

    /// Stable lowercase tag, e.g. for run manifests.
    pub fn tag(&self) -> &'static str {
        match self {
            Perturbation::Scale(_) => "scale",
            Perturbation::Delta(_) => "delta",
            Perturbation::Constant(_) => "constant",
        }
    }
}
