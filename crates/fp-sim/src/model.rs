//! DynamicsModel trait for pluggable dynamic systems.

use crate::actuator::ActuatorSet;
use crate::error::SimResult;

/// Trait for dynamic system models driven by the engine.
///
/// The derivative evaluation is split into two stages so hooks can run in
/// between:
/// - `compute_forces` writes each actuator's nominal force for this
///   evaluation into the registry
/// - `accelerations` consumes the (possibly overwritten) forces and returns
///   the state derivative
///
/// State arithmetic (`add`, `scale`) is what the fixed-step integrators
/// need to combine stages.
pub trait DynamicsModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Write each actuator's nominal force for this evaluation.
    ///
    /// Note: takes `&mut self` to allow models to cache intermediate results.
    fn compute_forces(
        &mut self,
        t: f64,
        x: &Self::State,
        actuators: &mut ActuatorSet,
    ) -> SimResult<()>;

    /// Consume actuator forces and return the state derivative dxdt.
    ///
    /// Must read forces from the registry, not from any value remembered
    /// during `compute_forces`; a hook may have overwritten them in between.
    fn accelerations(
        &mut self,
        t: f64,
        x: &Self::State,
        actuators: &ActuatorSet,
    ) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}
