//! Engine: owns a model plus its actuator registry and drives the
//! two-phase hook protocol around every derivative evaluation.

use crate::actuator::ActuatorSet;
use crate::error::SimResult;
use crate::hooks::{DerivHook, HookToken, HostContext};
use crate::model::DynamicsModel;

/// Integration host: model, actuator registry, host constants.
///
/// Hooks are not owned here. Callers pass them into each evaluation (or to
/// [`crate::sim::run_sim`]) so they keep ownership of the hook's state, e.g.
/// a recorder, for inspection after the run.
pub struct Engine<M: DynamicsModel> {
    model: M,
    actuators: ActuatorSet,
    host: HostContext,
}

impl<M: DynamicsModel> Engine<M> {
    pub fn new(model: M, actuators: ActuatorSet) -> Self {
        Self {
            model,
            actuators,
            host: HostContext::default(),
        }
    }

    /// Set the host time-scale constant used when hooks record time.
    pub fn with_time_normalization(mut self, time_normalization: f64) -> Self {
        self.host.time_normalization = time_normalization;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn actuators(&self) -> &ActuatorSet {
        &self.actuators
    }

    pub fn actuators_mut(&mut self) -> &mut ActuatorSet {
        &mut self.actuators
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn initial_state(&self) -> M::State {
        self.model.initial_state()
    }

    /// One derivative evaluation with the full hook protocol:
    ///
    /// 1. model writes nominal forces
    /// 2. phase 1 of each hook, collecting one token per hook
    /// 3. model consumes forces into accelerations
    /// 4. phase 2 of each hook, in the same order, with the matching token
    ///
    /// Phase 2 runs even when the acceleration pass fails, so actuator
    /// forces are back to nominal before a cutback retry re-evaluates.
    pub fn eval_derivative(
        &mut self,
        t: f64,
        x: &M::State,
        hooks: &mut [&mut dyn DerivHook],
    ) -> SimResult<M::State> {
        self.model.compute_forces(t, x, &mut self.actuators)?;

        let mut tokens: Vec<HookToken> = Vec::with_capacity(hooks.len());
        for hook in hooks.iter_mut() {
            tokens.push(hook.override_forces(t, &mut self.actuators, &self.host));
        }

        let result = self.model.accelerations(t, x, &self.actuators);

        for (hook, token) in hooks.iter_mut().zip(tokens) {
            hook.restore_forces(t, &mut self.actuators, &self.host, token);
        }

        result
    }
}
