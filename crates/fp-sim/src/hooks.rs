//! Derivative-evaluation hook protocol.
//!
//! A hook observes every derivative evaluation the integrator requests, in
//! two phases:
//!
//! 1. [`DerivHook::override_forces`] fires after the model has written each
//!    actuator's nominal force, before those forces are consumed to compute
//!    accelerations. The hook may read and overwrite actuator forces here.
//! 2. [`DerivHook::restore_forces`] fires after the acceleration pass has
//!    consumed the (possibly overwritten) forces. The hook must undo any
//!    overwrite so nothing leaks into later evaluations.
//!
//! Whatever phase 1 needs to hand to phase 2 of the *same* evaluation rides
//! in a [`HookToken`]: phase 1 returns it, the engine passes it back to
//! phase 2 untouched. Threading the scratch value explicitly means a stale
//! field can never bridge two different evaluations.

use crate::actuator::ActuatorSet;

/// Per-evaluation scratch value threaded from phase 1 to phase 2.
///
/// Today this carries the remembered nominal force; an empty token means
/// phase 1 took its no-op path and phase 2 has nothing to restore.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HookToken(Option<f64>);

impl HookToken {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn carry(value: f64) -> Self {
        Self(Some(value))
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0.is_none()
    }
}

/// Host-supplied constants available to hooks on every invocation.
#[derive(Clone, Copy, Debug)]
pub struct HostContext {
    /// Time-scale constant applied when recording evaluation times.
    pub time_normalization: f64,
}

impl Default for HostContext {
    fn default() -> Self {
        Self {
            time_normalization: 1.0,
        }
    }
}

impl HostContext {
    /// Evaluation time mapped into the host's recorded time base.
    pub fn record_time(&self, t: f64) -> f64 {
        t * self.time_normalization
    }
}

/// Two-phase hook invoked around every derivative evaluation.
///
/// Both phases run synchronously on the integrator's thread. The engine
/// calls the phases in matched pairs for every evaluation, including
/// evaluations belonging to steps that are later cut back and retried; a
/// hook cannot tell an accepted evaluation from a discarded one.
pub trait DerivHook {
    /// Phase 1: nominal forces are in place, accelerations not yet computed.
    fn override_forces(
        &mut self,
        t: f64,
        actuators: &mut ActuatorSet,
        host: &HostContext,
    ) -> HookToken;

    /// Phase 2: forces have been consumed; undo any overwrite.
    fn restore_forces(
        &mut self,
        t: f64,
        actuators: &mut ActuatorSet,
        host: &HostContext,
        token: HookToken,
    );
}
