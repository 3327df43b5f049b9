//! The force perturbation hook.
//!
//! Note: the override made here is never part of the committed trajectory
//! record. To run an induced-acceleration analysis from a perturbed run,
//! post-process the recorded force series against the host's accepted-step
//! times; the recorder logs *every* derivative evaluation, including stages
//! of steps the integrator later cut back.

use crate::law::Perturbation;
use crate::recorder::ForceRecorder;
use crate::window::ActiveWindow;
use fp_sim::{ActuatorId, ActuatorSet, DerivHook, HookToken, HostContext, ScalarActuator};
use tracing::{debug, warn};

/// Two-phase hook that perturbs one actuator's force per evaluation.
///
/// Phase 1 reads the nominal force, applies the law inside the active
/// window, logs the `(time, nominal, perturbed)` triple, and overwrites the
/// actuator. Phase 2 writes the nominal force back. Between the phases any
/// reader of the actuator observes the perturbed value; that is the whole
/// mechanism: the perturbation influences exactly one acceleration
/// computation and nothing after it.
///
/// At most one `ForcePerturbation` should target a given actuator at a
/// time. This is a caller contract, not checked at runtime.
pub struct ForcePerturbation {
    target: Option<ActuatorId>,
    perturbation: Perturbation,
    window: ActiveWindow,
    allow_negative_force: bool,
    enabled: bool,
    recorder: ForceRecorder,
}

impl ForcePerturbation {
    /// New hook with no target bound, an unbounded window, negative forces
    /// allowed, and the hook enabled.
    pub fn new(perturbation: Perturbation) -> Self {
        Self {
            target: None,
            perturbation,
            window: ActiveWindow::default(),
            allow_negative_force: true,
            enabled: true,
            recorder: ForceRecorder::new(),
        }
    }

    /// Bind the actuator whose force is perturbed.
    pub fn set_target(&mut self, id: ActuatorId) {
        self.target = Some(id);
    }

    pub fn target(&self) -> Option<ActuatorId> {
        self.target
    }

    /// Replace law and parameter together; never half-applied.
    pub fn set_perturbation(&mut self, perturbation: Perturbation) {
        self.perturbation = perturbation;
    }

    pub fn perturbation(&self) -> Perturbation {
        self.perturbation
    }

    pub fn set_window(&mut self, window: ActiveWindow) {
        self.window = window;
    }

    pub fn window(&self) -> ActiveWindow {
        self.window
    }

    /// When false, a perturbed force below zero is clamped to zero after
    /// the law is applied (never before).
    pub fn set_allow_negative_force(&mut self, allow: bool) {
        self.allow_negative_force = allow;
    }

    pub fn allow_negative_force(&self) -> bool {
        self.allow_negative_force
    }

    /// Takes effect on the very next hook invocation.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn recorder(&self) -> &ForceRecorder {
        &self.recorder
    }

    /// Clear the recorder so the hook can be reused for a fresh run.
    pub fn reset(&mut self) {
        self.recorder.reset();
    }

    /// Law inside the window, identity outside, clamp after either.
    fn perturbed_force(&self, t: f64, nominal: f64) -> f64 {
        let mut force = if self.window.contains(t) {
            self.perturbation.apply(nominal)
        } else {
            nominal
        };
        if !self.allow_negative_force && force < 0.0 {
            force = 0.0;
        }
        force
    }
}

impl DerivHook for ForcePerturbation {
    fn override_forces(
        &mut self,
        t: f64,
        actuators: &mut ActuatorSet,
        host: &HostContext,
    ) -> HookToken {
        if !self.enabled {
            // Normal pass-through, not an error
            debug!(t, "perturbation disabled, passing through");
            return HookToken::empty();
        }
        let Some(id) = self.target else {
            warn!(t, "no target actuator bound, skipping force override");
            return HookToken::empty();
        };
        let Some(actuator) = actuators.get_mut(id) else {
            warn!(t, target = %id, "target actuator not in registry, skipping force override");
            return HookToken::empty();
        };

        let nominal = actuator.force();
        let perturbed = self.perturbed_force(t, nominal);

        // One row per invocation, whether or not the window matched, so the
        // log distinguishes "outside window" from "law degenerated to
        // identity" by inspection of time against the window.
        self.recorder
            .append(host.record_time(t), nominal, perturbed);

        actuator.set_force(perturbed);
        HookToken::carry(nominal)
    }

    fn restore_forces(
        &mut self,
        t: f64,
        actuators: &mut ActuatorSet,
        _host: &HostContext,
        token: HookToken,
    ) {
        // An empty token means phase 1 was a no-op; nothing to undo. The
        // token, not the enabled flag, decides: toggling mid-run must not
        // strand an overridden force.
        let Some(nominal) = token.value() else {
            return;
        };
        let Some(id) = self.target else {
            return;
        };
        match actuators.get_mut(id) {
            Some(actuator) => actuator.set_force(nominal),
            None => warn!(t, target = %id, "target actuator vanished before restore"),
        }
    }
}
