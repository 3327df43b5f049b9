//! Single-DOF point mass with spring, damper, and ideal actuators.
//!
//! Small enough to reason about by hand, rich enough to exercise the hook
//! protocol: three force cells feed one acceleration. The "ideal" actuator
//! applies `gain * control(t)` with a piecewise-constant control schedule
//! and is the usual target for a perturbation analysis.

use crate::actuator::{ActuatorSet, ForceCell};
use crate::error::{SimError, SimResult};
use crate::model::DynamicsModel;
use fp_core::{ActuatorId, FpError, ensure_finite, ensure_positive};

/// Piecewise-constant control signal: `(time, level)` breakpoints.
///
/// The level at time `t` is the level of the last breakpoint at or before
/// `t`; before the first breakpoint the first level holds.
#[derive(Clone, Debug)]
pub struct ControlSchedule {
    points: Vec<(f64, f64)>,
}

impl ControlSchedule {
    /// A schedule holding one level for all time.
    pub fn constant(level: f64) -> Self {
        Self {
            points: vec![(0.0, level)],
        }
    }

    /// Breakpoints must be non-empty, finite, and strictly increasing in time.
    pub fn new(points: Vec<(f64, f64)>) -> SimResult<Self> {
        if points.is_empty() {
            return Err(SimError::InvalidArg {
                what: "control schedule needs at least one breakpoint",
            });
        }
        for window in points.windows(2) {
            if window[1].0 <= window[0].0 {
                return Err(SimError::InvalidArg {
                    what: "control breakpoints must be strictly increasing in time",
                });
            }
        }
        for &(time, level) in &points {
            ensure_finite(time, "control breakpoint time")?;
            ensure_finite(level, "control level")?;
        }
        Ok(Self { points })
    }

    pub fn level_at(&self, t: f64) -> f64 {
        self.points
            .iter()
            .rev()
            .find(|(time, _)| *time <= t)
            .map(|(_, level)| *level)
            .unwrap_or(self.points[0].1)
    }
}

/// Parameters for the point-mass model.
#[derive(Clone, Copy, Debug)]
pub struct PointMassParams {
    /// Mass (kg), must be positive
    pub mass: f64,
    /// Spring stiffness (N/m), non-negative
    pub spring_stiffness: f64,
    /// Damping coefficient (N·s/m), non-negative
    pub damping: f64,
    /// Ideal actuator gain (N per unit control)
    pub ideal_gain: f64,
    pub initial_position: f64,
    pub initial_velocity: f64,
}

impl Default for PointMassParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            spring_stiffness: 10.0,
            damping: 0.5,
            ideal_gain: 1.0,
            initial_position: 0.1,
            initial_velocity: 0.0,
        }
    }
}

/// State: position and velocity of the mass.
#[derive(Clone, Copy, Debug)]
pub struct PointMassState {
    pub position: f64,
    pub velocity: f64,
}

/// Single-DOF mass driven by three scalar actuators.
pub struct PointMass {
    params: PointMassParams,
    control: ControlSchedule,
    spring: ActuatorId,
    damper: ActuatorId,
    ideal: ActuatorId,
}

impl PointMass {
    /// Create the model and register its actuators with the given set.
    pub fn register(
        params: PointMassParams,
        control: ControlSchedule,
        actuators: &mut ActuatorSet,
    ) -> SimResult<Self> {
        ensure_positive(params.mass, "mass")?;
        ensure_finite(params.spring_stiffness, "spring_stiffness")?;
        ensure_finite(params.damping, "damping")?;
        ensure_finite(params.ideal_gain, "ideal_gain")?;
        if params.spring_stiffness < 0.0 || params.damping < 0.0 {
            return Err(SimError::InvalidArg {
                what: "spring_stiffness and damping must be non-negative",
            });
        }

        let spring = actuators.add(Box::new(ForceCell::new("spring")));
        let damper = actuators.add(Box::new(ForceCell::new("damper")));
        let ideal = actuators.add(Box::new(ForceCell::new("ideal")));

        Ok(Self {
            params,
            control,
            spring,
            damper,
            ideal,
        })
    }

    pub fn spring_actuator(&self) -> ActuatorId {
        self.spring
    }

    pub fn damper_actuator(&self) -> ActuatorId {
        self.damper
    }

    /// The externally driven actuator, the usual perturbation target.
    pub fn ideal_actuator(&self) -> ActuatorId {
        self.ideal
    }

    fn write_force(actuators: &mut ActuatorSet, id: ActuatorId, force: f64) -> SimResult<()> {
        let len = actuators.len();
        actuators
            .get_mut(id)
            .ok_or(FpError::UnknownId {
                what: "model actuator",
                index: id.index() as usize,
                len,
            })?
            .set_force(force);
        Ok(())
    }

    fn read_force(actuators: &ActuatorSet, id: ActuatorId) -> SimResult<f64> {
        Ok(actuators
            .get(id)
            .ok_or(FpError::UnknownId {
                what: "model actuator",
                index: id.index() as usize,
                len: actuators.len(),
            })?
            .force())
    }
}

impl DynamicsModel for PointMass {
    type State = PointMassState;

    fn initial_state(&self) -> PointMassState {
        PointMassState {
            position: self.params.initial_position,
            velocity: self.params.initial_velocity,
        }
    }

    fn compute_forces(
        &mut self,
        t: f64,
        x: &PointMassState,
        actuators: &mut ActuatorSet,
    ) -> SimResult<()> {
        Self::write_force(
            actuators,
            self.spring,
            -self.params.spring_stiffness * x.position,
        )?;
        Self::write_force(actuators, self.damper, -self.params.damping * x.velocity)?;
        Self::write_force(
            actuators,
            self.ideal,
            self.params.ideal_gain * self.control.level_at(t),
        )?;
        Ok(())
    }

    fn accelerations(
        &mut self,
        _t: f64,
        x: &PointMassState,
        actuators: &ActuatorSet,
    ) -> SimResult<PointMassState> {
        let total = Self::read_force(actuators, self.spring)?
            + Self::read_force(actuators, self.damper)?
            + Self::read_force(actuators, self.ideal)?;

        Ok(PointMassState {
            position: x.velocity,
            velocity: total / self.params.mass,
        })
    }

    fn add(&self, a: &PointMassState, b: &PointMassState) -> PointMassState {
        PointMassState {
            position: a.position + b.position,
            velocity: a.velocity + b.velocity,
        }
    }

    fn scale(&self, a: &PointMassState, scale: f64) -> PointMassState {
        PointMassState {
            position: scale * a.position,
            velocity: scale * a.velocity,
        }
    }
}
