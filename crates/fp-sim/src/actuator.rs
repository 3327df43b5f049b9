//! Scalar actuators and the owning registry.
//!
//! An actuator is treated as an opaque mutable scalar-force cell: the model
//! writes a nominal force into it during the force pass, and any registered
//! hook may read or overwrite that value before the acceleration pass
//! consumes it. Hooks address actuators by [`ActuatorId`] rather than by
//! reference; the registry stays with the engine.

use fp_core::ActuatorId;

/// A model element producing a single generalized force or torque.
///
/// Only the force cell itself is required here. Anything else an actuator
/// does (activation dynamics, geometry) is the model's business.
pub trait ScalarActuator {
    fn name(&self) -> &str;

    /// Current force value (N or N·m depending on the coordinate).
    fn force(&self) -> f64;

    /// Overwrite the force value.
    fn set_force(&mut self, force: f64);
}

/// Plain named force cell, the basic [`ScalarActuator`] implementation.
#[derive(Clone, Debug)]
pub struct ForceCell {
    name: String,
    force: f64,
}

impl ForceCell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            force: 0.0,
        }
    }
}

impl ScalarActuator for ForceCell {
    fn name(&self) -> &str {
        &self.name
    }

    fn force(&self) -> f64 {
        self.force
    }

    fn set_force(&mut self, force: f64) {
        self.force = force;
    }
}

/// Owning registry of actuators, addressed by [`ActuatorId`].
///
/// At most one hook should target a given actuator at a time; the registry
/// does not enforce this, it is a caller contract.
#[derive(Default)]
pub struct ActuatorSet {
    cells: Vec<Box<dyn ScalarActuator>>,
}

impl ActuatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actuator and hand back its stable id.
    pub fn add(&mut self, actuator: Box<dyn ScalarActuator>) -> ActuatorId {
        let id = ActuatorId::from_index(self.cells.len() as u32);
        self.cells.push(actuator);
        id
    }

    pub fn get(&self, id: ActuatorId) -> Option<&dyn ScalarActuator> {
        self.cells.get(id.index() as usize).map(|b| b.as_ref())
    }

    pub fn get_mut(&mut self, id: ActuatorId) -> Option<&mut (dyn ScalarActuator + 'static)> {
        self.cells.get_mut(id.index() as usize).map(|b| b.as_mut())
    }

    /// Look up an actuator id by name (first match wins).
    pub fn by_name(&self, name: &str) -> Option<ActuatorId> {
        self.cells
            .iter()
            .position(|a| a.name() == name)
            .map(|i| ActuatorId::from_index(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActuatorId, &dyn ScalarActuator)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, a)| (ActuatorId::from_index(i as u32), a.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
