//! Integration host for actuator-level analyses.
//!
//! Provides:
//! - Scalar actuator abstraction and owning registry
//! - Two-stage dynamics model trait (force pass, then acceleration pass)
//! - Derivative-evaluation hook protocol with explicit per-evaluation tokens
//! - Fixed-step RK4 / Forward Euler integrators with cutback retry
//! - Point-mass demo model with spring, damper, and ideal actuators

pub mod actuator;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod integrator;
pub mod model;
pub mod pointmass;
pub mod sim;

// Re-exports for public API
pub use actuator::{ActuatorSet, ForceCell, ScalarActuator};
pub use engine::Engine;
pub use error::{SimError, SimResult};
pub use fp_core::ActuatorId;
pub use hooks::{DerivHook, HookToken, HostContext};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::DynamicsModel;
pub use pointmass::{ControlSchedule, PointMass, PointMassParams, PointMassState};
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim};
