//! Fixed-step time integrators.
//!
//! Every stage evaluation goes through [`Engine::eval_derivative`], so
//! registered hooks fire once per stage: RK4 produces four hook pairs per
//! step, Forward Euler one.

use crate::engine::Engine;
use crate::error::SimResult;
use crate::hooks::DerivHook;
use crate::model::DynamicsModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step.
    fn step<M: DynamicsModel>(
        &self,
        engine: &mut Engine<M>,
        hooks: &mut [&mut dyn DerivHook],
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: DynamicsModel>(
        &self,
        engine: &mut Engine<M>,
        hooks: &mut [&mut dyn DerivHook],
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = engine.eval_derivative(t, x, hooks)?;

        let x2 = engine.model().add(x, &engine.model().scale(&k1, 0.5 * dt));
        let k2 = engine.eval_derivative(t + 0.5 * dt, &x2, hooks)?;

        let x3 = engine.model().add(x, &engine.model().scale(&k2, 0.5 * dt));
        let k3 = engine.eval_derivative(t + 0.5 * dt, &x3, hooks)?;

        let x4 = engine.model().add(x, &engine.model().scale(&k3, dt));
        let k4 = engine.eval_derivative(t + dt, &x4, hooks)?;

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let model = engine.model();
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Forward Euler (explicit, 1st order, one evaluation per step).
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: DynamicsModel>(
        &self,
        engine: &mut Engine<M>,
        hooks: &mut [&mut dyn DerivHook],
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = engine.eval_derivative(t, x, hooks)?;
        Ok(engine.model().add(x, &engine.model().scale(&xdot, dt)))
    }
}
