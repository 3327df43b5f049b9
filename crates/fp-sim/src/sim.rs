//! Simulation runner with cutback retry.

use crate::engine::Engine;
use crate::error::{SimError, SimResult};
use crate::hooks::DerivHook;
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::DynamicsModel;
use tracing::{debug, warn};

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, 4 derivative evaluations per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, 1 derivative evaluation per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
    /// Smallest step the cutback logic may try
    pub min_dt: f64,
    /// Maximum retries per step before giving up
    pub max_retries: usize,
    /// Step shrink factor on a retryable failure, in (0, 1)
    pub cutback_factor: f64,
    /// Step growth factor after a successful step, >= 1 (capped at `dt`)
    pub grow_factor: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
            integrator: IntegratorType::default(),
            min_dt: 1e-6,
            max_retries: 8,
            cutback_factor: 0.5,
            grow_factor: 2.0,
        }
    }
}

/// Record of simulation results: accepted steps only.
///
/// Hooks see every derivative evaluation, including stages of steps that
/// were cut back; this record holds only the trajectory that was kept.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

fn validate(opts: &SimOptions) -> SimResult<()> {
    if opts.dt <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if opts.t_end < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.min_dt <= 0.0 || opts.min_dt > opts.dt {
        return Err(SimError::InvalidArg {
            what: "min_dt must be in (0, dt]",
        });
    }
    if opts.cutback_factor <= 0.0 || opts.cutback_factor >= 1.0 {
        return Err(SimError::InvalidArg {
            what: "cutback_factor must be in (0, 1)",
        });
    }
    if opts.grow_factor < 1.0 {
        return Err(SimError::InvalidArg {
            what: "grow_factor must be >= 1",
        });
    }
    Ok(())
}

/// Run a transient simulation.
///
/// A `SimError::Retryable` from the model cuts the step back by
/// `cutback_factor` and re-attempts, down to `min_dt` and at most
/// `max_retries` times per step. Re-attempted steps re-evaluate derivatives,
/// so hooks fire again for them.
pub fn run_sim<M: DynamicsModel>(
    engine: &mut Engine<M>,
    hooks: &mut [&mut dyn DerivHook],
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    validate(opts)?;

    let mut t = 0.0;
    let mut x = engine.initial_state();

    let mut t_record = vec![t];
    let mut x_record = vec![x.clone()];

    let mut dt_next = opts.dt;
    let mut step = 0;
    while t < opts.t_end && step < opts.max_steps {
        let mut attempt = dt_next.min(opts.t_end - t);
        let mut retries = 0;

        let next = loop {
            let result = match opts.integrator {
                IntegratorType::RK4 => RK4.step(engine, hooks, t, &x, attempt),
                IntegratorType::ForwardEuler => ForwardEuler.step(engine, hooks, t, &x, attempt),
            };
            match result {
                Ok(next) => break next,
                Err(SimError::Retryable { message }) => {
                    retries += 1;
                    let cut = attempt * opts.cutback_factor;
                    if retries > opts.max_retries || cut < opts.min_dt {
                        return Err(SimError::Retryable { message });
                    }
                    warn!(t, retries, dt = cut, %message, "step failed, cutting back");
                    attempt = cut;
                }
                Err(e) => return Err(e),
            }
        };

        x = next;
        t += attempt;
        dt_next = (attempt * opts.grow_factor).min(opts.dt);
        step += 1;

        // Record if decimation matches
        if step % opts.record_every == 0 {
            t_record.push(t);
            x_record.push(x.clone());
        }
    }

    // Always record final state
    if step % opts.record_every != 0 {
        t_record.push(t);
        x_record.push(x);
    }

    debug!(steps = step, t_final = t, "simulation finished");

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}
