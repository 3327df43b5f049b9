//! Retried step evaluations are logged like any other evaluation.
//!
//! The recorder is a record of derivative evaluations, not of accepted
//! trajectory points: when a step fails and is cut back, the evaluations
//! already made for the abandoned attempt stay in the log.

use fp_perturb::{ForcePerturbation, Perturbation};
use fp_sim::{
    ActuatorId, ActuatorSet, DerivHook, DynamicsModel, Engine, ForceCell, IntegratorType,
    ScalarActuator, SimError, SimOptions, SimResult, run_sim,
};

/// One actuator with a constant nominal force; the acceleration pass fails
/// a configurable number of times before behaving.
struct FlakyModel {
    id: ActuatorId,
    failures_left: usize,
}

impl DynamicsModel for FlakyModel {
    type State = f64;

    fn initial_state(&self) -> f64 {
        0.0
    }

    fn compute_forces(&mut self, _t: f64, _x: &f64, actuators: &mut ActuatorSet) -> SimResult<()> {
        actuators
            .get_mut(self.id)
            .ok_or(SimError::InvalidArg {
                what: "actuator not registered",
            })?
            .set_force(2.0);
        Ok(())
    }

    fn accelerations(&mut self, _t: f64, _x: &f64, actuators: &ActuatorSet) -> SimResult<f64> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(SimError::Retryable {
                message: "transient solver hiccup".to_string(),
            });
        }
        Ok(actuators.get(self.id).map(|a| a.force()).unwrap_or(0.0))
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn scale(&self, a: &f64, scale: f64) -> f64 {
        a * scale
    }
}

#[test]
fn abandoned_evaluations_stay_in_the_log() {
    let mut actuators = ActuatorSet::new();
    let id = actuators.add(Box::new(ForceCell::new("flaky")));
    let mut engine = Engine::new(
        FlakyModel {
            id,
            failures_left: 1,
        },
        actuators,
    );

    let mut hook = ForcePerturbation::new(Perturbation::Scale(0.5));
    hook.set_target(id);

    let opts = SimOptions {
        dt: 0.1,
        t_end: 0.2,
        max_steps: 10,
        record_every: 1,
        integrator: IntegratorType::RK4,
        min_dt: 0.01,
        max_retries: 4,
        cutback_factor: 0.5,
        grow_factor: 2.0,
    };

    let mut hooks: Vec<&mut dyn DerivHook> = vec![&mut hook];
    let record = run_sim(&mut engine, &mut hooks, &opts).expect("retry should succeed");

    let steps = record.t.len() - 1;
    // 4 evaluations per accepted RK4 step, plus the single evaluation from
    // the abandoned first attempt (phase 1 ran before the failure).
    assert_eq!(hook.recorder().len(), 4 * steps + 1);

    // The abandoned evaluation and its retry both logged time 0
    assert_eq!(hook.recorder().rows()[0].time, 0.0);
    assert_eq!(hook.recorder().rows()[1].time, 0.0);

    // Every row still satisfies the law
    for row in hook.recorder().rows() {
        assert_eq!(row.nominal, 2.0);
        assert_eq!(row.perturbed, 3.0);
    }

    // The failed attempt restored the nominal force before the retry
    assert_eq!(engine.actuators().get(id).unwrap().force(), 2.0);
}
