//! Integration test: free response of the damped point mass.
//!
//! No hooks registered; the engine should behave like a plain fixed-step
//! integrator. Trends only: a damped spring-mass released from rest decays.

use fp_core::{Tolerances, nearly_equal};
use fp_sim::{
    ActuatorSet, ControlSchedule, Engine, IntegratorType, PointMass, PointMassParams, SimOptions,
    run_sim,
};

fn build_engine(params: PointMassParams) -> Engine<PointMass> {
    let mut actuators = ActuatorSet::new();
    let model = PointMass::register(params, ControlSchedule::constant(0.0), &mut actuators)
        .expect("valid params");
    Engine::new(model, actuators)
}

#[test]
fn damped_oscillation_decays() {
    let params = PointMassParams {
        mass: 1.0,
        spring_stiffness: 25.0,
        damping: 2.0,
        ideal_gain: 0.0,
        initial_position: 0.2,
        initial_velocity: 0.0,
    };
    let mut engine = build_engine(params);

    let opts = SimOptions {
        dt: 1e-3,
        t_end: 5.0,
        record_every: 100,
        ..SimOptions::default()
    };

    let record = run_sim(&mut engine, &mut [], &opts).expect("simulation failed");

    assert_eq!(record.t.len(), record.x.len());
    assert!(record.t.len() > 2);

    // Envelope shrinks: late peak amplitude well below the release position
    let late_max = record
        .x
        .iter()
        .skip(record.x.len() / 2)
        .map(|s| s.position.abs())
        .fold(0.0_f64, f64::max);
    assert!(
        late_max < 0.1 * params.initial_position.abs(),
        "oscillation should have decayed, late amplitude {late_max}"
    );

    // Everything stays finite
    for s in &record.x {
        assert!(s.position.is_finite() && s.velocity.is_finite());
    }
}

#[test]
fn euler_and_rk4_agree_on_trend() {
    let params = PointMassParams {
        mass: 1.0,
        spring_stiffness: 4.0,
        damping: 1.0,
        ideal_gain: 0.0,
        initial_position: 1.0,
        initial_velocity: 0.0,
    };

    let opts_rk4 = SimOptions {
        dt: 1e-3,
        t_end: 2.0,
        record_every: 1000,
        integrator: IntegratorType::RK4,
        ..SimOptions::default()
    };
    let opts_euler = SimOptions {
        integrator: IntegratorType::ForwardEuler,
        ..opts_rk4.clone()
    };

    let mut e1 = build_engine(params);
    let r1 = run_sim(&mut e1, &mut [], &opts_rk4).unwrap();
    let mut e2 = build_engine(params);
    let r2 = run_sim(&mut e2, &mut [], &opts_euler).unwrap();

    let p1 = r1.x.last().unwrap().position;
    let p2 = r2.x.last().unwrap().position;
    let tol = Tolerances {
        abs: 0.05,
        rel: 0.0,
    };
    assert!(
        nearly_equal(p1, p2, tol),
        "integrators should roughly agree at this step size: rk4={p1} euler={p2}"
    );
}
