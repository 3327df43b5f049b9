//! Integration test: perturbing the point-mass ideal actuator end to end.
//!
//! Runs the real engine with RK4 so the hook fires four times per step,
//! then checks the force log against the window and the law, and checks
//! that the perturbation influenced the trajectory without corrupting the
//! actuator state it leaves behind.

use fp_core::{Tolerances, nearly_equal};
use fp_perturb::{ActiveWindow, ForcePerturbation, Perturbation};
use fp_sim::{
    ActuatorSet, ControlSchedule, DerivHook, Engine, IntegratorType, PointMass, PointMassParams,
    ScalarActuator, SimOptions, run_sim,
};

fn params() -> PointMassParams {
    PointMassParams {
        mass: 1.0,
        spring_stiffness: 10.0,
        damping: 0.5,
        ideal_gain: 5.0,
        initial_position: 0.0,
        initial_velocity: 0.0,
    }
}

fn build_engine() -> (Engine<PointMass>, fp_sim::ActuatorId) {
    let mut actuators = ActuatorSet::new();
    let model = PointMass::register(params(), ControlSchedule::constant(1.0), &mut actuators)
        .expect("valid params");
    let target = model.ideal_actuator();
    (Engine::new(model, actuators), target)
}

fn opts() -> SimOptions {
    SimOptions {
        dt: 0.01,
        t_end: 0.3,
        record_every: 1,
        integrator: IntegratorType::RK4,
        ..SimOptions::default()
    }
}

#[test]
fn logs_every_evaluation_and_obeys_the_window() {
    let (mut engine, target) = build_engine();

    let mut hook = ForcePerturbation::new(Perturbation::Scale(0.5));
    hook.set_target(target);
    hook.set_window(ActiveWindow::new(0.1, 0.2).unwrap());

    let mut hooks: Vec<&mut dyn DerivHook> = vec![&mut hook];
    let record = run_sim(&mut engine, &mut hooks, &opts()).expect("simulation failed");

    // record_every = 1: one record per accepted step, plus the initial state
    let steps = record.t.len() - 1;
    assert_eq!(
        hook.recorder().len(),
        4 * steps,
        "RK4 fires the hook four times per accepted step"
    );

    let window = ActiveWindow::new(0.1, 0.2).unwrap();
    let mut saw_inside = false;
    let mut saw_outside = false;
    for row in hook.recorder().rows() {
        if window.contains(row.time) {
            saw_inside = true;
            assert!(
                nearly_equal(row.perturbed, row.nominal * 1.5, Tolerances::default()),
                "inside window: perturbed must be nominal * (1 + 0.5)"
            );
        } else {
            saw_outside = true;
            assert_eq!(
                row.perturbed, row.nominal,
                "outside window: exact pass-through"
            );
        }
    }
    assert!(saw_inside && saw_outside, "run should straddle the window");

    // After the last phase 2, the actuator holds the nominal force of the
    // last evaluation, untouched by the perturbation.
    let last = hook.recorder().rows().last().unwrap();
    assert_eq!(
        engine.actuators().get(target).unwrap().force(),
        last.nominal
    );
}

#[test]
fn perturbation_changes_the_trajectory() {
    let window = ActiveWindow::new(0.0, 0.3).unwrap();

    let (mut nominal_engine, _) = build_engine();
    let nominal = run_sim(&mut nominal_engine, &mut [], &opts()).unwrap();

    let (mut perturbed_engine, target) = build_engine();
    let mut hook = ForcePerturbation::new(Perturbation::Delta(10.0));
    hook.set_target(target);
    hook.set_window(window);
    let mut hooks: Vec<&mut dyn DerivHook> = vec![&mut hook];
    let perturbed = run_sim(&mut perturbed_engine, &mut hooks, &opts()).unwrap();

    let p_nom = nominal.x.last().unwrap().position;
    let p_pert = perturbed.x.last().unwrap().position;
    assert!(
        (p_pert - p_nom).abs() > 1e-3,
        "an extra 10 N for 0.3 s must move the mass: nominal={p_nom} perturbed={p_pert}"
    );
    assert!(
        p_pert > p_nom,
        "a positive force delta pushes position up: nominal={p_nom} perturbed={p_pert}"
    );
}

#[test]
fn disabled_hook_leaves_the_trajectory_alone() {
    let (mut nominal_engine, _) = build_engine();
    let nominal = run_sim(&mut nominal_engine, &mut [], &opts()).unwrap();

    let (mut engine, target) = build_engine();
    let mut hook = ForcePerturbation::new(Perturbation::Constant(500.0));
    hook.set_target(target);
    hook.set_enabled(false);
    let mut hooks: Vec<&mut dyn DerivHook> = vec![&mut hook];
    let record = run_sim(&mut engine, &mut hooks, &opts()).unwrap();

    assert!(hook.recorder().is_empty(), "disabled hook must not log");
    for (a, b) in nominal.x.iter().zip(record.x.iter()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }
}

#[test]
fn recorded_times_use_host_normalization() {
    let (engine, target) = build_engine();
    let mut engine = engine.with_time_normalization(1000.0); // e.g. ms

    let mut hook = ForcePerturbation::new(Perturbation::Delta(1.0));
    hook.set_target(target);
    let mut hooks: Vec<&mut dyn DerivHook> = vec![&mut hook];
    let opts = SimOptions {
        dt: 0.01,
        t_end: 0.02,
        record_every: 1,
        integrator: IntegratorType::ForwardEuler,
        ..SimOptions::default()
    };
    run_sim(&mut engine, &mut hooks, &opts).unwrap();

    // Forward Euler: one evaluation per step, at the step's start time
    let rows = hook.recorder().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].time, 0.0);
    assert!((rows[1].time - 10.0).abs() < 1e-9, "0.01 s → 10 ms");
}

#[test]
fn hook_reset_supports_back_to_back_runs() {
    let (mut engine, target) = build_engine();
    let mut hook = ForcePerturbation::new(Perturbation::Scale(0.5));
    hook.set_target(target);

    let mut hooks: Vec<&mut dyn DerivHook> = vec![&mut hook];
    run_sim(&mut engine, &mut hooks, &opts()).unwrap();
    let first_rows = hook.recorder().len();
    assert!(first_rows > 0);

    hook.reset();
    let mut hooks: Vec<&mut dyn DerivHook> = vec![&mut hook];
    run_sim(&mut engine, &mut hooks, &opts()).unwrap();
    assert_eq!(hook.recorder().len(), first_rows);
}
