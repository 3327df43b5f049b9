//! Scenario file schema and model assembly.
//!
//! A scenario YAML describes one point-mass analysis: model parameters,
//! an optional perturbation, and simulation options. Unknown perturbation
//! law tags fail at parse time.

use fp_perturb::{ActiveWindow, ForcePerturbation, Perturbation, PerturbError};
use fp_results::RunType;
use fp_sim::{
    ActuatorSet, ControlSchedule, Engine, IntegratorType, PointMass, PointMassParams, SimError,
    SimOptions,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Model error: {0}")]
    Model(#[from] SimError),

    #[error("Perturbation error: {0}")]
    Perturbation(#[from] PerturbError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub model: ModelDef,
    #[serde(default)]
    pub perturbation: Option<PerturbationDef>,
    #[serde(default)]
    pub sim: SimDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDef {
    pub mass: f64,
    #[serde(default)]
    pub spring_stiffness: f64,
    #[serde(default)]
    pub damping: f64,
    #[serde(default = "one")]
    pub ideal_gain: f64,
    #[serde(default)]
    pub initial_position: f64,
    #[serde(default)]
    pub initial_velocity: f64,
    /// Piecewise-constant control breakpoints; empty means zero control.
    #[serde(default)]
    pub control: Vec<ControlPointDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ControlPointDef {
    pub time: f64,
    pub level: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerturbationDef {
    #[serde(flatten)]
    pub law: Perturbation,
    #[serde(default)]
    pub window: Option<WindowDef>,
    #[serde(default = "yes")]
    pub allow_negative_force: bool,
    #[serde(default = "yes")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowDef {
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorDef {
    Rk4,
    Euler,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimDef {
    pub dt: f64,
    pub t_end: f64,
    pub record_every: usize,
    pub integrator: IntegratorDef,
    /// Host time-scale constant applied to recorded times.
    pub time_normalization: f64,
}

impl Default for SimDef {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            record_every: 10,
            integrator: IntegratorDef::Rk4,
            time_normalization: 1.0,
        }
    }
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

impl Scenario {
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Assemble an engine for this scenario; returns the perturbation
    /// target id alongside so a hook can be bound to it.
    pub fn build_engine(&self) -> ScenarioResult<(Engine<PointMass>, fp_sim::ActuatorId)> {
        let params = PointMassParams {
            mass: self.model.mass,
            spring_stiffness: self.model.spring_stiffness,
            damping: self.model.damping,
            ideal_gain: self.model.ideal_gain,
            initial_position: self.model.initial_position,
            initial_velocity: self.model.initial_velocity,
        };

        let control = if self.model.control.is_empty() {
            ControlSchedule::constant(0.0)
        } else {
            ControlSchedule::new(
                self.model
                    .control
                    .iter()
                    .map(|p| (p.time, p.level))
                    .collect(),
            )?
        };

        let mut actuators = ActuatorSet::new();
        let model = PointMass::register(params, control, &mut actuators)?;
        let target = model.ideal_actuator();
        let engine =
            Engine::new(model, actuators).with_time_normalization(self.sim.time_normalization);
        Ok((engine, target))
    }

    /// Build the perturbation hook, if the scenario has one.
    pub fn build_hook(&self, target: fp_sim::ActuatorId) -> ScenarioResult<Option<ForcePerturbation>> {
        let Some(def) = &self.perturbation else {
            return Ok(None);
        };

        let mut hook = ForcePerturbation::new(def.law);
        hook.set_target(target);
        if let Some(w) = def.window {
            hook.set_window(ActiveWindow::new(w.start, w.end)?);
        }
        hook.set_allow_negative_force(def.allow_negative_force);
        hook.set_enabled(def.enabled);
        Ok(Some(hook))
    }

    pub fn sim_options(&self) -> SimOptions {
        SimOptions {
            dt: self.sim.dt,
            t_end: self.sim.t_end,
            record_every: self.sim.record_every,
            integrator: match self.sim.integrator {
                IntegratorDef::Rk4 => IntegratorType::RK4,
                IntegratorDef::Euler => IntegratorType::ForwardEuler,
            },
            ..SimOptions::default()
        }
    }

    /// Manifest run type for this scenario.
    pub fn run_type(&self) -> RunType {
        match &self.perturbation {
            Some(def) if def.enabled => RunType::Perturbed {
                law: def.law.tag().to_string(),
                parameter: def.law.parameter(),
                window_start: def.window.map(|w| w.start),
                window_end: def.window.map(|w| w.end),
            },
            _ => RunType::Nominal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_YAML: &str = r#"
id: pointmass_demo
model:
  mass: 1.0
  spring_stiffness: 10.0
  damping: 0.5
  ideal_gain: 5.0
  control:
    - { time: 0.0, level: 1.0 }
    - { time: 0.5, level: 0.0 }
perturbation:
  law: scale
  parameter: 0.5
  window: { start: 0.1, end: 0.2 }
  allow_negative_force: false
sim:
  dt: 0.01
  t_end: 0.3
  record_every: 1
  integrator: rk4
"#;

    #[test]
    fn parses_full_scenario() {
        let scenario: Scenario = serde_yaml::from_str(SCENARIO_YAML).unwrap();
        assert_eq!(scenario.id, "pointmass_demo");
        let def = scenario.perturbation.as_ref().unwrap();
        assert_eq!(def.law, Perturbation::Scale(0.5));
        assert!(!def.allow_negative_force);
        assert!(def.enabled);

        let (engine, target) = scenario.build_engine().unwrap();
        assert_eq!(engine.actuators().len(), 3);
        let hook = scenario.build_hook(target).unwrap().unwrap();
        assert_eq!(hook.target(), Some(target));
        assert_eq!(hook.window().start, 0.1);
    }

    #[test]
    fn unknown_law_tag_fails_to_parse() {
        let bad = SCENARIO_YAML.replace("law: scale", "law: wiggle");
        assert!(serde_yaml::from_str::<Scenario>(&bad).is_err());
    }

    #[test]
    fn minimal_scenario_uses_defaults() {
        let scenario: Scenario = serde_yaml::from_str("id: min\nmodel:\n  mass: 2.0\n").unwrap();
        assert!(scenario.perturbation.is_none());
        assert_eq!(scenario.sim.dt, 1e-3);
        assert!(matches!(scenario.run_type(), RunType::Nominal));

        let (engine, target) = scenario.build_engine().unwrap();
        assert!(scenario.build_hook(target).unwrap().is_none());
        assert_eq!(engine.actuators().len(), 3);
    }

    #[test]
    fn disabled_perturbation_is_a_nominal_run() {
        let yaml = SCENARIO_YAML.replace(
            "allow_negative_force: false",
            "allow_negative_force: false\n  enabled: false",
        );
        let scenario: Scenario = serde_yaml::from_str(&yaml).unwrap();
        assert!(matches!(scenario.run_type(), RunType::Nominal));
    }
}
