//! Actuator force perturbation for induced-acceleration analysis.
//!
//! The centerpiece is [`ForcePerturbation`], a two-phase derivative hook
//! that transiently overrides one actuator's force during each derivative
//! evaluation, logs the nominal/perturbed pair, and restores the nominal
//! force before anything downstream can observe the change.
//!
//! Provides:
//! - [`Perturbation`]: the force-transformation law (scale/delta/constant)
//! - [`ActiveWindow`]: half-open time window gating the perturbation
//! - [`ForceRecorder`]: append-only `(time, nominal, perturbed)` series
//! - [`ForcePerturbation`]: the hook tying it all together

pub mod callback;
pub mod error;
pub mod law;
pub mod recorder;
pub mod window;

pub use callback::ForcePerturbation;
pub use error::{PerturbError, PerturbResult};
pub use law::Perturbation;
pub use recorder::{FORCE_LABELS, ForceRecorder, ForceSample};
pub use window::ActiveWindow;
