//! Error types for perturbation setup.
//!
//! Everything that can go wrong while a hook is *firing* degrades to a
//! logged no-op instead of an error; these types only cover configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerturbError {
    #[error("Invalid window: start {start} must not exceed end {end}, and neither may be NaN")]
    InvalidWindow { start: f64, end: f64 },
}

pub type PerturbResult<T> = Result<T, PerturbError>;
