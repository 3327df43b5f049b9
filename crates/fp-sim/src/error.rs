//! Error types for the integration host.

use thiserror::Error;

/// Errors encountered while driving a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Retryable failure: {message}")]
    Retryable { message: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<fp_core::FpError> for SimError {
    fn from(e: fp_core::FpError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
