use thiserror::Error;

pub type FpResult<T> = Result<T, FpError>;

#[derive(Error, Debug)]
pub enum FpError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown id: {what} (index={index}, len={len})")]
    UnknownId {
        what: &'static str,
        index: usize,
        len: usize,
    },
}
