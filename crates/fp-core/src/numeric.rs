use crate::FpError;

/// Floating point type used throughout the toolkit.
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FpError::NonFinite { what, value: v })
    }
}

/// Check a value is finite and strictly positive (masses, gains, time steps).
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, FpError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(FpError::InvalidArg { what })
    }
}
