//! fp-core: stable foundation for forceprobe.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs handed out by owning registries)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FpError, FpResult};
pub use ids::*;
pub use numeric::*;
