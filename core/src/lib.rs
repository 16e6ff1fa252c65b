//! Reference Oracle Core - Rust Engine
//!
//! Bit-exact reference implementation of a four-word mixing PRNG and a
//! Q16.16 fixed-point library. Its output is the conformance oracle other
//! implementations of the same algorithms must match exactly.
//!
//! # Architecture
//!
//! - **rng**: Two-stream deterministic generator
//! - **fixpt**: Fixed-point rounding, square root and power
//! - **reference**: Scenario configuration, document generation and comparison
//!
//! # Critical Invariants
//!
//! 1. Same seed → same draws, on every platform
//! 2. All fixed-point values are i64 scaled by 2^16
//! 3. Nothing is "fixed" that would change a single output bit

// Module declarations
pub mod fixpt;
pub mod reference;
pub mod rng;

// Re-exports for convenience
pub use fixpt::{
    fp_div, fp_mul, fp_pow, fp_round, fp_sqrt, Fixpt, FixptError, FP_BASE, FP_FACTOR,
};
pub use reference::{generate, ReferenceConfig, ReferenceError, ReferenceValues};
pub use rng::{RanCtx, RngError, RngManager, RngStream};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn oracle_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::register(m)
}
