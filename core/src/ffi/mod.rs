//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings so Python ports of the generator and fixed-point library can
//! be checked against the reference engine in-process.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: Only expose what's needed
//! 2. **Simple types**: Integers and JSON strings at the boundary
//! 3. **Safe errors**: Contract violations become `ValueError`, never a panic

pub mod fixpt;
pub mod rng;

use pyo3::prelude::*;

/// Register every class and function on the Python module
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<rng::PyRngManager>()?;
    m.add_function(wrap_pyfunction!(fixpt::py_fp_mul, m)?)?;
    m.add_function(wrap_pyfunction!(fixpt::py_fp_div, m)?)?;
    m.add_function(wrap_pyfunction!(fixpt::py_fp_round, m)?)?;
    m.add_function(wrap_pyfunction!(fixpt::py_fp_sqrt, m)?)?;
    m.add_function(wrap_pyfunction!(fixpt::py_fp_pow, m)?)?;
    m.add_function(wrap_pyfunction!(fixpt::py_generate_reference_json, m)?)?;
    Ok(())
}
