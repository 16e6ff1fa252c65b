//! PyO3 wrappers for the fixed-point helpers

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::fixpt::{checked_div, checked_mul, checked_pow, checked_sqrt, fp_round, Fixpt};
use crate::reference::{generate, ReferenceConfig};

fn value_error<E: std::fmt::Display>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyfunction]
#[pyo3(name = "fp_mul")]
pub fn py_fp_mul(x: Fixpt, y: Fixpt) -> PyResult<Fixpt> {
    checked_mul(x, y).map_err(value_error)
}

#[pyfunction]
#[pyo3(name = "fp_div")]
pub fn py_fp_div(x: Fixpt, y: Fixpt) -> PyResult<Fixpt> {
    checked_div(x, y).map_err(value_error)
}

#[pyfunction]
#[pyo3(name = "fp_round")]
pub fn py_fp_round(x: Fixpt) -> i64 {
    fp_round(x)
}

#[pyfunction]
#[pyo3(name = "fp_sqrt")]
pub fn py_fp_sqrt(x: Fixpt) -> PyResult<Fixpt> {
    checked_sqrt(x).map_err(value_error)
}

#[pyfunction]
#[pyo3(name = "fp_pow")]
pub fn py_fp_pow(base: Fixpt, expn: i32) -> PyResult<Fixpt> {
    checked_pow(base, expn).map_err(value_error)
}

/// Generate the reference document as pretty JSON
///
/// `config_json` overrides the default scenarios and tables.
#[pyfunction]
#[pyo3(name = "generate_reference_json", signature = (config_json = None))]
pub fn py_generate_reference_json(config_json: Option<String>) -> PyResult<String> {
    let config = match config_json {
        Some(json) => ReferenceConfig::from_json(&json).map_err(value_error)?,
        None => ReferenceConfig::default(),
    };
    generate(&config)
        .and_then(|values| values.to_json_pretty())
        .map_err(value_error)
}
