//! PyO3 wrapper for RngManager

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::rng::{RngError, RngManager, RngStream};

fn value_error(e: RngError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn stream_arg(stream: usize) -> PyResult<RngStream> {
    RngStream::try_from(stream).map_err(value_error)
}

/// Python wrapper for the two-stream generator
///
/// # Example (from Python)
///
/// ```python
/// from oracle_core import RngManager
///
/// rng = RngManager()
/// rng.seed(12345)
/// assert rng.rand_range(0, 0, 999) == 148
/// ```
#[pyclass(name = "RngManager")]
pub struct PyRngManager {
    inner: RngManager,
}

#[pymethods]
impl PyRngManager {
    #[new]
    fn new() -> Self {
        PyRngManager {
            inner: RngManager::new(),
        }
    }

    /// Seed both streams; `0` leaves them untouched and returns `0`
    fn seed(&mut self, seed: u64) -> u64 {
        self.inner.seed(seed)
    }

    fn seed_stream(&mut self, stream: usize, seed: u64) -> PyResult<u64> {
        Ok(self.inner.seed_stream(stream_arg(stream)?, seed))
    }

    fn next_u32(&mut self, stream: usize) -> PyResult<u32> {
        Ok(self.inner.next_u32(stream_arg(stream)?))
    }

    /// Uniform value in `[0, n)`
    ///
    /// Raises ValueError if `n` is not in `1..=2**32 - 1`.
    fn range(&mut self, stream: usize, n: i64) -> PyResult<i64> {
        self.inner
            .checked_range(stream_arg(stream)?, n)
            .map_err(value_error)
    }

    /// Uniform value in `[lower, upper]`
    ///
    /// Raises ValueError if the interval is wider than `2**32 - 1` values.
    fn rand_range(&mut self, stream: usize, lower: i64, upper: i64) -> PyResult<i64> {
        self.inner
            .checked_rand_range(stream_arg(stream)?, lower, upper)
            .map_err(value_error)
    }

    /// State words `[a, b, c, d]` of one stream
    fn state(&self, stream: usize) -> PyResult<Vec<u32>> {
        Ok(self.inner.stream(stream_arg(stream)?).state().to_vec())
    }
}
