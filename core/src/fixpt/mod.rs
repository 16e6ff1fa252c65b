//! Fixed-point arithmetic (Q16.16 in a 64-bit signed integer)
//!
//! A [`Fixpt`] holds `value * 2^16`. Every helper that returns a `Fixpt`
//! returns an already-scaled integer; [`fp_round`] is the one exception and
//! returns a plain integer.
//!
//! # Critical Invariants
//!
//! 1. Division truncates toward zero, exactly like the reference C code
//! 2. Intermediate products are computed in 128 bits
//! 3. A result that does not fit in 64 bits is an error, never a silent wrap

mod pow;
mod sqrt;

pub use pow::{checked_pow, fp_pow};
pub use sqrt::{checked_sqrt, fp_sqrt, msb_pos, SQUARE_ROOTS};

use thiserror::Error;

/// Fixed-point value scaled by [`FP_FACTOR`]
pub type Fixpt = i64;

/// Number of fractional bits
pub const FP_BASE: u32 = 16;

/// Scale factor, `1.0` in fixed point
pub const FP_FACTOR: Fixpt = 1 << FP_BASE;

/// Errors from the checked fixed-point helpers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixptError {
    #[error("Fixed-point result does not fit in 64 bits")]
    Overflow,

    #[error("Fixed-point division by zero")]
    DivisionByZero,
}

/// Convert a whole number to fixed point
///
/// # Panics
/// Panics if `n * 2^16` does not fit in 64 bits; see [`checked_from_int`]
///
/// # Example
/// ```
/// use oracle_core::fixpt::{from_int, FP_FACTOR};
///
/// assert_eq!(from_int(3), 3 * FP_FACTOR);
/// ```
pub const fn from_int(n: i64) -> Fixpt {
    match n.checked_mul(FP_FACTOR) {
        Some(value) => value,
        None => panic!("from_int: whole number does not fit in fixed point"),
    }
}

/// Convert a whole number to fixed point, or `Overflow`
pub fn checked_from_int(n: i64) -> Result<Fixpt, FixptError> {
    n.checked_mul(FP_FACTOR).ok_or(FixptError::Overflow)
}

pub(crate) fn narrow(value: i128) -> Result<Fixpt, FixptError> {
    Fixpt::try_from(value).map_err(|_| FixptError::Overflow)
}

/// `x * y / 2^16` with a 128-bit intermediate
pub fn checked_mul(x: Fixpt, y: Fixpt) -> Result<Fixpt, FixptError> {
    narrow(x as i128 * y as i128 / FP_FACTOR as i128)
}

/// `x * 2^16 / y` with a 128-bit intermediate
pub fn checked_div(x: Fixpt, y: Fixpt) -> Result<Fixpt, FixptError> {
    if y == 0 {
        return Err(FixptError::DivisionByZero);
    }
    narrow(x as i128 * FP_FACTOR as i128 / y as i128)
}

/// Fixed-point multiply
///
/// # Panics
/// Panics if the product does not fit in 64 bits
///
/// # Example
/// ```
/// use oracle_core::fixpt::{fp_mul, FP_FACTOR};
///
/// let half = FP_FACTOR / 2;
/// assert_eq!(fp_mul(3 * FP_FACTOR, half), 3 * FP_FACTOR / 2);
/// ```
pub fn fp_mul(x: Fixpt, y: Fixpt) -> Fixpt {
    match checked_mul(x, y) {
        Ok(value) => value,
        Err(e) => panic!("fp_mul({}, {}): {}", x, y, e),
    }
}

/// Fixed-point divide
///
/// # Panics
/// Panics on division by zero or if the quotient does not fit in 64 bits
///
/// # Example
/// ```
/// use oracle_core::fixpt::{fp_div, FP_FACTOR};
///
/// assert_eq!(fp_div(FP_FACTOR, 4 * FP_FACTOR), FP_FACTOR / 4);
/// ```
pub fn fp_div(x: Fixpt, y: Fixpt) -> Fixpt {
    match checked_div(x, y) {
        Ok(value) => value,
        Err(e) => panic!("fp_div({}, {}): {}", x, y, e),
    }
}

/// Round to the nearest integer, halves away from zero
///
/// Returns a plain integer, not a fixed-point value.
///
/// # Example
/// ```
/// use oracle_core::fixpt::{fp_round, FP_FACTOR};
///
/// assert_eq!(fp_round(FP_FACTOR * 5 / 2), 3);   //  2.5 ->  3
/// assert_eq!(fp_round(-FP_FACTOR * 5 / 2), -3); // -2.5 -> -3
/// assert_eq!(fp_round(FP_FACTOR * 9 / 4), 2);   //  2.25 -> 2
/// ```
pub fn fp_round(x: Fixpt) -> i64 {
    let div = x / FP_FACTOR;
    let rem = x % FP_FACTOR;
    let sign = x.signum();

    if rem >= FP_FACTOR / 2 || rem <= -FP_FACTOR / 2 {
        div + sign
    } else {
        div
    }
}
