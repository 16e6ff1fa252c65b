//! Fixed-point integer power
//!
//! The result is built by repeated multiplication, carrying the fractional
//! remainder of each step into the next one and rounding it in at the end.
//! This order decides the last bit of the result, so it must not be replaced
//! by exponentiation by squaring or a closed form.

use super::{checked_div, fp_round, narrow, Fixpt, FixptError, FP_FACTOR};

/// `base^expn` with a checked result
///
/// `base == 0` yields `0` for every exponent, negative ones included.
/// A negative exponent reciprocates `base` first.
pub fn checked_pow(base: Fixpt, expn: i32) -> Result<Fixpt, FixptError> {
    if base == 0 {
        return Ok(0);
    }

    let base: i128 = if expn < 0 {
        checked_div(FP_FACTOR, base)?.into()
    } else {
        base.into()
    };

    let factor = FP_FACTOR as i128;
    let mut res = factor;
    let mut err: i128 = 0;

    for _ in 0..expn.unsigned_abs() {
        res = res * base + (err * base) / factor;
        err = res % factor;
        res /= factor;
        narrow(res)?;
    }

    narrow(res + fp_round(err as Fixpt) as i128)
}

/// `base^expn` in fixed point
///
/// # Panics
/// Panics if the result does not fit in 64 bits
///
/// # Example
/// ```
/// use oracle_core::fixpt::{fp_pow, FP_FACTOR};
///
/// assert_eq!(fp_pow(2 * FP_FACTOR, 10), 1024 * FP_FACTOR);
/// assert_eq!(fp_pow(3 * FP_FACTOR, -1), 21845);
/// assert_eq!(fp_pow(0, -4), 0);
/// ```
pub fn fp_pow(base: Fixpt, expn: i32) -> Fixpt {
    match checked_pow(base, expn) {
        Ok(value) => value,
        Err(e) => panic!("fp_pow({}, {}): {}", base, expn, e),
    }
}
