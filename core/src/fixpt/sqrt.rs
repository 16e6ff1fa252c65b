//! Fixed-point square root
//!
//! Whole numbers `0..=127` come straight from [`SQUARE_ROOTS`]; everything
//! else is found by bisection over the fixed-point integers.

use super::{Fixpt, FixptError, FP_BASE, FP_FACTOR};

/// Precomputed `sqrt(k)` in fixed point for `k` in `0..=127`
///
/// These are the reference values, not correctly rounded roots (for example
/// `sqrt(4)` is `131073`, one unit above `2.0`). They must not be recomputed.
pub const SQUARE_ROOTS: [Fixpt; 128] = [
    0, 65536, 92682, 113511, 131073, 146543, 160529, 173392,
    185363, 196608, 207243, 217359, 227023, 236293, 245213, 253819,
    262145, 270211, 278045, 285665, 293086, 300323, 307391, 314299,
    321059, 327680, 334169, 340535, 346784, 352923, 358955, 364889,
    370727, 376475, 382137, 387717, 393216, 398640, 403991, 409273,
    414487, 419635, 424721, 429749, 434717, 439629, 444487, 449293,
    454047, 458752, 463409, 468021, 472587, 477109, 481589, 486028,
    490427, 494786, 499107, 503391, 507639, 511853, 516031, 520175,
    524289, 528369, 532417, 536435, 540423, 544383, 548313, 552217,
    556091, 559939, 563762, 567559, 571329, 575077, 578799, 582497,
    586171, 589824, 593453, 597061, 600647, 604213, 607755, 611279,
    614783, 618265, 621729, 625173, 628599, 632007, 635395, 638765,
    642119, 645455, 648773, 652075, 655360, 658629, 661881, 665117,
    668339, 671545, 674735, 677909, 681071, 684215, 687347, 690465,
    693567, 696657, 699733, 702795, 705845, 708881, 711903, 714913,
    717911, 720896, 723869, 726829, 729779, 732715, 735639, 738553,
];

/// Mask selecting fixed-point values that are whole numbers in `0..=127`
const TABLE_MASK: Fixpt = 127 << FP_BASE;

/// 1-based position of the highest set bit, `0` for `0`
///
/// # Example
/// ```
/// use oracle_core::fixpt::msb_pos;
///
/// assert_eq!(msb_pos(0), 0);
/// assert_eq!(msb_pos(1), 1);
/// assert_eq!(msb_pos(0x8000), 16);
/// ```
pub fn msb_pos(x: u64) -> i32 {
    (u64::BITS - x.leading_zeros()) as i32
}

/// `2^n` in fixed point; negative `n` shifts right
///
/// Only exact for `-16..=46`; [`fp_sqrt`] stays within `-7..=24`.
///
/// # Panics
/// Panics if `n` is outside `-16..=46`
pub(crate) fn fp_exp2(n: i32) -> Fixpt {
    assert!(
        (-(FP_BASE as i32)..=46).contains(&n),
        "fp_exp2: exponent {} out of range",
        n
    );
    if n >= 0 {
        FP_FACTOR << n
    } else {
        FP_FACTOR >> -n
    }
}

/// Fixed-point square root
///
/// Negative inputs return `-fp_sqrt(-u)`.
///
/// # Panics
/// Panics on `Fixpt::MIN`, whose magnitude has no 64-bit representation
///
/// # Example
/// ```
/// use oracle_core::fixpt::{fp_sqrt, FP_FACTOR};
///
/// assert_eq!(fp_sqrt(9 * FP_FACTOR), 3 * FP_FACTOR);
/// assert_eq!(fp_sqrt(-9 * FP_FACTOR), -3 * FP_FACTOR);
/// assert_eq!(fp_sqrt(FP_FACTOR / 2), 46341);
/// ```
pub fn fp_sqrt(u: Fixpt) -> Fixpt {
    assert!(u != Fixpt::MIN, "fp_sqrt: magnitude of {} overflows", u);

    if u < 0 {
        return -fp_sqrt(-u);
    }
    if (u & TABLE_MASK) == u {
        return SQUARE_ROOTS[(u >> FP_BASE) as usize];
    }

    let k = msb_pos(u as u64) - FP_BASE as i32;
    let mut upper = fp_exp2((k + (k > 0) as i32) / 2);
    let mut lower = upper / 2;
    let mut x: Fixpt = 0;

    // Squares are compared at 128 bits so inputs near the top of the range
    // do not overflow.
    let target = u as i128;
    while upper != lower + 1 {
        x = (upper + lower) / 2;
        let fx = (x as i128 * x as i128) / FP_FACTOR as i128 - target;
        if fx == 0 {
            break;
        } else if fx > 0 {
            upper = x;
        } else {
            lower = x;
        }
    }
    x
}

/// Checked form of [`fp_sqrt`]: `Overflow` for `Fixpt::MIN` instead of a panic
///
/// # Example
/// ```
/// use oracle_core::fixpt::{checked_sqrt, FixptError, FP_FACTOR};
///
/// assert_eq!(checked_sqrt(9 * FP_FACTOR), Ok(3 * FP_FACTOR));
/// assert_eq!(checked_sqrt(i64::MIN), Err(FixptError::Overflow));
/// ```
pub fn checked_sqrt(u: Fixpt) -> Result<Fixpt, FixptError> {
    if u == Fixpt::MIN {
        return Err(FixptError::Overflow);
    }
    Ok(fp_sqrt(u))
}
