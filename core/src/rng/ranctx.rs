//! Four-word mixing generator (one stream)
//!
//! A small, fast, non-cryptographic generator whose whole state is four
//! unsigned 32-bit words. Every implementation that claims conformance must
//! reproduce its output bit for bit, so nothing here may be "improved".
//!
//! # Algorithm
//!
//! Seeding sets `a = 0xf1ea5eed`, `b = c = d = low32(seed)`, XORs
//! `high32(seed)` into `c`, then discards 20 outputs. Each step:
//!
//! ```text
//! e  = a - rot(b, 27)
//! a' = b ^ rot(c, 17)
//! b' = c + d
//! c' = d + e
//! d' = e + a'        (output)
//! ```
//!
//! All arithmetic wraps modulo 2^32.
//!
//! # Determinism
//!
//! Same seed → same sequence of words, on every platform.

use serde::{Deserialize, Serialize};

/// Initial value of word `a` for every seed
pub const SEED_CONSTANT: u32 = 0xf1ea_5eed;

/// Outputs discarded after seeding before the stream is used
pub const WARMUP_ROUNDS: usize = 20;

/// Modulus ceiling used to derive the rejection-sampling divisor
pub const RAND_MAX_COMBO: u64 = u32::MAX as u64;

/// State of a single generator stream
///
/// # Example
/// ```
/// use oracle_core::RanCtx;
///
/// let mut ctx = RanCtx::seeded(12345);
/// let word = ctx.next_u32();
/// let roll = ctx.rand_range(0, 999); // [0, 999]
/// # let _ = (word, roll);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RanCtx {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl RanCtx {
    /// Create a stream seeded from a 64-bit seed
    ///
    /// Unlike [`crate::RngManager::seed`], this constructor has no zero
    /// sentinel: `RanCtx::seeded(0)` runs the full seeding algorithm.
    ///
    /// # Example
    /// ```
    /// use oracle_core::RanCtx;
    ///
    /// let a = RanCtx::seeded(42);
    /// let b = RanCtx::seeded(42);
    /// assert_eq!(a, b);
    /// ```
    pub fn seeded(seed: u64) -> Self {
        let mut ctx = Self::default();
        ctx.reseed(seed);
        ctx
    }

    /// Re-initialize the full state from `seed`
    pub fn reseed(&mut self, seed: u64) {
        let low = seed as u32;
        self.a = SEED_CONSTANT;
        self.b = low;
        self.c = low ^ (seed >> 32) as u32;
        self.d = low;
        for _ in 0..WARMUP_ROUNDS {
            self.next_u32();
        }
    }

    /// Restore a stream from a previously captured state
    ///
    /// # Example
    /// ```
    /// use oracle_core::RanCtx;
    ///
    /// let mut original = RanCtx::seeded(7);
    /// original.next_u32();
    ///
    /// let mut replay = RanCtx::from_state(original.state());
    /// assert_eq!(original.next_u32(), replay.next_u32());
    /// ```
    pub fn from_state(state: [u32; 4]) -> Self {
        let [a, b, c, d] = state;
        Self { a, b, c, d }
    }

    /// Current state words `[a, b, c, d]` (for checkpointing/replay)
    pub fn state(&self) -> [u32; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Advance one step and return the new output word
    pub fn next_u32(&mut self) -> u32 {
        let e = self.a.wrapping_sub(self.b.rotate_left(27));
        self.a = self.b ^ self.c.rotate_left(17);
        self.b = self.c.wrapping_add(self.d);
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }

    /// Uniform value in `[0, n)` by division with rejection
    ///
    /// The divisor is `floor(0xFFFFFFFF / n)`; any quotient `>= n` is thrown
    /// away and a new word drawn.
    ///
    /// # Panics
    /// Panics if `n <= 0` or `n > u32::MAX`
    ///
    /// # Example
    /// ```
    /// use oracle_core::RanCtx;
    ///
    /// let mut ctx = RanCtx::seeded(1);
    /// let value = ctx.range(6);
    /// assert!((0..6).contains(&value));
    /// ```
    pub fn range(&mut self, n: i64) -> i64 {
        assert!(n > 0, "range size must be positive, got {}", n);
        assert!(
            n as u64 <= RAND_MAX_COMBO,
            "range size {} exceeds the generator's output width",
            n
        );

        let divisor = RAND_MAX_COMBO / n as u64;
        loop {
            let r = (self.next_u32() as u64 / divisor) as i64;
            if r < n {
                return r;
            }
        }
    }

    /// Uniform value in `[lower, upper]`
    ///
    /// When `upper <= lower` this returns `lower` without drawing, so the
    /// stream does not advance.
    ///
    /// # Example
    /// ```
    /// use oracle_core::RanCtx;
    ///
    /// let mut ctx = RanCtx::seeded(1);
    /// let before = ctx.state();
    /// assert_eq!(ctx.rand_range(5, 5), 5);
    /// assert_eq!(ctx.state(), before);
    /// ```
    pub fn rand_range(&mut self, lower: i64, upper: i64) -> i64 {
        if upper <= lower {
            return lower;
        }
        // Spans past i64 saturate so `range` rejects them instead of wrapping
        let interval = i64::try_from(upper as i128 - lower as i128 + 1).unwrap_or(i64::MAX);
        lower + self.range(interval)
    }
}
