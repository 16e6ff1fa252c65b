//! Deterministic random number generation
//!
//! Four-word mixing generator with two independent streams.
//! CRITICAL: Output must match the reference generator bit for bit.

mod manager;
mod ranctx;

pub use manager::{RngError, RngManager, RngStream, STREAM_COUNT};
pub use ranctx::{RanCtx, RAND_MAX_COMBO, SEED_CONSTANT, WARMUP_ROUNDS};
