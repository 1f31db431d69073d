//! Integer fixed-point math for the engine.
//!
//! Everything here is pure and deterministic: no floating point, explicit
//! [`Rounding`](crate::domain::Rounding) on every division, and overflow
//! reported as [`ClmmError`](crate::error::ClmmError) rather than wrapped
//! or saturated. Fee growth counters are the one exception: they wrap.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`big_num`] | `U256` / `U512`, `mul_div` |
//! | [`tick_math`] | tick ↔ Q64.64 sqrt price |
//! | [`sqrt_price_math`] | token deltas and next price |
//! | [`liquidity_math`] | signed liquidity updates |
//! | [`liquidity_amounts`] | liquidity ↔ token amounts for a range |
//! | [`swap_math`] | one swap step within a tick range |
//! | [`fee_math`] | fee split and fee growth |

pub mod big_num;
mod checked;
pub mod fee_math;
pub mod liquidity_amounts;
pub mod liquidity_math;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;

pub use checked::CheckedArithmetic;
pub use swap_math::{compute_swap_step, SwapStep};
pub use tick_math::{sqrt_price_at_tick, tick_at_sqrt_price};
