//! Signed liquidity bookkeeping on raw integers.

use crate::domain::Liquidity;
use crate::error::ClmmError;

/// Applies a signed `delta` to unsigned liquidity `x`.
///
/// # Errors
///
/// - [`ClmmError::InsufficientLiquidity`] if the result would be negative.
/// - [`ClmmError::Overflow`] if the result exceeds `u128::MAX`.
pub fn add_delta(x: u128, delta: i128) -> crate::error::Result<u128> {
    Liquidity::new(x).apply_delta(delta).map(|l| l.get())
}

/// New `liquidity_net` of a boundary tick after a position changes by
/// `delta`.
///
/// A lower boundary adds liquidity when crossed upward; an upper boundary
/// removes it, so its net moves by `-delta`.
///
/// # Errors
///
/// Returns [`ClmmError::Overflow`] if the net leaves the `i128` range.
pub fn liquidity_net_after(net: i128, delta: i128, is_upper: bool) -> crate::error::Result<i128> {
    let updated = if is_upper {
        net.checked_sub(delta)
    } else {
        net.checked_add(delta)
    };
    updated.ok_or(ClmmError::Overflow("liquidity net out of i128 range"))
}
