//! Conversion between liquidity and token amounts for a tick range.
//!
//! A range `[lower, upper)` holds only token0 while the price is below
//! it, only token1 above it, and both while the price is inside it.

use crate::domain::{Rounding, Q64};
use crate::error::ClmmError;
use crate::math::big_num::mul_div;
use crate::math::sqrt_price_math::{amount_0_delta, amount_1_delta};
use crate::math::tick_math::sqrt_price_at_tick;

/// Token amounts moved when a `[tick_lower, tick_upper)` position changes
/// by `delta` at the given pool price.
///
/// Deposits (`delta > 0`) round up; withdrawals round down.
///
/// # Errors
///
/// - [`ClmmError::OutOfRange`] if a boundary tick is out of bounds.
/// - [`ClmmError::Overflow`] if an amount exceeds `u128`.
pub fn amounts_for_liquidity_delta(
    tick_current: i32,
    sqrt_price_x64: u128,
    tick_lower: i32,
    tick_upper: i32,
    delta: i128,
) -> crate::error::Result<(u128, u128)> {
    if delta == 0 {
        return Ok((0, 0));
    }
    let rounding = Rounding::for_liquidity_delta(delta);
    let liquidity = delta.unsigned_abs();
    let sqrt_lower = sqrt_price_at_tick(tick_lower)?.get();
    let sqrt_upper = sqrt_price_at_tick(tick_upper)?.get();

    if tick_current < tick_lower {
        let amount_0 = amount_0_delta(sqrt_lower, sqrt_upper, liquidity, rounding)?;
        Ok((amount_0, 0))
    } else if tick_current < tick_upper {
        let amount_0 = amount_0_delta(sqrt_price_x64, sqrt_upper, liquidity, rounding)?;
        let amount_1 = amount_1_delta(sqrt_lower, sqrt_price_x64, liquidity, rounding)?;
        Ok((amount_0, amount_1))
    } else {
        let amount_1 = amount_1_delta(sqrt_lower, sqrt_upper, liquidity, rounding)?;
        Ok((0, amount_1))
    }
}

fn ordered(sqrt_a: u128, sqrt_b: u128) -> crate::error::Result<(u128, u128)> {
    let (lower, upper) = if sqrt_a > sqrt_b {
        (sqrt_b, sqrt_a)
    } else {
        (sqrt_a, sqrt_b)
    };
    if lower == upper {
        return Err(ClmmError::InvalidRange("empty sqrt price range"));
    }
    Ok((lower, upper))
}

/// Liquidity obtainable from `amount_0` over a range entirely above the
/// price: `amount_0 * √Pa * √Pb / (√Pb - √Pa)`, rounded down.
///
/// # Errors
///
/// - [`ClmmError::InvalidRange`] if both prices are equal.
/// - [`ClmmError::Overflow`] if the liquidity exceeds `u128`.
pub fn liquidity_from_amount_0(
    sqrt_a: u128,
    sqrt_b: u128,
    amount_0: u128,
) -> crate::error::Result<u128> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b)?;
    let intermediate = mul_div(lower, upper, Q64, Rounding::Down)?;
    mul_div(amount_0, intermediate, upper - lower, Rounding::Down)
}

/// Liquidity obtainable from `amount_1` over a range entirely below the
/// price: `amount_1 / (√Pb - √Pa)`, rounded down.
///
/// # Errors
///
/// - [`ClmmError::InvalidRange`] if both prices are equal.
/// - [`ClmmError::Overflow`] if the liquidity exceeds `u128`.
pub fn liquidity_from_amount_1(
    sqrt_a: u128,
    sqrt_b: u128,
    amount_1: u128,
) -> crate::error::Result<u128> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b)?;
    mul_div(amount_1, Q64, upper - lower, Rounding::Down)
}

/// Largest liquidity both token budgets can fund for a range at the
/// given price.
///
/// # Errors
///
/// Propagates errors of [`liquidity_from_amount_0`] and
/// [`liquidity_from_amount_1`].
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Q64;
/// use clmm_engine::math::liquidity_amounts::liquidity_from_amounts;
///
/// // Price above the range: only token1 counts.
/// let l = liquidity_from_amounts(3 * Q64, Q64, 2 * Q64, 0, 1_000);
/// assert_eq!(l, Ok(1_000));
/// ```
pub fn liquidity_from_amounts(
    sqrt_price_x64: u128,
    sqrt_a: u128,
    sqrt_b: u128,
    amount_0: u128,
    amount_1: u128,
) -> crate::error::Result<u128> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b)?;
    if sqrt_price_x64 <= lower {
        liquidity_from_amount_0(lower, upper, amount_0)
    } else if sqrt_price_x64 < upper {
        let from_0 = liquidity_from_amount_0(sqrt_price_x64, upper, amount_0)?;
        let from_1 = liquidity_from_amount_1(lower, sqrt_price_x64, amount_1)?;
        Ok(from_0.min(from_1))
    } else {
        liquidity_from_amount_1(lower, upper, amount_1)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn sqrt_at(tick: i32) -> u128 {
        let Ok(sp) = sqrt_price_at_tick(tick) else {
            panic!("valid tick");
        };
        sp.get()
    }

    // -- amounts_for_liquidity_delta ----------------------------------------

    #[test]
    fn below_range_is_token0_only() {
        let Ok((a0, a1)) = amounts_for_liquidity_delta(-200, sqrt_at(-200), -100, 100, 1_000_000)
        else {
            panic!("expected Ok");
        };
        assert!(a0 > 0);
        assert_eq!(a1, 0);
    }

    #[test]
    fn above_range_is_token1_only() {
        let Ok((a0, a1)) = amounts_for_liquidity_delta(150, sqrt_at(150), -100, 100, 1_000_000)
        else {
            panic!("expected Ok");
        };
        assert_eq!(a0, 0);
        assert!(a1 > 0);
    }

    #[test]
    fn upper_tick_counts_as_above() {
        let Ok((a0, _)) = amounts_for_liquidity_delta(100, sqrt_at(100), -100, 100, 1_000) else {
            panic!("expected Ok");
        };
        assert_eq!(a0, 0);
    }

    #[test]
    fn in_range_is_symmetric_at_tick_zero() {
        let Ok((a0, a1)) = amounts_for_liquidity_delta(0, Q64, -100, 100, 1_000_000) else {
            panic!("expected Ok");
        };
        // sqrt(1.0001^100) - 1 vs 1 - sqrt(1.0001^-100): about 5e-3 each.
        assert!(a0 > 4_900 && a0 < 5_100, "a0 = {a0}");
        assert!(a1 > 4_900 && a1 < 5_100, "a1 = {a1}");
    }

    #[test]
    fn withdrawal_never_exceeds_deposit() {
        let Ok((d0, d1)) = amounts_for_liquidity_delta(0, Q64, -60, 120, 123_456_789) else {
            panic!("expected Ok");
        };
        let Ok((w0, w1)) = amounts_for_liquidity_delta(0, Q64, -60, 120, -123_456_789) else {
            panic!("expected Ok");
        };
        assert!(w0 <= d0 && d0 - w0 <= 1);
        assert!(w1 <= d1 && d1 - w1 <= 1);
    }

    #[test]
    fn zero_delta_moves_nothing() {
        assert_eq!(amounts_for_liquidity_delta(0, Q64, -10, 10, 0), Ok((0, 0)));
    }

    // -- liquidity from amounts ---------------------------------------------

    #[test]
    fn liquidity_from_amount_1_exact() {
        assert_eq!(liquidity_from_amount_1(Q64, 2 * Q64, 1_000), Ok(1_000));
    }

    #[test]
    fn liquidity_from_amount_0_exact() {
        // amount_0 * 1 * 2 / (2 - 1)
        assert_eq!(liquidity_from_amount_0(Q64, 2 * Q64, 500), Ok(1_000));
    }

    #[test]
    fn in_range_takes_the_binding_side() {
        let price = sqrt_at(0);
        let (lo, hi) = (sqrt_at(-100), sqrt_at(100));
        let Ok(balanced) = liquidity_from_amounts(price, lo, hi, 10_000, 10_000) else {
            panic!("expected Ok");
        };
        let Ok(short_1) = liquidity_from_amounts(price, lo, hi, 10_000, 10) else {
            panic!("expected Ok");
        };
        assert!(short_1 < balanced);
    }

    #[test]
    fn empty_range_rejected() {
        assert!(matches!(
            liquidity_from_amount_0(Q64, Q64, 1),
            Err(ClmmError::InvalidRange(_))
        ));
    }

    #[test]
    fn liquidity_round_trips_to_at_most_the_budget() {
        let (lo, hi) = (sqrt_at(-600), sqrt_at(600));
        let Ok(l) = liquidity_from_amounts(Q64, lo, hi, 1_000_000, 1_000_000) else {
            panic!("expected Ok");
        };
        let Ok(delta) = i128::try_from(l) else {
            panic!("fits i128");
        };
        let Ok((a0, a1)) = amounts_for_liquidity_delta(0, Q64, -600, 600, delta) else {
            panic!("expected Ok");
        };
        assert!(a0 <= 1_000_001 && a1 <= 1_000_001);
    }
}
