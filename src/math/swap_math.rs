//! A single swap step within one range of constant liquidity.
//!
//! The swap engine splits a swap at every initialized tick; between two
//! ticks liquidity is constant and [`compute_swap_step`] resolves how far
//! the price moves, how much is paid in and out, and the fee taken.

use crate::domain::{FeeRate, Rounding, FEE_RATE_DENOMINATOR};
use crate::math::big_num::mul_div;
use crate::math::sqrt_price_math::{
    amount_0_delta, amount_1_delta, next_sqrt_price_from_input, next_sqrt_price_from_output,
};

/// Result of one swap step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapStep {
    /// Sqrt price after the step, never beyond the target.
    pub sqrt_price_next: u128,
    /// Input consumed, fee excluded.
    pub amount_in: u128,
    /// Output produced.
    pub amount_out: u128,
    /// Fee charged on the input.
    pub fee_amount: u128,
}

impl SwapStep {
    /// Input consumed including the fee.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ClmmError::Overflow`] if the sum exceeds `u128`.
    pub fn gross_amount_in(&self) -> crate::error::Result<u128> {
        self.amount_in
            .checked_add(self.fee_amount)
            .ok_or(crate::error::ClmmError::Overflow("step input plus fee"))
    }
}

/// Moves the price from `sqrt_current` toward `sqrt_target` with
/// `liquidity`, consuming at most `amount_remaining`.
///
/// The direction is implied by the prices: a target at or below the
/// current price swaps token0 for token1. For exact input, the fee is
/// taken from `amount_remaining` before computing the output; for exact
/// output, `amount_remaining` is the output still wanted.
///
/// # Errors
///
/// - [`crate::error::ClmmError::NoLiquidity`] if the step must move the
///   price partially with zero liquidity.
/// - [`crate::error::ClmmError::DivisionByZero`] if `fee_rate` is 100%.
/// - [`crate::error::ClmmError::Overflow`] on unrepresentable amounts.
pub fn compute_swap_step(
    sqrt_current: u128,
    sqrt_target: u128,
    liquidity: u128,
    amount_remaining: u128,
    exact_in: bool,
    fee_rate: FeeRate,
) -> crate::error::Result<SwapStep> {
    let zero_for_one = sqrt_current >= sqrt_target;
    let fee_per_million = u128::from(fee_rate.get());
    let denominator = u128::from(FEE_RATE_DENOMINATOR);

    // Amount needed to reach the target; `None` when it does not fit u128,
    // in which case the target is unreachable with any u128 budget.
    let to_target_in = || {
        if zero_for_one {
            amount_0_delta(sqrt_target, sqrt_current, liquidity, Rounding::Up).ok()
        } else {
            amount_1_delta(sqrt_current, sqrt_target, liquidity, Rounding::Up).ok()
        }
    };
    let to_target_out = || {
        if zero_for_one {
            amount_1_delta(sqrt_target, sqrt_current, liquidity, Rounding::Down).ok()
        } else {
            amount_0_delta(sqrt_current, sqrt_target, liquidity, Rounding::Down).ok()
        }
    };

    let mut capacity_in = None;
    let mut capacity_out = None;
    let sqrt_price_next = if exact_in {
        let less_fee = mul_div(
            amount_remaining,
            denominator - fee_per_million,
            denominator,
            Rounding::Down,
        )?;
        capacity_in = to_target_in();
        match capacity_in {
            Some(needed) if less_fee >= needed => sqrt_target,
            _ => next_sqrt_price_from_input(sqrt_current, liquidity, less_fee, zero_for_one)?,
        }
    } else {
        capacity_out = to_target_out();
        match capacity_out {
            Some(available) if amount_remaining >= available => sqrt_target,
            _ => next_sqrt_price_from_output(
                sqrt_current,
                liquidity,
                amount_remaining,
                zero_for_one,
            )?,
        }
    };
    let reached_target = sqrt_price_next == sqrt_target;

    let amount_in = match capacity_in {
        Some(needed) if reached_target => needed,
        _ if zero_for_one => amount_0_delta(sqrt_price_next, sqrt_current, liquidity, Rounding::Up)?,
        _ => amount_1_delta(sqrt_current, sqrt_price_next, liquidity, Rounding::Up)?,
    };
    let mut amount_out = match capacity_out {
        Some(available) if reached_target => available,
        _ if zero_for_one => {
            amount_1_delta(sqrt_price_next, sqrt_current, liquidity, Rounding::Down)?
        }
        _ => amount_0_delta(sqrt_current, sqrt_price_next, liquidity, Rounding::Down)?,
    };
    if !exact_in && amount_out > amount_remaining {
        amount_out = amount_remaining;
    }

    let fee_amount = if exact_in && !reached_target {
        // The remainder of the budget is all fee.
        amount_remaining - amount_in
    } else {
        mul_div(
            amount_in,
            fee_per_million,
            denominator - fee_per_million,
            Rounding::Up,
        )?
    };

    Ok(SwapStep {
        sqrt_price_next,
        amount_in,
        amount_out,
        fee_amount,
    })
}
