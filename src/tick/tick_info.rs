//! Per-tick liquidity and fee-growth state.

use core::fmt;

use crate::error::ClmmError;
use crate::math::liquidity_math::{add_delta, liquidity_net_after};

/// State stored for an initialized tick.
///
/// `liquidity_net` is the change in active liquidity when the price
/// crosses the tick moving up; `liquidity_gross` is the total liquidity of
/// the positions that use the tick as a boundary. A tick is initialized
/// exactly when `liquidity_gross > 0`.
///
/// The fee-growth-outside values only have meaning relative to the
/// global growth: they hold the growth on the side of the tick opposite
/// to the current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickInfo {
    liquidity_net: i128,
    liquidity_gross: u128,
    fee_growth_outside_0_x64: u128,
    fee_growth_outside_1_x64: u128,
}

impl TickInfo {
    /// Net liquidity added when crossing upward.
    #[must_use]
    pub const fn liquidity_net(&self) -> i128 {
        self.liquidity_net
    }

    /// Total liquidity referencing this tick.
    #[must_use]
    pub const fn liquidity_gross(&self) -> u128 {
        self.liquidity_gross
    }

    /// Token0 fee growth on the far side of the tick.
    #[must_use]
    pub const fn fee_growth_outside_0_x64(&self) -> u128 {
        self.fee_growth_outside_0_x64
    }

    /// Token1 fee growth on the far side of the tick.
    #[must_use]
    pub const fn fee_growth_outside_1_x64(&self) -> u128 {
        self.fee_growth_outside_1_x64
    }

    /// Returns `true` if any position references this tick.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.liquidity_gross > 0
    }

    /// Applies a position change of `delta` at this tick.
    ///
    /// `tick` is this tick's index, `is_upper` tells whether it is the
    /// position's upper boundary. When the tick goes from uninitialized to
    /// initialized at or below the current tick, all growth so far is
    /// assumed to have happened below it.
    ///
    /// Returns `true` if the tick flipped between initialized and
    /// uninitialized. Nothing is modified on error.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::InsufficientLiquidity`] if gross liquidity would go
    ///   negative.
    /// - [`ClmmError::Overflow`] if gross liquidity exceeds
    ///   `max_liquidity` or the net leaves the `i128` range.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        tick: i32,
        tick_current: i32,
        delta: i128,
        fee_growth_global_0_x64: u128,
        fee_growth_global_1_x64: u128,
        is_upper: bool,
        max_liquidity: u128,
    ) -> crate::error::Result<bool> {
        let gross_before = self.liquidity_gross;
        let gross_after = add_delta(gross_before, delta)?;
        if gross_after > max_liquidity {
            return Err(ClmmError::Overflow("tick liquidity above per-tick maximum"));
        }
        let net_after = liquidity_net_after(self.liquidity_net, delta, is_upper)?;

        if gross_before == 0 && tick <= tick_current {
            self.fee_growth_outside_0_x64 = fee_growth_global_0_x64;
            self.fee_growth_outside_1_x64 = fee_growth_global_1_x64;
        }
        self.liquidity_gross = gross_after;
        self.liquidity_net = net_after;

        Ok((gross_before == 0) != (gross_after == 0))
    }

    /// Flips the fee-growth-outside values as the price crosses the tick
    /// and returns `liquidity_net`.
    pub fn cross(&mut self, fee_growth_global_0_x64: u128, fee_growth_global_1_x64: u128) -> i128 {
        self.fee_growth_outside_0_x64 =
            fee_growth_global_0_x64.wrapping_sub(self.fee_growth_outside_0_x64);
        self.fee_growth_outside_1_x64 =
            fee_growth_global_1_x64.wrapping_sub(self.fee_growth_outside_1_x64);
        self.liquidity_net
    }
}

impl fmt::Display for TickInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TickInfo(net={}, gross={})",
            self.liquidity_net, self.liquidity_gross
        )
    }
}

/// Fee growth per unit of liquidity inside `[tick_lower, tick_upper)`.
///
/// `inside = global - below(lower) - above(upper)`, with every
/// subtraction wrapping. Missing boundary ticks count as zero growth.
#[must_use]
pub fn fee_growth_inside(
    lower: (i32, &TickInfo),
    upper: (i32, &TickInfo),
    tick_current: i32,
    fee_growth_global_0_x64: u128,
    fee_growth_global_1_x64: u128,
) -> (u128, u128) {
    let (tick_lower, lower) = lower;
    let (tick_upper, upper) = upper;

    let (below_0, below_1) = if tick_current >= tick_lower {
        (lower.fee_growth_outside_0_x64, lower.fee_growth_outside_1_x64)
    } else {
        (
            fee_growth_global_0_x64.wrapping_sub(lower.fee_growth_outside_0_x64),
            fee_growth_global_1_x64.wrapping_sub(lower.fee_growth_outside_1_x64),
        )
    };
    let (above_0, above_1) = if tick_current < tick_upper {
        (upper.fee_growth_outside_0_x64, upper.fee_growth_outside_1_x64)
    } else {
        (
            fee_growth_global_0_x64.wrapping_sub(upper.fee_growth_outside_0_x64),
            fee_growth_global_1_x64.wrapping_sub(upper.fee_growth_outside_1_x64),
        )
    };

    (
        fee_growth_global_0_x64
            .wrapping_sub(below_0)
            .wrapping_sub(above_0),
        fee_growth_global_1_x64
            .wrapping_sub(below_1)
            .wrapping_sub(above_1),
    )
}
