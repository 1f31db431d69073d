//! Outcome of a swap.

use core::fmt;

use super::{Amount, SqrtPriceX64, SwapDirection};
use crate::error::ClmmError;

/// Why the swap loop stopped.
///
/// Only [`Completed`](Self::Completed) means the specified amount was
/// fully consumed; the other two carry a partial fill and are still
/// successful outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapStop {
    /// The specified amount was fully consumed.
    Completed,
    /// The price reached the caller's limit first.
    PriceLimitReached,
    /// No liquidity remained in the swap direction.
    ExhaustedLiquidity,
}

impl fmt::Display for SwapStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::PriceLimitReached => write!(f, "PriceLimitReached"),
            Self::ExhaustedLiquidity => write!(f, "ExhaustedLiquidity"),
        }
    }
}

/// Realized amounts and final pool price of a committed swap.
///
/// # Invariants
///
/// - `fee <= amount_in`; the fee is part of the input.
/// - `protocol_fee + fund_fee <= fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    pub(crate) direction: SwapDirection,
    pub(crate) amount_in: Amount,
    pub(crate) amount_out: Amount,
    pub(crate) fee: Amount,
    pub(crate) protocol_fee: Amount,
    pub(crate) fund_fee: Amount,
    pub(crate) sqrt_price_after: SqrtPriceX64,
    pub(crate) tick_after: i32,
    pub(crate) ticks_crossed: u32,
    pub(crate) stop: SwapStop,
}

impl SwapResult {
    /// Direction the swap was executed in.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Total input paid by the trader, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output received by the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Total trade fee, in the input token.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Part of the fee credited to the protocol.
    pub const fn protocol_fee(&self) -> Amount {
        self.protocol_fee
    }

    /// Part of the fee credited to the fund.
    pub const fn fund_fee(&self) -> Amount {
        self.fund_fee
    }

    /// Part of the fee distributed to in-range liquidity providers.
    pub const fn lp_fee(&self) -> Amount {
        Amount::new(
            self.fee
                .get()
                .saturating_sub(self.protocol_fee.get())
                .saturating_sub(self.fund_fee.get()),
        )
    }

    /// Pool sqrt price after the swap.
    #[must_use]
    pub const fn sqrt_price_after(&self) -> SqrtPriceX64 {
        self.sqrt_price_after
    }

    /// Pool current tick after the swap.
    #[must_use]
    pub const fn tick_after(&self) -> i32 {
        self.tick_after
    }

    /// Number of initialized ticks crossed.
    #[must_use]
    pub const fn ticks_crossed(&self) -> u32 {
        self.ticks_crossed
    }

    /// Why the swap stopped.
    #[must_use]
    pub const fn stop(&self) -> SwapStop {
        self.stop
    }

    /// Returns `true` unless the swap [`Completed`](SwapStop::Completed).
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        !matches!(self.stop, SwapStop::Completed)
    }

    /// Requires a full fill or a stop at the caller's own price limit.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::ExhaustedLiquidity`] when the pool ran out of
    /// liquidity before the specified amount was consumed.
    pub const fn into_filled(self) -> crate::error::Result<Self> {
        match self.stop {
            SwapStop::ExhaustedLiquidity => Err(ClmmError::ExhaustedLiquidity),
            SwapStop::Completed | SwapStop::PriceLimitReached => Ok(self),
        }
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({}, in={}, out={}, fee={}, tick={}, {})",
            self.direction, self.amount_in, self.amount_out, self.fee, self.tick_after, self.stop
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(stop: SwapStop) -> SwapResult {
        SwapResult {
            direction: SwapDirection::OneForZero,
            amount_in: Amount::new(1_000),
            amount_out: Amount::new(996),
            fee: Amount::new(10),
            protocol_fee: Amount::new(2),
            fund_fee: Amount::new(1),
            sqrt_price_after: SqrtPriceX64::ONE,
            tick_after: 0,
            ticks_crossed: 0,
            stop,
        }
    }

    #[test]
    fn lp_fee_is_remainder() {
        assert_eq!(result(SwapStop::Completed).lp_fee(), Amount::new(7));
    }

    #[test]
    fn partial_flags() {
        assert!(!result(SwapStop::Completed).is_partial());
        assert!(result(SwapStop::PriceLimitReached).is_partial());
        assert!(result(SwapStop::ExhaustedLiquidity).is_partial());
    }

    #[test]
    fn into_filled() {
        assert!(result(SwapStop::Completed).into_filled().is_ok());
        assert!(result(SwapStop::PriceLimitReached).into_filled().is_ok());
        assert_eq!(
            result(SwapStop::ExhaustedLiquidity).into_filled(),
            Err(ClmmError::ExhaustedLiquidity)
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            result(SwapStop::Completed).to_string(),
            "SwapResult(OneForZero, in=1000, out=996, fee=10, tick=0, Completed)"
        );
    }
}
