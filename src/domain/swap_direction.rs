//! Direction of a swap.

use core::fmt;

use super::sqrt_price::{MAX_SQRT_PRICE_X64, MIN_SQRT_PRICE_X64};
use super::SqrtPriceX64;
use crate::error::ClmmError;

/// Which token the trader pays in.
///
/// Every direction-dependent choice of the swap loop is answered here, so
/// the loop itself is a single code path.
///
/// | | `ZeroForOne` | `OneForZero` |
/// |---|---|---|
/// | input token | token0 | token1 |
/// | price moves | down | up |
/// | tick search | at or below current | strictly above |
/// | crossing applies | `-liquidity_net` | `+liquidity_net` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Sell token0 for token1; the price decreases.
    ZeroForOne,
    /// Sell token1 for token0; the price increases.
    OneForZero,
}

impl SwapDirection {
    /// Returns `true` for [`SwapDirection::ZeroForOne`].
    #[must_use]
    pub const fn is_zero_for_one(&self) -> bool {
        matches!(self, Self::ZeroForOne)
    }

    /// The reverse direction.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::ZeroForOne => Self::OneForZero,
            Self::OneForZero => Self::ZeroForOne,
        }
    }

    /// Limit used when the caller gives none: one unit inside the
    /// supported sqrt price range.
    #[must_use]
    pub const fn default_price_limit(&self) -> SqrtPriceX64 {
        match self {
            Self::ZeroForOne => SqrtPriceX64::from_bits_unchecked(MIN_SQRT_PRICE_X64 + 1),
            Self::OneForZero => SqrtPriceX64::from_bits_unchecked(MAX_SQRT_PRICE_X64 - 1),
        }
    }

    /// Checks that `limit` lies strictly on the moving side of `current`
    /// and strictly inside the supported range.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::OutOfRange`] otherwise.
    pub const fn validate_price_limit(
        &self,
        current: SqrtPriceX64,
        limit: SqrtPriceX64,
    ) -> crate::error::Result<()> {
        let (current, limit) = (current.get(), limit.get());
        let ok = match self {
            Self::ZeroForOne => limit < current && limit > MIN_SQRT_PRICE_X64,
            Self::OneForZero => limit > current && limit < MAX_SQRT_PRICE_X64,
        };
        if ok {
            Ok(())
        } else {
            Err(ClmmError::OutOfRange("price limit not beyond current price"))
        }
    }

    /// Returns `true` once `current` sits at `limit` or past it in the
    /// swap direction.
    #[must_use]
    pub const fn has_reached(&self, current: u128, limit: SqrtPriceX64) -> bool {
        match self {
            Self::ZeroForOne => current <= limit.get(),
            Self::OneForZero => current >= limit.get(),
        }
    }

    /// The step target: the next tick's price, unless the limit comes first.
    #[must_use]
    pub fn step_target(&self, next_tick_price: SqrtPriceX64, limit: SqrtPriceX64) -> SqrtPriceX64 {
        match self {
            Self::ZeroForOne => next_tick_price.max(limit),
            Self::OneForZero => next_tick_price.min(limit),
        }
    }

    /// Liquidity change applied when crossing a tick with `liquidity_net`.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::Overflow`] when negating `i128::MIN`.
    pub const fn crossing_delta(&self, liquidity_net: i128) -> crate::error::Result<i128> {
        match self {
            Self::OneForZero => Ok(liquidity_net),
            Self::ZeroForOne => match liquidity_net.checked_neg() {
                Some(v) => Ok(v),
                None => Err(ClmmError::Overflow("liquidity net negation")),
            },
        }
    }

    /// Current tick after crossing `tick`: moving down leaves the price in
    /// the range just below it.
    #[must_use]
    pub const fn tick_after_crossing(&self, tick: i32) -> i32 {
        match self {
            Self::ZeroForOne => tick - 1,
            Self::OneForZero => tick,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "ZeroForOne"),
            Self::OneForZero => write!(f, "OneForZero"),
        }
    }
}
