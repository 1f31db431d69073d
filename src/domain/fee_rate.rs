//! Fee rates in hundredths of a basis point.

use core::fmt;

use super::Rounding;
use crate::error::ClmmError;
use crate::math::big_num::mul_div;

/// Denominator of every [`FeeRate`]: `1_000_000 == 100%`.
pub const FEE_RATE_DENOMINATOR: u32 = 1_000_000;

/// A fee rate expressed in parts per million.
///
/// The same unit serves two purposes: the trade fee charged on swap input
/// (`3_000` = 0.30%), and the protocol / fund shares carved out of that
/// trade fee (`120_000` = 12% of the fee).
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::{FeeRate, Rounding};
///
/// let fee = FeeRate::new(3_000).unwrap_or(FeeRate::ZERO);
/// assert_eq!(fee.portion_of(1_000_000, Rounding::Up), Ok(3_000));
/// assert_eq!(fee.to_string(), "0.3000%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeRate(u32);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// 0.01%, for pegged pairs.
    pub const STABLE: Self = Self(100);

    /// 0.05%.
    pub const LOW: Self = Self(500);

    /// 0.25%.
    pub const MEDIUM: Self = Self(2_500);

    /// 1%, for exotic pairs.
    pub const HIGH: Self = Self(10_000);

    /// 100%.
    pub const FULL: Self = Self(FEE_RATE_DENOMINATOR);

    /// Creates a fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidFee`] if `per_million` exceeds
    /// [`FEE_RATE_DENOMINATOR`].
    pub const fn new(per_million: u32) -> crate::error::Result<Self> {
        if per_million > FEE_RATE_DENOMINATOR {
            return Err(ClmmError::InvalidFee("fee rate must not exceed 1_000_000"));
        }
        Ok(Self(per_million))
    }

    /// Returns the rate in parts per million.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` for a zero rate.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `amount * rate / 1_000_000` with the given rounding.
    ///
    /// # Errors
    ///
    /// Never fails for a validated rate; the `Result` comes from the
    /// underlying wide multiplication.
    pub fn portion_of(&self, amount: u128, rounding: Rounding) -> crate::error::Result<u128> {
        mul_div(
            amount,
            u128::from(self.0),
            u128::from(FEE_RATE_DENOMINATOR),
            rounding,
        )
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04}%", self.0 / 10_000, self.0 % 10_000)
    }
}
