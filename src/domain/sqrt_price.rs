//! Q64.64 square-root price.

use core::fmt;

use fixed::types::U64F64;

use super::Decimals;
use crate::error::ClmmError;

/// Smallest sqrt price, `sqrt_price_at_tick(MIN_TICK)`.
pub const MIN_SQRT_PRICE_X64: u128 = 4_295_048_016;

/// Largest sqrt price, `sqrt_price_at_tick(MAX_TICK)`.
pub const MAX_SQRT_PRICE_X64: u128 = 79_226_673_521_066_979_257_578_248_091;

/// `2^64`, the Q64.64 representation of `1.0`.
pub const Q64: u128 = 1u128 << 64;

/// Square root of the token1/token0 price as an unsigned Q64.64 number.
///
/// All pool math is integer math on the raw bits; the float conversions
/// here exist only for display and for seeding a pool from a quoted price.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::{Decimals, SqrtPriceX64};
///
/// let one = SqrtPriceX64::ONE;
/// let d6 = Decimals::new(6).unwrap_or(Decimals::ZERO);
/// assert!((one.to_price(d6, d6) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqrtPriceX64(u128);

impl SqrtPriceX64 {
    /// Lower bound.
    pub const MIN: Self = Self(MIN_SQRT_PRICE_X64);

    /// Upper bound.
    pub const MAX: Self = Self(MAX_SQRT_PRICE_X64);

    /// Price `1.0`.
    pub const ONE: Self = Self(Q64);

    /// Creates a sqrt price after validating the bounds (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::OutOfRange`] outside
    /// `[MIN_SQRT_PRICE_X64, MAX_SQRT_PRICE_X64]`.
    pub const fn new(value: u128) -> crate::error::Result<Self> {
        if value < MIN_SQRT_PRICE_X64 || value > MAX_SQRT_PRICE_X64 {
            return Err(ClmmError::OutOfRange("sqrt price outside supported bounds"));
        }
        Ok(Self(value))
    }

    /// Wraps raw bits already known to lie within the bounds.
    pub(crate) const fn from_bits_unchecked(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw Q64.64 bits.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns the value as a `fixed` number.
    #[must_use]
    pub fn to_fixed(&self) -> U64F64 {
        U64F64::from_bits(self.0)
    }

    /// Human-readable price of token0 in token1, adjusted for decimals.
    #[must_use]
    pub fn to_price(&self, decimals_0: Decimals, decimals_1: Decimals) -> f64 {
        let sqrt = self.to_fixed().to_num::<f64>();
        let shift = i32::from(decimals_0.get()) - i32::from(decimals_1.get());
        sqrt * sqrt * 10f64.powi(shift)
    }

    /// Converts a human-readable price into a sqrt price.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::InvalidQuantity`] if `price` is not finite and positive.
    /// - [`ClmmError::OutOfRange`] if the result leaves the supported bounds.
    pub fn from_price(
        price: f64,
        decimals_0: Decimals,
        decimals_1: Decimals,
    ) -> crate::error::Result<Self> {
        if !price.is_finite() || price <= 0.0 {
            return Err(ClmmError::InvalidQuantity("price must be finite and positive"));
        }
        let shift = i32::from(decimals_1.get()) - i32::from(decimals_0.get());
        let sqrt = (price * 10f64.powi(shift)).sqrt();
        let fixed = U64F64::checked_from_num(sqrt)
            .ok_or(ClmmError::OutOfRange("price does not fit Q64.64"))?;
        Self::new(fixed.to_bits())
    }
}

impl fmt::Display for SqrtPriceX64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fixed())
    }
}
