//! Token decimal places.

use crate::error::ClmmError;

/// Largest decimal count accepted for a token mint.
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places of a token mint (`0..=18`).
///
/// Only used to present prices and amounts to humans; pool math works on
/// raw amounts.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Decimals;
///
/// let d = Decimals::new(6).unwrap_or(Decimals::ZERO);
/// assert_eq!(d.to_raw(3), 3_000_000);
/// assert!(Decimals::new(19).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Creates a `Decimals` value.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidToken`] if `value` exceeds 18.
    pub const fn new(value: u8) -> crate::error::Result<Self> {
        if value > MAX_DECIMALS {
            return Err(ClmmError::InvalidToken("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Converts whole tokens into raw units. Cannot overflow for `u64` input.
    #[must_use]
    pub const fn to_raw(&self, whole: u64) -> u128 {
        (whole as u128) * 10u128.pow(self.0 as u32)
    }

    /// Converts raw units into whole tokens, truncating the fraction.
    #[must_use]
    pub const fn to_whole(&self, raw: u128) -> u128 {
        raw / 10u128.pow(self.0 as u32)
    }
}
