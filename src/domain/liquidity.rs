//! Liquidity units for concentrated positions.

use core::fmt;

use crate::error::ClmmError;

/// Virtual liquidity `L` available inside a price range.
///
/// Distinct from [`Amount`](super::Amount): one unit of liquidity backs
/// `L * Δ√P` of token 1 and `L * Δ(1/√P)` of token 0.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Liquidity;
///
/// let l = Liquidity::new(1_000);
/// assert_eq!(l.apply_delta(-400), Ok(Liquidity::new(600)));
/// assert!(l.apply_delta(-1_001).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Liquidity(u128);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the liquidity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Applies a signed delta.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::InsufficientLiquidity`] if the result would be negative.
    /// - [`ClmmError::Overflow`] if the result exceeds `u128::MAX`.
    pub const fn apply_delta(&self, delta: i128) -> crate::error::Result<Self> {
        if delta < 0 {
            match self.0.checked_sub(delta.unsigned_abs()) {
                Some(v) => Ok(Self(v)),
                None => Err(ClmmError::InsufficientLiquidity),
            }
        } else {
            match self.0.checked_add(delta.unsigned_abs()) {
                Some(v) => Ok(Self(v)),
                None => Err(ClmmError::Overflow("liquidity delta overflow")),
            }
        }
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
