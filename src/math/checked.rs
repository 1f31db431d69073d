//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning inherent methods of
//! [`Amount`] and [`Liquidity`] into `Result`s with a specific
//! [`ClmmError`] variant, so accumulation code can use `?`.
//!
//! # Examples
//!
//! ```
//! use clmm_engine::domain::Amount;
//! use clmm_engine::math::CheckedArithmetic;
//!
//! let total = Amount::new(100).safe_add(&Amount::new(200));
//! assert_eq!(total, Ok(Amount::new(300)));
//! assert!(Amount::ZERO.safe_sub(&Amount::new(1)).is_err());
//! ```

use crate::domain::{Amount, Liquidity};
use crate::error::ClmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// No method panics or saturates; every failure is an `Err`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::Overflow`] if the result is not representable.
    fn safe_add(&self, other: &Self) -> Result<Self, ClmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, ClmmError>;

    /// Checked addition of a raw `u128`.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::Overflow`] if the result is not representable.
    fn safe_add_u128(&self, value: u128) -> Result<Self, ClmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, ClmmError> {
        self.checked_add(other)
            .ok_or(ClmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, ClmmError> {
        self.checked_sub(other)
            .ok_or(ClmmError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_add_u128(&self, value: u128) -> Result<Self, ClmmError> {
        self.safe_add(&Amount::new(value))
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, ClmmError> {
        self.checked_add(other)
            .ok_or(ClmmError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, ClmmError> {
        self.checked_sub(other)
            .ok_or(ClmmError::InsufficientLiquidity)
    }

    #[inline]
    fn safe_add_u128(&self, value: u128) -> Result<Self, ClmmError> {
        self.safe_add(&Liquidity::new(value))
    }
}
