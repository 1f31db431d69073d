//! Swap amount specification.

use core::fmt;

use super::Amount;
use crate::error::ClmmError;

/// The amount that drives a swap.
///
/// # Invariants
///
/// The contained amount is always non-zero.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::{Amount, SwapSpec};
///
/// let spec = SwapSpec::exact_in(Amount::new(1_000));
/// assert!(spec.is_ok());
/// assert!(SwapSpec::exact_out(Amount::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapSpec {
    /// Spend exactly this much input (fee included); output is computed.
    ExactIn {
        /// Input amount, fee included.
        amount_in: Amount,
    },
    /// Receive exactly this much output; input is computed.
    ExactOut {
        /// Requested output amount.
        amount_out: Amount,
    },
}

impl SwapSpec {
    /// Creates an exact-input specification.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidQuantity`] if `amount` is zero.
    pub const fn exact_in(amount: Amount) -> crate::error::Result<Self> {
        if amount.is_zero() {
            return Err(ClmmError::InvalidQuantity("swap amount must be non-zero"));
        }
        Ok(Self::ExactIn { amount_in: amount })
    }

    /// Creates an exact-output specification.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidQuantity`] if `amount` is zero.
    pub const fn exact_out(amount: Amount) -> crate::error::Result<Self> {
        if amount.is_zero() {
            return Err(ClmmError::InvalidQuantity("swap amount must be non-zero"));
        }
        Ok(Self::ExactOut { amount_out: amount })
    }

    /// Returns `true` for [`SwapSpec::ExactIn`].
    #[must_use]
    pub const fn is_exact_in(&self) -> bool {
        matches!(self, Self::ExactIn { .. })
    }

    /// The specified amount regardless of variant.
    pub const fn amount(&self) -> Amount {
        match self {
            Self::ExactIn { amount_in } => *amount_in,
            Self::ExactOut { amount_out } => *amount_out,
        }
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn { amount_in } => write!(f, "ExactIn({amount_in})"),
            Self::ExactOut { amount_out } => write!(f, "ExactOut({amount_out})"),
        }
    }
}
