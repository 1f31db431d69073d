//! Raw token amount.

use core::fmt;

/// A raw token amount in the smallest unit of the token.
///
/// `Amount` never interprets decimals; see [`Token`](super::Token) for
/// that. All `u128` values are valid amounts, and arithmetic is checked.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(a.checked_sub(&b), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
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

    /// Returns the smaller of `self` and `cap`.
    pub const fn min(self, cap: Self) -> Self {
        if self.0 < cap.0 {
            self
        } else {
            cap
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_is_carved_out_of_gross_input() {
        let gross = Amount::new(10_000);
        let fee = Amount::new(30);
        let Some(net) = gross.checked_sub(&fee) else {
            unreachable!("fee never exceeds gross input");
        };
        assert_eq!(net, Amount::new(9_970));
        assert_eq!(net.checked_add(&fee), Some(gross));
    }

    #[test]
    fn vault_totals_overflow_at_u128_max() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
        assert_eq!(Amount::ZERO.checked_sub(&Amount::new(1)), None);
        assert!(Amount::default().is_zero());
    }

    #[test]
    fn exact_out_request_is_capped_by_step_output() {
        let requested = Amount::new(5_000);
        assert_eq!(requested.min(Amount::new(1_200)), Amount::new(1_200));
        assert_eq!(requested.min(Amount::MAX), requested);
    }

    #[test]
    fn displays_raw_units() {
        assert_eq!(Amount::new(1_500_000).to_string(), "1500000");
    }
}
