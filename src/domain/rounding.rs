//! Explicit rounding direction for fixed-point arithmetic.

/// Rounding direction for every division in the engine.
///
/// Amounts a user pays are rounded [`Up`](Self::Up); amounts a user
/// receives are rounded [`Down`](Self::Down). Keeping the direction
/// explicit means the pool never pays out more than it received.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::for_liquidity_delta(-5), Rounding::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }

    /// Rounding for the token amounts backing a liquidity change.
    ///
    /// Deposits (`delta > 0`) round up, withdrawals round down.
    #[must_use]
    pub const fn for_liquidity_delta(delta: i128) -> Self {
        if delta > 0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}
