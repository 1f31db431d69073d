//! Token amounts backing a liquidity change.

use core::fmt;

use super::Amount;

/// Token amounts moved by a committed `modify_liquidity`.
///
/// For a deposit (`delta > 0`) the amounts are owed *to* the pool and were
/// rounded up; for a withdrawal they are owed *by* the pool and were
/// rounded down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityChange {
    delta: i128,
    amount_0: Amount,
    amount_1: Amount,
}

impl LiquidityChange {
    /// Creates a change record.
    pub const fn new(delta: i128, amount_0: Amount, amount_1: Amount) -> Self {
        Self {
            delta,
            amount_0,
            amount_1,
        }
    }

    /// The signed liquidity delta applied.
    #[must_use]
    pub const fn delta(&self) -> i128 {
        self.delta
    }

    /// Token0 amount.
    pub const fn amount_0(&self) -> Amount {
        self.amount_0
    }

    /// Token1 amount.
    pub const fn amount_1(&self) -> Amount {
        self.amount_1
    }

    /// Returns `true` if liquidity was added.
    #[must_use]
    pub const fn is_deposit(&self) -> bool {
        self.delta > 0
    }
}

impl fmt::Display for LiquidityChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_deposit() { "deposit" } else { "withdraw" };
        write!(
            f,
            "{kind}(L={}, amount_0={}, amount_1={})",
            self.delta.unsigned_abs(),
            self.amount_0,
            self.amount_1
        )
    }
}
