//! Concentrated liquidity position with fee accounting.

use core::fmt;

use super::PositionKey;
use crate::domain::{Address, Amount, Liquidity, Tick};
use crate::math::fee_math::fees_owed;
use crate::math::CheckedArithmetic;

/// A liquidity provider's stake in one tick range of one pool.
///
/// Fees are settled lazily: the position stores the fee growth inside its
/// range as of its last update, and every later update credits
/// `liquidity * (growth_now - growth_last)` to the owed balances.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Address;
/// use clmm_engine::position::Position;
///
/// let owner = Address::from_bytes([1u8; 32]);
/// let position = Position::open(owner, -100, 100).unwrap_or_else(|_| unreachable!());
/// assert!(position.liquidity().is_zero());
/// assert!(position.is_in_range(0));
/// assert!(Position::open(owner, 100, 100).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    key: PositionKey,
    liquidity: Liquidity,
    fee_growth_inside_0_last_x64: u128,
    fee_growth_inside_1_last_x64: u128,
    tokens_owed_0: Amount,
    tokens_owed_1: Amount,
}

impl Position {
    /// Opens an empty position over `[tick_lower, tick_upper)`.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidRange`](crate::error::ClmmError::InvalidRange) if `tick_lower >= tick_upper`
    /// or either tick is out of bounds.
    pub fn open(owner: Address, tick_lower: i32, tick_upper: i32) -> crate::error::Result<Self> {
        Ok(Self::from_key(PositionKey::new(owner, tick_lower, tick_upper)?))
    }

    /// Opens an empty position for an existing key.
    #[must_use]
    pub const fn from_key(key: PositionKey) -> Self {
        Self {
            key,
            liquidity: Liquidity::ZERO,
            fee_growth_inside_0_last_x64: 0,
            fee_growth_inside_1_last_x64: 0,
            tokens_owed_0: Amount::ZERO,
            tokens_owed_1: Amount::ZERO,
        }
    }

    /// The position's key.
    #[must_use]
    pub const fn key(&self) -> PositionKey {
        self.key
    }

    /// Owner of the position.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.key.owner()
    }

    /// Lower boundary tick.
    #[must_use]
    pub const fn tick_lower(&self) -> Tick {
        self.key.tick_lower()
    }

    /// Upper boundary tick.
    #[must_use]
    pub const fn tick_upper(&self) -> Tick {
        self.key.tick_upper()
    }

    /// Liquidity currently provided.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Token0 fee growth inside the range at the last update.
    #[must_use]
    pub const fn fee_growth_inside_0_last_x64(&self) -> u128 {
        self.fee_growth_inside_0_last_x64
    }

    /// Token1 fee growth inside the range at the last update.
    #[must_use]
    pub const fn fee_growth_inside_1_last_x64(&self) -> u128 {
        self.fee_growth_inside_1_last_x64
    }

    /// Uncollected token0 fees.
    #[must_use]
    pub const fn tokens_owed_0(&self) -> Amount {
        self.tokens_owed_0
    }

    /// Uncollected token1 fees.
    #[must_use]
    pub const fn tokens_owed_1(&self) -> Amount {
        self.tokens_owed_1
    }

    /// Returns `true` if `tick` lies in `[tick_lower, tick_upper)`.
    #[must_use]
    pub const fn is_in_range(&self, tick: i32) -> bool {
        tick >= self.key.tick_lower().get() && tick < self.key.tick_upper().get()
    }

    /// Returns `true` if the position holds neither liquidity nor fees.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.liquidity.is_zero() && self.tokens_owed_0.is_zero() && self.tokens_owed_1.is_zero()
    }

    /// Credits fees accrued since the last update, moves the fee-growth
    /// snapshots to the given values and applies `delta` to liquidity.
    ///
    /// Fees accrue on the liquidity held *before* the change. Nothing is
    /// modified on error.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::InsufficientLiquidity`](crate::error::ClmmError::InsufficientLiquidity) if removing more than held.
    /// - [`ClmmError::Overflow`](crate::error::ClmmError::Overflow) if liquidity or owed fees overflow.
    pub fn update_liquidity(
        &mut self,
        delta: i128,
        fee_growth_inside_0_x64: u128,
        fee_growth_inside_1_x64: u128,
    ) -> crate::error::Result<()> {
        let liquidity = self.liquidity.apply_delta(delta)?;
        let earned_0 = fees_owed(
            fee_growth_inside_0_x64,
            self.fee_growth_inside_0_last_x64,
            self.liquidity.get(),
        )?;
        let earned_1 = fees_owed(
            fee_growth_inside_1_x64,
            self.fee_growth_inside_1_last_x64,
            self.liquidity.get(),
        )?;
        let tokens_owed_0 = self.tokens_owed_0.safe_add_u128(earned_0)?;
        let tokens_owed_1 = self.tokens_owed_1.safe_add_u128(earned_1)?;

        self.liquidity = liquidity;
        self.fee_growth_inside_0_last_x64 = fee_growth_inside_0_x64;
        self.fee_growth_inside_1_last_x64 = fee_growth_inside_1_x64;
        self.tokens_owed_0 = tokens_owed_0;
        self.tokens_owed_1 = tokens_owed_1;
        Ok(())
    }

    /// Returns the owed fees and resets them to zero.
    pub fn collect_fees(&mut self) -> (Amount, Amount) {
        let owed = (self.tokens_owed_0, self.tokens_owed_1);
        self.tokens_owed_0 = Amount::ZERO;
        self.tokens_owed_1 = Amount::ZERO;
        owed
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position({}, liquidity={}, owed=({}, {}))",
            self.key, self.liquidity, self.tokens_owed_0, self.tokens_owed_1
        )
    }
}
