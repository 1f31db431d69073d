//! Concentrated liquidity pool state machine.
//!
//! A [`Pool`] starts [`Uninitialized`](PoolStatus::Uninitialized) and
//! becomes [`Active`](PoolStatus::Active) once its starting price is set.
//! Every transaction on an active pool is atomic: new values are computed
//! on copies and written back only after every step has succeeded.
//!
//! # State
//!
//! - `sqrt_price_x64` is the authoritative price; `tick_current` is the
//!   greatest tick whose price is at or below it (or the tick just below
//!   an initialized tick the price came down to).
//! - `liquidity` is the sum of `liquidity_net` over initialized ticks at
//!   or below `tick_current`.
//! - `fee_growth_global_{0,1}_x64` accumulate LP fees per unit of
//!   liquidity, wrapping on overflow.
//! - Protocol and fund fees are held per token until collected.

use std::collections::BTreeMap;

use core::fmt;

use tracing::{debug, info};

use super::swap_engine::{SwapEngine, SwapOutcome};
use crate::config::PoolConfig;
use crate::domain::{
    Amount, Liquidity, LiquidityChange, PoolId, SqrtPriceX64, SwapDirection, SwapResult,
    SwapSpec,
};
use crate::error::ClmmError;
use crate::math::liquidity_amounts::amounts_for_liquidity_delta;
use crate::math::liquidity_math::add_delta;
use crate::math::{sqrt_price_at_tick, tick_at_sqrt_price};
use crate::position::Position;
use crate::tick::{fee_growth_inside, max_liquidity_per_tick, TickBitmap, TickInfo};

// ---------------------------------------------------------------------------
// PoolStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolStatus {
    /// Created, no price set yet.
    #[default]
    Uninitialized,
    /// Price set; accepts liquidity and swaps.
    Active,
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Active => write!(f, "Active"),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-token balances
// ---------------------------------------------------------------------------

/// A pair of token balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct TokenBalances {
    token_0: u128,
    token_1: u128,
}

impl TokenBalances {
    fn credited(self, zero_for_one: bool, amount: u128) -> crate::error::Result<Self> {
        let mut next = self;
        let slot = if zero_for_one {
            &mut next.token_0
        } else {
            &mut next.token_1
        };
        *slot = slot
            .checked_add(amount)
            .ok_or(ClmmError::Overflow("fee balance"))?;
        Ok(next)
    }

    fn withdraw(&mut self, max_0: Amount, max_1: Amount) -> (Amount, Amount) {
        let take_0 = Amount::new(self.token_0).min(max_0);
        let take_1 = Amount::new(self.token_1).min(max_1);
        self.token_0 -= take_0.get();
        self.token_1 -= take_1.get();
        (take_0, take_1)
    }
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// A concentrated liquidity pool.
///
/// Owns the price, active liquidity, fee accumulators, tick table and
/// tick bitmap. Positions are owned by callers and passed in by `&mut`.
///
/// # Examples
///
/// ```
/// use clmm_engine::config::PoolConfig;
/// use clmm_engine::domain::{
///     Address, Amount, Decimals, FeeRate, SqrtPriceX64, SwapDirection, SwapSpec, Token,
///     TokenPair,
/// };
/// use clmm_engine::pool::Pool;
/// use clmm_engine::position::Position;
///
/// # fn main() -> clmm_engine::error::Result<()> {
/// let d6 = Decimals::new(6)?;
/// let pair = TokenPair::new(
///     Token::new(Address::from_bytes([1u8; 32]), d6),
///     Token::new(Address::from_bytes([2u8; 32]), d6),
/// )?;
/// let mut pool = Pool::new(PoolConfig::new(pair, 10, FeeRate::new(3_000)?)?)?;
/// pool.initialize(SqrtPriceX64::ONE)?;
///
/// let mut position = Position::open(Address::from_bytes([7u8; 32]), -100, 100)?;
/// pool.modify_liquidity(&mut position, 1_000_000)?;
///
/// let result = pool.swap(
///     SwapSpec::exact_in(Amount::new(1_000))?,
///     SwapDirection::OneForZero,
///     None,
/// )?;
/// assert_eq!(result.fee(), Amount::new(3));
/// assert!(result.amount_out() < Amount::new(1_000));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    config: PoolConfig,
    status: PoolStatus,
    sqrt_price_x64: u128,
    tick_current: i32,
    liquidity: u128,
    fee_growth_global_0_x64: u128,
    fee_growth_global_1_x64: u128,
    protocol_fees: TokenBalances,
    fund_fees: TokenBalances,
    swap_in: TokenBalances,
    swap_out: TokenBalances,
    ticks: BTreeMap<i32, TickInfo>,
    tick_bitmap: TickBitmap,
}

impl Pool {
    /// Creates an uninitialized pool.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    pub fn new(config: PoolConfig) -> crate::error::Result<Self> {
        config.validate()?;
        info!(pool = %config.pool_id(), %config, "pool created");
        Ok(Self {
            config,
            status: PoolStatus::Uninitialized,
            sqrt_price_x64: 0,
            tick_current: 0,
            liquidity: 0,
            fee_growth_global_0_x64: 0,
            fee_growth_global_1_x64: 0,
            protocol_fees: TokenBalances::default(),
            fund_fees: TokenBalances::default(),
            swap_in: TokenBalances::default(),
            swap_out: TokenBalances::default(),
            ticks: BTreeMap::new(),
            tick_bitmap: TickBitmap::new(),
        })
    }

    /// Sets the starting price and activates the pool.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::AlreadyInitialized`] on a second call.
    /// - [`ClmmError::OutOfRange`] if the price maps outside the tick range.
    pub fn initialize(&mut self, sqrt_price: SqrtPriceX64) -> crate::error::Result<()> {
        if self.status == PoolStatus::Active {
            return Err(ClmmError::AlreadyInitialized);
        }
        let tick = tick_at_sqrt_price(sqrt_price.get())?;
        self.sqrt_price_x64 = sqrt_price.get();
        self.tick_current = tick;
        self.status = PoolStatus::Active;
        info!(pool = %self.id(), sqrt_price = %sqrt_price, tick, "pool initialized");
        debug_assert!(self.is_consistent());
        Ok(())
    }

    pub(crate) fn ensure_active(&self) -> crate::error::Result<()> {
        match self.status {
            PoolStatus::Active => Ok(()),
            PoolStatus::Uninitialized => Err(ClmmError::PoolNotInitialized),
        }
    }

    // -- accessors ------------------------------------------------------------

    /// Pool identity.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.config.pool_id()
    }

    /// Pool configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        self.status
    }

    /// Returns `true` once the pool is initialized.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, PoolStatus::Active)
    }

    /// Current sqrt price. Zero bits until initialized.
    #[must_use]
    pub const fn sqrt_price(&self) -> SqrtPriceX64 {
        SqrtPriceX64::from_bits_unchecked(self.sqrt_price_x64)
    }

    /// Current tick.
    #[must_use]
    pub const fn tick_current(&self) -> i32 {
        self.tick_current
    }

    /// Active liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        Liquidity::new(self.liquidity)
    }

    /// Global token0 fee growth per unit of liquidity.
    #[must_use]
    pub const fn fee_growth_global_0_x64(&self) -> u128 {
        self.fee_growth_global_0_x64
    }

    /// Global token1 fee growth per unit of liquidity.
    #[must_use]
    pub const fn fee_growth_global_1_x64(&self) -> u128 {
        self.fee_growth_global_1_x64
    }

    /// Uncollected protocol fees `(token0, token1)`.
    #[must_use]
    pub const fn protocol_fees(&self) -> (Amount, Amount) {
        (
            Amount::new(self.protocol_fees.token_0),
            Amount::new(self.protocol_fees.token_1),
        )
    }

    /// Uncollected fund fees `(token0, token1)`.
    #[must_use]
    pub const fn fund_fees(&self) -> (Amount, Amount) {
        (
            Amount::new(self.fund_fees.token_0),
            Amount::new(self.fund_fees.token_1),
        )
    }

    /// Cumulative swap input `(token0, token1)`, saturating.
    #[must_use]
    pub const fn swap_in_amounts(&self) -> (Amount, Amount) {
        (
            Amount::new(self.swap_in.token_0),
            Amount::new(self.swap_in.token_1),
        )
    }

    /// Cumulative swap output `(token0, token1)`, saturating.
    #[must_use]
    pub const fn swap_out_amounts(&self) -> (Amount, Amount) {
        (
            Amount::new(self.swap_out.token_0),
            Amount::new(self.swap_out.token_1),
        )
    }

    /// State of an initialized tick.
    #[must_use]
    pub fn tick(&self, index: i32) -> Option<&TickInfo> {
        self.ticks.get(&index)
    }

    /// All initialized ticks in ascending order.
    pub fn ticks(&self) -> impl Iterator<Item = (i32, &TickInfo)> + '_ {
        self.ticks.iter().map(|(&t, info)| (t, info))
    }

    /// Bitmap of initialized ticks.
    #[must_use]
    pub const fn tick_bitmap(&self) -> &TickBitmap {
        &self.tick_bitmap
    }

    /// Fee growth inside `[tick_lower, tick_upper)` at the current state.
    #[must_use]
    pub fn fee_growth_inside(&self, tick_lower: i32, tick_upper: i32) -> (u128, u128) {
        let lower = self.ticks.get(&tick_lower).copied().unwrap_or_default();
        let upper = self.ticks.get(&tick_upper).copied().unwrap_or_default();
        fee_growth_inside(
            (tick_lower, &lower),
            (tick_upper, &upper),
            self.tick_current,
            self.fee_growth_global_0_x64,
            self.fee_growth_global_1_x64,
        )
    }

    // -- liquidity ------------------------------------------------------------

    /// Adds (`delta > 0`) or removes (`delta < 0`) liquidity of `position`.
    ///
    /// Updates both boundary ticks and the bitmap, settles the position's
    /// fees, and adjusts active liquidity when the range contains the
    /// current tick. A zero `delta` only settles fees.
    ///
    /// Returns the token amounts the owner must deposit (rounded up) or
    /// receives (rounded down).
    ///
    /// # Errors
    ///
    /// - [`ClmmError::PoolNotInitialized`] before initialization.
    /// - [`ClmmError::TickNotInitializable`] if a boundary is not a
    ///   multiple of the tick spacing.
    /// - [`ClmmError::InsufficientLiquidity`] when removing more than the
    ///   position holds.
    /// - [`ClmmError::Overflow`] if a tick exceeds its liquidity cap.
    pub fn modify_liquidity(
        &mut self,
        position: &mut Position,
        delta: i128,
    ) -> crate::error::Result<LiquidityChange> {
        self.ensure_active()?;
        let spacing = self.config.tick_spacing();
        let tick_lower = position.tick_lower();
        let tick_upper = position.tick_upper();
        if !tick_lower.is_aligned(spacing) || !tick_upper.is_aligned(spacing) {
            return Err(ClmmError::TickNotInitializable(
                "position ticks must be multiples of tick spacing",
            ));
        }
        let (lower, upper) = (tick_lower.get(), tick_upper.get());

        let mut lower_info = self.ticks.get(&lower).copied().unwrap_or_default();
        let mut upper_info = self.ticks.get(&upper).copied().unwrap_or_default();
        let (mut flipped_lower, mut flipped_upper) = (false, false);
        if delta != 0 {
            let max_liquidity = max_liquidity_per_tick(spacing);
            flipped_lower = lower_info.update(
                lower,
                self.tick_current,
                delta,
                self.fee_growth_global_0_x64,
                self.fee_growth_global_1_x64,
                false,
                max_liquidity,
            )?;
            flipped_upper = upper_info.update(
                upper,
                self.tick_current,
                delta,
                self.fee_growth_global_0_x64,
                self.fee_growth_global_1_x64,
                true,
                max_liquidity,
            )?;
        }

        let (inside_0, inside_1) = fee_growth_inside(
            (lower, &lower_info),
            (upper, &upper_info),
            self.tick_current,
            self.fee_growth_global_0_x64,
            self.fee_growth_global_1_x64,
        );
        let mut updated = *position;
        updated.update_liquidity(delta, inside_0, inside_1)?;

        let (amount_0, amount_1) = amounts_for_liquidity_delta(
            self.tick_current,
            self.sqrt_price_x64,
            lower,
            upper,
            delta,
        )?;
        let liquidity = if position.is_in_range(self.tick_current) {
            add_delta(self.liquidity, delta)?
        } else {
            self.liquidity
        };

        self.flip_boundaries(lower, flipped_lower, upper, flipped_upper)?;
        self.store_tick(lower, lower_info);
        self.store_tick(upper, upper_info);
        self.liquidity = liquidity;
        *position = updated;

        let change = LiquidityChange::new(delta, Amount::new(amount_0), Amount::new(amount_1));
        debug!(
            pool = %self.id(),
            position = %position.key(),
            %change,
            liquidity = self.liquidity,
            "liquidity modified"
        );
        debug_assert!(self.is_consistent());
        Ok(change)
    }

    /// Settles and returns the fees owed to `position`, resetting them.
    ///
    /// # Errors
    ///
    /// Same as [`modify_liquidity`](Self::modify_liquidity) with a zero delta.
    pub fn collect_fees(&mut self, position: &mut Position) -> crate::error::Result<(Amount, Amount)> {
        self.modify_liquidity(position, 0)?;
        let (fees_0, fees_1) = position.collect_fees();
        debug!(
            pool = %self.id(),
            position = %position.key(),
            fees_0 = fees_0.get(),
            fees_1 = fees_1.get(),
            "fees collected"
        );
        Ok((fees_0, fees_1))
    }

    fn flip_boundaries(
        &mut self,
        lower: i32,
        flip_lower: bool,
        upper: i32,
        flip_upper: bool,
    ) -> crate::error::Result<()> {
        let spacing = self.config.tick_spacing();
        if flip_lower {
            self.tick_bitmap.flip(lower, spacing)?;
        }
        if flip_upper {
            if let Err(err) = self.tick_bitmap.flip(upper, spacing) {
                if flip_lower {
                    // Undo the first flip; it just succeeded on the same bitmap.
                    self.tick_bitmap.flip(lower, spacing)?;
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn store_tick(&mut self, index: i32, info: TickInfo) {
        if info.is_initialized() {
            self.ticks.insert(index, info);
        } else {
            self.ticks.remove(&index);
        }
    }

    // -- swaps ----------------------------------------------------------------

    /// Computes a swap without changing the pool.
    ///
    /// # Errors
    ///
    /// See [`SwapEngine::quote`].
    pub fn quote(
        &self,
        spec: SwapSpec,
        direction: SwapDirection,
        price_limit: Option<SqrtPriceX64>,
    ) -> crate::error::Result<SwapResult> {
        SwapEngine::new(self).quote(spec, direction, price_limit)
    }

    /// Executes a swap and commits the result.
    ///
    /// Stopping at the price limit or running out of liquidity is not an
    /// error; inspect [`SwapResult::stop`]. On error the pool is unchanged.
    ///
    /// # Errors
    ///
    /// See [`SwapEngine::quote`].
    pub fn swap(
        &mut self,
        spec: SwapSpec,
        direction: SwapDirection,
        price_limit: Option<SqrtPriceX64>,
    ) -> crate::error::Result<SwapResult> {
        let outcome = SwapEngine::new(self).run(spec, direction, price_limit)?;
        self.commit_swap(outcome)
    }

    fn commit_swap(&mut self, outcome: SwapOutcome) -> crate::error::Result<SwapResult> {
        let result = outcome.result;
        let zero_for_one = result.direction().is_zero_for_one();
        let protocol_fees = self
            .protocol_fees
            .credited(zero_for_one, result.protocol_fee().get())?;
        let fund_fees = self
            .fund_fees
            .credited(zero_for_one, result.fund_fee().get())?;

        for crossed in &outcome.crossed {
            if let Some(info) = self.ticks.get_mut(&crossed.tick) {
                info.cross(crossed.fee_growth_global_0_x64, crossed.fee_growth_global_1_x64);
            }
        }
        self.sqrt_price_x64 = outcome.sqrt_price_x64;
        self.tick_current = outcome.tick;
        self.liquidity = outcome.liquidity;
        self.fee_growth_global_0_x64 = outcome.fee_growth_global_0_x64;
        self.fee_growth_global_1_x64 = outcome.fee_growth_global_1_x64;
        self.protocol_fees = protocol_fees;
        self.fund_fees = fund_fees;

        let (amount_in, amount_out) = (result.amount_in().get(), result.amount_out().get());
        if zero_for_one {
            self.swap_in.token_0 = self.swap_in.token_0.saturating_add(amount_in);
            self.swap_out.token_1 = self.swap_out.token_1.saturating_add(amount_out);
        } else {
            self.swap_in.token_1 = self.swap_in.token_1.saturating_add(amount_in);
            self.swap_out.token_0 = self.swap_out.token_0.saturating_add(amount_out);
        }

        debug!(pool = %self.id(), %result, liquidity = self.liquidity, "swap executed");
        debug_assert!(self.is_consistent());
        Ok(result)
    }

    // -- protocol and fund fees -----------------------------------------------

    /// Withdraws up to `(max_0, max_1)` of the protocol fees.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::PoolNotInitialized`] before initialization.
    pub fn collect_protocol_fees(
        &mut self,
        max_0: Amount,
        max_1: Amount,
    ) -> crate::error::Result<(Amount, Amount)> {
        self.ensure_active()?;
        let taken = self.protocol_fees.withdraw(max_0, max_1);
        debug!(pool = %self.id(), amount_0 = taken.0.get(), amount_1 = taken.1.get(), "protocol fees collected");
        Ok(taken)
    }

    /// Withdraws up to `(max_0, max_1)` of the fund fees.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::PoolNotInitialized`] before initialization.
    pub fn collect_fund_fees(
        &mut self,
        max_0: Amount,
        max_1: Amount,
    ) -> crate::error::Result<(Amount, Amount)> {
        self.ensure_active()?;
        let taken = self.fund_fees.withdraw(max_0, max_1);
        debug!(pool = %self.id(), amount_0 = taken.0.get(), amount_1 = taken.1.get(), "fund fees collected");
        Ok(taken)
    }

    // -- invariants -----------------------------------------------------------

    /// Checks the structural invariants of the pool.
    ///
    /// - The current tick brackets the sqrt price.
    /// - Active liquidity equals the sum of `liquidity_net` at or below the
    ///   current tick.
    /// - The tick table holds exactly the initialized ticks, which are the
    ///   bitmap's set bits.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if !self.is_active() {
            return self.ticks.is_empty() && self.tick_bitmap.is_empty() && self.liquidity == 0;
        }

        let Ok(floor) = sqrt_price_at_tick(self.tick_current) else {
            return false;
        };
        if self.sqrt_price_x64 < floor.get() {
            return false;
        }
        if let Ok(ceiling) = sqrt_price_at_tick(self.tick_current + 1) {
            if self.sqrt_price_x64 > ceiling.get() {
                return false;
            }
        }

        let mut active: i128 = 0;
        for info in self.ticks.range(..=self.tick_current).map(|(_, info)| info) {
            match active.checked_add(info.liquidity_net()) {
                Some(sum) => active = sum,
                None => return false,
            }
        }
        if u128::try_from(active).ok() != Some(self.liquidity) {
            return false;
        }

        let spacing = self.config.tick_spacing();
        self.tick_bitmap.len() == self.ticks.len()
            && self
                .ticks
                .iter()
                .all(|(&t, info)| info.is_initialized() && self.tick_bitmap.is_initialized(t, spacing))
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool({}, {}, tick={}, liquidity={})",
            self.id(),
            self.status,
            self.tick_current,
            self.liquidity
        )
    }
}
