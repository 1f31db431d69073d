//! Thread-safe collection of pools and their position books.
//!
//! Each pool lives behind its own [`Mutex`], so transactions against one
//! pool are serialised while independent pools proceed in parallel. The
//! outer map is only write-locked to insert a pool.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use super::Pool;
use crate::config::PoolConfig;
use crate::domain::{
    Address, Amount, LiquidityChange, PoolId, SqrtPriceX64, SwapDirection, SwapResult, SwapSpec,
};
use crate::error::ClmmError;
use crate::position::{Position, PositionKey};

/// A pool together with the positions opened against it.
#[derive(Debug)]
struct PoolSlot {
    pool: Pool,
    positions: HashMap<PositionKey, Position>,
}

impl PoolSlot {
    /// Runs `f` on the pool and a copy of the position, storing the copy
    /// back only on success. Empty positions are dropped.
    fn with_position<T>(
        &mut self,
        key: PositionKey,
        f: impl FnOnce(&mut Pool, &mut Position) -> crate::error::Result<T>,
    ) -> crate::error::Result<T> {
        let mut position = *self
            .positions
            .get(&key)
            .ok_or(ClmmError::PositionNotFound)?;
        let out = f(&mut self.pool, &mut position)?;
        if position.is_empty() {
            self.positions.remove(&key);
            debug!(pool = %self.pool.id(), position = %key, "position closed");
        } else {
            self.positions.insert(key, position);
        }
        Ok(out)
    }
}

/// Registry of pools keyed by [`PoolId`].
///
/// # Examples
///
/// ```
/// use clmm_engine::config::PoolConfig;
/// use clmm_engine::domain::{
///     Address, Amount, Decimals, FeeRate, SqrtPriceX64, SwapDirection, SwapSpec, Token,
///     TokenPair,
/// };
/// use clmm_engine::pool::PoolRegistry;
///
/// # fn main() -> clmm_engine::error::Result<()> {
/// let d9 = Decimals::new(9)?;
/// let pair = TokenPair::sorted(
///     Token::new(Address::from_bytes([4u8; 32]), d9),
///     Token::new(Address::from_bytes([3u8; 32]), d9),
/// )?;
/// let registry = PoolRegistry::new();
/// let id = registry.create_pool(PoolConfig::new(pair, 60, FeeRate::MEDIUM)?)?;
/// registry.initialize(id, SqrtPriceX64::ONE)?;
///
/// let lp = Address::from_bytes([9u8; 32]);
/// registry.open_position(id, lp, -600, 600)?;
/// registry.modify_liquidity(id, lp, -600, 600, 5_000_000)?;
///
/// let spec = SwapSpec::exact_in(Amount::new(10_000))?;
/// let result = registry.swap(id, spec, SwapDirection::ZeroForOne, None)?;
/// assert!(!result.is_partial());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: RwLock<HashMap<PoolId, Arc<Mutex<PoolSlot>>>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.read().len()
    }

    /// Returns `true` if no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.read().is_empty()
    }

    /// Ids of all registered pools, in no particular order.
    #[must_use]
    pub fn pool_ids(&self) -> Vec<PoolId> {
        self.pools.read().keys().copied().collect()
    }

    /// Creates an uninitialized pool from `config`.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::PoolAlreadyExists`] if a pool with the same id exists.
    /// - Any validation error from [`Pool::new`].
    pub fn create_pool(&self, config: PoolConfig) -> crate::error::Result<PoolId> {
        let id = config.pool_id();
        let mut pools = self.pools.write();
        if pools.contains_key(&id) {
            return Err(ClmmError::PoolAlreadyExists);
        }
        let pool = Pool::new(config)?;
        pools.insert(
            id,
            Arc::new(Mutex::new(PoolSlot {
                pool,
                positions: HashMap::new(),
            })),
        );
        Ok(id)
    }

    fn slot(&self, id: PoolId) -> crate::error::Result<Arc<Mutex<PoolSlot>>> {
        self.pools
            .read()
            .get(&id)
            .cloned()
            .ok_or(ClmmError::PoolNotFound)
    }

    /// Sets the starting price of a pool.
    ///
    /// # Errors
    ///
    /// [`ClmmError::PoolNotFound`], or any error from [`Pool::initialize`].
    pub fn initialize(&self, id: PoolId, sqrt_price: SqrtPriceX64) -> crate::error::Result<()> {
        let slot = self.slot(id)?;
        let mut guard = slot.lock();
        guard.pool.initialize(sqrt_price)
    }

    /// Runs `f` with shared access to a pool.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::PoolNotFound`] for an unknown id.
    pub fn with_pool<T>(&self, id: PoolId, f: impl FnOnce(&Pool) -> T) -> crate::error::Result<T> {
        let slot = self.slot(id)?;
        let guard = slot.lock();
        Ok(f(&guard.pool))
    }

    /// Returns a copy of a position.
    ///
    /// # Errors
    ///
    /// [`ClmmError::PoolNotFound`] or [`ClmmError::PositionNotFound`].
    pub fn position(
        &self,
        id: PoolId,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
    ) -> crate::error::Result<Position> {
        let key = PositionKey::new(owner, tick_lower, tick_upper)?;
        let slot = self.slot(id)?;
        let guard = slot.lock();
        guard
            .positions
            .get(&key)
            .copied()
            .ok_or(ClmmError::PositionNotFound)
    }

    /// Opens an empty position, or returns the key of an existing one.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::PoolNotFound`] for an unknown id.
    /// - [`ClmmError::InvalidRange`] unless `tick_lower < tick_upper`.
    /// - [`ClmmError::TickNotInitializable`] if a boundary is not a
    ///   multiple of the pool's tick spacing.
    pub fn open_position(
        &self,
        id: PoolId,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
    ) -> crate::error::Result<PositionKey> {
        let key = PositionKey::new(owner, tick_lower, tick_upper)?;
        let slot = self.slot(id)?;
        let mut guard = slot.lock();
        let spacing = guard.pool.config().tick_spacing();
        if !key.tick_lower().is_aligned(spacing) || !key.tick_upper().is_aligned(spacing) {
            return Err(ClmmError::TickNotInitializable(
                "position ticks must be multiples of tick spacing",
            ));
        }
        guard
            .positions
            .entry(key)
            .or_insert_with(|| Position::from_key(key));
        debug!(pool = %id, position = %key, "position opened");
        Ok(key)
    }

    /// Adds or removes liquidity of an open position.
    ///
    /// # Errors
    ///
    /// [`ClmmError::PoolNotFound`], [`ClmmError::PositionNotFound`], or any
    /// error from [`Pool::modify_liquidity`].
    pub fn modify_liquidity(
        &self,
        id: PoolId,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        delta: i128,
    ) -> crate::error::Result<LiquidityChange> {
        let key = PositionKey::new(owner, tick_lower, tick_upper)?;
        let slot = self.slot(id)?;
        let mut guard = slot.lock();
        guard.with_position(key, |pool, position| pool.modify_liquidity(position, delta))
    }

    /// Collects the fees owed to a position.
    ///
    /// # Errors
    ///
    /// [`ClmmError::PoolNotFound`], [`ClmmError::PositionNotFound`], or any
    /// error from [`Pool::collect_fees`].
    pub fn collect_fees(
        &self,
        id: PoolId,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
    ) -> crate::error::Result<(Amount, Amount)> {
        let key = PositionKey::new(owner, tick_lower, tick_upper)?;
        let slot = self.slot(id)?;
        let mut guard = slot.lock();
        guard.with_position(key, Pool::collect_fees)
    }

    /// Executes a swap against a pool.
    ///
    /// # Errors
    ///
    /// [`ClmmError::PoolNotFound`], or any error from [`Pool::swap`].
    pub fn swap(
        &self,
        id: PoolId,
        spec: SwapSpec,
        direction: SwapDirection,
        price_limit: Option<SqrtPriceX64>,
    ) -> crate::error::Result<SwapResult> {
        let slot = self.slot(id)?;
        let mut guard = slot.lock();
        guard.pool.swap(spec, direction, price_limit)
    }

    /// Computes a swap without committing it.
    ///
    /// # Errors
    ///
    /// [`ClmmError::PoolNotFound`], or any error from [`Pool::quote`].
    pub fn quote(
        &self,
        id: PoolId,
        spec: SwapSpec,
        direction: SwapDirection,
        price_limit: Option<SqrtPriceX64>,
    ) -> crate::error::Result<SwapResult> {
        self.with_pool(id, |pool| pool.quote(spec, direction, price_limit))?
    }
}
