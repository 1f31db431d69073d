//! Configuration for a concentrated liquidity pool.

use core::fmt;

use crate::domain::{FeeRate, PoolId, TokenPair, FEE_RATE_DENOMINATOR};
use crate::error::ClmmError;

/// Largest supported tick spacing.
pub const MAX_TICK_SPACING: u16 = 16_384;

/// Immutable parameters of a concentrated liquidity pool.
///
/// # Fees
///
/// `trade_fee_rate` is charged on swap input, in parts per million.
/// `protocol_fee_rate` and `fund_fee_rate` are shares *of that fee*, also
/// per million; the remainder goes to liquidity providers.
///
/// # Validation
///
/// - `tick_spacing` in `1..=MAX_TICK_SPACING`.
/// - `trade_fee_rate` strictly below 100%.
/// - `protocol_fee_rate + fund_fee_rate` at most 100%.
/// - The token pair is validated at [`TokenPair`] construction time.
///
/// # Examples
///
/// ```
/// use clmm_engine::config::PoolConfig;
/// use clmm_engine::domain::{Address, Decimals, FeeRate, Token, TokenPair};
///
/// let usdc = Token::new(Address::from_bytes([1u8; 32]), Decimals::new(6).unwrap_or_default());
/// let sol = Token::new(Address::from_bytes([2u8; 32]), Decimals::new(9).unwrap_or_default());
/// let pair = TokenPair::sorted(usdc, sol).unwrap_or_else(|_| unreachable!());
///
/// let config = PoolConfig::new(pair, 10, FeeRate::MEDIUM)
///     .and_then(|c| c.with_protocol_fee_rate(FeeRate::new(120_000)?));
/// assert!(config.is_ok());
/// assert!(PoolConfig::new(pair, 0, FeeRate::MEDIUM).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    index: u16,
    token_pair: TokenPair,
    tick_spacing: u16,
    trade_fee_rate: FeeRate,
    protocol_fee_rate: FeeRate,
    fund_fee_rate: FeeRate,
}

impl PoolConfig {
    /// Creates a configuration with index 0 and no protocol or fund share.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::InvalidConfiguration`] if `tick_spacing` is out of range.
    /// - [`ClmmError::InvalidFee`] if `trade_fee_rate` is 100%.
    pub fn new(
        token_pair: TokenPair,
        tick_spacing: u16,
        trade_fee_rate: FeeRate,
    ) -> crate::error::Result<Self> {
        let config = Self {
            index: 0,
            token_pair,
            tick_spacing,
            trade_fee_rate,
            protocol_fee_rate: FeeRate::ZERO,
            fund_fee_rate: FeeRate::ZERO,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the configuration index (part of the pool id).
    #[must_use]
    pub const fn with_index(mut self, index: u16) -> Self {
        self.index = index;
        self
    }

    /// Sets the protocol share of the trade fee.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidFee`] if protocol and fund shares
    /// exceed 100%.
    pub fn with_protocol_fee_rate(mut self, rate: FeeRate) -> crate::error::Result<Self> {
        self.protocol_fee_rate = rate;
        self.validate()?;
        Ok(self)
    }

    /// Sets the fund share of the trade fee.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidFee`] if protocol and fund shares
    /// exceed 100%.
    pub fn with_fund_fee_rate(mut self, rate: FeeRate) -> crate::error::Result<Self> {
        self.fund_fee_rate = rate;
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::InvalidConfiguration`] if `tick_spacing` is out of range.
    /// - [`ClmmError::InvalidFee`] if a fee rate is out of range.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.tick_spacing == 0 || self.tick_spacing > MAX_TICK_SPACING {
            return Err(ClmmError::InvalidConfiguration(
                "tick spacing must be in 1..=16384",
            ));
        }
        if self.trade_fee_rate.get() >= FEE_RATE_DENOMINATOR {
            return Err(ClmmError::InvalidFee("trade fee rate must be below 100%"));
        }
        let shares = u64::from(self.protocol_fee_rate.get()) + u64::from(self.fund_fee_rate.get());
        if shares > u64::from(FEE_RATE_DENOMINATOR) {
            return Err(ClmmError::InvalidFee(
                "protocol and fund fee shares must not exceed 100%",
            ));
        }
        Ok(())
    }

    /// Configuration index.
    #[must_use]
    pub const fn index(&self) -> u16 {
        self.index
    }

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the tick spacing.
    #[must_use]
    pub const fn tick_spacing(&self) -> u16 {
        self.tick_spacing
    }

    /// Fee charged on swap input.
    #[must_use]
    pub const fn trade_fee_rate(&self) -> FeeRate {
        self.trade_fee_rate
    }

    /// Protocol share of the trade fee.
    #[must_use]
    pub const fn protocol_fee_rate(&self) -> FeeRate {
        self.protocol_fee_rate
    }

    /// Fund share of the trade fee.
    #[must_use]
    pub const fn fund_fee_rate(&self) -> FeeRate {
        self.fund_fee_rate
    }

    /// Id of the pool this configuration creates.
    #[must_use]
    pub const fn pool_id(&self) -> PoolId {
        PoolId::derive(self.index, &self.token_pair)
    }
}

impl fmt::Display for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PoolConfig(index={}, spacing={}, fee={})",
            self.index, self.tick_spacing, self.trade_fee_rate
        )
    }
}
