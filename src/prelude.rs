//! Convenience re-exports for common types.
//!
//! ```rust
//! use clmm_engine::prelude::*;
//! ```
//!
//! Brings the domain types, configuration, pool types and error types into
//! scope with a single import.

pub use crate::domain::{
    Address, Amount, Decimals, FeeRate, Liquidity, LiquidityChange, PoolId, Rounding,
    SqrtPriceX64, SwapDirection, SwapResult, SwapSpec, SwapStop, Tick, Token, TokenPair,
};

pub use crate::config::PoolConfig;

pub use crate::pool::{Pool, PoolRegistry, PoolStatus, SwapEngine};
pub use crate::position::{Position, PositionKey};

pub use crate::math::{sqrt_price_at_tick, tick_at_sqrt_price};

pub use crate::error::{ClmmError, Result};
