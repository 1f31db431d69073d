//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint of a pool: token pair, tick
//! spacing and fee rates. It is validated on construction and immutable
//! once a pool has been created from it.

mod pool_config;

pub use pool_config::{PoolConfig, MAX_TICK_SPACING};
