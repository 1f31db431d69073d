//! Pool state machine, swap engine and pool registry.
//!
//! | Type | Role |
//! |------|------|
//! | [`Pool`] | Price, active liquidity, fee accumulators, ticks and bitmap |
//! | [`SwapEngine`] | Read-only tick walk producing a swap outcome |
//! | [`PoolRegistry`] | Thread-safe pools with per-pool position books |

mod registry;
mod state;
mod swap_engine;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use registry::PoolRegistry;
pub use state::{Pool, PoolStatus};
pub use swap_engine::SwapEngine;
