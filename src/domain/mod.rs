//! Domain value types used throughout the engine.
//!
//! Newtypes with validated constructors: ticks, Q64.64 sqrt prices,
//! liquidity, raw token amounts, fee rates, token identities, and the
//! request / result records of swaps and liquidity changes.

mod address;
mod amount;
mod decimals;
mod fee_rate;
mod liquidity;
mod liquidity_change;
mod pool_id;
mod rounding;
mod sqrt_price;
mod swap_direction;
mod swap_result;
mod swap_spec;
mod tick;
mod token;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub use decimals::Decimals;
pub use fee_rate::{FeeRate, FEE_RATE_DENOMINATOR};
pub use liquidity::Liquidity;
pub use liquidity_change::LiquidityChange;
pub use pool_id::PoolId;
pub use rounding::Rounding;
pub use sqrt_price::{SqrtPriceX64, MAX_SQRT_PRICE_X64, MIN_SQRT_PRICE_X64, Q64};
pub use swap_direction::SwapDirection;
pub use swap_result::{SwapResult, SwapStop};
pub use swap_spec::SwapSpec;
pub use tick::{Tick, MAX_TICK, MIN_TICK};
pub use token::Token;
pub use token_pair::TokenPair;
