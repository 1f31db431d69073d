//! # CLMM Engine
//!
//! Accounting core of a concentrated liquidity market maker: liquidity is
//! supplied over price ranges bounded by ticks, swaps walk the tick table,
//! and trading fees accrue per unit of liquidity to the positions in range.
//!
//! Everything is integer math on Q64.64 square-root prices, with explicit
//! rounding that always favours the pool. Token transfers are the host's
//! responsibility: operations return the amounts owed in each direction.
//!
//! # Quick Start
//!
//! ```rust
//! use clmm_engine::prelude::*;
//!
//! # fn main() -> clmm_engine::error::Result<()> {
//! // 1. Define two tokens and a pool configuration (0.30% fee, spacing 60)
//! let usdc = Token::new(Address::from_bytes([1u8; 32]), Decimals::new(6)?);
//! let wsol = Token::new(Address::from_bytes([2u8; 32]), Decimals::new(9)?);
//! let pair = TokenPair::sorted(usdc, wsol)?;
//! let config = PoolConfig::new(pair, 60, FeeRate::new(3_000)?)?;
//!
//! // 2. Create the pool and set its starting price
//! let mut pool = Pool::new(config)?;
//! pool.initialize(SqrtPriceX64::ONE)?;
//!
//! // 3. Provide liquidity over [-600, 600)
//! let mut position = Position::open(Address::from_bytes([9u8; 32]), -600, 600)?;
//! let deposit = pool.modify_liquidity(&mut position, 10_000_000)?;
//! assert!(deposit.amount_0().get() > 0 && deposit.amount_1().get() > 0);
//!
//! // 4. Swap 10 000 units of token0 for token1
//! let spec = SwapSpec::exact_in(Amount::new(10_000))?;
//! let result = pool.swap(spec, SwapDirection::ZeroForOne, None)?;
//! assert!(result.amount_out().get() > 0);
//! assert!(result.fee() >= Amount::new(30));
//!
//! // 5. The position earned the fee
//! let (fees_0, _) = pool.collect_fees(&mut position)?;
//! assert!(fees_0.get() > 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ PoolRegistry │  per-pool mutex, position books
//! └──────┬───────┘
//!        │ &mut Pool, &mut Position
//!        ▼
//! ┌──────────────┐
//! │     Pool     │  price, liquidity, fee growth, ticks, bitmap
//! └──────┬───────┘
//!        │ &Pool
//!        ▼
//! ┌──────────────┐
//! │  SwapEngine  │  tick walk, returns an outcome for the pool to commit
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  tick / math │  TickInfo, TickBitmap, Q64.64 price and swap math
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Tick`](domain::Tick), [`SqrtPriceX64`](domain::SqrtPriceX64), [`FeeRate`](domain::FeeRate), etc. |
//! | [`math`]   | Wide-integer helpers, tick math, sqrt-price deltas, swap step, fee math |
//! | [`tick`]   | Per-tick state and the initialized-tick bitmap |
//! | [`position`] | Liquidity positions and their keys |
//! | [`config`] | [`PoolConfig`](config::PoolConfig), the validated pool blueprint |
//! | [`pool`]   | [`Pool`](pool::Pool), [`SwapEngine`](pool::SwapEngine), [`PoolRegistry`](pool::PoolRegistry) |
//! | [`error`]  | [`ClmmError`](error::ClmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types |
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` on domain, config, tick, position and pool types |

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod position;
pub mod prelude;
pub mod tick;
