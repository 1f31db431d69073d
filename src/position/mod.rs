//! Liquidity positions.
//!
//! A [`Position`] is owned by its caller, not by the pool: pool
//! transactions borrow it mutably and update its liquidity and fee
//! snapshots together with the pool state.

mod key;
mod liquidity_position;

pub use key::PositionKey;
pub use liquidity_position::Position;
