//! Tick-level state: per-tick liquidity and fee growth, and the bitmap
//! that indexes initialized ticks.

mod spacing;
mod tick_bitmap;
mod tick_info;

pub use spacing::{
    is_valid_tick_array_start_index, max_liquidity_per_tick, tick_array_start_index,
    ticks_per_array, TICK_ARRAY_SIZE,
};
pub use tick_bitmap::{NextTick, TickBitmap};
pub use tick_info::{fee_growth_inside, TickInfo};
