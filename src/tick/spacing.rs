//! Helpers derived from a pool's tick spacing.

use crate::domain::{MAX_TICK, MIN_TICK};

/// Initializable ticks grouped into one tick array.
pub const TICK_ARRAY_SIZE: i32 = 60;

/// Number of ticks (uncompressed) covered by one tick array.
#[must_use]
pub const fn ticks_per_array(tick_spacing: u16) -> i32 {
    TICK_ARRAY_SIZE * tick_spacing as i32
}

/// Start index of the tick array containing `tick`, rounding toward
/// negative infinity.
///
/// # Examples
///
/// ```
/// use clmm_engine::tick::tick_array_start_index;
///
/// assert_eq!(tick_array_start_index(0, 10), 0);
/// assert_eq!(tick_array_start_index(599, 10), 0);
/// assert_eq!(tick_array_start_index(-1, 10), -600);
/// ```
#[must_use]
pub const fn tick_array_start_index(tick: i32, tick_spacing: u16) -> i32 {
    let span = ticks_per_array(if tick_spacing == 0 { 1 } else { tick_spacing });
    tick.div_euclid(span) * span
}

/// Returns `true` if `start` is the start index of a tick array that
/// overlaps the tick bounds.
#[must_use]
pub const fn is_valid_tick_array_start_index(start: i32, tick_spacing: u16) -> bool {
    if start > MAX_TICK {
        return false;
    }
    if start < MIN_TICK {
        return start == tick_array_start_index(MIN_TICK, tick_spacing);
    }
    start == tick_array_start_index(start, tick_spacing)
}

/// Largest `liquidity_gross` a single tick may hold, so that active
/// liquidity can never overflow even if every usable tick is at the cap.
///
/// # Examples
///
/// ```
/// use clmm_engine::tick::max_liquidity_per_tick;
///
/// assert!(max_liquidity_per_tick(60) > max_liquidity_per_tick(1));
/// ```
#[must_use]
pub const fn max_liquidity_per_tick(tick_spacing: u16) -> u128 {
    let spacing = if tick_spacing == 0 { 1 } else { tick_spacing as i32 };
    let min_tick = MIN_TICK / spacing * spacing;
    let max_tick = MAX_TICK / spacing * spacing;
    let num_ticks = ((max_tick - min_tick) / spacing + 1) as u128;
    u128::MAX / num_ticks
}
