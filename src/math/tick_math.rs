//! Bit-exact conversion between ticks and Q64.64 sqrt prices.
//!
//! `sqrt_price(tick) = sqrt(1.0001^tick) * 2^64`.
//!
//! # Functions
//!
//! - [`sqrt_price_at_tick`] multiplies together precomputed Q64 factors
//!   `1 / sqrt(1.0001)^(2^i)`, one for every set bit of `|tick|`, and
//!   inverts the product for positive ticks.
//! - [`tick_at_sqrt_price`] computes `log2` of the price with 16 fractional
//!   bits, rescales it to base `sqrt(1.0001)`, and resolves the remaining
//!   one-tick ambiguity with [`sqrt_price_at_tick`].
//!
//! Both are pure integer functions: identical inputs give identical
//! outputs on every platform.
//!
//! # Examples
//!
//! ```
//! use clmm_engine::math::tick_math::{sqrt_price_at_tick, tick_at_sqrt_price};
//!
//! let sp = sqrt_price_at_tick(-1_000).unwrap_or_else(|_| unreachable!());
//! assert_eq!(tick_at_sqrt_price(sp.get()), Ok(-1_000));
//! assert_eq!(tick_at_sqrt_price(sp.get() - 1), Ok(-1_001));
//! ```

use crate::domain::{SqrtPriceX64, MAX_SQRT_PRICE_X64, MAX_TICK, MIN_SQRT_PRICE_X64, MIN_TICK};
use crate::error::ClmmError;

/// Ratio used when bit 0 of `|tick|` is set: `2^64 / sqrt(1.0001)`.
const BIT_0_RATIO: u128 = 0xfffc_b933_bd6f_b800;

/// `2^64 / sqrt(1.0001)^(2^i)` for `i` in `1..=18`, keyed by the tick bit.
const BIT_RATIOS: [(u32, u128); 18] = [
    (0x2, 0xfff9_7272_373d_4000),
    (0x4, 0xfff2_e50f_5f65_7000),
    (0x8, 0xffe5_caca_7e10_f000),
    (0x10, 0xffcb_9843_d60f_7000),
    (0x20, 0xff97_3b41_fa98_e800),
    (0x40, 0xff2e_a164_66c9_b000),
    (0x80, 0xfe5d_ee04_6a9a_3800),
    (0x100, 0xfcbe_86c7_900b_b000),
    (0x200, 0xf987_a725_3ac6_5800),
    (0x400, 0xf339_2b08_22bb_6000),
    (0x800, 0xe715_9475_a2ca_f000),
    (0x1000, 0xd097_f3bd_fd2f_2000),
    (0x2000, 0xa9f7_4646_2d9f_8000),
    (0x4000, 0x70d8_69a1_56f3_1c00),
    (0x8000, 0x31be_135f_97ed_3200),
    (0x10000, 0x09aa_508b_5b85_a500),
    (0x20000, 0x005d_6af8_dedc_582c),
    (0x40000, 0x0000_2216_e584_f5fa),
];

/// `2 / log2(1.0001)` in Q32.32.
const LOG_SQRT_10001_FACTOR: i128 = 59_543_866_431_248;

/// Error bound subtracted from the scaled log to get the low candidate.
const TICK_LOW_ERROR: i128 = 184_467_440_737_095_516;

/// Error bound added to the scaled log to get the high candidate.
const TICK_HIGH_ERROR: i128 = 15_793_534_762_490_258_745;

/// Fractional bits of `log2` computed by [`tick_at_sqrt_price`].
const LOG2_PRECISION_BITS: u32 = 16;

/// Returns `sqrt(1.0001^tick)` as Q64.64.
///
/// # Errors
///
/// Returns [`ClmmError::OutOfRange`] if `tick` is outside
/// `[MIN_TICK, MAX_TICK]`.
pub fn sqrt_price_at_tick(tick: i32) -> crate::error::Result<SqrtPriceX64> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(ClmmError::OutOfRange("tick outside [MIN_TICK, MAX_TICK]"));
    }
    let abs_tick = tick.unsigned_abs();

    // ratio <= 2^64 and every factor < 2^64, so each product fits in u128.
    let mut ratio = if abs_tick & 0x1 != 0 {
        BIT_0_RATIO
    } else {
        1u128 << 64
    };
    for &(mask, factor) in &BIT_RATIOS {
        if abs_tick & mask != 0 {
            ratio = (ratio * factor) >> 64;
        }
    }

    if tick > 0 {
        ratio = u128::MAX / ratio;
    }
    Ok(SqrtPriceX64::from_bits_unchecked(ratio))
}

/// Returns the greatest tick whose sqrt price is `<= sqrt_price_x64`.
///
/// `MAX_SQRT_PRICE_X64` maps to `MAX_TICK`, so the conversion round-trips
/// over the whole tick range.
///
/// # Errors
///
/// Returns [`ClmmError::OutOfRange`] if the price is outside
/// `[MIN_SQRT_PRICE_X64, MAX_SQRT_PRICE_X64]`.
pub fn tick_at_sqrt_price(sqrt_price_x64: u128) -> crate::error::Result<i32> {
    if !(MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&sqrt_price_x64) {
        return Err(ClmmError::OutOfRange("sqrt price outside supported bounds"));
    }
    if sqrt_price_x64 == MAX_SQRT_PRICE_X64 {
        return Ok(MAX_TICK);
    }

    // Integer part of log2 is the position of the most significant bit.
    let msb = 127 - sqrt_price_x64.leading_zeros();
    let log2_integer_x32 = (i128::from(msb) - 64) << 32;

    // Normalise to r in [1, 2) as Q1.63, then square repeatedly: each time
    // r^2 >= 2 the next fractional bit of log2 is one.
    let mut r = if msb >= 64 {
        sqrt_price_x64 >> (msb - 63)
    } else {
        sqrt_price_x64 << (63 - msb)
    };
    let mut bit: i128 = 0x8000_0000_0000_0000;
    let mut log2_fraction_x64: i128 = 0;
    for _ in 0..LOG2_PRECISION_BITS {
        r *= r;
        let r_at_least_two = (r >> 127) as u32;
        r >>= 63 + r_at_least_two;
        log2_fraction_x64 += bit * i128::from(r_at_least_two);
        bit >>= 1;
    }

    let log2_x32 = log2_integer_x32 + (log2_fraction_x64 >> 32);
    let log_sqrt_10001_x64 = log2_x32 * LOG_SQRT_10001_FACTOR;

    let tick_low = ((log_sqrt_10001_x64 - TICK_LOW_ERROR) >> 64) as i32;
    let tick_high = ((log_sqrt_10001_x64 + TICK_HIGH_ERROR) >> 64) as i32;

    if tick_low == tick_high {
        return Ok(tick_low);
    }
    match sqrt_price_at_tick(tick_high) {
        Ok(high_price) if high_price.get() <= sqrt_price_x64 => Ok(tick_high),
        _ => Ok(tick_low),
    }
}
