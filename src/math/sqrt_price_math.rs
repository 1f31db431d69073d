//! Token amounts between two sqrt prices, and the price reached by
//! adding or removing an amount.
//!
//! Within a range of constant liquidity `L`:
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | token0 | `L * (√Pb - √Pa) / (√Pa * √Pb)` |
//! | token1 | `L * (√Pb - √Pa)` |
//!
//! All prices are raw Q64.64 bits. Rounding is explicit: amounts paid to
//! the pool round up, amounts paid out round down, and the next-price
//! functions round so the pool never gives away more than it receives.

use crate::domain::{Rounding, Q64};
use crate::error::ClmmError;
use crate::math::big_num::{div_rounding, mul_div, mul_div_u256, to_u128, u256};

fn ordered(sqrt_a: u128, sqrt_b: u128) -> (u128, u128) {
    if sqrt_a > sqrt_b {
        (sqrt_b, sqrt_a)
    } else {
        (sqrt_a, sqrt_b)
    }
}

/// Token0 amount for `liquidity` between two sqrt prices (any order).
///
/// # Errors
///
/// - [`ClmmError::DivisionByZero`] if either price is zero.
/// - [`ClmmError::Overflow`] if the amount exceeds `u128`.
pub fn amount_0_delta(
    sqrt_a: u128,
    sqrt_b: u128,
    liquidity: u128,
    rounding: Rounding,
) -> crate::error::Result<u128> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b);
    if lower == 0 {
        return Err(ClmmError::DivisionByZero);
    }
    let numerator_1 = u256(liquidity) << 64;
    let numerator_2 = u256(upper - lower);
    let scaled = mul_div_u256(numerator_1, numerator_2, u256(upper), rounding)?;
    let amount = div_rounding(scaled, u256(lower), rounding)?;
    to_u128(amount).ok_or(ClmmError::Overflow("token0 amount exceeds u128"))
}

/// Token1 amount for `liquidity` between two sqrt prices (any order).
///
/// # Errors
///
/// Returns [`ClmmError::Overflow`] if the amount exceeds `u128`.
pub fn amount_1_delta(
    sqrt_a: u128,
    sqrt_b: u128,
    liquidity: u128,
    rounding: Rounding,
) -> crate::error::Result<u128> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b);
    mul_div(liquidity, upper - lower, Q64, rounding)
}

/// Price after adding (`add`) or removing token0, rounded up.
///
/// Adding token0 lowers the price: `√P' = L√P / (L + amount√P)`.
///
/// # Errors
///
/// - [`ClmmError::InsufficientLiquidity`] if removing more token0 than the
///   range holds.
/// - [`ClmmError::Overflow`] if the result exceeds `u128`.
pub fn next_sqrt_price_from_amount_0(
    sqrt_price: u128,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> crate::error::Result<u128> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let numerator_1 = u256(liquidity) << 64;
    let product = u256(amount) * u256(sqrt_price);

    let next = if add {
        match numerator_1.checked_add(product) {
            Some(denominator) => {
                mul_div_u256(numerator_1, u256(sqrt_price), denominator, Rounding::Up)?
            }
            // L / (L / √P + amount) form; cannot overflow.
            None => {
                let denominator = numerator_1 / u256(sqrt_price) + u256(amount);
                div_rounding(numerator_1, denominator, Rounding::Up)?
            }
        }
    } else {
        if product >= numerator_1 {
            return Err(ClmmError::InsufficientLiquidity);
        }
        mul_div_u256(
            numerator_1,
            u256(sqrt_price),
            numerator_1 - product,
            Rounding::Up,
        )?
    };
    to_u128(next).ok_or(ClmmError::Overflow("sqrt price exceeds u128"))
}

/// Price after adding (`add`) or removing token1, rounded down.
///
/// Adding token1 raises the price: `√P' = √P + amount / L`.
///
/// # Errors
///
/// - [`ClmmError::NoLiquidity`] if `liquidity` is zero.
/// - [`ClmmError::InsufficientLiquidity`] if removing more token1 than
///   the range holds.
/// - [`ClmmError::Overflow`] if the result exceeds `u128`.
pub fn next_sqrt_price_from_amount_1(
    sqrt_price: u128,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> crate::error::Result<u128> {
    if liquidity == 0 {
        return Err(ClmmError::NoLiquidity);
    }
    let shifted = u256(amount) << 64;
    if add {
        let quotient = shifted / u256(liquidity);
        let next = u256(sqrt_price)
            .checked_add(quotient)
            .ok_or(ClmmError::Overflow("sqrt price exceeds u256"))?;
        to_u128(next).ok_or(ClmmError::Overflow("sqrt price exceeds u128"))
    } else {
        let quotient = div_rounding(shifted, u256(liquidity), Rounding::Up)?;
        if quotient >= u256(sqrt_price) {
            return Err(ClmmError::InsufficientLiquidity);
        }
        to_u128(u256(sqrt_price) - quotient)
            .ok_or(ClmmError::Overflow("sqrt price exceeds u128"))
    }
}

/// Price after the pool receives `amount_in` of the input token.
///
/// # Errors
///
/// - [`ClmmError::NoLiquidity`] if `liquidity` is zero.
/// - Propagates errors of the per-token functions.
pub fn next_sqrt_price_from_input(
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> crate::error::Result<u128> {
    if liquidity == 0 {
        return Err(ClmmError::NoLiquidity);
    }
    if zero_for_one {
        next_sqrt_price_from_amount_0(sqrt_price, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount_1(sqrt_price, liquidity, amount_in, true)
    }
}

/// Price after the pool pays out `amount_out` of the output token.
///
/// # Errors
///
/// - [`ClmmError::NoLiquidity`] if `liquidity` is zero.
/// - Propagates errors of the per-token functions.
pub fn next_sqrt_price_from_output(
    sqrt_price: u128,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> crate::error::Result<u128> {
    if liquidity == 0 {
        return Err(ClmmError::NoLiquidity);
    }
    if zero_for_one {
        next_sqrt_price_from_amount_1(sqrt_price, liquidity, amount_out, false)
    } else {
        next_sqrt_price_from_amount_0(sqrt_price, liquidity, amount_out, false)
    }
}
