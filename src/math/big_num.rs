//! Wide unsigned integers for fixed-point intermediates.
//!
//! Q64.64 products such as `L << 64` times a sqrt-price difference need up
//! to 289 bits before the final division. [`mul_div_u256`] multiplies in
//! 512 bits, divides with an explicit [`Rounding`], and reports an error
//! instead of truncating when the quotient does not fit.

#![allow(clippy::assign_op_pattern, clippy::ptr_offset_with_cast, clippy::manual_range_contains)]

use crate::domain::Rounding;
use crate::error::ClmmError;

#[allow(missing_docs)]
mod wide {
    use uint::construct_uint;

    construct_uint! {
        /// 256-bit unsigned integer.
        pub struct U256(4);
    }

    construct_uint! {
        /// 512-bit unsigned integer, only used for intermediate products.
        pub struct U512(8);
    }
}

pub use wide::{U256, U512};

/// Lifts a `u128` into a [`U256`].
#[must_use]
pub const fn u256(value: u128) -> U256 {
    U256([value as u64, (value >> 64) as u64, 0, 0])
}

/// Narrows a [`U256`] to `u128`, or `None` if any high bit is set.
#[must_use]
pub const fn to_u128(value: U256) -> Option<u128> {
    let [l0, l1, l2, l3] = value.0;
    if l2 != 0 || l3 != 0 {
        return None;
    }
    Some(((l1 as u128) << 64) | l0 as u128)
}

fn widen(value: U256) -> U512 {
    let mut limbs = [0u64; 8];
    for (dst, src) in limbs.iter_mut().zip(value.0) {
        *dst = src;
    }
    U512(limbs)
}

fn narrow(value: U512) -> Option<U256> {
    let [l0, l1, l2, l3, h0, h1, h2, h3] = value.0;
    if h0 | h1 | h2 | h3 != 0 {
        return None;
    }
    Some(U256([l0, l1, l2, l3]))
}

/// Computes `a * b / denominator` without intermediate overflow.
///
/// # Errors
///
/// - [`ClmmError::DivisionByZero`] if `denominator` is zero.
/// - [`ClmmError::Overflow`] if the quotient exceeds 256 bits.
pub fn mul_div_u256(
    a: U256,
    b: U256,
    denominator: U256,
    rounding: Rounding,
) -> crate::error::Result<U256> {
    if denominator.is_zero() {
        return Err(ClmmError::DivisionByZero);
    }
    let product = widen(a) * widen(b);
    let denominator = widen(denominator);
    let mut quotient = product / denominator;
    if rounding.is_up() && !(product % denominator).is_zero() {
        quotient = quotient + U512::one();
    }
    narrow(quotient).ok_or(ClmmError::Overflow("mul_div result exceeds 256 bits"))
}

/// Computes `a * b / denominator` for `u128` operands.
///
/// # Errors
///
/// - [`ClmmError::DivisionByZero`] if `denominator` is zero.
/// - [`ClmmError::Overflow`] if the quotient exceeds `u128::MAX`.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Rounding;
/// use clmm_engine::math::big_num::mul_div;
///
/// assert_eq!(mul_div(u128::MAX, 3, 6, Rounding::Down), Ok(u128::MAX / 2));
/// assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
/// ```
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> crate::error::Result<u128> {
    let wide = mul_div_u256(u256(a), u256(b), u256(denominator), rounding)?;
    to_u128(wide).ok_or(ClmmError::Overflow("mul_div result exceeds u128"))
}

/// Divides `numerator` by `denominator` with explicit rounding.
///
/// # Errors
///
/// Returns [`ClmmError::DivisionByZero`] if `denominator` is zero.
pub fn div_rounding(numerator: U256, denominator: U256, rounding: Rounding) -> crate::error::Result<U256> {
    if denominator.is_zero() {
        return Err(ClmmError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    if rounding.is_up() && !(numerator % denominator).is_zero() {
        // quotient < numerator whenever there is a remainder, so +1 fits.
        Ok(quotient + U256::one())
    } else {
        Ok(quotient)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn u128_conversions() {
        assert_eq!(to_u128(u256(u128::MAX)), Some(u128::MAX));
        assert_eq!(to_u128(u256(0)), Some(0));
        assert_eq!(to_u128(u256(1) << 128), None);
    }

    #[test]
    fn mul_div_exact() {
        assert_eq!(mul_div(6, 7, 3, Rounding::Down), Ok(14));
        assert_eq!(mul_div(6, 7, 3, Rounding::Up), Ok(14));
    }

    #[test]
    fn mul_div_rounding() {
        assert_eq!(mul_div(10, 1, 3, Rounding::Down), Ok(3));
        assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
    }

    #[test]
    fn mul_div_wide_intermediate() {
        assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX, Rounding::Down), Ok(u128::MAX));
        assert_eq!(mul_div(1u128 << 100, 1u128 << 100, 1u128 << 90, Rounding::Down), Ok(1u128 << 110));
    }

    #[test]
    fn mul_div_errors() {
        assert_eq!(mul_div(1, 1, 0, Rounding::Down), Err(ClmmError::DivisionByZero));
        assert!(matches!(
            mul_div(u128::MAX, 2, 1, Rounding::Down),
            Err(ClmmError::Overflow(_))
        ));
    }

    #[test]
    fn mul_div_u256_beyond_256_bit_product() {
        // (2^192) * (2^96) / 2^100 = 2^188: the product needs 289 bits.
        let a = u256(1) << 192;
        let b = u256(1) << 96;
        let d = u256(1) << 100;
        let Ok(q) = mul_div_u256(a, b, d, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(q, u256(1) << 188);
    }

    #[test]
    fn mul_div_u256_quotient_overflow() {
        let max = U256::MAX;
        assert!(mul_div_u256(max, u256(2), u256(1), Rounding::Down).is_err());
    }

    #[test]
    fn div_rounding_directions() {
        assert_eq!(div_rounding(u256(7), u256(2), Rounding::Down), Ok(u256(3)));
        assert_eq!(div_rounding(u256(7), u256(2), Rounding::Up), Ok(u256(4)));
        assert_eq!(div_rounding(u256(8), u256(2), Rounding::Up), Ok(u256(4)));
        assert_eq!(div_rounding(u256(1), u256(0), Rounding::Up), Err(ClmmError::DivisionByZero));
    }
}
