//! Fee growth accounting.
//!
//! Fees are tracked as cumulative growth per unit of liquidity in Q64.64.
//! Growth counters are allowed to wrap; only differences between two
//! readings are meaningful, and those are taken with wrapping subtraction.

use crate::domain::{FeeRate, Rounding, Q64};
use crate::error::ClmmError;
use crate::math::big_num::mul_div;

/// Split of a step fee between the protocol, the fund and the LPs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeSplit {
    /// Protocol share.
    pub protocol: u128,
    /// Fund share.
    pub fund: u128,
    /// Remainder credited to in-range liquidity.
    pub lp: u128,
}

/// Splits `fee` using rates expressed per million of the fee.
///
/// Protocol and fund shares round down, so rounding dust goes to LPs.
///
/// # Errors
///
/// Returns [`ClmmError::Underflow`] if the two rates sum above 100%.
pub fn split_fee(
    fee: u128,
    protocol_fee_rate: FeeRate,
    fund_fee_rate: FeeRate,
) -> crate::error::Result<FeeSplit> {
    let protocol = protocol_fee_rate.portion_of(fee, Rounding::Down)?;
    let fund = fund_fee_rate.portion_of(fee, Rounding::Down)?;
    let lp = fee
        .checked_sub(protocol)
        .and_then(|rest| rest.checked_sub(fund))
        .ok_or(ClmmError::Underflow("protocol and fund shares exceed fee"))?;
    Ok(FeeSplit { protocol, fund, lp })
}

/// Growth per unit of liquidity for `fee` spread over `liquidity`.
///
/// # Errors
///
/// - [`ClmmError::NoLiquidity`] if `liquidity` is zero.
/// - [`ClmmError::Overflow`] if the growth does not fit `u128`.
pub fn fee_growth_delta(fee: u128, liquidity: u128) -> crate::error::Result<u128> {
    if liquidity == 0 {
        return Err(ClmmError::NoLiquidity);
    }
    mul_div(fee, Q64, liquidity, Rounding::Down)
}

/// Fees earned by `liquidity` while growth moved from `last` to `now`.
///
/// # Errors
///
/// Returns [`ClmmError::Overflow`] if the amount does not fit `u128`.
pub fn fees_owed(now_x64: u128, last_x64: u128, liquidity: u128) -> crate::error::Result<u128> {
    mul_div(now_x64.wrapping_sub(last_x64), liquidity, Q64, Rounding::Down)
}
