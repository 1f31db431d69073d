//! Token identity.

use core::fmt;

use super::{Address, Decimals};

/// A token mint together with its decimal places.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::{Address, Decimals, Token};
///
/// let usdc = Token::new(Address::from_bytes([1u8; 32]), Decimals::new(6).unwrap_or_default());
/// assert_eq!(usdc.to_raw_amount(5), 5_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    mint: Address,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub const fn new(mint: Address, decimals: Decimals) -> Self {
        Self { mint, decimals }
    }

    /// Returns the mint address.
    #[must_use]
    pub const fn mint(&self) -> Address {
        self.mint
    }

    /// Returns the decimal places.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Converts whole tokens into raw units.
    #[must_use]
    pub const fn to_raw_amount(&self, whole: u64) -> u128 {
        self.decimals.to_raw(whole)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}dp", self.mint, self.decimals.get())
    }
}
