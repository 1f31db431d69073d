//! Pool identity.

use core::fmt;

use super::{Address, TokenPair};

/// Identifies a pool by the seeds its account address is derived from:
/// the fee configuration index and the two ordered token mints.
///
/// Two pools for the same pair may coexist under different configuration
/// indices (for example different fee tiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolId {
    config_index: u16,
    mint_0: Address,
    mint_1: Address,
}

impl PoolId {
    /// Derives the id of the pool for `pair` under configuration `config_index`.
    #[must_use]
    pub const fn derive(config_index: u16, pair: &TokenPair) -> Self {
        Self {
            config_index,
            mint_0: pair.token_0().mint(),
            mint_1: pair.token_1().mint(),
        }
    }

    /// Configuration index.
    #[must_use]
    pub const fn config_index(&self) -> u16 {
        self.config_index
    }

    /// Token0 mint.
    #[must_use]
    pub const fn mint_0(&self) -> Address {
        self.mint_0
    }

    /// Token1 mint.
    #[must_use]
    pub const fn mint_1(&self) -> Address {
        self.mint_1
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool[{}]({}/{})", self.config_index, self.mint_0, self.mint_1)
    }
}
