//! Ordered pair of pool tokens.

use super::Token;
use crate::error::ClmmError;

/// The two tokens of a pool, with `token_0.mint() < token_1.mint()`.
///
/// The price of a pool is always quoted as token1 per token0, so the
/// ordering is part of the pool's identity.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::{Address, Decimals, Token, TokenPair};
///
/// let a = Token::new(Address::from_bytes([1u8; 32]), Decimals::new(6).unwrap_or_default());
/// let b = Token::new(Address::from_bytes([2u8; 32]), Decimals::new(9).unwrap_or_default());
///
/// assert!(TokenPair::new(b, a).is_err());
/// let pair = TokenPair::sorted(b, a).unwrap_or_else(|_| unreachable!());
/// assert_eq!(pair.token_0(), a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenPair {
    token_0: Token,
    token_1: Token,
}

impl TokenPair {
    /// Creates a pair from tokens already in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidToken`] unless
    /// `token_0.mint() < token_1.mint()`.
    pub fn new(token_0: Token, token_1: Token) -> crate::error::Result<Self> {
        if token_0.mint() == token_1.mint() {
            return Err(ClmmError::InvalidToken(
                "token pair requires two distinct mints",
            ));
        }
        if token_0.mint() > token_1.mint() {
            return Err(ClmmError::InvalidToken("token_0 mint must sort before token_1"));
        }
        Ok(Self { token_0, token_1 })
    }

    /// Creates a pair, sorting the tokens by mint.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidToken`] if both mints are equal.
    pub fn sorted(a: Token, b: Token) -> crate::error::Result<Self> {
        if a.mint() <= b.mint() {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    /// Base token (lower mint).
    #[must_use]
    pub const fn token_0(&self) -> Token {
        self.token_0
    }

    /// Quote token (higher mint).
    #[must_use]
    pub const fn token_1(&self) -> Token {
        self.token_1
    }

    /// Returns `true` if `token` is one of the pair.
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.token_0 == *token || self.token_1 == *token
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Address, Decimals};

    fn tok(byte: u8, dec: u8) -> Token {
        let Ok(d) = Decimals::new(dec) else {
            panic!("invalid decimals in test: {dec}");
        };
        Token::new(Address::from_bytes([byte; 32]), d)
    }

    #[test]
    fn ordered_input_accepted() {
        let Ok(pair) = TokenPair::new(tok(1, 6), tok(2, 9)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.token_0(), tok(1, 6));
        assert_eq!(pair.token_1(), tok(2, 9));
    }

    #[test]
    fn reversed_input_rejected() {
        assert_eq!(
            TokenPair::new(tok(2, 9), tok(1, 6)),
            Err(ClmmError::InvalidToken("token_0 mint must sort before token_1"))
        );
    }

    #[test]
    fn sorted_reorders() {
        let (Ok(p1), Ok(p2)) = (
            TokenPair::sorted(tok(2, 9), tok(1, 6)),
            TokenPair::sorted(tok(1, 6), tok(2, 9)),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn same_mint_rejected() {
        assert!(TokenPair::new(tok(1, 6), tok(1, 9)).is_err());
        assert!(TokenPair::sorted(tok(1, 6), tok(1, 9)).is_err());
    }

    #[test]
    fn contains() {
        let Ok(pair) = TokenPair::new(tok(1, 6), tok(2, 9)) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(&tok(1, 6)));
        assert!(!pair.contains(&tok(3, 6)));
    }
}
