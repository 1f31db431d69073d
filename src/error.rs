//! Unified error types for the CLMM engine.
//!
//! Every fallible operation in the crate returns [`ClmmError`]. Mutating
//! pool and position operations either apply completely or return one of
//! these errors before any field has been touched.
//!
//! A swap that stops at the caller's price limit is *not* an error; it is
//! reported through [`SwapStop::PriceLimitReached`](crate::domain::SwapStop).

use thiserror::Error;

/// Errors produced by the CLMM engine.
///
/// Variants carrying a `&'static str` describe which bound or invariant
/// was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClmmError {
    /// A tick or sqrt price lies outside the supported bounds.
    #[error("out of range: {0}")]
    OutOfRange(&'static str),

    /// Position bounds are malformed (`lower >= upper` or out of bounds).
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),

    /// The operation would drive a liquidity value below zero.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// `initialize` was called on a pool that is already active.
    #[error("pool already initialized")]
    AlreadyInitialized,

    /// The pool has not been initialized with a starting price.
    #[error("pool not initialized")]
    PoolNotInitialized,

    /// A tick index is not a multiple of the pool's tick spacing.
    #[error("tick not initializable: {0}")]
    TickNotInitializable(&'static str),

    /// A computation required non-zero liquidity.
    #[error("no liquidity")]
    NoLiquidity,

    /// A swap could not be filled with the liquidity available.
    #[error("exhausted liquidity")]
    ExhaustedLiquidity,

    /// Arithmetic overflow.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A fee rate is outside its allowed range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A pool configuration parameter is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A token or token pair is invalid.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A token amount is not acceptable for the operation.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// No pool is registered under the requested id.
    #[error("pool not found")]
    PoolNotFound,

    /// A pool with the same id is already registered.
    #[error("pool already exists")]
    PoolAlreadyExists,

    /// No position exists for the requested owner and range.
    #[error("position not found")]
    PositionNotFound,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ClmmError>;
