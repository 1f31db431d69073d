//! Position identity.

use core::fmt;

use crate::domain::{Address, Tick};
use crate::error::ClmmError;

/// Identifies a position within a pool: owner and tick range.
///
/// # Invariants
///
/// - `tick_lower < tick_upper`.
/// - Both ticks are within `[MIN_TICK, MAX_TICK]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionKey {
    owner: Address,
    tick_lower: Tick,
    tick_upper: Tick,
}

impl PositionKey {
    /// Creates a key after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::InvalidRange`] if `tick_lower >= tick_upper` or
    /// either tick is out of bounds.
    pub fn new(owner: Address, tick_lower: i32, tick_upper: i32) -> crate::error::Result<Self> {
        if tick_lower >= tick_upper {
            return Err(ClmmError::InvalidRange("lower tick must be below upper tick"));
        }
        let lower = Tick::new(tick_lower)
            .map_err(|_| ClmmError::InvalidRange("lower tick outside tick bounds"))?;
        let upper = Tick::new(tick_upper)
            .map_err(|_| ClmmError::InvalidRange("upper tick outside tick bounds"))?;
        Ok(Self {
            owner,
            tick_lower: lower,
            tick_upper: upper,
        })
    }

    /// Position owner.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Lower boundary tick (inclusive).
    #[must_use]
    pub const fn tick_lower(&self) -> Tick {
        self.tick_lower
    }

    /// Upper boundary tick (exclusive).
    #[must_use]
    pub const fn tick_upper(&self) -> Tick {
        self.tick_upper
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}, {})",
            self.owner,
            self.tick_lower.get(),
            self.tick_upper.get()
        )
    }
}
