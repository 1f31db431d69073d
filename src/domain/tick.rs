//! Discrete price point for concentrated liquidity.

use core::fmt;

use crate::error::ClmmError;

/// Minimum valid tick index.
pub const MIN_TICK: i32 = -443_636;

/// Maximum valid tick index.
pub const MAX_TICK: i32 = 443_636;

/// A discrete price point: `price = 1.0001^tick`.
///
/// The bounds `[-443636, 443636]` are the largest range whose sqrt price
/// fits a Q64.64 value. Use [`tick_math`](crate::math::tick_math) to
/// convert to and from [`SqrtPriceX64`](super::SqrtPriceX64).
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Tick;
///
/// let tick = Tick::new(-120).unwrap_or(Tick::ZERO);
/// assert!(tick.is_aligned(60));
/// assert_eq!(tick.compress(60), -2);
/// assert!(Tick::new(500_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(i32);

impl Tick {
    /// Minimum valid tick (`-443636`).
    pub const MIN: Self = Self(MIN_TICK);

    /// Maximum valid tick (`443636`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Tick where `price = 1.0`.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Tick` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`ClmmError::OutOfRange`] if `value` is outside
    /// `[MIN_TICK, MAX_TICK]`.
    pub const fn new(value: i32) -> crate::error::Result<Self> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(ClmmError::OutOfRange("tick outside [-443636, 443636]"));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `i32` tick index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Checked addition of a delta. `None` if the result leaves the range.
    #[must_use]
    pub const fn checked_add(&self, delta: i32) -> Option<Self> {
        match self.0.checked_add(delta) {
            Some(v) if v >= MIN_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }

    /// Checked subtraction of a delta. `None` if the result leaves the range.
    #[must_use]
    pub const fn checked_sub(&self, delta: i32) -> Option<Self> {
        match self.0.checked_sub(delta) {
            Some(v) if v >= MIN_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }

    /// Returns `true` if this tick is a multiple of `spacing`.
    ///
    /// A zero spacing aligns nothing.
    #[must_use]
    pub const fn is_aligned(&self, spacing: u16) -> bool {
        spacing != 0 && self.0 % (spacing as i32) == 0
    }

    /// Index of this tick in units of `spacing`, rounded toward negative
    /// infinity (`-1 / 60 == -1`).
    ///
    /// A zero spacing is treated as one.
    #[must_use]
    pub const fn compress(&self, spacing: u16) -> i32 {
        let spacing = if spacing == 0 { 1 } else { spacing as i32 };
        self.0.div_euclid(spacing)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}

impl TryFrom<i32> for Tick {
    type Error = ClmmError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
