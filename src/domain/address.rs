//! 32-byte account identity.

use core::fmt;

/// A 32-byte account key, used for token mints and position owners.
///
/// Ordering is lexicographic over the bytes; token pairs rely on it to
/// sort their mints.
///
/// # Examples
///
/// ```
/// use clmm_engine::domain::Address;
///
/// let a = Address::from_bytes([1u8; 32]);
/// let b = Address::from_bytes([2u8; 32]);
/// assert!(a < b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// Short hex form: first and last four bytes.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, rest) = self.0.split_at(4);
        let tail = rest.get(rest.len().saturating_sub(4)..).unwrap_or_default();
        for b in head {
            write!(f, "{b:02x}")?;
        }
        f.write_str("..")?;
        for b in tail {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn bytes_round_trip() {
        let addr = Address::from_bytes([42u8; 32]);
        assert_eq!(addr.as_bytes(), &[42u8; 32]);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut lo = [0u8; 32];
        let mut hi = [0u8; 32];
        lo[31] = 9;
        hi[0] = 1;
        assert!(Address::from_bytes(lo) < Address::from_bytes(hi));
    }

    #[test]
    fn display_is_abbreviated() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let addr = Address::from_bytes(bytes);
        assert_eq!(addr.to_string(), "ab000000..00000001");
        assert_eq!(format!("{addr:?}"), "Address(ab000000..00000001)");
    }
}
