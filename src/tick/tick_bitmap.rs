//! Sparse bitmap of initialized ticks.
//!
//! Ticks are compressed by the pool's tick spacing (`tick / spacing`,
//! rounded toward negative infinity) and packed 128 per `u128` word. Only
//! non-empty words are stored, so two bitmaps holding the same set of
//! ticks compare equal regardless of the order they were flipped in.

use std::collections::BTreeMap;

use crate::domain::{MAX_TICK, MIN_TICK};
use crate::error::ClmmError;

/// Ticks per bitmap word.
const WORD_BITS: i32 = 128;

/// Result of a word-bounded search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextTick {
    /// The initialized tick found, or the word boundary (clamped to the
    /// tick bounds) if none was.
    pub tick: i32,
    /// Whether `tick` is initialized.
    pub initialized: bool,
}

/// Set of initialized ticks for one pool.
///
/// # Examples
///
/// ```
/// use clmm_engine::tick::TickBitmap;
///
/// let mut bitmap = TickBitmap::new();
/// bitmap.flip(-60, 60).unwrap_or_else(|_| unreachable!());
/// bitmap.flip(120, 60).unwrap_or_else(|_| unreachable!());
///
/// let next = bitmap.next_initialized_tick_within_one_word(0, 60, false);
/// assert_eq!((next.tick, next.initialized), (120, true));
/// assert_eq!(bitmap.next_initialized_tick(0, 60, true), Some(-60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickBitmap {
    words: BTreeMap<i32, u128>,
}

/// Word index and bit position of a compressed tick.
const fn position(compressed: i32) -> (i32, u32) {
    (
        compressed.div_euclid(WORD_BITS),
        compressed.rem_euclid(WORD_BITS) as u32,
    )
}

fn most_significant_bit(word: u128) -> i32 {
    127 - word.leading_zeros() as i32
}

fn clamp_tick(tick: i32) -> i32 {
    tick.clamp(MIN_TICK, MAX_TICK)
}

impl TickBitmap {
    /// Creates an empty bitmap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the initialized state of `tick`.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::InvalidConfiguration`] if `tick_spacing` is zero.
    /// - [`ClmmError::TickNotInitializable`] if `tick` is out of bounds or
    ///   not a multiple of `tick_spacing`.
    pub fn flip(&mut self, tick: i32, tick_spacing: u16) -> crate::error::Result<()> {
        let spacing = checked_spacing(tick_spacing)?;
        if !(MIN_TICK..=MAX_TICK).contains(&tick) {
            return Err(ClmmError::TickNotInitializable("tick outside tick bounds"));
        }
        if tick % spacing != 0 {
            return Err(ClmmError::TickNotInitializable(
                "tick not a multiple of tick spacing",
            ));
        }
        let (word, bit) = position(tick / spacing);
        let entry = self.words.entry(word).or_insert(0);
        *entry ^= 1u128 << bit;
        if *entry == 0 {
            self.words.remove(&word);
        }
        Ok(())
    }

    /// Returns `true` if `tick` is initialized.
    #[must_use]
    pub fn is_initialized(&self, tick: i32, tick_spacing: u16) -> bool {
        let spacing = i32::from(tick_spacing);
        if spacing == 0 || tick % spacing != 0 {
            return false;
        }
        let (word, bit) = position(tick / spacing);
        self.words
            .get(&word)
            .is_some_and(|bits| bits & (1u128 << bit) != 0)
    }

    /// Finds the next initialized tick in the same word as `tick`.
    ///
    /// With `lte` the search covers `tick` itself and everything below it
    /// in the word; otherwise it covers the ticks strictly above `tick`.
    /// When nothing is initialized the word boundary in the search
    /// direction is returned with `initialized = false`. Results are
    /// clamped to `[MIN_TICK, MAX_TICK]`.
    #[must_use]
    pub fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        tick_spacing: u16,
        lte: bool,
    ) -> NextTick {
        let spacing = i32::from(tick_spacing.max(1));
        let compressed = tick.div_euclid(spacing);

        if lte {
            let (word, bit) = position(compressed);
            let at_or_below = u128::MAX >> (127 - bit);
            let masked = self.word(word) & at_or_below;
            if masked != 0 {
                let found = compressed - (bit as i32 - most_significant_bit(masked));
                NextTick {
                    tick: clamp_tick(found * spacing),
                    initialized: true,
                }
            } else {
                NextTick {
                    tick: clamp_tick((compressed - bit as i32) * spacing),
                    initialized: false,
                }
            }
        } else {
            let start = compressed + 1;
            let (word, bit) = position(start);
            let at_or_above = u128::MAX << bit;
            let masked = self.word(word) & at_or_above;
            if masked != 0 {
                let found = start + (masked.trailing_zeros() as i32 - bit as i32);
                NextTick {
                    tick: clamp_tick(found * spacing),
                    initialized: true,
                }
            } else {
                NextTick {
                    tick: clamp_tick((start + (WORD_BITS - 1 - bit as i32)) * spacing),
                    initialized: false,
                }
            }
        }
    }

    /// Finds the next initialized tick in the search direction across all
    /// words, or `None` if there is none.
    ///
    /// `lte` has the same meaning as in
    /// [`next_initialized_tick_within_one_word`](Self::next_initialized_tick_within_one_word).
    #[must_use]
    pub fn next_initialized_tick(&self, tick: i32, tick_spacing: u16, lte: bool) -> Option<i32> {
        let spacing = i32::from(tick_spacing.max(1));
        let compressed = tick.div_euclid(spacing);

        if lte {
            let (word, bit) = position(compressed);
            let masked = self.word(word) & (u128::MAX >> (127 - bit));
            if masked != 0 {
                return Some((word * WORD_BITS + most_significant_bit(masked)) * spacing);
            }
            self.words
                .range(..word)
                .next_back()
                .map(|(w, bits)| (w * WORD_BITS + most_significant_bit(*bits)) * spacing)
        } else {
            let (word, bit) = position(compressed + 1);
            let masked = self.word(word) & (u128::MAX << bit);
            if masked != 0 {
                return Some((word * WORD_BITS + masked.trailing_zeros() as i32) * spacing);
            }
            self.words
                .range(word + 1..)
                .next()
                .map(|(w, bits)| (w * WORD_BITS + bits.trailing_zeros() as i32) * spacing)
        }
    }

    /// Number of initialized ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.values().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no tick is initialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All initialized ticks in ascending order.
    pub fn iter(&self, tick_spacing: u16) -> impl Iterator<Item = i32> + '_ {
        let spacing = i32::from(tick_spacing.max(1));
        self.words.iter().flat_map(move |(&word, &bits)| {
            (0..WORD_BITS)
                .filter(move |bit| bits & (1u128 << bit) != 0)
                .map(move |bit| (word * WORD_BITS + bit) * spacing)
        })
    }

    fn word(&self, word: i32) -> u128 {
        self.words.get(&word).copied().unwrap_or(0)
    }
}

fn checked_spacing(tick_spacing: u16) -> crate::error::Result<i32> {
    if tick_spacing == 0 {
        return Err(ClmmError::InvalidConfiguration("tick spacing must be positive"));
    }
    Ok(i32::from(tick_spacing))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn bitmap(ticks: &[i32], spacing: u16) -> TickBitmap {
        let mut b = TickBitmap::new();
        for &t in ticks {
            let Ok(()) = b.flip(t, spacing) else {
                panic!("flip {t}");
            };
        }
        b
    }

    // -- flip ---------------------------------------------------------------

    #[test]
    fn flip_sets_and_clears() {
        let mut b = bitmap(&[-230], 1);
        assert!(b.is_initialized(-230, 1));
        assert!(!b.is_initialized(-229, 1));
        assert_eq!(b.len(), 1);
        let Ok(()) = b.flip(-230, 1) else {
            panic!("flip");
        };
        assert!(!b.is_initialized(-230, 1));
        assert!(b.is_empty());
    }

    #[test]
    fn double_flip_is_identity() {
        let original = bitmap(&[-1_000, 0, 70], 10);
        let mut b = original.clone();
        for _ in 0..2 {
            let Ok(()) = b.flip(450, 10) else {
                panic!("flip");
            };
        }
        assert_eq!(b, original);
    }

    #[test]
    fn order_independent() {
        assert_eq!(
            bitmap(&[-600, 60, 6_000, -60], 60),
            bitmap(&[6_000, -60, -600, 60], 60)
        );
    }

    #[test]
    fn misaligned_tick_rejected() {
        let mut b = TickBitmap::new();
        assert!(matches!(b.flip(15, 10), Err(ClmmError::TickNotInitializable(_))));
        assert!(matches!(b.flip(-15, 10), Err(ClmmError::TickNotInitializable(_))));
        assert!(b.is_empty());
    }

    #[test]
    fn out_of_bounds_and_zero_spacing_rejected() {
        let mut b = TickBitmap::new();
        assert!(matches!(
            b.flip(MAX_TICK + 1, 1),
            Err(ClmmError::TickNotInitializable(_))
        ));
        assert!(matches!(b.flip(0, 0), Err(ClmmError::InvalidConfiguration(_))));
    }

    // -- next_initialized_tick_within_one_word ------------------------------

    fn sample() -> TickBitmap {
        bitmap(&[-200, -55, -4, 70, 78, 84, 139, 240, 535], 1)
    }

    fn within(b: &TickBitmap, tick: i32, lte: bool) -> (i32, bool) {
        let n = b.next_initialized_tick_within_one_word(tick, 1, lte);
        (n.tick, n.initialized)
    }

    #[test]
    fn upward_search_is_strict() {
        let b = sample();
        assert_eq!(within(&b, 78, false), (84, true));
        assert_eq!(within(&b, 77, false), (78, true));
        assert_eq!(within(&b, -56, false), (-55, true));
        assert_eq!(within(&b, -55, false), (-4, true));
    }

    #[test]
    fn upward_search_stops_at_word_boundary() {
        let b = sample();
        // 84 -> next is 139 in word 1; word 0 ends at 127.
        assert_eq!(within(&b, 84, false), (127, false));
        assert_eq!(within(&b, 127, false), (139, true));
        assert_eq!(within(&b, -200, false), (-129, false));
    }

    #[test]
    fn downward_search_includes_current() {
        let b = sample();
        assert_eq!(within(&b, 78, true), (78, true));
        assert_eq!(within(&b, 79, true), (78, true));
        assert_eq!(within(&b, -4, true), (-4, true));
        assert_eq!(within(&b, -3, true), (-4, true));
    }

    #[test]
    fn downward_search_stops_at_word_boundary() {
        let b = sample();
        assert_eq!(within(&b, 258, true), (256, false));
        assert_eq!(within(&b, -56, true), (-128, false));
        assert_eq!(within(&b, 1, true), (0, false));
    }

    #[test]
    fn spacing_scales_results() {
        let b = bitmap(&[-600, 600], 60);
        let n = b.next_initialized_tick_within_one_word(0, 60, false);
        assert_eq!((n.tick, n.initialized), (600, true));
        let n = b.next_initialized_tick_within_one_word(-1, 60, true);
        assert_eq!((n.tick, n.initialized), (-600, true));
    }

    #[test]
    fn negative_non_multiple_rounds_down() {
        // -1 compresses to -1 with spacing 60, i.e. tick -60.
        let b = bitmap(&[-60], 60);
        let n = b.next_initialized_tick_within_one_word(-1, 60, true);
        assert_eq!((n.tick, n.initialized), (-60, true));
    }

    #[test]
    fn results_clamped_to_tick_bounds() {
        let b = TickBitmap::new();
        let n = b.next_initialized_tick_within_one_word(MAX_TICK - 1, 1, false);
        assert_eq!((n.tick, n.initialized), (MAX_TICK, false));
        let n = b.next_initialized_tick_within_one_word(MIN_TICK, 1, true);
        assert_eq!((n.tick, n.initialized), (MIN_TICK, false));
    }

    // -- next_initialized_tick ----------------------------------------------

    #[test]
    fn unbounded_search_crosses_words() {
        let b = sample();
        assert_eq!(b.next_initialized_tick(84, 1, false), Some(139));
        assert_eq!(b.next_initialized_tick(240, 1, false), Some(535));
        assert_eq!(b.next_initialized_tick(535, 1, false), None);
        assert_eq!(b.next_initialized_tick(-56, 1, true), Some(-200));
        assert_eq!(b.next_initialized_tick(-201, 1, true), None);
        assert_eq!(b.next_initialized_tick(-200, 1, true), Some(-200));
    }

    #[test]
    fn iter_ascending() {
        let b = bitmap(&[120, -600, 0], 60);
        assert_eq!(b.iter(60).collect::<Vec<_>>(), vec![-600, 0, 120]);
    }
}
