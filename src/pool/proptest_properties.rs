//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Tick round trip**: `tick_at_sqrt_price(sqrt_price_at_tick(t)) == t`.
//! 2. **Bitmap double flip**: flipping a tick twice is the identity, and the
//!    final bitmap does not depend on flip order.
//! 3. **Liquidity zero-sum**: deposits followed by matching withdrawals
//!    restore active liquidity and clear every tick.
//! 4. **Swap reversibility**: swapping out and back never returns more
//!    than was put in.

use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{
    Address, Amount, Decimals, FeeRate, SqrtPriceX64, SwapDirection, SwapSpec, Token, TokenPair,
    MAX_TICK, MIN_TICK,
};
use crate::math::{sqrt_price_at_tick, tick_at_sqrt_price};
use crate::pool::Pool;
use crate::position::Position;
use crate::tick::TickBitmap;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const SPACING: u16 = 10;

fn make_pool(fee: u32, start_tick: i32) -> Pool {
    let Ok(d) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    let Ok(pair) = TokenPair::new(
        Token::new(Address::from_bytes([1u8; 32]), d),
        Token::new(Address::from_bytes([2u8; 32]), d),
    ) else {
        panic!("valid pair");
    };
    let Ok(rate) = FeeRate::new(fee) else {
        panic!("valid fee");
    };
    let Ok(cfg) = PoolConfig::new(pair, SPACING, rate) else {
        panic!("valid config");
    };
    let Ok(mut pool) = Pool::new(cfg) else {
        panic!("valid pool");
    };
    let Ok(price) = sqrt_price_at_tick(start_tick) else {
        panic!("valid start tick");
    };
    let Ok(()) = pool.initialize(price) else {
        panic!("initialize");
    };
    pool
}

fn owner(i: u8) -> Address {
    Address::from_bytes([i; 32])
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Ticks across the whole supported range.
fn tick_strategy() -> impl Strategy<Value = i32> {
    MIN_TICK..=MAX_TICK
}

/// Aligned `(lower, upper)` pairs within +-2000 ticks of zero.
fn range_strategy() -> impl Strategy<Value = (i32, i32)> {
    (-200i32..200, 1i32..=200).prop_map(|(lower, width)| {
        let lower = lower * i32::from(SPACING);
        (lower, lower + width * i32::from(SPACING))
    })
}

fn liquidity_strategy() -> impl Strategy<Value = i128> {
    1_000i128..=1_000_000_000i128
}

// ---------------------------------------------------------------------------
// Property 1: Tick round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_tick_round_trip(tick in tick_strategy()) {
        let Ok(price) = sqrt_price_at_tick(tick) else {
            return Err(TestCaseError::fail("tick in range must map to a price"));
        };
        prop_assert_eq!(tick_at_sqrt_price(price.get()), Ok(tick));
    }

    #[test]
    fn prop_tick_brackets_price(raw in SqrtPriceX64::MIN.get()..SqrtPriceX64::MAX.get()) {
        let Ok(tick) = tick_at_sqrt_price(raw) else {
            return Err(TestCaseError::fail("price in range must map to a tick"));
        };
        let Ok(floor) = sqrt_price_at_tick(tick) else {
            return Err(TestCaseError::fail("tick in range"));
        };
        prop_assert!(floor.get() <= raw);
        if let Ok(ceiling) = sqrt_price_at_tick(tick + 1) {
            prop_assert!(raw < ceiling.get());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Bitmap double flip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_bitmap_double_flip_is_identity(
        base in proptest::collection::vec(-40_000i32..40_000, 0..16),
        tick in -40_000i32..40_000,
    ) {
        let spacing = i32::from(SPACING);
        let mut bitmap = TickBitmap::new();
        for t in base {
            let Ok(()) = bitmap.flip(t * spacing, SPACING) else {
                return Err(TestCaseError::fail("aligned flip"));
            };
        }
        let before = bitmap.clone();
        prop_assert!(bitmap.flip(tick * spacing, SPACING).is_ok());
        prop_assert!(bitmap.flip(tick * spacing, SPACING).is_ok());
        prop_assert_eq!(bitmap, before);
    }

    #[test]
    fn prop_bitmap_order_independent(
        ticks in proptest::collection::vec(-40_000i32..40_000, 1..16),
    ) {
        let spacing = i32::from(SPACING);
        let mut forward = TickBitmap::new();
        let mut backward = TickBitmap::new();
        for &t in &ticks {
            prop_assert!(forward.flip(t * spacing, SPACING).is_ok());
        }
        for &t in ticks.iter().rev() {
            prop_assert!(backward.flip(t * spacing, SPACING).is_ok());
        }
        prop_assert_eq!(forward, backward);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Liquidity zero-sum
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_liquidity_zero_sum(
        deposits in proptest::collection::vec((range_strategy(), liquidity_strategy()), 1..6),
    ) {
        let mut pool = make_pool(3_000, 0);
        let start = pool.liquidity();
        let mut positions = Vec::new();
        for (i, ((lower, upper), delta)) in deposits.into_iter().enumerate() {
            let Ok(tag) = u8::try_from(i) else {
                return Err(TestCaseError::fail("few positions"));
            };
            let Ok(mut position) = Position::open(owner(tag), lower, upper) else {
                return Err(TestCaseError::fail("valid range"));
            };
            prop_assert!(pool.modify_liquidity(&mut position, delta).is_ok());
            positions.push((position, delta));
        }
        prop_assert!(pool.is_consistent());

        for (position, delta) in positions.iter_mut().rev() {
            prop_assert!(pool.modify_liquidity(position, -*delta).is_ok());
        }
        prop_assert_eq!(pool.liquidity(), start);
        prop_assert_eq!(pool.ticks().count(), 0);
        prop_assert!(pool.tick_bitmap().is_empty());
    }

    #[test]
    fn prop_withdraw_never_exceeds_deposit(
        (lower, upper) in range_strategy(),
        delta in liquidity_strategy(),
        start_tick in -3_000i32..3_000,
    ) {
        let mut pool = make_pool(3_000, start_tick);
        let Ok(mut position) = Position::open(owner(1), lower, upper) else {
            return Err(TestCaseError::fail("valid range"));
        };
        let Ok(paid) = pool.modify_liquidity(&mut position, delta) else {
            return Err(TestCaseError::fail("deposit"));
        };
        let Ok(received) = pool.modify_liquidity(&mut position, -delta) else {
            return Err(TestCaseError::fail("withdraw"));
        };
        prop_assert!(received.amount_0() <= paid.amount_0());
        prop_assert!(received.amount_1() <= paid.amount_1());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_round_trip_loses_value(
        amount in 1u128..=500_000,
        zero_for_one in any::<bool>(),
        fee in prop_oneof![Just(0u32), Just(500u32), Just(3_000u32), Just(10_000u32)],
    ) {
        let mut pool = make_pool(fee, 0);
        let (Ok(mut wide), Ok(mut narrow)) = (
            Position::open(owner(1), -2_000, 2_000),
            Position::open(owner(2), -100, 300),
        ) else {
            return Err(TestCaseError::fail("valid ranges"));
        };
        prop_assert!(pool.modify_liquidity(&mut wide, 50_000_000).is_ok());
        prop_assert!(pool.modify_liquidity(&mut narrow, 20_000_000).is_ok());

        let direction = if zero_for_one {
            SwapDirection::ZeroForOne
        } else {
            SwapDirection::OneForZero
        };
        let Ok(spec) = SwapSpec::exact_in(Amount::new(amount)) else {
            return Err(TestCaseError::fail("valid spec"));
        };
        let Ok(out) = pool.swap(spec, direction, None) else {
            return Err(TestCaseError::fail("outbound swap"));
        };
        if out.amount_out().is_zero() {
            return Ok(());
        }
        let Ok(back_spec) = SwapSpec::exact_in(out.amount_out()) else {
            return Err(TestCaseError::fail("valid spec"));
        };
        let Ok(back) = pool.swap(back_spec, direction.opposite(), None) else {
            return Err(TestCaseError::fail("return swap"));
        };
        prop_assert!(
            back.amount_out() <= out.amount_in(),
            "round trip created value: in={} back={}",
            out.amount_in(),
            back.amount_out()
        );
        prop_assert!(pool.is_consistent());
    }

    #[test]
    fn prop_quote_matches_swap(
        amount in 1u128..=2_000_000,
        zero_for_one in any::<bool>(),
    ) {
        let mut pool = make_pool(3_000, 0);
        let Ok(mut position) = Position::open(owner(1), -1_000, 1_000) else {
            return Err(TestCaseError::fail("valid range"));
        };
        prop_assert!(pool.modify_liquidity(&mut position, 10_000_000).is_ok());
        let direction = if zero_for_one {
            SwapDirection::ZeroForOne
        } else {
            SwapDirection::OneForZero
        };
        let Ok(spec) = SwapSpec::exact_in(Amount::new(amount)) else {
            return Err(TestCaseError::fail("valid spec"));
        };
        let quoted = pool.quote(spec, direction, None);
        let executed = pool.swap(spec, direction, None);
        prop_assert_eq!(quoted, executed);
    }
}
