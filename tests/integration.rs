//! Integration tests exercising the public API end to end.
//!
//! These tests cover the full lifecycle of a pool: configuration,
//! initialization, liquidity provision, swaps across ticks, fee
//! collection, and concurrent use through the registry.

#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use clmm_engine::prelude::*;
use clmm_engine::domain::Q64;
use clmm_engine::math::big_num::mul_div;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn token(byte: u8, decimals: u8) -> Token {
    let Ok(d) = Decimals::new(decimals) else {
        panic!("valid decimals");
    };
    Token::new(Address::from_bytes([byte; 32]), d)
}

fn make_pair() -> TokenPair {
    let Ok(pair) = TokenPair::sorted(token(1, 6), token(2, 9)) else {
        panic!("valid pair");
    };
    pair
}

fn fee(per_million: u32) -> FeeRate {
    let Ok(f) = FeeRate::new(per_million) else {
        panic!("valid fee");
    };
    f
}

fn config(spacing: u16, trade_fee: u32) -> PoolConfig {
    let Ok(cfg) = PoolConfig::new(make_pair(), spacing, fee(trade_fee)) else {
        panic!("valid config");
    };
    cfg
}

fn pool_at(spacing: u16, trade_fee: u32, tick: i32) -> Pool {
    let Ok(mut pool) = Pool::new(config(spacing, trade_fee)) else {
        panic!("valid pool");
    };
    let Ok(price) = sqrt_price_at_tick(tick) else {
        panic!("valid tick");
    };
    let Ok(()) = pool.initialize(price) else {
        panic!("initialize");
    };
    pool
}

fn open(owner: u8, lower: i32, upper: i32) -> Position {
    let Ok(p) = Position::open(Address::from_bytes([owner; 32]), lower, upper) else {
        panic!("valid position");
    };
    p
}

fn exact_in(amount: u128) -> SwapSpec {
    let Ok(s) = SwapSpec::exact_in(Amount::new(amount)) else {
        panic!("valid spec");
    };
    s
}

fn exact_out(amount: u128) -> SwapSpec {
    let Ok(s) = SwapSpec::exact_out(Amount::new(amount)) else {
        panic!("valid spec");
    };
    s
}

// ---------------------------------------------------------------------------
// Reference scenario
// ---------------------------------------------------------------------------

#[test_log::test]
fn exact_in_swap_raises_price_within_range() {
    let mut pool = pool_at(10, 3_000, 0);
    let mut position = open(7, -100, 100);
    let Ok(_) = pool.modify_liquidity(&mut position, 1_000_000) else {
        panic!("deposit");
    };
    let growth_before = pool.fee_growth_global_1_x64();

    let Ok(result) = pool.swap(exact_in(1_000), SwapDirection::OneForZero, None) else {
        panic!("swap");
    };

    assert_eq!(result.stop(), SwapStop::Completed);
    assert!(result.amount_out().get() > 0);
    assert!(result.amount_out() < result.amount_in());
    assert!(pool.tick_current() > 0 && pool.tick_current() < 100);
    assert!(pool.sqrt_price() > SqrtPriceX64::ONE);

    let Ok(expected) = mul_div(result.fee().get(), Q64, 1_000_000, Rounding::Down) else {
        panic!("mul_div");
    };
    assert_eq!(pool.fee_growth_global_1_x64() - growth_before, expected);
}

#[test_log::test]
fn thin_range_is_crossed_by_small_swap() {
    let mut pool = pool_at(10, 3_000, 0);
    let mut position = open(7, -100, 100);
    let Ok(_) = pool.modify_liquidity(&mut position, 1_000) else {
        panic!("deposit");
    };

    let Ok(result) = pool.swap(exact_in(50), SwapDirection::OneForZero, None) else {
        panic!("swap");
    };

    // L = 1000 holds about 5 units of token1 between ticks 0 and 100.
    assert_eq!(result.stop(), SwapStop::ExhaustedLiquidity);
    assert!(result.amount_out().get() > 0);
    assert!(result.amount_out().get() < 50);
    assert_eq!(result.ticks_crossed(), 1);
    assert_eq!(pool.tick_current(), 100);

    let Ok(expected) = mul_div(result.fee().get(), Q64, 1_000, Rounding::Down) else {
        panic!("mul_div");
    };
    assert_eq!(pool.fee_growth_global_1_x64(), expected);
}

#[test_log::test]
fn empty_range_rejected() {
    assert!(matches!(
        Position::open(Address::from_bytes([1u8; 32]), 60, 60),
        Err(ClmmError::InvalidRange(_))
    ));
}

#[test_log::test]
fn zero_liquidity_swap_exhausts() {
    let mut pool = pool_at(10, 3_000, 0);
    let Ok(result) = pool.swap(exact_in(1_000), SwapDirection::ZeroForOne, None) else {
        panic!("swap");
    };
    assert_eq!(result.stop(), SwapStop::ExhaustedLiquidity);
    assert!(result.amount_in().is_zero());
    assert!(result.amount_out().is_zero());
    assert_eq!(result.into_filled(), Err(ClmmError::ExhaustedLiquidity));
}

// ---------------------------------------------------------------------------
// Multi-position lifecycle
// ---------------------------------------------------------------------------

#[test_log::test]
fn overlapping_positions_share_fees_by_liquidity() {
    let mut pool = pool_at(60, 3_000, 0);
    let mut big = open(1, -600, 600);
    let mut small = open(2, -600, 600);
    let Ok(_) = pool.modify_liquidity(&mut big, 3_000_000) else {
        panic!("deposit");
    };
    let Ok(_) = pool.modify_liquidity(&mut small, 1_000_000) else {
        panic!("deposit");
    };

    let Ok(result) = pool.swap(exact_in(100_000), SwapDirection::ZeroForOne, None) else {
        panic!("swap");
    };
    let Ok((big_0, _)) = pool.collect_fees(&mut big) else {
        panic!("collect");
    };
    let Ok((small_0, _)) = pool.collect_fees(&mut small) else {
        panic!("collect");
    };

    assert!(big_0.get() + small_0.get() <= result.fee().get());
    assert!(result.fee().get() - (big_0.get() + small_0.get()) <= 2);
    // 3:1 split, allowing one unit of rounding per position.
    assert!(big_0.get().abs_diff(3 * small_0.get()) <= 3);
}

#[test_log::test]
fn swap_across_positions_and_back() {
    let mut pool = pool_at(10, 500, 0);
    let mut wide = open(1, -1_000, 1_000);
    let mut upper = open(2, 200, 600);
    for (position, delta) in [(&mut wide, 5_000_000), (&mut upper, 8_000_000)] {
        let Ok(_) = pool.modify_liquidity(position, delta) else {
            panic!("deposit");
        };
    }

    let Ok(up) = pool.swap(exact_in(100_000), SwapDirection::OneForZero, None) else {
        panic!("swap up");
    };
    assert_eq!(up.stop(), SwapStop::Completed);
    assert!(up.ticks_crossed() >= 1);
    assert!(pool.tick_current() >= 200);
    assert_eq!(pool.liquidity(), Liquidity::new(13_000_000));

    let Ok(down) = pool.swap(exact_in(up.amount_out().get()), SwapDirection::ZeroForOne, None)
    else {
        panic!("swap down");
    };
    assert!(down.amount_out() <= up.amount_in());
    assert!(pool.tick_current() < 200);
    assert_eq!(pool.liquidity(), Liquidity::new(5_000_000));
    assert!(pool.is_consistent());
}

#[test_log::test]
fn exact_out_swap_delivers_requested_amount() {
    let mut pool = pool_at(10, 3_000, 0);
    let mut position = open(1, -1_000, 1_000);
    let Ok(_) = pool.modify_liquidity(&mut position, 10_000_000) else {
        panic!("deposit");
    };
    let Ok(quote) = pool.quote(exact_out(5_000), SwapDirection::ZeroForOne, None) else {
        panic!("quote");
    };
    let Ok(result) = pool.swap(exact_out(5_000), SwapDirection::ZeroForOne, None) else {
        panic!("swap");
    };
    assert_eq!(quote, result);
    assert_eq!(result.amount_out(), Amount::new(5_000));
    assert!(result.amount_in().get() > 5_000);
    assert!(result.fee().get() > 0);
}

#[test_log::test]
fn price_limit_stops_swap_without_error() {
    let mut pool = pool_at(10, 3_000, 0);
    let mut position = open(1, -1_000, 1_000);
    let Ok(_) = pool.modify_liquidity(&mut position, 10_000_000) else {
        panic!("deposit");
    };
    let Ok(limit) = sqrt_price_at_tick(-50) else {
        panic!("valid tick");
    };
    let Ok(result) = pool.swap(exact_in(1_000_000), SwapDirection::ZeroForOne, Some(limit))
    else {
        panic!("swap");
    };
    assert_eq!(result.stop(), SwapStop::PriceLimitReached);
    assert_eq!(pool.sqrt_price(), limit);
    assert_eq!(pool.tick_current(), -50);
    assert!(result.into_filled().is_ok());
}

#[test_log::test]
fn withdrawing_everything_returns_pool_to_empty() {
    let mut pool = pool_at(10, 3_000, 37);
    let mut a = open(1, -200, 100);
    let mut b = open(2, 0, 500);
    let mut deposits = Vec::new();
    for (position, delta) in [(&mut a, 700_000i128), (&mut b, 300_000)] {
        let Ok(change) = pool.modify_liquidity(position, delta) else {
            panic!("deposit");
        };
        deposits.push(change);
    }
    let Ok(_) = pool.swap(exact_in(5_000), SwapDirection::ZeroForOne, None) else {
        panic!("swap");
    };
    let Ok(_) = pool.swap(exact_in(5_000), SwapDirection::OneForZero, None) else {
        panic!("swap");
    };

    for (position, delta) in [(&mut a, -700_000i128), (&mut b, -300_000)] {
        let Ok(_) = pool.modify_liquidity(position, delta) else {
            panic!("withdraw");
        };
        assert!(position.liquidity().is_zero());
    }
    assert!(pool.liquidity().is_zero());
    assert_eq!(pool.ticks().count(), 0);
    assert!(pool.tick_bitmap().is_empty());
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test_log::test]
fn registry_serves_pools_across_threads() {
    let registry = Arc::new(PoolRegistry::new());
    let mut ids = Vec::new();
    for index in 0..4u16 {
        let Ok(id) = registry.create_pool(config(10, 3_000).with_index(index)) else {
            panic!("create");
        };
        let Ok(()) = registry.initialize(id, SqrtPriceX64::ONE) else {
            panic!("initialize");
        };
        ids.push(id);
    }

    thread::scope(|scope| {
        for (t, &id) in ids.iter().enumerate() {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                let Ok(tag) = u8::try_from(t) else {
                    panic!("small thread index");
                };
                let owner = Address::from_bytes([tag + 1; 32]);
                let Ok(_) = registry.open_position(id, owner, -500, 500) else {
                    panic!("open");
                };
                let Ok(_) = registry.modify_liquidity(id, owner, -500, 500, 2_000_000) else {
                    panic!("deposit");
                };
                for i in 0..20u128 {
                    let direction = if i % 2 == 0 {
                        SwapDirection::ZeroForOne
                    } else {
                        SwapDirection::OneForZero
                    };
                    let Ok(_) = registry.swap(id, exact_in(1_000 + i), direction, None) else {
                        panic!("swap");
                    };
                }
            });
        }
    });

    for &id in &ids {
        let Ok(consistent) = registry.with_pool(id, Pool::is_consistent) else {
            panic!("with_pool");
        };
        assert!(consistent);
        let Ok(liquidity) = registry.with_pool(id, Pool::liquidity) else {
            panic!("with_pool");
        };
        assert_eq!(liquidity, Liquidity::new(2_000_000));
    }
}

#[test_log::test]
fn registry_serialises_one_pool() {
    let registry = PoolRegistry::new();
    let Ok(id) = registry.create_pool(config(10, 3_000)) else {
        panic!("create");
    };
    let Ok(()) = registry.initialize(id, SqrtPriceX64::ONE) else {
        panic!("initialize");
    };

    thread::scope(|scope| {
        for t in 0..8u8 {
            let registry = &registry;
            scope.spawn(move || {
                let owner = Address::from_bytes([t + 1; 32]);
                let Ok(_) = registry.open_position(id, owner, -100, 100) else {
                    panic!("open");
                };
                let Ok(_) = registry.modify_liquidity(id, owner, -100, 100, 1_000) else {
                    panic!("deposit");
                };
            });
        }
    });

    let Ok(liquidity) = registry.with_pool(id, Pool::liquidity) else {
        panic!("with_pool");
    };
    assert_eq!(liquidity, Liquidity::new(8_000));
}

#[cfg(feature = "serde")]
#[test_log::test]
fn pool_round_trips_through_json() {
    let mut pool = pool_at(10, 3_000, 0);
    let mut position = open(1, -100, 100);
    let Ok(_) = pool.modify_liquidity(&mut position, 1_000_000) else {
        panic!("deposit");
    };
    let Ok(json) = serde_json::to_string(&pool) else {
        panic!("serialize");
    };
    let Ok(back) = serde_json::from_str::<Pool>(&json) else {
        panic!("deserialize");
    };
    assert_eq!(back, pool);
}
