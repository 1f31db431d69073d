//! Concentrated liquidity walkthrough.
//!
//! Creates a pool through the registry, provides liquidity over two
//! overlapping ranges, swaps across a range boundary in both directions and
//! collects fees.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=clmm_engine=debug cargo run --example clmm
//! ```

use clmm_engine::config::PoolConfig;
use clmm_engine::domain::{
    Address, Amount, Decimals, FeeRate, SqrtPriceX64, SwapDirection, SwapSpec, Token, TokenPair,
};
use clmm_engine::math::sqrt_price_at_tick;
use clmm_engine::pool::PoolRegistry;
use tracing_subscriber::prelude::*;

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clmm_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    println!("=== Concentrated Liquidity Pool ===\n");

    // ── 1. Define tokens and the pool configuration ────────────────────
    //    0.30% trade fee, 12% of it to the protocol, tick spacing 10.
    let usdc = Token::new(Address::from_bytes([1u8; 32]), Decimals::new(6)?);
    let wsol = Token::new(Address::from_bytes([2u8; 32]), Decimals::new(9)?);
    let pair = TokenPair::sorted(usdc, wsol)?;
    let config = PoolConfig::new(pair, 10, FeeRate::new(3_000)?)?
        .with_protocol_fee_rate(FeeRate::new(120_000)?)?;
    println!("{config}");

    // ── 2. Create and initialize the pool at price 1.0 ─────────────────
    let registry = PoolRegistry::new();
    let id = registry.create_pool(config)?;
    registry.initialize(id, SqrtPriceX64::ONE)?;
    println!("Pool {id} initialized at tick 0");

    // ── 3. Provide liquidity ───────────────────────────────────────────
    //    A narrow range around the price and a wide one behind it.
    let alice = Address::from_bytes([0xa1; 32]);
    let bob = Address::from_bytes([0xb0; 32]);
    for (owner, lower, upper, liquidity) in [
        (alice, -100, 100, 5_000_000i128),
        (bob, -1_000, 1_000, 2_000_000),
    ] {
        registry.open_position(id, owner, lower, upper)?;
        let change = registry.modify_liquidity(id, owner, lower, upper, liquidity)?;
        println!(
            "  {owner} [{lower}, {upper}): deposit {} token0 + {} token1",
            change.amount_0(),
            change.amount_1()
        );
    }

    // ── 4. Swap token1 for token0 past the narrow range ────────────────
    let spec = SwapSpec::exact_in(Amount::new(60_000))?;
    let quote = registry.quote(id, spec, SwapDirection::OneForZero, None)?;
    let result = registry.swap(id, spec, SwapDirection::OneForZero, None)?;
    assert_eq!(quote, result);
    println!("\n--- Swap: sell 60 000 token1 ---");
    println!("  {result}");
    println!("  Ticks crossed: {}", result.ticks_crossed());
    println!("  Protocol fee:  {}", result.protocol_fee());

    // ── 5. Swap back with a price limit ────────────────────────────────
    let limit = sqrt_price_at_tick(-50)?;
    let back = registry.swap(
        id,
        SwapSpec::exact_in(Amount::new(200_000))?,
        SwapDirection::ZeroForOne,
        Some(limit),
    )?;
    println!("\n--- Swap: sell up to 200 000 token0, limit tick -50 ---");
    println!("  {back}");

    // ── 6. Collect fees ────────────────────────────────────────────────
    println!("\n--- Fees ---");
    for (owner, lower, upper) in [(alice, -100, 100), (bob, -1_000, 1_000)] {
        let (fees_0, fees_1) = registry.collect_fees(id, owner, lower, upper)?;
        println!("  {owner}: {fees_0} token0 + {fees_1} token1");
    }

    let (price, liquidity) = registry.with_pool(id, |pool| {
        (
            pool.sqrt_price()
                .to_price(pair.token_0().decimals(), pair.token_1().decimals()),
            pool.liquidity(),
        )
    })?;
    println!("\nFinal price: {price:.6}, active liquidity: {liquidity}");

    println!("\n=== Done ===");
    Ok(())
}
