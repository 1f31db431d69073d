//! Tick-walking swap computation.
//!
//! [`SwapEngine`] reads a [`Pool`] without modifying it and produces a
//! [`SwapOutcome`]: the [`SwapResult`] plus every state change the pool
//! must apply to commit the swap. Running the engine and discarding the
//! outcome is a quote.
//!
//! # Step loop
//!
//! 1. Find the next initialized tick within the current bitmap word.
//! 2. Target the nearer of that tick's price and the price limit.
//! 3. With zero active liquidity, jump straight to the target, or stop if
//!    no initialized tick remains in the swap direction.
//! 4. Otherwise compute one swap step: fee first, then price and amounts.
//!    Split the fee and add the LP share to the input token's growth.
//! 5. On reaching an initialized tick, cross it and apply its net
//!    liquidity.

use tracing::trace;

use super::Pool;
use crate::domain::{
    Amount, SqrtPriceX64, SwapDirection, SwapResult, SwapSpec, SwapStop,
};
use crate::error::ClmmError;
use crate::math::fee_math::{fee_growth_delta, split_fee};
use crate::math::liquidity_math::add_delta;
use crate::math::{compute_swap_step, sqrt_price_at_tick, tick_at_sqrt_price};
use crate::tick::TickInfo;

/// A tick crossed during a swap, with the global fee growth at the moment
/// of crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CrossedTick {
    pub(crate) tick: i32,
    pub(crate) fee_growth_global_0_x64: u128,
    pub(crate) fee_growth_global_1_x64: u128,
}

/// Everything needed to commit a swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SwapOutcome {
    pub(crate) result: SwapResult,
    pub(crate) sqrt_price_x64: u128,
    pub(crate) tick: i32,
    pub(crate) liquidity: u128,
    pub(crate) fee_growth_global_0_x64: u128,
    pub(crate) fee_growth_global_1_x64: u128,
    pub(crate) crossed: Vec<CrossedTick>,
}

/// Running totals of the step loop.
#[derive(Debug, Default)]
struct Totals {
    amount_in: u128,
    amount_out: u128,
    fee: u128,
    protocol_fee: u128,
    fund_fee: u128,
}

impl Totals {
    fn add(&mut self, amount_in: u128, amount_out: u128, fee: u128, protocol: u128, fund: u128) -> crate::error::Result<()> {
        let sum = |a: u128, b: u128| a.checked_add(b).ok_or(ClmmError::Overflow("swap totals"));
        self.amount_in = sum(self.amount_in, amount_in)?;
        self.amount_out = sum(self.amount_out, amount_out)?;
        self.fee = sum(self.fee, fee)?;
        self.protocol_fee = sum(self.protocol_fee, protocol)?;
        self.fund_fee = sum(self.fund_fee, fund)?;
        Ok(())
    }
}

/// Computes swaps against a pool snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SwapEngine<'a> {
    pool: &'a Pool,
}

impl<'a> SwapEngine<'a> {
    /// Creates an engine over `pool`.
    #[must_use]
    pub const fn new(pool: &'a Pool) -> Self {
        Self { pool }
    }

    /// Computes the result of a swap without committing it.
    ///
    /// `price_limit` defaults to the edge of the supported range. A pool
    /// already sitting at that edge yields an empty
    /// [`SwapStop::ExhaustedLiquidity`] result.
    ///
    /// # Errors
    ///
    /// - [`ClmmError::PoolNotInitialized`] if the pool is not active.
    /// - [`ClmmError::OutOfRange`] for an explicit limit not beyond the
    ///   current price in the swap direction.
    /// - Arithmetic errors from the step computation.
    pub fn quote(
        &self,
        spec: SwapSpec,
        direction: SwapDirection,
        price_limit: Option<SqrtPriceX64>,
    ) -> crate::error::Result<SwapResult> {
        self.run(spec, direction, price_limit).map(|outcome| outcome.result)
    }

    pub(crate) fn run(
        &self,
        spec: SwapSpec,
        direction: SwapDirection,
        price_limit: Option<SqrtPriceX64>,
    ) -> crate::error::Result<SwapOutcome> {
        let pool = self.pool;
        pool.ensure_active()?;

        let explicit_limit = price_limit.is_some();
        let limit = match price_limit {
            Some(limit) => {
                direction.validate_price_limit(pool.sqrt_price(), limit)?;
                limit
            }
            None => direction.default_price_limit(),
        };

        let config = pool.config();
        let spacing = config.tick_spacing();
        let zero_for_one = direction.is_zero_for_one();
        let exact_in = spec.is_exact_in();

        let mut remaining = spec.amount().get();
        let mut sqrt_price = pool.sqrt_price().get();
        let mut tick = pool.tick_current();
        let mut liquidity = pool.liquidity().get();
        let mut growth_0 = pool.fee_growth_global_0_x64();
        let mut growth_1 = pool.fee_growth_global_1_x64();
        let mut totals = Totals::default();
        let mut crossed = Vec::new();

        let stop = loop {
            if remaining == 0 {
                break SwapStop::Completed;
            }
            if direction.has_reached(sqrt_price, limit) {
                break if explicit_limit {
                    SwapStop::PriceLimitReached
                } else {
                    SwapStop::ExhaustedLiquidity
                };
            }

            let start_price = sqrt_price;
            let next = pool
                .tick_bitmap()
                .next_initialized_tick_within_one_word(tick, spacing, zero_for_one);
            let next_price = sqrt_price_at_tick(next.tick)?;
            let target = direction.step_target(next_price, limit).get();

            if liquidity == 0 {
                if pool
                    .tick_bitmap()
                    .next_initialized_tick(tick, spacing, zero_for_one)
                    .is_none()
                {
                    break SwapStop::ExhaustedLiquidity;
                }
                sqrt_price = target;
            } else {
                let step = compute_swap_step(
                    sqrt_price,
                    target,
                    liquidity,
                    remaining,
                    exact_in,
                    config.trade_fee_rate(),
                )?;
                sqrt_price = step.sqrt_price_next;

                let gross_in = step.gross_amount_in()?;
                let consumed = if exact_in { gross_in } else { step.amount_out };
                remaining = remaining
                    .checked_sub(consumed)
                    .ok_or(ClmmError::Underflow("swap step consumed more than remaining"))?;

                let split = split_fee(
                    step.fee_amount,
                    config.protocol_fee_rate(),
                    config.fund_fee_rate(),
                )?;
                let growth = fee_growth_delta(split.lp, liquidity)?;
                if zero_for_one {
                    growth_0 = growth_0.wrapping_add(growth);
                } else {
                    growth_1 = growth_1.wrapping_add(growth);
                }
                totals.add(gross_in, step.amount_out, step.fee_amount, split.protocol, split.fund)?;

                trace!(
                    sqrt_price,
                    liquidity,
                    amount_in = step.amount_in,
                    amount_out = step.amount_out,
                    fee = step.fee_amount,
                    "swap step"
                );
            }

            if sqrt_price == next_price.get() {
                if next.initialized {
                    let net = pool.tick(next.tick).map_or(0, TickInfo::liquidity_net);
                    liquidity = add_delta(liquidity, direction.crossing_delta(net)?)?;
                    crossed.push(CrossedTick {
                        tick: next.tick,
                        fee_growth_global_0_x64: growth_0,
                        fee_growth_global_1_x64: growth_1,
                    });
                    trace!(tick = next.tick, liquidity, "crossed tick");
                }
                tick = direction.tick_after_crossing(next.tick);
            } else if sqrt_price != start_price {
                tick = tick_at_sqrt_price(sqrt_price)?;
            }
        };

        let ticks_crossed = u32::try_from(crossed.len())
            .map_err(|_| ClmmError::Overflow("ticks crossed"))?;
        let result = SwapResult {
            direction,
            amount_in: Amount::new(totals.amount_in),
            amount_out: Amount::new(totals.amount_out),
            fee: Amount::new(totals.fee),
            protocol_fee: Amount::new(totals.protocol_fee),
            fund_fee: Amount::new(totals.fund_fee),
            sqrt_price_after: SqrtPriceX64::new(sqrt_price)?,
            tick_after: tick,
            ticks_crossed,
            stop,
        };

        Ok(SwapOutcome {
            result,
            sqrt_price_x64: sqrt_price,
            tick,
            liquidity,
            fee_growth_global_0_x64: growth_0,
            fee_growth_global_1_x64: growth_1,
            crossed,
        })
    }
}
