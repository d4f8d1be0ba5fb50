//! Equilibrium (opening) price computation for a call auction.
//!
//! Given every order of one instrument, finds the single price that
//! maximizes executable volume. The computation is pure: same orders and
//! tick → same price, with no dependency on any other instrument.

use std::cmp::{Ordering, Reverse};

use auctionmatch_types::{Order, Result, TickSize};
use rust_decimal::Decimal;

use crate::AuctionBook;

/// Result of equilibrium price computation for one instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquilibriumOutcome {
    /// The opening price, if supply and demand cross with positive volume.
    pub price: Option<Decimal>,
    /// The opening price in ticks.
    pub price_ticks: Option<i64>,
    /// Volume executable at the opening price.
    pub match_volume: u64,
    /// Unmatched imbalance at the opening price.
    pub residual_volume: u64,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    /// Distinct quantized prices seen in the book.
    pub level_count: usize,
}

impl EquilibriumOutcome {
    fn no_match(book: &AuctionBook) -> Self {
        Self {
            price: None,
            price_ticks: None,
            match_volume: 0,
            residual_volume: 0,
            best_bid: book.best_bid(),
            best_ask: book.best_ask(),
            level_count: book.level_count(),
        }
    }
}

/// Accumulated volumes evaluated at one candidate price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    ticks: i64,
    match_volume: u64,
    residual_volume: u64,
}

impl Candidate {
    fn at(ticks: i64, accum_buy: u64, accum_sell: u64) -> Self {
        Self {
            ticks,
            match_volume: accum_buy.min(accum_sell),
            residual_volume: accum_buy.abs_diff(accum_sell),
        }
    }

    /// Selection key: max match volume, then min residual, then max price.
    fn rank(&self) -> (u64, Reverse<u64>, i64) {
        (self.match_volume, Reverse(self.residual_volume), self.ticks)
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the equilibrium price for a set of orders of one instrument.
///
/// # Errors
/// `PriceOutOfRange` if a price cannot be quantized on `tick`.
pub fn compute_equilibrium_price(orders: &[Order], tick: TickSize) -> Result<EquilibriumOutcome> {
    let book = AuctionBook::from_orders(tick, orders)?;
    compute_equilibrium(&book)
}

/// Compute the equilibrium price for a given auction book.
///
/// Algorithm:
/// 1. No buys, no sells, or best bid below best ask → no match
/// 2. Walk the levels between the quantized best ask and best bid top-down,
///    accumulating buy volume from the top and releasing sell volume
///    (pre-summed over the range) as each level is passed
/// 3. Evaluate every observed level, plus the highest tick of each gap
///    between two observed levels, where buy volume equals the level above
///    and sell volume equals the level below. Volumes are constant across a
///    gap, so this equals a scan of every tick in the range.
/// 4. Pick max match volume, then min residual, then highest price
/// 5. Max match volume of zero → no match
///
/// # Errors
/// `PriceOutOfRange` if the best bid or ask cannot be quantized.
pub fn compute_equilibrium(book: &AuctionBook) -> Result<EquilibriumOutcome> {
    let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) else {
        return Ok(EquilibriumOutcome::no_match(book));
    };
    if !book.crosses() {
        return Ok(EquilibriumOutcome::no_match(book));
    }

    let tick = book.tick();
    let high = tick.to_ticks(bid)?;
    let low = tick.to_ticks(ask)?;

    let mut accum_sell: u64 = book
        .levels_desc_between(low, high)
        .map(|level| level.sell_volume)
        .sum();
    let mut accum_buy: u64 = 0;
    let mut above: Option<i64> = None;
    let mut best: Option<Candidate> = None;

    let mut offer = |candidate: Candidate| {
        if best.is_none_or(|current| candidate > current) {
            best = Some(candidate);
        }
    };

    for level in book.levels_desc_between(low, high) {
        match above {
            Some(upper) if upper - level.ticks > 1 => {
                offer(Candidate::at(upper - 1, accum_buy, accum_sell));
            }
            _ => {}
        }
        accum_buy += level.buy_volume;
        offer(Candidate::at(level.ticks, accum_buy, accum_sell));
        accum_sell -= level.sell_volume;
        above = Some(level.ticks);
    }

    let Some(best) = best.filter(|c| c.match_volume > 0) else {
        return Ok(EquilibriumOutcome::no_match(book));
    };

    tracing::trace!(
        ticks = best.ticks,
        match_volume = best.match_volume,
        residual = best.residual_volume,
        "Equilibrium selected"
    );

    Ok(EquilibriumOutcome {
        price: Some(tick.to_price(best.ticks)),
        price_ticks: Some(best.ticks),
        match_volume: best.match_volume,
        residual_volume: best.residual_volume,
        best_bid: Some(bid),
        best_ask: Some(ask),
        level_count: book.level_count(),
    })
}
