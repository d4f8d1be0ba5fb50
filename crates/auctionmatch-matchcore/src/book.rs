//! The auction book for a single instrument.
//!
//! Uses a `BTreeMap<i64, PriceLevel>` keyed by quantized price so levels
//! can be walked top-down in one pass. The best bid and best ask are kept
//! as raw (unquantized) prices: the crossing test compares what the traders
//! actually wrote.

use std::collections::BTreeMap;

use auctionmatch_types::{Order, OrderSide, Result, TickSize};
use rust_decimal::Decimal;

use crate::price_level::PriceLevel;

/// Quantized price levels plus best bid / best ask for one instrument.
#[derive(Debug, Clone)]
pub struct AuctionBook {
    tick: TickSize,
    levels: BTreeMap<i64, PriceLevel>,
    best_bid: Option<Decimal>,
    best_ask: Option<Decimal>,
}

impl AuctionBook {
    /// Create a new empty book on the given tick grid.
    #[must_use]
    pub fn new(tick: TickSize) -> Self {
        Self {
            tick,
            levels: BTreeMap::new(),
            best_bid: None,
            best_ask: None,
        }
    }

    /// Build a book from every order of one instrument.
    pub fn from_orders<'a, I>(tick: TickSize, orders: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut book = Self::new(tick);
        for order in orders {
            book.insert_order(order)?;
        }
        Ok(book)
    }

    // =================================================================
    // Insertion
    // =================================================================

    /// Quantize an order's price and fold its volume into that level.
    pub fn insert_order(&mut self, order: &Order) -> Result<()> {
        let ticks = self.tick.to_ticks(order.price)?;
        self.levels
            .entry(ticks)
            .or_insert_with(|| PriceLevel::new(ticks))
            .add(order.side, order.volume);

        match order.side {
            OrderSide::Buy => {
                if self.best_bid.is_none_or(|bid| order.price > bid) {
                    self.best_bid = Some(order.price);
                }
            }
            OrderSide::Sell => {
                if self.best_ask.is_none_or(|ask| order.price < ask) {
                    self.best_ask = Some(order.price);
                }
            }
        }
        Ok(())
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Highest buy price, or `None` if there are no buys.
    #[must_use]
    pub fn best_bid(&self) -> Option<Decimal> {
        self.best_bid
    }

    /// Lowest sell price, or `None` if there are no sells.
    #[must_use]
    pub fn best_ask(&self) -> Option<Decimal> {
        self.best_ask
    }

    /// Both sides present and `best_bid >= best_ask`.
    #[must_use]
    pub fn crosses(&self) -> bool {
        matches!((self.best_bid, self.best_ask), (Some(bid), Some(ask)) if bid >= ask)
    }

    #[must_use]
    pub fn tick(&self) -> TickSize {
        self.tick
    }

    /// Levels with `low <= ticks <= high`, highest price first.
    pub fn levels_desc_between(
        &self,
        low: i64,
        high: i64,
    ) -> impl Iterator<Item = &PriceLevel> + '_ {
        self.levels.range(low..=high).rev().map(|(_, level)| level)
    }

    /// Number of distinct quantized prices.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
