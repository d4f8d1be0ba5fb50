//! A single quantized price level of one instrument's auction book.
//!
//! Unlike a continuous book, the auction never needs the individual
//! orders at a level, only the aggregated buy and sell volume.

use auctionmatch_types::OrderSide;

/// Aggregated buy and sell volume at one price, in integer ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price as a whole number of ticks.
    pub ticks: i64,
    pub buy_volume: u64,
    pub sell_volume: u64,
}

impl PriceLevel {
    /// Create a new empty price level.
    #[must_use]
    pub fn new(ticks: i64) -> Self {
        Self {
            ticks,
            buy_volume: 0,
            sell_volume: 0,
        }
    }

    /// Fold one order's volume into this level.
    pub fn add(&mut self, side: OrderSide, volume: u32) {
        match side {
            OrderSide::Buy => self.buy_volume += u64::from(volume),
            OrderSide::Sell => self.sell_volume += u64::from(volume),
        }
    }

    /// Returns `true` if neither side has any volume here.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buy_volume == 0 && self.sell_volume == 0
    }
}
