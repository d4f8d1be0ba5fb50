//! Order types for the AuctionMatch pricer.
//!
//! An [`Order`] is the validated form of one input row. It is immutable
//! once parsed; the engine only reads it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionError, Result, constants};

/// Which side of the auction this order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Decode the row direction code: `"0"` is a buy, `"1"` is a sell.
    pub fn from_code(code: &str, line: u64) -> Result<Self> {
        match code {
            constants::DIRECTION_BUY => Ok(Self::Buy),
            constants::DIRECTION_SELL => Ok(Self::Sell),
            other => Err(AuctionError::FieldInvalid {
                line,
                field: "direction",
                value: other.to_string(),
                reason: "expected 0 (buy) or 1 (sell)".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// One validated auction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub instrument: String,
    pub side: OrderSide,
    /// Exact limit price as written in the input, scale preserved.
    pub price: Decimal,
    pub volume: u32,
}

impl Order {
    /// Number of fractional digits in the price text this order was parsed from.
    #[must_use]
    pub fn price_scale(&self) -> u32 {
        self.price.scale()
    }

    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// Build an order for instrument `IF2412` from a price literal.
    pub fn dummy(side: OrderSide, price: &str, volume: u32) -> Self {
        Self::dummy_for("IF2412", side, price, volume)
    }

    pub fn dummy_for(instrument: &str, side: OrderSide, price: &str, volume: u32) -> Self {
        Self {
            instrument: instrument.to_string(),
            side,
            price: Decimal::from_str_exact(price).expect("valid price literal"),
            volume,
        }
    }
}
