//! Tick sizes and the product → tick lookup table.
//!
//! Prices are converted to integer tick counts in exact decimal arithmetic,
//! so a price that sits on a tick boundary always quantizes to the same
//! integer, run after run.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{AuctionError, Result, constants};

/// Minimum price increment of one instrument. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TickSize(Decimal);

impl TickSize {
    /// Validate a raw tick value.
    ///
    /// # Errors
    /// `InvalidTickSize` if `tick` is below [`TickSize::minimum`].
    pub fn new(tick: Decimal) -> Result<Self> {
        if tick < Self::minimum().0 {
            return Err(AuctionError::InvalidTickSize {
                product: String::new(),
                tick,
            });
        }
        Ok(Self(tick))
    }

    /// The smallest accepted tick (`constants::MIN_TICK`).
    #[must_use]
    pub fn minimum() -> Self {
        Self(Decimal::new(constants::MIN_TICK.0, constants::MIN_TICK.1))
    }

    /// Fallback tick for unknown products (`constants::DEFAULT_TICK`).
    #[must_use]
    pub fn default_tick() -> Self {
        Self(Decimal::new(
            constants::DEFAULT_TICK.0,
            constants::DEFAULT_TICK.1,
        ))
    }

    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Quantize a price to the nearest whole number of ticks.
    ///
    /// Midpoints round away from zero.
    ///
    /// # Errors
    /// `PriceOutOfRange` if the tick count does not fit an `i64`.
    pub fn to_ticks(self, price: Decimal) -> Result<i64> {
        let out_of_range = || AuctionError::PriceOutOfRange {
            price,
            tick: self.0,
        };
        price
            .checked_div(self.0)
            .map(|q| q.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|q| q.to_i64())
            .ok_or_else(out_of_range)
    }

    /// Convert a tick count back into a price.
    #[must_use]
    pub fn to_price(self, ticks: i64) -> Decimal {
        Decimal::from(ticks) * self.0
    }
}

impl TryFrom<Decimal> for TickSize {
    type Error = AuctionError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TickSize> for Decimal {
    fn from(tick: TickSize) -> Self {
        tick.0
    }
}

impl std::fmt::Display for TickSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract the leading product code of an instrument ID.
///
/// Takes up to [`constants::PRODUCT_CODE_MAX_LEN`] ASCII letters and stops
/// at the first non-letter: `IF2306` → `IF`, `T2406` → `T`, `2306` → ``.
#[must_use]
pub fn product_code(instrument: &str) -> &str {
    let len = instrument
        .bytes()
        .take(constants::PRODUCT_CODE_MAX_LEN)
        .take_while(u8::is_ascii_alphabetic)
        .count();
    &instrument[..len]
}

/// Product code → tick lookup with a default for unknown products.
///
/// This is plain data passed into the grouper; alternate instrument
/// universes are just different tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTable {
    products: HashMap<String, TickSize>,
    default_tick: TickSize,
}

impl TickTable {
    /// Build a table from raw `(product, tick)` pairs.
    ///
    /// # Errors
    /// `InvalidTickSize` naming the first product whose tick is not valid.
    pub fn new<I, S>(default_tick: Decimal, products: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let default_tick = TickSize::new(default_tick).map_err(|_| {
            AuctionError::InvalidTickSize {
                product: "<default>".to_string(),
                tick: default_tick,
            }
        })?;
        let mut table = HashMap::new();
        for (product, tick) in products {
            let product = product.into();
            let Ok(size) = TickSize::new(tick) else {
                return Err(AuctionError::InvalidTickSize { product, tick });
            };
            table.insert(product, size);
        }
        Ok(Self {
            products: table,
            default_tick,
        })
    }

    /// China Financial Futures Exchange products.
    #[must_use]
    pub fn cffex() -> Self {
        let mut products = HashMap::new();
        for (code, mantissa, scale) in [
            ("IF", 2, 1),
            ("IH", 2, 1),
            ("IC", 2, 1),
            ("IM", 2, 1),
            ("TS", 2, 3),
            ("TF", 5, 3),
            ("T", 5, 3),
            ("TL", 1, 2),
        ] {
            products.insert(code.to_string(), TickSize(Decimal::new(mantissa, scale)));
        }
        Self {
            products,
            default_tick: TickSize::default_tick(),
        }
    }

    /// Resolve the tick for an instrument from its product code.
    #[must_use]
    pub fn resolve(&self, instrument: &str) -> TickSize {
        self.products
            .get(product_code(instrument))
            .copied()
            .unwrap_or(self.default_tick)
    }

    #[must_use]
    pub fn default_tick(&self) -> TickSize {
        self.default_tick
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for TickTable {
    fn default() -> Self {
        Self::cffex()
    }
}
