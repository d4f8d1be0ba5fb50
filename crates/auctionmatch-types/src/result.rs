//! Per-instrument output of a pricing run.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Equilibrium price of one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquilibriumResult {
    pub instrument: String,
    /// `None` when the book does not cross.
    pub price: Option<Decimal>,
    /// Fractional digits of the instrument's first input price. Formatting only.
    pub decimal_scale: u32,
}

impl EquilibriumResult {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.price.is_some()
    }

    /// The price with exactly `decimal_scale` fractional digits.
    ///
    /// Extra digits are rounded half away from zero (`101.25` at scale 1 is
    /// `101.3`). This only matters when the first input price of an
    /// instrument is written with fewer digits than its tick needs.
    #[must_use]
    pub fn scaled_price(&self) -> Option<Decimal> {
        self.price.map(|p| {
            let mut p = p.round_dp_with_strategy(
                self.decimal_scale,
                RoundingStrategy::MidpointAwayFromZero,
            );
            p.rescale(self.decimal_scale);
            p
        })
    }
}
