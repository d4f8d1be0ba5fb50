//! Run configuration: worker pool size and the product tick table.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionError, Result, TickSize, TickTable};

/// Configuration for one pricing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionConfig {
    /// Worker pool size for the fan-out phase. `None` uses the machine's
    /// available parallelism.
    pub workers: Option<usize>,
    /// Tick for instruments whose product code is not in `products`.
    pub default_tick: Decimal,
    /// Product code (e.g. `"IF"`) → tick size.
    pub products: BTreeMap<String, Decimal>,
}

impl AuctionConfig {
    /// The China Financial Futures Exchange product universe.
    #[must_use]
    pub fn cffex() -> Self {
        let products = [
            ("IF", Decimal::new(2, 1)),
            ("IH", Decimal::new(2, 1)),
            ("IC", Decimal::new(2, 1)),
            ("IM", Decimal::new(2, 1)),
            ("TS", Decimal::new(2, 3)),
            ("TF", Decimal::new(5, 3)),
            ("T", Decimal::new(5, 3)),
            ("TL", Decimal::new(1, 2)),
        ]
        .into_iter()
        .map(|(code, tick)| (code.to_string(), tick))
        .collect();
        Self {
            workers: None,
            default_tick: TickSize::default_tick().value(),
            products,
        }
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`Self::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the worker count and every tick.
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(AuctionError::InvalidWorkerCount);
        }
        self.tick_table().map(|_| ())
    }

    /// Build the validated tick table.
    pub fn tick_table(&self) -> Result<TickTable> {
        TickTable::new(
            self.default_tick,
            self.products.iter().map(|(code, tick)| (code.clone(), *tick)),
        )
    }
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self::cffex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cffex_config_matches_builtin_table() {
        let cfg = AuctionConfig::cffex();
        assert_eq!(cfg.tick_table().unwrap(), TickTable::cffex());
        assert!(cfg.workers.is_none());
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = AuctionConfig::cffex();
        let json = serde_json::to_string(&cfg).unwrap();
        let back = AuctionConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = AuctionConfig::from_json_str(r#"{"workers": 3}"#).unwrap();
        assert_eq!(cfg.workers, Some(3));
        assert_eq!(cfg.default_tick, Decimal::new(2, 1));
        assert!(cfg.products.contains_key("IF"));
    }

    #[test]
    fn custom_universe() {
        let cfg = AuctionConfig::from_json_str(
            r#"{"default_tick": "0.01", "products": {"AU": "0.02"}}"#,
        )
        .unwrap();
        let table = cfg.tick_table().unwrap();
        assert_eq!(table.resolve("AU2412").value(), Decimal::new(2, 2));
        assert_eq!(table.resolve("IF2412").value(), Decimal::new(1, 2));
    }

    #[test]
    fn zero_workers_rejected() {
        let err = AuctionConfig::from_json_str(r#"{"workers": 0}"#).unwrap_err();
        assert!(matches!(err, AuctionError::InvalidWorkerCount));
    }

    #[test]
    fn bad_tick_rejected() {
        let err =
            AuctionConfig::from_json_str(r#"{"products": {"IF": "-1"}}"#).unwrap_err();
        assert!(matches!(err, AuctionError::InvalidTickSize { .. }));
    }

    #[test]
    fn malformed_json_is_configuration_error() {
        let err = AuctionConfig::from_json_str("{ workers").unwrap_err();
        assert!(matches!(err, AuctionError::Configuration(_)));
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let err =
            AuctionConfig::from_path(Path::new("/nonexistent/auctionmatch.json")).unwrap_err();
        assert!(matches!(err, AuctionError::Io(_)));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir()
            .join(format!("auctionmatch-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"workers": 2, "products": {"AU": "0.02"}}"#).unwrap();
        let cfg = AuctionConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.workers, Some(2));
        assert_eq!(cfg.products.len(), 1);
    }
}
