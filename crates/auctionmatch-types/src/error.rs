//! Error types for the AuctionMatch pricer.
//!
//! All errors use the `AM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Row errors (non-fatal, the row is dropped)
//! - 2xx: Configuration errors
//! - 3xx: Pricing errors
//! - 4xx: Pipeline errors
//! - 9xx: I/O / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Central error enum for all AuctionMatch operations.
#[derive(Debug, Error)]
pub enum AuctionError {
    // =================================================================
    // Row Errors (1xx)
    // =================================================================
    /// The row does not have exactly four fields.
    #[error("AM_ERR_100: Malformed row at line {line}: expected {expected} fields, got {actual}")]
    RowMalformed {
        line: u64,
        expected: usize,
        actual: usize,
    },

    /// A field could not be parsed or is out of range.
    #[error("AM_ERR_101: Invalid {field} at line {line}: {value:?} ({reason})")]
    FieldInvalid {
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },

    // =================================================================
    // Configuration Errors (2xx)
    // =================================================================
    /// A tick size is zero, negative, or below the minimum.
    #[error("AM_ERR_200: Invalid tick size {tick} for {product}")]
    InvalidTickSize { product: String, tick: Decimal },

    /// The worker count is zero.
    #[error("AM_ERR_201: Worker count must be at least 1")]
    InvalidWorkerCount,

    /// Configuration error (bad file, missing fields, etc.).
    #[error("AM_ERR_202: Configuration error: {0}")]
    Configuration(String),

    // =================================================================
    // Pricing Errors (3xx)
    // =================================================================
    /// A price does not fit the tick grid's integer range.
    #[error("AM_ERR_300: Price {price} cannot be quantized with tick {tick}")]
    PriceOutOfRange { price: Decimal, tick: Decimal },

    // =================================================================
    // Pipeline Errors (4xx)
    // =================================================================
    /// A result slot was written twice.
    #[error("AM_ERR_400: Result slot {0} written twice")]
    SlotAlreadyFilled(usize),

    /// A result slot was never written before assembly.
    #[error("AM_ERR_401: Result slot {0} was never written")]
    SlotUnfilled(usize),

    /// A worker thread panicked.
    #[error("AM_ERR_402: Worker {0} panicked")]
    WorkerPanicked(usize),

    // =================================================================
    // I/O / Internal (9xx)
    // =================================================================
    /// The order source could not be opened or read. Fatal for the run.
    #[error("AM_ERR_900: Order source unavailable: {0}")]
    SourceUnavailable(String),

    /// The result sink could not be created or written. Fatal for the run.
    #[error("AM_ERR_901: Result sink unavailable: {0}")]
    SinkUnavailable(String),

    /// Unrecoverable internal error.
    #[error("AM_ERR_902: Internal error: {0}")]
    Internal(String),

    /// I/O error outside the order source and result sink.
    #[error("AM_ERR_903: I/O error: {0}")]
    Io(String),
}

impl AuctionError {
    /// Row-level errors drop a single row; everything else aborts the run.
    #[must_use]
    pub fn is_row_level(&self) -> bool {
        matches!(self, Self::RowMalformed { .. } | Self::FieldInvalid { .. })
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, AuctionError>;

impl From<std::io::Error> for AuctionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AuctionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}
