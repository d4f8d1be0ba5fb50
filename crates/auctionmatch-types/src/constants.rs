//! System-wide constants for the AuctionMatch pricer.

/// Number of comma-separated fields in one order row.
pub const ORDER_ROW_FIELDS: usize = 4;

/// Direction code for a buy order.
pub const DIRECTION_BUY: &str = "0";

/// Direction code for a sell order.
pub const DIRECTION_SELL: &str = "1";

/// Maximum length of the leading product code in an instrument ID
/// (e.g. `IF` in `IF2306`, `T` in `T2406`).
pub const PRODUCT_CODE_MAX_LEN: usize = 2;

/// Default tick size (0.2) for instruments whose product code is unknown.
/// Expressed as `(mantissa, scale)` for `Decimal::new`.
pub const DEFAULT_TICK: (i64, u32) = (2, 1);

/// Smallest tick size accepted by a `TickTable` (0.000001).
pub const MIN_TICK: (i64, u32) = (1, 6);

/// Largest order price accepted by the row parser.
///
/// Together with `MIN_TICK` this bounds every quantized price to
/// `10^18` ticks, which fits an `i64`.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "AuctionMatch";
