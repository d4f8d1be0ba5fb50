//! # auctionmatch-ingress
//!
//! **Ingestion plane**: raw row source, row validation, and grouping of
//! orders by instrument in first-seen order.
//!
//! ## Order Flow
//!
//! ```text
//! CSV → RowSource → parse_row() → InstrumentGrouper.push_order()
//!     → InstrumentGrouper.freeze() → GroupedBook → fan-out
//! ```
//!
//! Ingestion is single-threaded: the grouper is the only writer of the
//! instrument index, and it is frozen before any pricing starts.

pub mod grouper;
pub mod ordered_index;
pub mod parser;
pub mod source;

pub use grouper::{GroupedBook, IngestStats, InstrumentGroup, InstrumentGrouper};
pub use ordered_index::OrderedIndex;
pub use parser::parse_row;
pub use source::{RawRow, RowSource};
