//! # auctionmatch-matchcore
//!
//! **Pure deterministic call-auction pricing for AuctionMatch.**
//!
//! MatchCore is the compute plane -- it takes every order of one
//! instrument and produces that instrument's opening price. It has:
//!
//! - **Zero side effects**: no I/O, no shared state
//! - **Deterministic output**: same orders and tick -> same price
//! - **Exact arithmetic**: prices quantized to integer ticks in decimal
//! - **Instrument isolation**: each instrument gets its own book

pub mod book;
pub mod determinism;
pub mod equilibrium;
pub mod price_level;

pub use book::AuctionBook;
pub use determinism::{compute_result_root, result_root_hex, verify_result_root};
pub use equilibrium::{EquilibriumOutcome, compute_equilibrium, compute_equilibrium_price};
pub use price_level::PriceLevel;
