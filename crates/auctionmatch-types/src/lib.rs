//! # auctionmatch-types
//!
//! Shared types, errors, and configuration for the **AuctionMatch**
//! call-auction pricer.
//!
//! This crate is the leaf dependency of the workspace: every other crate
//! depends on it. It defines:
//!
//! - **Order model**: [`Order`], [`OrderSide`]
//! - **Tick model**: [`TickSize`], [`TickTable`], [`product_code`]
//! - **Output model**: [`EquilibriumResult`]
//! - **Configuration**: [`AuctionConfig`]
//! - **Errors**: [`AuctionError`] with `AM_ERR_` prefix codes
//! - **Constants**: row layout, default tick, limits

pub mod config;
pub mod constants;
pub mod error;
pub mod order;
pub mod result;
pub mod tick;

// Re-export all primary types at crate root for ergonomic imports:
//   use auctionmatch_types::{Order, OrderSide, TickSize, ...};

pub use config::*;
pub use error::*;
pub use order::*;
pub use result::*;
pub use tick::*;

// Constants are accessed via `auctionmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
