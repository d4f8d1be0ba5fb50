//! # auctionmatch-fanout
//!
//! **Fan-out plane**: prices every instrument of a frozen
//! [`GroupedBook`](auctionmatch_ingress::GroupedBook) on a fixed worker
//! pool and assembles the results in first-seen order.
//!
//! ```text
//! GroupedBook ──┬─ worker 0: positions 0, W, 2W, …  ─┐
//!               ├─ worker 1: positions 1, W+1, …    ─┼─→ ResultSlots → Vec<EquilibriumResult>
//!               └─ worker W-1 …                     ─┘
//! ```
//!
//! Workers share nothing mutable except their own result slots. Output
//! order never depends on worker count or scheduling.

pub mod pipeline;
pub mod scheduler;
pub mod slots;

pub use pipeline::{AuctionPipeline, PipelineReport};
pub use scheduler::{FanoutScheduler, partition};
pub use slots::ResultSlots;
