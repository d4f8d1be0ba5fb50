//! Fixed-pool fan-out of per-instrument pricing.
//!
//! Instruments are split across `W` workers by round-robin position:
//! worker `i` owns positions `i, i + W, i + 2W, …`. The split is static,
//! so no two workers ever touch the same instrument or result slot and the
//! pricing phase needs no locks. The grouped book is only read.

use std::num::NonZeroUsize;
use std::thread;

use auctionmatch_ingress::GroupedBook;
use auctionmatch_matchcore::compute_equilibrium_price;
use auctionmatch_types::{AuctionError, EquilibriumResult, Result};

use crate::ResultSlots;

/// Runs the equilibrium engine for every instrument on a worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanoutScheduler {
    workers: NonZeroUsize,
}

impl FanoutScheduler {
    /// Create a scheduler with a fixed worker count.
    ///
    /// # Errors
    /// `InvalidWorkerCount` if `workers` is zero.
    pub fn new(workers: usize) -> Result<Self> {
        NonZeroUsize::new(workers)
            .map(|workers| Self { workers })
            .ok_or(AuctionError::InvalidWorkerCount)
    }

    /// One worker per available CPU (falls back to one).
    #[must_use]
    pub fn with_available_parallelism() -> Self {
        Self {
            workers: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Configured pool size.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    /// Workers actually spawned for `instruments` instruments: never more
    /// than there are instruments, never fewer than one.
    #[must_use]
    pub fn effective_workers(&self, instruments: usize) -> usize {
        self.workers.get().min(instruments).max(1)
    }

    /// Price every instrument of a frozen book.
    ///
    /// Blocks until all workers have finished. Results are in first-seen
    /// order regardless of which worker finished first.
    ///
    /// # Errors
    /// - `PriceOutOfRange` if an instrument's prices cannot be quantized
    /// - `WorkerPanicked` if a worker thread panicked
    pub fn run(&self, book: &GroupedBook) -> Result<Vec<EquilibriumResult>> {
        let instruments = book.len();
        if instruments == 0 {
            return Ok(Vec::new());
        }
        let workers = self.effective_workers(instruments);
        let slots = ResultSlots::new(instruments);

        tracing::debug!(instruments, workers, "Fan-out starting");

        let outcomes: Vec<thread::Result<Result<usize>>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let slots = &slots;
                    scope.spawn(move || price_partition(book, slots, worker, workers))
                })
                .collect();
            handles.into_iter().map(|handle| handle.join()).collect()
        });

        for (worker, outcome) in outcomes.into_iter().enumerate() {
            let priced = outcome.map_err(|_| AuctionError::WorkerPanicked(worker))??;
            tracing::trace!(worker, priced, "Worker joined");
        }

        slots.into_results()
    }
}

impl Default for FanoutScheduler {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}

/// Positions owned by `worker` out of `workers` for `len` instruments.
pub fn partition(worker: usize, workers: usize, len: usize) -> impl Iterator<Item = usize> {
    (worker..len).step_by(workers.max(1))
}

/// Price every instrument in one worker's partition. Returns how many
/// instruments were priced.
fn price_partition(
    book: &GroupedBook,
    slots: &ResultSlots,
    worker: usize,
    workers: usize,
) -> Result<usize> {
    let mut priced = 0;
    for index in partition(worker, workers, book.len()) {
        let group = book.group_at(index).ok_or_else(|| {
            AuctionError::Internal(format!("no instrument at position {index}"))
        })?;
        let outcome = compute_equilibrium_price(&group.orders, group.tick)?;

        tracing::debug!(
            worker,
            instrument = %group.instrument,
            orders = group.orders.len(),
            levels = outcome.level_count,
            price = ?outcome.price,
            match_volume = outcome.match_volume,
            "Instrument priced"
        );

        slots.fill(
            index,
            EquilibriumResult {
                instrument: group.instrument.clone(),
                price: outcome.price,
                decimal_scale: group.decimal_scale,
            },
        )?;
        priced += 1;
    }
    Ok(priced)
}
