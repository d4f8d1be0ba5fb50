//! Instrument grouping with first-seen ordering.
//!
//! The grouper is the single writer of the instrument index. It must see
//! the whole input before any group is complete, since an instrument's
//! orders can appear anywhere in the stream. [`InstrumentGrouper::freeze`]
//! consumes the grouper, so the resulting [`GroupedBook`] can only be read.

use auctionmatch_types::{AuctionError, Order, Result, TickSize, TickTable};

use crate::{OrderedIndex, RawRow, parse_row};

/// Every order of one instrument, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentGroup {
    pub instrument: String,
    /// Resolved once, when the instrument is first seen.
    pub tick: TickSize,
    /// Fractional digits of the first row's price. Formatting only.
    pub decimal_scale: u32,
    pub orders: Vec<Order>,
}

/// Row counters for one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_read: u64,
    pub rows_accepted: u64,
    pub rows_rejected: u64,
}

/// Collects orders into per-instrument groups while the input streams in.
#[derive(Debug)]
pub struct InstrumentGrouper {
    ticks: TickTable,
    index: OrderedIndex<String, InstrumentGroup>,
    stats: IngestStats,
    rejections: Vec<AuctionError>,
}

impl InstrumentGrouper {
    #[must_use]
    pub fn new(ticks: TickTable) -> Self {
        Self {
            ticks,
            index: OrderedIndex::new(),
            stats: IngestStats::default(),
            rejections: Vec::new(),
        }
    }

    /// Append a validated order to its instrument's group.
    pub fn push_order(&mut self, order: Order) {
        let ticks = &self.ticks;
        let (group, created) = self.index.get_or_insert_with(&order.instrument, || {
            InstrumentGroup {
                instrument: order.instrument.clone(),
                tick: ticks.resolve(&order.instrument),
                decimal_scale: order.price_scale(),
                orders: Vec::new(),
            }
        });
        if created {
            tracing::debug!(
                instrument = %group.instrument,
                tick = %group.tick,
                scale = group.decimal_scale,
                "New instrument"
            );
        }
        group.orders.push(order);
    }

    /// Parse one row and group it. Row-level errors are recorded, not returned.
    ///
    /// Returns `true` if the row was accepted.
    pub fn push_row(&mut self, row: &RawRow) -> bool {
        self.stats.rows_read += 1;
        match parse_row(row) {
            Ok(order) => {
                self.stats.rows_accepted += 1;
                self.push_order(order);
                true
            }
            Err(err) => {
                self.reject(err);
                false
            }
        }
    }

    /// Drain a row stream into the groups.
    ///
    /// # Errors
    /// The first error that is not row-level (e.g. `SourceUnavailable`)
    /// stops ingestion and is returned.
    pub fn ingest<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<RawRow>>,
    {
        for row in rows {
            match row {
                Ok(row) => {
                    self.push_row(&row);
                }
                Err(err) if err.is_row_level() => {
                    self.stats.rows_read += 1;
                    self.reject(err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn reject(&mut self, err: AuctionError) {
        tracing::warn!(error = %err, "Row dropped");
        self.stats.rows_rejected += 1;
        self.rejections.push(err);
    }

    #[must_use]
    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Stop accepting input and hand out the read-only grouped book.
    #[must_use]
    pub fn freeze(self) -> GroupedBook {
        tracing::info!(
            instruments = self.index.len(),
            rows_read = self.stats.rows_read,
            rows_accepted = self.stats.rows_accepted,
            rows_rejected = self.stats.rows_rejected,
            "Grouping complete"
        );
        GroupedBook {
            index: self.index,
            stats: self.stats,
            rejections: self.rejections,
        }
    }
}

/// Frozen instrument → orders mapping in first-seen order.
///
/// Only shared references are handed out, so any number of readers can
/// use it at once.
#[derive(Debug)]
pub struct GroupedBook {
    index: OrderedIndex<String, InstrumentGroup>,
    stats: IngestStats,
    rejections: Vec<AuctionError>,
}

impl GroupedBook {
    /// Look up an instrument's group.
    #[must_use]
    pub fn get(&self, instrument: &str) -> Option<&InstrumentGroup> {
        self.index.get(instrument)
    }

    /// Group at a first-seen position.
    #[must_use]
    pub fn group_at(&self, pos: usize) -> Option<&InstrumentGroup> {
        self.index.get_index(pos).map(|(_, group)| group)
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> impl ExactSizeIterator<Item = &InstrumentGroup> + '_ {
        self.index.iter().map(|(_, group)| group)
    }

    /// Instrument IDs in first-seen order.
    pub fn instruments(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Row-level errors in input order.
    #[must_use]
    pub fn rejections(&self) -> &[AuctionError] {
        &self.rejections
    }

    /// Take the row-level errors, leaving none behind.
    pub fn take_rejections(&mut self) -> Vec<AuctionError> {
        std::mem::take(&mut self.rejections)
    }
}
