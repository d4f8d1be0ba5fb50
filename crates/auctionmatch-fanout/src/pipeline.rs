//! End-to-end run: ingest, freeze, fan out, assemble.

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use auctionmatch_ingress::{GroupedBook, IngestStats, InstrumentGrouper, RawRow, RowSource};
use auctionmatch_matchcore::result_root_hex;
use auctionmatch_types::{AuctionConfig, AuctionError, EquilibriumResult, Result, TickTable};

use crate::FanoutScheduler;

/// Everything a run produced.
#[derive(Debug)]
pub struct PipelineReport {
    /// One entry per instrument, in first-seen order.
    pub results: Vec<EquilibriumResult>,
    pub stats: IngestStats,
    /// Row-level errors in input order.
    pub rejections: Vec<AuctionError>,
    /// Workers actually spawned.
    pub workers: usize,
    /// Hex digest over `results`.
    pub result_root: String,
}

impl PipelineReport {
    /// Instruments that produced a price.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.results.iter().filter(|r| r.is_match()).count()
    }
}

/// Ingestion followed by parallel pricing.
#[derive(Debug, Clone)]
pub struct AuctionPipeline {
    ticks: TickTable,
    scheduler: FanoutScheduler,
}

impl AuctionPipeline {
    #[must_use]
    pub fn new(ticks: TickTable, scheduler: FanoutScheduler) -> Self {
        Self { ticks, scheduler }
    }

    /// Build from a validated configuration.
    ///
    /// # Errors
    /// `InvalidWorkerCount` or `InvalidTickSize` from the configuration.
    pub fn from_config(config: &AuctionConfig) -> Result<Self> {
        config.validate()?;
        let scheduler = match config.workers {
            Some(workers) => FanoutScheduler::new(workers)?,
            None => FanoutScheduler::with_available_parallelism(),
        };
        Ok(Self::new(config.tick_table()?, scheduler))
    }

    #[must_use]
    pub fn scheduler(&self) -> &FanoutScheduler {
        &self.scheduler
    }

    /// Ingest a row stream into a frozen book.
    ///
    /// # Errors
    /// The first non-row-level error from the stream.
    pub fn group<I>(&self, rows: I) -> Result<GroupedBook>
    where
        I: IntoIterator<Item = Result<RawRow>>,
    {
        let mut grouper = InstrumentGrouper::new(self.ticks.clone());
        grouper.ingest(rows)?;
        Ok(grouper.freeze())
    }

    /// Run the full pipeline over a row stream.
    ///
    /// Pricing starts only after the whole stream has been grouped.
    ///
    /// # Errors
    /// - `SourceUnavailable` if the stream fails
    /// - any error from [`FanoutScheduler::run`]
    pub fn run<I>(&self, rows: I) -> Result<PipelineReport>
    where
        I: IntoIterator<Item = Result<RawRow>>,
    {
        let started = Instant::now();
        let mut book = self.group(rows)?;
        let grouped_at = started.elapsed();

        let results = self.scheduler.run(&book)?;
        let result_root = result_root_hex(&results);

        tracing::info!(
            instruments = results.len(),
            grouping_ms = grouped_at.as_millis(),
            total_ms = started.elapsed().as_millis(),
            result_root = %result_root,
            "Pricing complete"
        );

        Ok(PipelineReport {
            workers: self.scheduler.effective_workers(book.len()),
            stats: book.stats(),
            rejections: book.take_rejections(),
            results,
            result_root,
        })
    }

    /// Run over CSV from any reader.
    ///
    /// # Errors
    /// Same as [`AuctionPipeline::run`].
    pub fn run_reader<R: Read>(&self, reader: R) -> Result<PipelineReport> {
        self.run(RowSource::from_reader(reader))
    }

    /// Run over a CSV file.
    ///
    /// # Errors
    /// `SourceUnavailable` if the file cannot be opened or read.
    pub fn run_path(&self, path: &Path) -> Result<PipelineReport> {
        self.run(RowSource::open(path)?)
    }
}

impl Default for AuctionPipeline {
    fn default() -> Self {
        Self::new(TickTable::cffex(), FanoutScheduler::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(workers: usize) -> AuctionPipeline {
        AuctionPipeline::new(TickTable::cffex(), FanoutScheduler::new(workers).unwrap())
    }

    #[test]
    fn config_workers_are_used() {
        let config = AuctionConfig {
            workers: Some(3),
            ..AuctionConfig::cffex()
        };
        let pipeline = AuctionPipeline::from_config(&config).unwrap();
        assert_eq!(pipeline.scheduler().workers(), 3);
    }

    #[test]
    fn zero_workers_in_config_rejected() {
        let config = AuctionConfig {
            workers: Some(0),
            ..AuctionConfig::cffex()
        };
        assert!(matches!(
            AuctionPipeline::from_config(&config),
            Err(AuctionError::InvalidWorkerCount)
        ));
    }

    #[test]
    fn report_carries_rejections_and_stats() {
        let input = "IF2412,0,3973.4,3\nIF2412,x,3973.4,3\n\nIF2412,1,3973.2,2\n";
        let report = pipeline(2).run_reader(input.as_bytes()).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.matched(), 1);
        assert_eq!(report.stats.rows_accepted, 2);
        assert_eq!(report.stats.rows_rejected, 1);
        assert_eq!(report.rejections.len(), 1);
        assert_eq!(report.workers, 1);
        assert_eq!(report.result_root.len(), 64);
    }

    #[test]
    fn stray_quote_drops_only_its_row() {
        let input = "\
IF2412,0,3973.4,3
\"IF9999,0,1.0,1
IF2412,1,3973.2,2
IF2306,0,3972.2,2
IF2306,1,3972.0,1
";
        let report = pipeline(2).run_reader(input.as_bytes()).unwrap();
        let prices: Vec<(&str, Option<String>)> = report
            .results
            .iter()
            .map(|r| (r.instrument.as_str(), r.scaled_price().map(|p| p.to_string())))
            .collect();
        assert_eq!(
            prices,
            vec![
                ("IF2412", Some("3973.4".to_string())),
                ("IF2306", Some("3972.2".to_string())),
            ]
        );
        assert_eq!(report.stats.rows_accepted, 4);
        assert_eq!(report.stats.rows_rejected, 1);
        assert!(matches!(
            report.rejections[0],
            AuctionError::FieldInvalid { line: 2, field: "instrument", .. }
        ));
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = pipeline(4).run_reader(&b""[..]).unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.workers, 1);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = pipeline(1)
            .run_path(Path::new("/nonexistent/auctionmatch/input.csv"))
            .unwrap_err();
        assert!(matches!(err, AuctionError::SourceUnavailable(_)));
    }
}
