//! Result sink: `instrumentID,price` records in first-seen order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use auctionmatch_types::{AuctionError, EquilibriumResult, Result};

/// Record terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`, used on stdout.
    Lf,
    /// `\r\n`, used for output files.
    CrLf,
}

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Write one record per result. A result without a price gets an empty
/// price field.
pub fn write_results<W: Write>(
    out: &mut W,
    results: &[EquilibriumResult],
    ending: LineEnding,
) -> Result<()> {
    for result in results {
        write_record(out, result, ending).map_err(sink_error)?;
    }
    out.flush().map_err(sink_error)
}

fn write_record<W: Write>(
    out: &mut W,
    result: &EquilibriumResult,
    ending: LineEnding,
) -> std::io::Result<()> {
    match result.scaled_price() {
        Some(price) => write!(out, "{},{price}{}", result.instrument, ending.as_str()),
        None => write!(out, "{},{}", result.instrument, ending.as_str()),
    }
}

/// Create (or truncate) `path` and write every record with CRLF endings.
pub fn write_file(path: &Path, results: &[EquilibriumResult]) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        AuctionError::SinkUnavailable(format!("{}: {e}", path.display()))
    })?;
    let mut out = BufWriter::new(file);
    write_results(&mut out, results, LineEnding::CrLf)
}

/// Write every record to stdout with LF endings.
pub fn write_stdout(results: &[EquilibriumResult]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_results(&mut out, results, LineEnding::Lf)
}

fn sink_error(err: std::io::Error) -> AuctionError {
    AuctionError::SinkUnavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn result(instrument: &str, price: Option<Decimal>, scale: u32) -> EquilibriumResult {
        EquilibriumResult {
            instrument: instrument.into(),
            price,
            decimal_scale: scale,
        }
    }

    fn render(results: &[EquilibriumResult], ending: LineEnding) -> String {
        let mut buf = Vec::new();
        write_results(&mut buf, results, ending).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn records_follow_result_order() {
        let results = [
            result("IF2412", Some(Decimal::new(39734, 1)), 1),
            result("IF2306", None, 1),
            result("IC2306", Some(Decimal::new(50000, 1)), 0),
        ];
        assert_eq!(
            render(&results, LineEnding::Lf),
            "IF2412,3973.4\nIF2306,\nIC2306,5000\n"
        );
    }

    #[test]
    fn file_records_use_crlf() {
        let results = [result("IF2412", Some(Decimal::new(39722, 1)), 2)];
        assert_eq!(render(&results, LineEnding::CrLf), "IF2412,3972.20\r\n");
    }

    #[test]
    fn nothing_to_write_writes_nothing() {
        assert_eq!(render(&[], LineEnding::Lf), "");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_sink_unavailable() {
        let results = [result("IF2412", None, 1)];
        let err = write_results(&mut BrokenPipe, &results, LineEnding::Lf).unwrap_err();
        assert!(matches!(err, AuctionError::SinkUnavailable(_)));
    }

    #[test]
    fn uncreatable_file_is_sink_unavailable() {
        let err = write_file(Path::new("/nonexistent/auctionmatch/out.csv"), &[]).unwrap_err();
        assert!(matches!(err, AuctionError::SinkUnavailable(_)));
    }
}
