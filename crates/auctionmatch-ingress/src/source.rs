//! Raw row source over CSV input.
//!
//! Rows carry no header. Fields are whitespace-trimmed and blank lines are
//! skipped. The reader is flexible about field counts so that a short or
//! long row surfaces as a row-level error instead of aborting the stream.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use auctionmatch_types::{AuctionError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

/// One input line split into trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the input.
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new<I, S>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    fn is_blank(&self) -> bool {
        self.fields.iter().all(String::is_empty)
    }
}

/// Streams [`RawRow`]s from a CSV reader.
///
/// Yields `Err` with a row-level error (see [`AuctionError::is_row_level`])
/// for undecodable rows and keeps going; an I/O failure yields
/// `SourceUnavailable` once and ends the stream.
pub struct RowSource<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
    finished: bool,
}

impl RowSource<File> {
    /// Open a CSV file.
    ///
    /// # Errors
    /// `SourceUnavailable` if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            AuctionError::SourceUnavailable(format!("{}: {e}", path.display()))
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> RowSource<R> {
    pub fn from_reader(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(reader);
        Self {
            reader,
            record: StringRecord::new(),
            finished: false,
        }
    }

    fn classify(&self, err: &csv::Error) -> AuctionError {
        match err.kind() {
            csv::ErrorKind::Utf8 { pos, err } => AuctionError::FieldInvalid {
                line: pos
                    .as_ref()
                    .map_or_else(|| self.reader.position().line(), csv::Position::line),
                field: "row",
                value: String::new(),
                reason: err.to_string(),
            },
            _ => AuctionError::SourceUnavailable(err.to_string()),
        }
    }
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }
            match self.reader.read_record(&mut self.record) {
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Ok(true) => {
                    let line = self
                        .record
                        .position()
                        .map_or_else(|| self.reader.position().line(), csv::Position::line);
                    let row = RawRow::new(line, self.record.iter());
                    if row.is_blank() {
                        continue;
                    }
                    return Some(Ok(row));
                }
                Err(err) => {
                    let err = self.classify(&err);
                    if !err.is_row_level() {
                        self.finished = true;
                    }
                    return Some(Err(err));
                }
            }
        }
    }
}
