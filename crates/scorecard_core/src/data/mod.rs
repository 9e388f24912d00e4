//! # Scorecard Loading
//!
//! CSV → header validation → per-record coercion → `BattingTable`.
//!
//! Required columns are checked as soon as the header is read, so a bad
//! input fails before any row is processed or any output is produced.

pub mod coerce;

pub use coerce::{coerce_columns, coerce_numeric, HeaderIndex};

use crate::error::{Result, ScorecardError};
use crate::models::{BattingEntry, Column, ColumnSet};
use csv::StringRecord;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// CSV loading statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub total_rows: u32,
    pub loaded: u32,
    pub skipped: u32,
}

/// Coerced batting entries plus the set of known columns the input carried.
#[derive(Debug, Clone, Default)]
pub struct BattingTable {
    columns: ColumnSet,
    entries: Vec<BattingEntry>,
    stats: LoadStats,
}

impl BattingTable {
    pub fn from_entries(columns: ColumnSet, entries: Vec<BattingEntry>) -> Self {
        let count = entries.len() as u32;
        Self {
            columns,
            entries,
            stats: LoadStats {
                total_rows: count,
                loaded: count,
                skipped: 0,
            },
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = reader_builder().from_path(path)?;
        let table = Self::from_csv(reader)?;
        info!(
            path = %path.display(),
            rows = table.stats.loaded,
            skipped = table.stats.skipped,
            "loaded batting card"
        );
        Ok(table)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Self::from_csv(reader_builder().from_reader(reader))
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        // invalid UTF-8 decodes lossily; a garbled numeric cell coerces to missing
        let headers = StringRecord::from_byte_record_lossy(reader.byte_headers()?.clone());
        let index = HeaderIndex::from_headers(&headers);
        let columns: ColumnSet = index.columns().collect();

        let missing = columns.missing_required();
        if !missing.is_empty() {
            return Err(ScorecardError::MissingColumns {
                missing: missing.iter().map(|c| c.header().to_string()).collect(),
            });
        }

        let mut entries = Vec::new();
        let mut stats = LoadStats::default();

        for result in reader.byte_records() {
            let record = StringRecord::from_byte_record_lossy(result?);
            stats.total_rows += 1;

            match parse_entry(&index, &record) {
                Some(entry) => {
                    entries.push(entry);
                    stats.loaded += 1;
                }
                None => {
                    stats.skipped += 1;
                    warn!(row = stats.total_rows, "skipping entry with empty name");
                }
            }
        }

        debug!(?stats, ?columns, "coerced batting table");
        Ok(Self {
            columns,
            entries,
            stats,
        })
    }

    pub fn columns(&self) -> ColumnSet {
        self.columns
    }

    pub fn entries(&self) -> &[BattingEntry] {
        &self.entries
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_parts(self) -> (ColumnSet, Vec<BattingEntry>) {
        (self.columns, self.entries)
    }
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// Build an entry from one record; `None` when the name is blank.
fn parse_entry(index: &HeaderIndex, record: &StringRecord) -> Option<BattingEntry> {
    let name = index.field(record, Column::Name).unwrap_or("").trim();
    if name.is_empty() {
        return None;
    }

    let mut entry = BattingEntry::new(name);
    for (column, value) in coerce_columns(index, record, &Column::NUMERIC_INPUT) {
        match column {
            Column::Runs => entry.runs = value,
            // balls faced cannot be negative
            Column::BallsFaced => entry.balls_faced = value.filter(|v| *v >= 0.0),
            Column::Fours => entry.fours = value,
            Column::Sixes => entry.sixes = value,
            Column::StrikeRate => entry.strike_rate = value,
            _ => {}
        }
    }
    entry.match_id = index
        .field(record, Column::MatchId)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    Some(entry)
}
