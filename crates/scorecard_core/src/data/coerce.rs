//! Numeric coercion of raw text fields.
//!
//! Malformed values become the missing marker; nothing here can fail.

use crate::models::Column;
use csv::StringRecord;

/// Parse a raw field as a number. Empty, unparsable and non-finite fields are missing.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Position of each known column in the input header.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: Vec<(Column, usize)>,
}

impl HeaderIndex {
    /// First occurrence of a known header wins; unknown headers are ignored.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut positions: Vec<(Column, usize)> = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            let header = header.trim().trim_start_matches('\u{feff}');
            if let Some(column) = Column::from_header(header) {
                if !positions.iter().any(|(c, _)| *c == column) {
                    positions.push((column, idx));
                }
            }
        }
        Self { positions }
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, idx)| *idx)
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.positions.iter().map(|(c, _)| *c)
    }

    /// Raw field for a column; a short record yields `None`.
    pub fn field<'r>(&self, record: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.position(column).and_then(|idx| record.get(idx))
    }
}

/// Coerce the requested columns of one record.
///
/// Columns absent from the header are skipped silently, so the result only
/// holds columns that exist in the table.
pub fn coerce_columns(
    index: &HeaderIndex,
    record: &StringRecord,
    columns: &[Column],
) -> Vec<(Column, Option<f64>)> {
    columns
        .iter()
        .filter(|c| index.position(**c).is_some())
        .map(|c| (*c, index.field(record, *c).and_then(coerce_numeric)))
        .collect()
}
