//! # Aggregation Engine
//!
//! Partition rows by a group key into an ordered map, then reduce each
//! partition independently. Missing values are skipped: the sum of nothing
//! is 0, the mean and max of nothing are missing.

use super::derived::{ScoredEntry, ScoredTable};
use super::ranking::compare_missing_last;
use crate::models::Column;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AggFunc {
    /// Non-missing values in the group
    Count,
    Sum,
    Mean,
    Max,
}

/// One output column of a group summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregation {
    pub output: &'static str,
    pub source: Column,
    pub func: AggFunc,
}

impl Aggregation {
    pub const fn new(output: &'static str, source: Column, func: AggFunc) -> Self {
        Self {
            output,
            source,
            func,
        }
    }

    fn reduce(&self, members: &[&ScoredEntry]) -> Option<f64> {
        let values = || members.iter().filter_map(|row| row.value(self.source));
        match self.func {
            AggFunc::Count => {
                let count = members
                    .iter()
                    .filter(|row| {
                        if self.source.is_numeric() {
                            row.value(self.source).is_some()
                        } else {
                            row.text(self.source).is_some()
                        }
                    })
                    .count();
                Some(count as f64)
            }
            AggFunc::Sum => Some(values().sum()),
            AggFunc::Mean => {
                let (sum, n) = values().fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
                (n > 0).then(|| sum / n as f64)
            }
            AggFunc::Max => values().reduce(f64::max),
        }
    }
}

pub const PER_PLAYER_AGGREGATIONS: [Aggregation; 8] = [
    Aggregation::new("innings", Column::Name, AggFunc::Count),
    Aggregation::new("total_runs", Column::Runs, AggFunc::Sum),
    Aggregation::new("avg_runs", Column::Runs, AggFunc::Mean),
    Aggregation::new("max_score", Column::Runs, AggFunc::Max),
    Aggregation::new("total_fours", Column::Fours, AggFunc::Sum),
    Aggregation::new("total_sixes", Column::Sixes, AggFunc::Sum),
    Aggregation::new("avg_sr", Column::StrikeRate, AggFunc::Mean),
    Aggregation::new("total_balls", Column::BallsFaced, AggFunc::Sum),
];

pub const PER_MATCH_AGGREGATIONS: [Aggregation; 4] = [
    Aggregation::new("total_runs", Column::Runs, AggFunc::Sum),
    Aggregation::new("max_individual", Column::Runs, AggFunc::Max),
    Aggregation::new("avg_sr", Column::StrikeRate, AggFunc::Mean),
    Aggregation::new("entries", Column::Name, AggFunc::Count),
];

/// Group key ordering: numeric-looking keys first by value, then text keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key for an identifier column: numeric-looking values are canonicalised
    /// so `1`, `1.0` and `01` land in the same group.
    pub fn normalized(key: &str) -> Self {
        match key.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self(value.to_string()),
            _ => Self::new(key),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_value = match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_value.then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Partition rows by the text value of `key`. Rows without a key are left out.
///
/// Player names group verbatim; other keys (match ids) group by numeric value
/// when they look numeric.
pub fn partition(table: &ScoredTable, key: Column) -> BTreeMap<GroupKey, Vec<&ScoredEntry>> {
    let mut groups: BTreeMap<GroupKey, Vec<&ScoredEntry>> = BTreeMap::new();
    for row in table.rows() {
        if let Some(value) = row.text(key) {
            let group = match key {
                Column::Name => GroupKey::new(value),
                _ => GroupKey::normalized(value),
            };
            groups.entry(group).or_default().push(row);
        }
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub key: String,
    /// One value per aggregation, in order.
    pub values: Vec<Option<f64>>,
}

/// One row per distinct group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key_column: Column,
    pub columns: Vec<&'static str>,
    pub rows: Vec<GroupRow>,
}

impl GroupSummary {
    pub fn headers(&self) -> Vec<&'static str> {
        std::iter::once(self.key_column.header())
            .chain(self.columns.iter().copied())
            .collect()
    }

    pub fn row(&self, key: &str) -> Option<&GroupRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn value(&self, key: &str, column: &str) -> Option<f64> {
        let pos = self.columns.iter().position(|c| *c == column)?;
        self.row(key)?.values.get(pos).copied().flatten()
    }

    /// Stable sort by one output column, missing values last.
    pub fn sort_by_column(&mut self, column: &str, ascending: bool) {
        let Some(pos) = self.columns.iter().position(|c| *c == column) else {
            return;
        };
        self.rows.sort_by(|a, b| {
            compare_missing_last(
                a.values.get(pos).copied().flatten(),
                b.values.get(pos).copied().flatten(),
                ascending,
            )
        });
    }
}

/// Summarise `table` grouped by `group_key`, rows in group-key order.
pub fn group_summary(
    table: &ScoredTable,
    group_key: Column,
    aggregations: &[Aggregation],
) -> GroupSummary {
    let rows = partition(table, group_key)
        .into_iter()
        .map(|(key, members)| GroupRow {
            key: key.0,
            values: aggregations.iter().map(|agg| agg.reduce(&members)).collect(),
        })
        .collect();

    GroupSummary {
        key_column: group_key,
        columns: aggregations.iter().map(|agg| agg.output).collect(),
        rows,
    }
}

/// Per-player totals, sorted by total runs descending.
pub fn per_player_totals(table: &ScoredTable) -> GroupSummary {
    let mut summary = group_summary(table, Column::Name, &PER_PLAYER_AGGREGATIONS);
    summary.sort_by_column("total_runs", false);
    summary
}

/// Per-match totals; `None` when the input has no `match_id` column.
pub fn per_match_totals(table: &ScoredTable) -> Option<GroupSummary> {
    table
        .columns()
        .contains(Column::MatchId)
        .then(|| group_summary(table, Column::MatchId, &PER_MATCH_AGGREGATIONS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BattingTable;
    use crate::models::{BattingEntry, ColumnSet};

    fn table(columns: &[Column], entries: Vec<BattingEntry>) -> ScoredTable {
        let columns: ColumnSet = columns.iter().copied().collect();
        ScoredTable::derive(BattingTable::from_entries(columns, entries))
    }

    fn multi_match() -> ScoredTable {
        table(
            &Column::INPUT,
            vec![
                BattingEntry::new("A")
                    .with_runs(50.0)
                    .with_balls_faced(40.0)
                    .with_boundaries(5.0, 1.0)
                    .with_strike_rate(125.0)
                    .with_match_id("10"),
                BattingEntry::new("B")
                    .with_runs(30.0)
                    .with_balls_faced(20.0)
                    .with_boundaries(2.0, 0.0)
                    .with_strike_rate(150.0)
                    .with_match_id("10"),
                BattingEntry::new("A")
                    .with_runs(70.0)
                    .with_balls_faced(50.0)
                    .with_boundaries(6.0, 3.0)
                    .with_strike_rate(140.0)
                    .with_match_id("2"),
                BattingEntry::new("C").with_match_id("2"),
            ],
        )
    }

    #[test]
    fn test_per_player_totals() {
        let summary = per_player_totals(&multi_match());

        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0].key, "A");
        assert_eq!(summary.value("A", "innings"), Some(2.0));
        assert_eq!(summary.value("A", "total_runs"), Some(120.0));
        assert_eq!(summary.value("A", "avg_runs"), Some(60.0));
        assert_eq!(summary.value("A", "max_score"), Some(70.0));
        assert_eq!(summary.value("A", "total_fours"), Some(11.0));
        assert_eq!(summary.value("A", "total_sixes"), Some(4.0));
        assert_eq!(summary.value("A", "avg_sr"), Some(132.5));
        assert_eq!(summary.value("A", "total_balls"), Some(90.0));
    }

    #[test]
    fn test_all_missing_group_sums_to_zero_and_means_missing() {
        let summary = per_player_totals(&multi_match());

        assert_eq!(summary.value("C", "innings"), Some(1.0));
        assert_eq!(summary.value("C", "total_runs"), Some(0.0));
        assert_eq!(summary.value("C", "avg_runs"), None);
        assert_eq!(summary.value("C", "max_score"), None);
        // C sorts after B (0 < 30)
        assert_eq!(summary.rows[2].key, "C");
    }

    #[test]
    fn test_per_match_totals_numeric_key_order() {
        let summary = per_match_totals(&multi_match()).unwrap();

        let keys: Vec<&str> = summary.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["2", "10"]);
        assert_eq!(summary.value("10", "total_runs"), Some(80.0));
        assert_eq!(summary.value("10", "max_individual"), Some(50.0));
        assert_eq!(summary.value("10", "avg_sr"), Some(137.5));
        assert_eq!(summary.value("10", "entries"), Some(2.0));
        assert_eq!(summary.value("2", "entries"), Some(2.0));
        assert_eq!(
            summary.headers(),
            vec!["match_id", "total_runs", "max_individual", "avg_sr", "entries"]
        );
    }

    #[test]
    fn test_per_match_totals_absent_without_match_column() {
        let t = table(
            &[Column::Name, Column::Runs],
            vec![BattingEntry::new("A").with_runs(1.0)],
        );
        assert!(per_match_totals(&t).is_none());
    }

    #[test]
    fn test_absent_source_column_behaves_as_all_missing() {
        let t = table(
            &[Column::Name, Column::Runs],
            vec![BattingEntry::new("A").with_runs(12.0)],
        );
        let summary = per_player_totals(&t);
        assert_eq!(summary.value("A", "total_fours"), Some(0.0));
        assert_eq!(summary.value("A", "avg_sr"), None);
    }

    #[test]
    fn test_group_key_ordering() {
        let mut keys = vec![
            GroupKey::new("b"),
            GroupKey::new("10"),
            GroupKey::new("a"),
            GroupKey::new("2"),
        ];
        keys.sort();
        let ordered: Vec<&str> = keys.iter().map(GroupKey::as_str).collect();
        assert_eq!(ordered, vec!["2", "10", "a", "b"]);
    }

    #[test]
    fn test_equal_numeric_match_ids_share_a_group() {
        let summary = per_match_totals(&table(
            &Column::INPUT,
            vec![
                BattingEntry::new("A").with_runs(5.0).with_match_id("1"),
                BattingEntry::new("B").with_runs(6.0).with_match_id("1.0"),
                BattingEntry::new("C").with_runs(7.0).with_match_id("01"),
                BattingEntry::new("D").with_runs(8.0).with_match_id("final"),
            ],
        ))
        .unwrap();

        let keys: Vec<&str> = summary.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "final"]);
        assert_eq!(summary.value("1", "total_runs"), Some(18.0));
        assert_eq!(summary.value("1", "entries"), Some(3.0));
    }

    #[test]
    fn test_player_names_group_verbatim() {
        let summary = per_player_totals(&table(
            &[Column::Name, Column::Runs],
            vec![
                BattingEntry::new("007").with_runs(5.0),
                BattingEntry::new("7").with_runs(6.0),
            ],
        ));
        assert_eq!(summary.rows.len(), 2);
    }

    #[test]
    fn test_rows_without_key_are_left_out() {
        let summary = per_match_totals(&table(
            &Column::INPUT,
            vec![
                BattingEntry::new("A").with_runs(5.0).with_match_id("1"),
                BattingEntry::new("B").with_runs(6.0),
            ],
        ))
        .unwrap();
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.value("1", "total_runs"), Some(5.0));
    }
}
