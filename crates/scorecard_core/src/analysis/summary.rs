//! Scalar summary and the assembled batting report.

use super::aggregate::{per_match_totals, per_player_totals, GroupSummary};
use super::derived::ScoredTable;
use super::ranking::{standard_leaderboards, Leaderboard, LeaderboardKind};
use crate::config::StatsConfig;
use crate::models::Column;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The four top-level scalars of a batting card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarSummary {
    /// Mean of non-missing runs; `None` when no entry has runs
    pub average_runs: Option<f64>,
    pub total_runs: i64,
    pub total_boundaries: i64,
    pub total_boundary_runs: i64,
}

impl ScalarSummary {
    pub fn compute(table: &ScoredTable) -> Self {
        let runs: Vec<f64> = table.rows().iter().filter_map(|r| r.value(Column::Runs)).collect();
        let average_runs = (!runs.is_empty()).then(|| runs.iter().sum::<f64>() / runs.len() as f64);

        Self {
            average_runs,
            total_runs: truncated_sum(table, Column::Runs),
            total_boundaries: truncated_sum(table, Column::Boundaries),
            total_boundary_runs: truncated_sum(table, Column::BoundaryRuns),
        }
    }
}

/// Sum with missing as zero, truncated toward zero.
fn truncated_sum(table: &ScoredTable, column: Column) -> i64 {
    table
        .rows()
        .iter()
        .filter_map(|r| r.value(column))
        .sum::<f64>() as i64
}

/// Everything the stats tool prints and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub config: StatsConfig,
    pub scalars: ScalarSummary,
    pub leaderboards: Vec<(LeaderboardKind, Leaderboard)>,
    pub per_player: GroupSummary,
    pub per_match: Option<GroupSummary>,
}

impl StatsReport {
    pub fn build(table: &ScoredTable, config: &StatsConfig) -> Self {
        let scalars = ScalarSummary::compute(table);
        let leaderboards = standard_leaderboards(table, config);
        let per_player = per_player_totals(table);
        let per_match = per_match_totals(table);

        debug!(
            rows = table.len(),
            players = per_player.rows.len(),
            matches = per_match.as_ref().map(|m| m.rows.len()),
            "built batting report"
        );

        Self {
            config: config.clone(),
            scalars,
            leaderboards,
            per_player,
            per_match,
        }
    }

    pub fn leaderboard(&self, kind: LeaderboardKind) -> Option<&Leaderboard> {
        self.leaderboards
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, board)| board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BattingTable;
    use crate::models::{BattingEntry, ColumnSet};

    #[test]
    fn test_scalars() {
        let columns: ColumnSet = Column::INPUT.into_iter().collect();
        let table = ScoredTable::derive(BattingTable::from_entries(
            columns,
            vec![
                BattingEntry::new("A").with_runs(50.0).with_boundaries(5.0, 1.0),
                BattingEntry::new("B").with_runs(31.0).with_boundaries(2.0, 0.0),
                BattingEntry::new("C"),
            ],
        ));
        let scalars = ScalarSummary::compute(&table);

        assert_eq!(scalars.average_runs, Some(40.5));
        assert_eq!(scalars.total_runs, 81);
        assert_eq!(scalars.total_boundaries, 8);
        assert_eq!(scalars.total_boundary_runs, 34);
    }

    #[test]
    fn test_scalars_without_boundary_columns_or_runs() {
        let columns: ColumnSet = [Column::Name, Column::Runs].into_iter().collect();
        let table = ScoredTable::derive(BattingTable::from_entries(
            columns,
            vec![BattingEntry::new("A")],
        ));
        let scalars = ScalarSummary::compute(&table);

        assert_eq!(scalars.average_runs, None);
        assert_eq!(scalars.total_runs, 0);
        assert_eq!(scalars.total_boundaries, 0);
        assert_eq!(scalars.total_boundary_runs, 0);
    }

    #[test]
    fn test_report_lookup_by_kind() {
        let columns: ColumnSet = [Column::Name, Column::Runs].into_iter().collect();
        let table = ScoredTable::derive(BattingTable::from_entries(
            columns,
            vec![BattingEntry::new("A").with_runs(3.0)],
        ));
        let report = StatsReport::build(&table, &StatsConfig::default());

        let runs = report.leaderboard(LeaderboardKind::TopRunScorers).unwrap();
        assert_eq!(runs.names(), vec!["A"]);
        assert!(report.per_match.is_none());
        assert_eq!(report.leaderboards.len(), 7);
    }
}
