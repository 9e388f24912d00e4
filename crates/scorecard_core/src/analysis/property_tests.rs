//! Property tests for derivation, ranking and aggregation.

use super::*;
use crate::config::StatsConfig;
use crate::data::BattingTable;
use crate::models::{BattingEntry, Column, ColumnSet};
use proptest::prelude::*;

fn maybe(range: std::ops::Range<u32>) -> impl Strategy<Value = Option<f64>> {
    prop::option::of(range.prop_map(f64::from))
}

fn entry_strategy() -> impl Strategy<Value = BattingEntry> {
    (
        "[A-E]",
        maybe(0..200),
        maybe(0..150),
        maybe(0..20),
        maybe(0..12),
        maybe(0..300),
    )
        .prop_map(|(name, runs, balls_faced, fours, sixes, strike_rate)| BattingEntry {
            name,
            runs,
            balls_faced,
            fours,
            sixes,
            strike_rate,
            match_id: None,
        })
}

fn table_strategy() -> impl Strategy<Value = ScoredTable> {
    prop::collection::vec(entry_strategy(), 0..25).prop_map(|entries| {
        let columns: ColumnSet = Column::INPUT.into_iter().collect();
        ScoredTable::derive(BattingTable::from_entries(columns, entries))
    })
}

proptest! {
    #[test]
    fn prop_top_runs_sorted_and_capped(table in table_strategy()) {
        let board = top_n(&table, &RankQuery::new(Column::Runs));
        prop_assert_eq!(board.len(), table.len().min(5));

        let values: Vec<Option<f64>> = board.rows.iter().map(|r| r.values[0]).collect();
        for pair in values.windows(2) {
            match (pair[0], pair[1]) {
                (Some(a), Some(b)) => prop_assert!(a >= b),
                (None, Some(_)) => prop_assert!(false, "missing ranked above a value"),
                _ => {}
            }
        }
    }

    #[test]
    fn prop_equal_runs_keep_input_order(table in table_strategy()) {
        let board = top_n(&table, &RankQuery::new(Column::Runs).limit(usize::MAX));
        // Rank position of each input row, recovered by walking in input order.
        let mut used = vec![false; table.len()];
        let mut positions = Vec::new();
        for row in &board.rows {
            let idx = table
                .rows()
                .iter()
                .enumerate()
                .position(|(i, r)| {
                    !used[i] && r.name() == row.name && r.value(Column::Runs) == row.values[0]
                })
                .expect("ranked row comes from the table");
            used[idx] = true;
            positions.push(idx);
        }
        for (i, pair) in board.rows.windows(2).enumerate() {
            if pair[0].values[0] == pair[1].values[0] {
                prop_assert!(positions[i] < positions[i + 1]);
            }
        }
    }

    #[test]
    fn prop_boundaries_treat_missing_as_zero(table in table_strategy()) {
        for row in table.rows() {
            let fours = row.entry.fours.unwrap_or(0.0);
            let sixes = row.entry.sixes.unwrap_or(0.0);
            prop_assert_eq!(row.value(Column::Boundaries), Some(fours + sixes));
            prop_assert_eq!(row.value(Column::BoundaryRuns), Some(4.0 * fours + 6.0 * sixes));
        }
    }

    #[test]
    fn prop_runs_per_ball_present_iff_inputs_valid(table in table_strategy()) {
        for row in table.rows() {
            match (row.entry.runs, row.entry.balls_faced) {
                (Some(runs), Some(balls)) if balls > 0.0 => {
                    prop_assert_eq!(row.value(Column::RunsPerBall), Some(runs / balls));
                }
                _ => prop_assert_eq!(row.value(Column::RunsPerBall), None),
            }
        }
    }

    #[test]
    fn prop_unreachable_threshold_gives_empty_strike_rate_board(table in table_strategy()) {
        let config = StatsConfig { min_balls: 1_000, ..Default::default() };
        let board = top_n(&table, &LeaderboardKind::TopStrikeRate.query(&config));
        prop_assert!(board.is_empty());
        prop_assert_eq!(board.columns.len(), 4);
    }

    #[test]
    fn prop_player_totals_sum_to_input_runs(table in table_strategy()) {
        let summary = per_player_totals(&table);
        let grouped: f64 = summary
            .rows
            .iter()
            .filter_map(|r| r.values[1])
            .sum();
        let input: f64 = table.rows().iter().filter_map(|r| r.entry.runs).sum();
        prop_assert!((grouped - input).abs() < 1e-9);

        let mut keys: Vec<&str> = summary.rows.iter().map(|r| r.key.as_str()).collect();
        let before = keys.len();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(before, keys.len());
    }
}
