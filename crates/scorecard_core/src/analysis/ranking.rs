//! # Ranking Engine
//!
//! Fixed-size leaderboards over a `ScoredTable`.
//!
//! Ordering rules:
//! - sort key descending unless `ascending()` is requested
//! - missing sort values go last in either direction
//! - ties keep input order (stable sort)
//!
//! An absent sort-key column, or an empty qualifying set, gives an empty
//! leaderboard that still carries its projected columns.

use super::derived::{ScoredEntry, ScoredTable};
use crate::config::{StatsConfig, DEFAULT_LEADERBOARD_SIZE};
use crate::models::Column;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

pub type Qualifier = Box<dyn Fn(&ScoredEntry) -> bool>;

/// Describes one leaderboard: sort key, size, filters and projection.
pub struct RankQuery {
    sort_key: Column,
    limit: usize,
    ascending: bool,
    drop_missing: bool,
    qualifier: Option<Qualifier>,
    projection: Vec<Column>,
}

impl fmt::Debug for RankQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankQuery")
            .field("sort_key", &self.sort_key)
            .field("limit", &self.limit)
            .field("ascending", &self.ascending)
            .field("drop_missing", &self.drop_missing)
            .field("qualified", &self.qualifier.is_some())
            .field("projection", &self.projection)
            .finish()
    }
}

impl RankQuery {
    /// Top 5 by `sort_key`, descending, projected to name + sort key.
    pub fn new(sort_key: Column) -> Self {
        Self {
            sort_key,
            limit: DEFAULT_LEADERBOARD_SIZE,
            ascending: false,
            drop_missing: false,
            qualifier: None,
            projection: vec![sort_key],
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn ascending(mut self) -> Self {
        self.ascending = true;
        self
    }

    /// Exclude rows whose sort value is missing before ranking.
    pub fn drop_missing(mut self) -> Self {
        self.drop_missing = true;
        self
    }

    /// Exclude rows failing `predicate` before ranking.
    pub fn qualify(mut self, predicate: impl Fn(&ScoredEntry) -> bool + 'static) -> Self {
        self.qualifier = Some(Box::new(predicate));
        self
    }

    /// Value columns shown after the name. `Name` is always the first column.
    pub fn project(mut self, columns: &[Column]) -> Self {
        self.projection = columns
            .iter()
            .copied()
            .filter(|c| *c != Column::Name)
            .collect();
        self
    }

    fn columns(&self) -> Vec<Column> {
        std::iter::once(Column::Name)
            .chain(self.projection.iter().copied())
            .collect()
    }

    fn admits(&self, row: &ScoredEntry) -> bool {
        if self.drop_missing && row.value(self.sort_key).is_none() {
            return false;
        }
        self.qualifier.as_ref().map_or(true, |q| q(row))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub name: String,
    /// One value per projected column after `name`.
    pub values: Vec<Option<f64>>,
}

/// A ranked, size-capped subset of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    /// Projected columns; `Name` first.
    pub columns: Vec<Column>,
    pub rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    pub fn empty(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }

    /// `(name, value)` pairs of one projected column, in rank order.
    pub fn column_values(&self, column: Column) -> Vec<(&str, Option<f64>)> {
        let Some(pos) = self.columns.iter().skip(1).position(|c| *c == column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .map(|r| (r.name.as_str(), r.values.get(pos).copied().flatten()))
            .collect()
    }
}

/// Missing values last; present values by direction.
pub(crate) fn compare_missing_last(a: Option<f64>, b: Option<f64>, ascending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank `table` by the query and return at most `limit` projected rows.
pub fn top_n(table: &ScoredTable, query: &RankQuery) -> Leaderboard {
    let columns = query.columns();
    if !table.columns().contains(query.sort_key) {
        return Leaderboard::empty(columns);
    }

    let key = query.sort_key;
    let mut candidates: Vec<&ScoredEntry> =
        table.rows().iter().filter(|row| query.admits(row)).collect();
    candidates.sort_by(|a, b| compare_missing_last(a.value(key), b.value(key), query.ascending));
    candidates.truncate(query.limit);

    let rows = candidates
        .into_iter()
        .map(|row| LeaderboardRow {
            name: row.name().to_string(),
            values: columns[1..].iter().map(|c| row.value(*c)).collect(),
        })
        .collect();

    Leaderboard { columns, rows }
}

/// The named leaderboards of a batting report, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LeaderboardKind {
    TopRunScorers,
    TopStrikeRate,
    MostSixes,
    MostFours,
    MostBallsFaced,
    BestRunsPerBall,
    BestBoundaryRatio,
}

impl LeaderboardKind {
    pub const ALL: [LeaderboardKind; 7] = [
        LeaderboardKind::TopRunScorers,
        LeaderboardKind::TopStrikeRate,
        LeaderboardKind::MostSixes,
        LeaderboardKind::MostFours,
        LeaderboardKind::MostBallsFaced,
        LeaderboardKind::BestRunsPerBall,
        LeaderboardKind::BestBoundaryRatio,
    ];

    /// Export file stem.
    pub fn key(self) -> &'static str {
        match self {
            LeaderboardKind::TopRunScorers => "top5_run_scorers",
            LeaderboardKind::TopStrikeRate => "top_strike_rate",
            LeaderboardKind::MostSixes => "most_sixes",
            LeaderboardKind::MostFours => "most_fours",
            LeaderboardKind::MostBallsFaced => "most_balls_faced",
            LeaderboardKind::BestRunsPerBall => "best_runs_per_ball",
            LeaderboardKind::BestBoundaryRatio => "best_boundary_ratio",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LeaderboardKind::TopRunScorers => "Top Run Scorers",
            LeaderboardKind::TopStrikeRate => "Highest Strike Rates (min balls faced filter applied)",
            LeaderboardKind::MostSixes => "Most Sixes",
            LeaderboardKind::MostFours => "Most Fours",
            LeaderboardKind::MostBallsFaced => "Most Balls Faced",
            LeaderboardKind::BestRunsPerBall => "Best Runs per Ball",
            LeaderboardKind::BestBoundaryRatio => "Highest Boundary % of Runs",
        }
    }

    /// Short label used in the "no players qualified" placeholder.
    pub fn label(self) -> &'static str {
        match self {
            LeaderboardKind::TopRunScorers => "run-scorers",
            LeaderboardKind::TopStrikeRate => "strike-rate",
            LeaderboardKind::MostSixes => "sixes",
            LeaderboardKind::MostFours => "fours",
            LeaderboardKind::MostBallsFaced => "balls-faced",
            LeaderboardKind::BestRunsPerBall => "runs-per-ball",
            LeaderboardKind::BestBoundaryRatio => "boundary-ratio",
        }
    }

    /// The metric this leaderboard ranks by.
    pub fn metric(self) -> Column {
        match self {
            LeaderboardKind::TopRunScorers => Column::Runs,
            LeaderboardKind::TopStrikeRate => Column::StrikeRate,
            LeaderboardKind::MostSixes => Column::Sixes,
            LeaderboardKind::MostFours => Column::Fours,
            LeaderboardKind::MostBallsFaced => Column::BallsFaced,
            LeaderboardKind::BestRunsPerBall => Column::RunsPerBall,
            LeaderboardKind::BestBoundaryRatio => Column::BoundaryPctOfRuns,
        }
    }

    pub fn query(self, config: &StatsConfig) -> RankQuery {
        let query = RankQuery::new(self.metric()).limit(config.leaderboard_size);
        match self {
            LeaderboardKind::TopStrikeRate => {
                let min_balls = f64::from(config.min_balls);
                query
                    .qualify(move |row| {
                        row.value(Column::BallsFaced)
                            .is_some_and(|balls| balls >= min_balls)
                    })
                    .project(&[Column::StrikeRate, Column::Runs, Column::BallsFaced])
            }
            LeaderboardKind::BestRunsPerBall => query.drop_missing().project(&[
                Column::Runs,
                Column::BallsFaced,
                Column::RunsPerBall,
            ]),
            LeaderboardKind::BestBoundaryRatio => query.drop_missing().project(&[
                Column::Runs,
                Column::BoundaryRuns,
                Column::BoundaryPctOfRuns,
            ]),
            _ => query,
        }
    }
}

/// Every named leaderboard, in `LeaderboardKind::ALL` order.
pub fn standard_leaderboards(
    table: &ScoredTable,
    config: &StatsConfig,
) -> Vec<(LeaderboardKind, Leaderboard)> {
    LeaderboardKind::ALL
        .into_iter()
        .map(|kind| (kind, top_n(table, &kind.query(config))))
        .collect()
}
