//! # Batting Analysis
//!
//! Coerced table → derived metrics → {leaderboards, group summaries, scalars}.

pub mod aggregate;
pub mod derived;
pub mod ranking;
pub mod summary;

#[cfg(test)]
mod property_tests;

pub use aggregate::{
    group_summary, partition, per_match_totals, per_player_totals, AggFunc, Aggregation,
    GroupKey, GroupRow, GroupSummary, PER_MATCH_AGGREGATIONS, PER_PLAYER_AGGREGATIONS,
};
pub use derived::{derive_metrics, derived_columns, DerivedMetrics, ScoredEntry, ScoredTable};
pub use ranking::{
    standard_leaderboards, top_n, Leaderboard, LeaderboardKind, LeaderboardRow, Qualifier,
    RankQuery,
};
pub use summary::{ScalarSummary, StatsReport};
