//! # scorecard_core - Batting Scorecard Statistics
//!
//! Descriptive statistics and leaderboards for a cricket batting card.
//!
//! ## Pipeline
//! - `data`: CSV → required-column check → numeric coercion → `BattingTable`
//! - `analysis::derived`: helper columns (boundaries, ratios) → `ScoredTable`
//! - `analysis::ranking`: capped, stable top-N leaderboards
//! - `analysis::aggregate`: per-player and per-match group summaries
//! - `report`: terminal text, CSV export, PNG bar charts (`charts` feature)
//!
//! Malformed numbers never fail a run; they become missing values. Only a
//! missing `name` or `runs` column (or an I/O failure) is an error.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod report;

pub use analysis::{
    Leaderboard, LeaderboardKind, RankQuery, ScalarSummary, ScoredEntry, ScoredTable, StatsReport,
};
pub use config::StatsConfig;
pub use data::{BattingTable, LoadStats};
pub use error::{Result, ScorecardError};
pub use models::{BattingEntry, Column, ColumnSet};
