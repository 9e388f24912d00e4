//! # Derived Metrics
//!
//! Row-level helper columns computed from coerced inputs:
//!
//! | column                 | formula                        | missing inputs        |
//! |------------------------|--------------------------------|-----------------------|
//! | `boundaries`           | fours + sixes                  | count as zero         |
//! | `boundary_runs`        | 4·fours + 6·sixes              | count as zero         |
//! | `runs_per_ball`        | runs / ballsFaced              | propagate (and if balls = 0) |
//! | `boundary_pct_of_runs` | boundary_runs / runs × 100     | propagate (and if runs = 0)  |
//!
//! The asymmetry is intentional: sums stay robust to partial data while
//! ratios never invent a value. A derived column exists only when its
//! prerequisite input columns exist.

use crate::data::BattingTable;
use crate::models::{BattingEntry, Column, ColumnSet};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedMetrics {
    pub boundaries: Option<f64>,
    pub boundary_runs: Option<f64>,
    pub runs_per_ball: Option<f64>,
    pub boundary_pct_of_runs: Option<f64>,
}

/// Input columns each derived column needs.
pub fn prerequisites(column: Column) -> &'static [Column] {
    match column {
        Column::Boundaries | Column::BoundaryRuns => &[Column::Fours, Column::Sixes],
        Column::RunsPerBall => &[Column::Runs, Column::BallsFaced],
        Column::BoundaryPctOfRuns => &[Column::Fours, Column::Sixes, Column::Runs],
        _ => &[],
    }
}

/// Input columns plus every derived column whose prerequisites are present.
pub fn derived_columns(input: ColumnSet) -> ColumnSet {
    let mut columns = input;
    for column in Column::DERIVED {
        if input.contains_all(prerequisites(column)) {
            columns.insert(column);
        }
    }
    columns
}

/// Compute the derived metrics of one entry. Pure; absent columns yield `None`.
pub fn derive_metrics(entry: &BattingEntry, input: ColumnSet) -> DerivedMetrics {
    let mut metrics = DerivedMetrics::default();

    if input.contains_all(prerequisites(Column::Boundaries)) {
        let fours = entry.fours.unwrap_or(0.0);
        let sixes = entry.sixes.unwrap_or(0.0);
        metrics.boundaries = Some(fours + sixes);
        metrics.boundary_runs = Some(fours * 4.0 + sixes * 6.0);
    }

    if input.contains_all(prerequisites(Column::RunsPerBall)) {
        metrics.runs_per_ball = match (entry.runs, entry.balls_faced) {
            (Some(runs), Some(balls)) if balls > 0.0 => finite(runs / balls),
            _ => None,
        };
    }

    if input.contains_all(prerequisites(Column::BoundaryPctOfRuns)) {
        metrics.boundary_pct_of_runs = match (metrics.boundary_runs, entry.runs) {
            (Some(boundary_runs), Some(runs)) if runs > 0.0 => {
                finite(boundary_runs / runs * 100.0)
            }
            _ => None,
        };
    }

    metrics
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// An entry together with its derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    pub entry: BattingEntry,
    pub metrics: DerivedMetrics,
}

impl ScoredEntry {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Numeric value of any input or derived column.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Boundaries => self.metrics.boundaries,
            Column::BoundaryRuns => self.metrics.boundary_runs,
            Column::RunsPerBall => self.metrics.runs_per_ball,
            Column::BoundaryPctOfRuns => self.metrics.boundary_pct_of_runs,
            other => self.entry.numeric(other),
        }
    }

    pub fn text(&self, column: Column) -> Option<&str> {
        self.entry.text(column)
    }
}

/// Immutable table of scored entries consumed by ranking and aggregation.
#[derive(Debug, Clone, Default)]
pub struct ScoredTable {
    columns: ColumnSet,
    rows: Vec<ScoredEntry>,
}

impl ScoredTable {
    pub fn derive(table: BattingTable) -> Self {
        let (input, entries) = table.into_parts();
        let rows = entries
            .into_iter()
            .map(|entry| {
                let metrics = derive_metrics(&entry, input);
                ScoredEntry { entry, metrics }
            })
            .collect();

        Self {
            columns: derived_columns(input),
            rows,
        }
    }

    pub fn columns(&self) -> ColumnSet {
        self.columns
    }

    pub fn rows(&self) -> &[ScoredEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
