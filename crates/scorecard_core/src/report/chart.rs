//! # Bar Charts
//!
//! One PNG bar chart per leaderboard: player names along x, the metric on y.
//! Rows with a missing metric are not drawn, and a leaderboard with nothing
//! to draw produces no file.

use crate::analysis::{top_n, Leaderboard, LeaderboardKind, ScoredTable};
use crate::config::StatsConfig;
use crate::error::{Result, ScorecardError};
use crate::models::Column;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CHART_SIZE: (u32, u32) = (800, 600);

/// A chart drawn by the chart tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: LeaderboardKind,
    pub file_name: &'static str,
    pub title: &'static str,
}

impl ChartSpec {
    pub fn metric(&self) -> Column {
        self.kind.metric()
    }
}

pub const STANDARD_CHARTS: [ChartSpec; 3] = [
    ChartSpec {
        kind: LeaderboardKind::TopRunScorers,
        file_name: "top5_runs.png",
        title: "Top 5 Run Scorers",
    },
    ChartSpec {
        kind: LeaderboardKind::MostSixes,
        file_name: "top5_sixes.png",
        title: "Most Sixes (Top 5)",
    },
    ChartSpec {
        kind: LeaderboardKind::TopStrikeRate,
        file_name: "top5_strike_rate.png",
        title: "Highest Strike Rates (Top 5)",
    },
];

/// Drawable bars of one leaderboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl BarSeries {
    pub fn from_leaderboard(board: &Leaderboard, metric: Column) -> Self {
        let mut series = BarSeries::default();
        for (name, value) in board.column_values(metric) {
            if let Some(value) = value {
                series.labels.push(name.to_string());
                series.values.push(value);
            }
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Upper y bound with headroom above the tallest bar.
    fn y_max(&self) -> f64 {
        let max = self.values.iter().copied().fold(0.0_f64, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    Written(PathBuf),
    Skipped { file_name: &'static str },
}

fn chart_err<E: std::fmt::Display>(err: E) -> ScorecardError {
    ScorecardError::Chart(err.to_string())
}

/// Draw one bar chart to `path`.
pub fn draw_bar_chart(series: &BarSeries, spec: &ChartSpec, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let bars = series.values.len();
    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bars).into_segmented(), 0.0..series.y_max())
        .map_err(chart_err)?;

    let labels = &series.labels;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars)
        .x_desc(Column::Name.header())
        .y_desc(spec.metric().header())
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(12)
                .data(series.values.iter().enumerate().map(|(i, v)| (i, *v))),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Draw the standard charts into `outdir`, creating it if needed.
pub fn render_charts(
    table: &ScoredTable,
    config: &StatsConfig,
    outdir: &Path,
) -> Result<Vec<ChartOutcome>> {
    fs::create_dir_all(outdir)?;

    let mut outcomes = Vec::new();
    for spec in &STANDARD_CHARTS {
        let board = top_n(table, &spec.kind.query(config));
        let series = BarSeries::from_leaderboard(&board, spec.metric());
        if series.is_empty() {
            warn!(chart = spec.file_name, "nothing to plot, skipping chart");
            outcomes.push(ChartOutcome::Skipped {
                file_name: spec.file_name,
            });
            continue;
        }

        let path = outdir.join(spec.file_name);
        draw_bar_chart(&series, spec, &path)?;
        info!(path = %path.display(), bars = series.values.len(), "saved chart");
        outcomes.push(ChartOutcome::Written(path));
    }
    Ok(outcomes)
}
