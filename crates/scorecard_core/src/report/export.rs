//! CSV export of leaderboards, group summaries and scalars.
//!
//! One file per artifact under the destination directory. Writes are
//! independent; a failure part-way leaves the files already written.

use crate::analysis::{GroupSummary, Leaderboard, ScalarSummary, StatsReport};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PER_PLAYER_FILE: &str = "per_player_totals.csv";
pub const PER_MATCH_FILE: &str = "per_match_totals.csv";
pub const SCALAR_SUMMARY_FILE: &str = "scalar_summary_expanded.csv";

/// Missing values are empty cells; integral values have no fractional part.
pub fn format_csv_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(path: &Path, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), "wrote csv");
    Ok(())
}

pub fn write_leaderboard(path: &Path, board: &Leaderboard) -> Result<()> {
    let headers: Vec<&str> = board.columns.iter().map(|c| c.header()).collect();
    let rows = board
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.name.clone())
                .chain(row.values.iter().map(|v| format_csv_value(*v)))
                .collect()
        })
        .collect();
    write_rows(path, &headers, rows)
}

pub fn write_group_summary(path: &Path, summary: &GroupSummary) -> Result<()> {
    let rows = summary
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.key.clone())
                .chain(row.values.iter().map(|v| format_csv_value(*v)))
                .collect()
        })
        .collect();
    write_rows(path, &summary.headers(), rows)
}

pub fn write_scalars(path: &Path, scalars: &ScalarSummary) -> Result<()> {
    write_rows(
        path,
        &[
            "average_runs",
            "total_runs",
            "total_boundaries",
            "total_boundary_runs",
        ],
        vec![vec![
            format_csv_value(scalars.average_runs),
            scalars.total_runs.to_string(),
            scalars.total_boundaries.to_string(),
            scalars.total_boundary_runs.to_string(),
        ]],
    )
}

/// Write every artifact of `report` under `outdir`, creating it if needed.
///
/// Returns the written paths in write order.
pub fn write_outputs(report: &StatsReport, outdir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(outdir)?;
    let mut written = Vec::new();

    for (kind, board) in &report.leaderboards {
        let path = outdir.join(format!("{}.csv", kind.key()));
        write_leaderboard(&path, board)?;
        written.push(path);
    }

    let path = outdir.join(PER_PLAYER_FILE);
    write_group_summary(&path, &report.per_player)?;
    written.push(path);

    if let Some(per_match) = &report.per_match {
        let path = outdir.join(PER_MATCH_FILE);
        write_group_summary(&path, per_match)?;
        written.push(path);
    }

    let path = outdir.join(SCALAR_SUMMARY_FILE);
    write_scalars(&path, &report.scalars)?;
    written.push(path);

    info!(outdir = %outdir.display(), files = written.len(), "exported results");
    Ok(written)
}
