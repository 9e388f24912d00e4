//! Human-readable report text.

use crate::analysis::{GroupSummary, Leaderboard, StatsReport};
use std::fmt::Write;

/// Format a column of values: integers when every value is integral,
/// otherwise two decimals. Missing values print as `NaN`.
fn format_column(values: &[Option<f64>]) -> Vec<String> {
    let integral = values
        .iter()
        .flatten()
        .all(|v| v.fract() == 0.0 && v.abs() < 1e15);
    values
        .iter()
        .map(|value| match value {
            None => "NaN".to_string(),
            Some(v) if integral => format!("{v:.0}"),
            Some(v) => format!("{v:.2}"),
        })
        .collect()
}

/// Right-aligned fixed-width table.
fn render_table(out: &mut String, headers: &[&str], columns: &[Vec<String>]) {
    let widths: Vec<usize> = headers
        .iter()
        .zip(columns)
        .map(|(h, cells)| cells.iter().map(|c| c.chars().count()).fold(h.len(), usize::max))
        .collect();

    let _ = writeln!(out, "{}", join_cells(headers, &widths));
    let rows = columns.first().map_or(0, Vec::len);
    for row in 0..rows {
        let cells: Vec<&str> = columns.iter().map(|c| c[row].as_str()).collect();
        let _ = writeln!(out, "{}", join_cells(&cells, &widths));
    }
}

fn join_cells(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:>width$}", width = *width))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_leaderboard(out: &mut String, board: &Leaderboard) {
    let headers: Vec<&str> = board.columns.iter().map(|c| c.header()).collect();
    let mut columns = vec![board.rows.iter().map(|r| r.name.clone()).collect::<Vec<_>>()];
    for pos in 0..board.columns.len() - 1 {
        let values: Vec<Option<f64>> = board
            .rows
            .iter()
            .map(|r| r.values.get(pos).copied().flatten())
            .collect();
        columns.push(format_column(&values));
    }
    render_table(out, &headers, &columns);
}

pub fn render_group_summary(out: &mut String, summary: &GroupSummary) {
    let headers = summary.headers();
    let mut columns = vec![summary.rows.iter().map(|r| r.key.clone()).collect::<Vec<_>>()];
    for pos in 0..summary.columns.len() {
        let values: Vec<Option<f64>> = summary
            .rows
            .iter()
            .map(|r| r.values.get(pos).copied().flatten())
            .collect();
        columns.push(format_column(&values));
    }
    render_table(out, &headers, &columns);
}

/// Render the full report: scalars, every leaderboard, then group summaries.
pub fn render_text(report: &StatsReport) -> String {
    let mut out = String::new();
    let scalars = &report.scalars;

    let _ = writeln!(out, "\n=== Expanded Batting Descriptive Statistics ===");
    let average = scalars
        .average_runs
        .map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
    let _ = writeln!(out, "• Average Runs per entry: {average}");
    let _ = writeln!(out, "• Total Runs: {}", scalars.total_runs);
    let _ = writeln!(out, "• Total Boundaries (4s + 6s): {}", scalars.total_boundaries);
    let _ = writeln!(
        out,
        "• Total Boundary Runs (4*4s + 6*6s): {}",
        scalars.total_boundary_runs
    );

    for (kind, board) in &report.leaderboards {
        let _ = writeln!(
            out,
            "\n• {} (Top {}):",
            kind.title(),
            report.config.leaderboard_size
        );
        if board.is_empty() {
            let _ = writeln!(
                out,
                "  No players qualified for the {} leaderboard.",
                kind.label()
            );
        } else {
            render_leaderboard(&mut out, board);
        }
    }

    let _ = writeln!(out, "\n• Per-Player Totals:");
    render_group_summary(&mut out, &report.per_player);

    if let Some(per_match) = &report.per_match {
        let _ = writeln!(out, "\n• Per-Match Totals:");
        render_group_summary(&mut out, per_match);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ScoredTable;
    use crate::config::StatsConfig;
    use crate::data::BattingTable;

    fn render(csv: &str, config: &StatsConfig) -> String {
        let table = BattingTable::from_reader(csv.as_bytes()).unwrap();
        render_text(&StatsReport::build(&ScoredTable::derive(table), config))
    }

    #[test]
    fn test_format_column() {
        assert_eq!(format_column(&[Some(50.0), None]), vec!["50", "NaN"]);
        assert_eq!(format_column(&[Some(1.25), Some(2.0)]), vec!["1.25", "2.00"]);
    }

    #[test]
    fn test_scalars_and_table_layout() {
        let text = render(
            "name,runs,ballsFaced,fours,sixes,strikeRate\nA,50,40,5,1,125.0\nBob,30,20,2,0,150.0\n",
            &StatsConfig::default(),
        );

        assert!(text.contains("• Average Runs per entry: 40.00\n"));
        assert!(text.contains("• Total Runs: 80\n"));
        assert!(text.contains("• Total Boundaries (4s + 6s): 8\n"));
        assert!(text.contains("• Total Boundary Runs (4*4s + 6*6s): 34\n"));
        assert!(text.contains("• Top Run Scorers (Top 5):\nname runs\n   A   50\n Bob   30\n"));
    }

    #[test]
    fn test_empty_leaderboard_prints_placeholder() {
        let config = StatsConfig {
            min_balls: 100,
            ..Default::default()
        };
        let text = render("name,runs,ballsFaced,strikeRate\nA,50,40,125\n", &config);
        assert!(text.contains("No players qualified for the strike-rate leaderboard."));
        assert!(!text.contains("• Per-Match Totals:"));
    }

    #[test]
    fn test_missing_average_prints_na() {
        let text = render("name,runs\nA,\n", &StatsConfig::default());
        assert!(text.contains("• Average Runs per entry: n/a"));
    }

}
