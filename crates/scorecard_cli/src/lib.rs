//! Shared pieces of the `batting_stats` and `batting_charts` tools:
//! argument definitions, logging setup and the run functions.

use anyhow::{Context, Result};
use clap::{Args, Parser};
use scorecard_core::report::{render_text, write_outputs, RunManifest};
use scorecard_core::{BattingTable, ScoredTable, StatsConfig, StatsReport};
use scorecard_core::ScorecardError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the batting card CSV (requires `name` and `runs` columns)
    #[arg(long)]
    pub csv: PathBuf,

    /// Minimum balls faced for the strike-rate leaderboard [default: 10]
    #[arg(long)]
    pub min_balls: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "batting_stats")]
#[command(about = "Expanded descriptive stats for a cricket batting scorecard", long_about = None)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory to save CSV outputs (optional)
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Rows per leaderboard, 1 to 5 [default: 5]
    #[arg(long)]
    pub top: Option<usize>,

    /// Write a JSON run manifest to this path
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "batting_charts")]
#[command(about = "Create bar charts for batting stats", long_about = None)]
pub struct ChartArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory to save images
    #[arg(long, default_value = "plots")]
    pub outdir: PathBuf,
}

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Exit status for a run that failed on bad input or configuration.
pub const EXIT_INPUT_ERROR: u8 = 2;
/// Exit status for any other failure (I/O, chart rendering).
pub const EXIT_FAILURE: u8 = 1;

/// Exit status for a failed run, chosen by the underlying scorecard error.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let input_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ScorecardError>())
        .is_some_and(ScorecardError::is_input_error);
    if input_error {
        EXIT_INPUT_ERROR
    } else {
        EXIT_FAILURE
    }
}

/// Print the error chain to stderr and map it to an exit code.
pub fn report_failure(err: &anyhow::Error) -> ExitCode {
    eprintln!("❌ Error: {err:#}");
    ExitCode::from(exit_code(err))
}

/// Base config from `SCORECARD_CONFIG_PATH` (defaults when unset).
pub fn base_config() -> Result<StatsConfig> {
    StatsConfig::from_env().context("Failed to load config")
}

/// `base` with command-line overrides applied, validated.
pub fn resolve_config(
    base: StatsConfig,
    min_balls: Option<u32>,
    top: Option<usize>,
) -> Result<StatsConfig> {
    let config = base.with_overrides(min_balls, top);
    config.validate()?;
    debug!(?config, "resolved config");
    Ok(config)
}

fn load_scored(path: &Path) -> Result<(ScoredTable, scorecard_core::LoadStats)> {
    let table = BattingTable::from_path(path)
        .with_context(|| format!("Failed to load batting card: {}", path.display()))?;
    let stats = table.stats();
    Ok((ScoredTable::derive(table), stats))
}

fn display_path(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

/// Run the stats tool with the config file named by `SCORECARD_CONFIG_PATH`.
pub fn run_stats(args: &StatsArgs, out: &mut dyn Write) -> Result<StatsReport> {
    run_stats_with(base_config()?, args, out)
}

/// Print the report to `out`, export when `--outdir` is set.
pub fn run_stats_with(
    base: StatsConfig,
    args: &StatsArgs,
    out: &mut dyn Write,
) -> Result<StatsReport> {
    let config = resolve_config(base, args.common.min_balls, args.top)?;
    let (table, stats) = load_scored(&args.common.csv)?;
    let report = StatsReport::build(&table, &config);

    write!(out, "{}", render_text(&report))?;

    let mut outputs = Vec::new();
    if let Some(outdir) = &args.outdir {
        outputs = write_outputs(&report, outdir)
            .with_context(|| format!("Failed to write outputs to {}", outdir.display()))?;
        writeln!(out, "\n✅ Expanded results written to: {}", display_path(outdir))?;
    }

    if let Some(path) = &args.manifest {
        RunManifest::new(&args.common.csv, &config, stats, report.scalars, outputs)
            .save(path)
            .with_context(|| format!("Failed to save manifest: {}", path.display()))?;
        writeln!(out, "📄 Manifest saved to: {}", path.display())?;
    }

    Ok(report)
}

/// Run the chart tool with the config file named by `SCORECARD_CONFIG_PATH`.
#[cfg(feature = "charts")]
pub fn run_charts(
    args: &ChartArgs,
    out: &mut dyn Write,
) -> Result<Vec<scorecard_core::report::ChartOutcome>> {
    run_charts_with(base_config()?, args, out)
}

/// Draw the standard charts into `--outdir`.
#[cfg(feature = "charts")]
pub fn run_charts_with(
    base: StatsConfig,
    args: &ChartArgs,
    out: &mut dyn Write,
) -> Result<Vec<scorecard_core::report::ChartOutcome>> {
    use scorecard_core::report::{render_charts, ChartOutcome};

    let config = resolve_config(base, args.common.min_balls, None)?;
    let (table, _) = load_scored(&args.common.csv)?;

    let outcomes = render_charts(&table, &config, &args.outdir)
        .with_context(|| format!("Failed to render charts into {}", args.outdir.display()))?;

    for outcome in &outcomes {
        if let ChartOutcome::Skipped { file_name } = outcome {
            writeln!(out, "   Skipped {file_name}: no players to plot")?;
        }
    }
    writeln!(out, "✅ Plots saved to {}", display_path(&args.outdir))?;
    Ok(outcomes)
}
