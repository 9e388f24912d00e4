//! Batting Stats CLI
//!
//! Prints descriptive statistics for a batting scorecard and optionally
//! exports every leaderboard and aggregate as CSV.
//!
//! ```bash
//! batting_stats --csv batting_card.csv --outdir outputs --min-balls 10
//! ```

use clap::Parser;
use scorecard_cli::{init_logging, report_failure, run_stats, StatsArgs};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = StatsArgs::parse();
    init_logging(args.common.verbose);

    let stdout = std::io::stdout();
    match run_stats(&args, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}
