//! Batting Charts CLI
//!
//! Bar charts for top run scorers, most sixes and highest strike rates.
//!
//! ```bash
//! batting_charts --csv batting_card.csv --outdir plots --min-balls 10
//! ```

use clap::Parser;
use scorecard_cli::{init_logging, report_failure, run_charts, ChartArgs};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = ChartArgs::parse();
    init_logging(args.common.verbose);

    let stdout = std::io::stdout();
    match run_charts(&args, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}
