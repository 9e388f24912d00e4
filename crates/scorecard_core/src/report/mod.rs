//! # Report Rendering
//!
//! Text for the terminal, CSV files for export, PNG bar charts.

#[cfg(feature = "charts")]
pub mod chart;
pub mod export;
pub mod manifest;
pub mod text;

#[cfg(feature = "charts")]
pub use chart::{render_charts, BarSeries, ChartOutcome, ChartSpec, STANDARD_CHARTS};
pub use export::{format_csv_value, write_outputs};
pub use manifest::RunManifest;
pub use text::render_text;
