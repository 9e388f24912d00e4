//! # Scorecard Models
//!
//! Column identities and the coerced batting entry shared by every stage.

use serde::{Deserialize, Serialize};

/// A column of the batting table, either read from input or derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Name,
    Runs,
    BallsFaced,
    Fours,
    Sixes,
    StrikeRate,
    MatchId,
    Boundaries,
    BoundaryRuns,
    RunsPerBall,
    BoundaryPctOfRuns,
}

impl Column {
    /// Columns read from the input file; anything else in the header is ignored.
    pub const INPUT: [Column; 7] = [
        Column::Name,
        Column::Runs,
        Column::BallsFaced,
        Column::Fours,
        Column::Sixes,
        Column::StrikeRate,
        Column::MatchId,
    ];

    /// Input columns coerced to numbers.
    pub const NUMERIC_INPUT: [Column; 5] = [
        Column::Runs,
        Column::BallsFaced,
        Column::Fours,
        Column::Sixes,
        Column::StrikeRate,
    ];

    pub const REQUIRED: [Column; 2] = [Column::Name, Column::Runs];

    pub const DERIVED: [Column; 4] = [
        Column::Boundaries,
        Column::BoundaryRuns,
        Column::RunsPerBall,
        Column::BoundaryPctOfRuns,
    ];

    /// Header text used in input and exported files.
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Runs => "runs",
            Column::BallsFaced => "ballsFaced",
            Column::Fours => "fours",
            Column::Sixes => "sixes",
            Column::StrikeRate => "strikeRate",
            Column::MatchId => "match_id",
            Column::Boundaries => "boundaries",
            Column::BoundaryRuns => "boundary_runs",
            Column::RunsPerBall => "runs_per_ball",
            Column::BoundaryPctOfRuns => "boundary_pct_of_runs",
        }
    }

    /// Resolve an input header. Derived column names are not accepted from input.
    pub fn from_header(header: &str) -> Option<Column> {
        Column::INPUT.into_iter().find(|c| c.header() == header)
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::Name | Column::MatchId)
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of columns present in a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSet(u16);

impl ColumnSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, column: Column) {
        self.0 |= column.bit();
    }

    pub fn contains(&self, column: Column) -> bool {
        self.0 & column.bit() != 0
    }

    pub fn contains_all(&self, columns: &[Column]) -> bool {
        columns.iter().all(|c| self.contains(*c))
    }

    /// Required columns absent from this set, in declaration order.
    pub fn missing_required(&self) -> Vec<Column> {
        Column::REQUIRED
            .into_iter()
            .filter(|c| !self.contains(*c))
            .collect()
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        let mut set = ColumnSet::new();
        for column in iter {
            set.insert(column);
        }
        set
    }
}

/// One batting entry after numeric coercion. `None` is the missing marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingEntry {
    pub name: String,
    pub runs: Option<f64>,
    pub balls_faced: Option<f64>,
    pub fours: Option<f64>,
    pub sixes: Option<f64>,
    pub strike_rate: Option<f64>,
    pub match_id: Option<String>,
}

impl BattingEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_runs(mut self, runs: f64) -> Self {
        self.runs = Some(runs);
        self
    }

    pub fn with_balls_faced(mut self, balls: f64) -> Self {
        self.balls_faced = Some(balls);
        self
    }

    pub fn with_boundaries(mut self, fours: f64, sixes: f64) -> Self {
        self.fours = Some(fours);
        self.sixes = Some(sixes);
        self
    }

    pub fn with_strike_rate(mut self, strike_rate: f64) -> Self {
        self.strike_rate = Some(strike_rate);
        self
    }

    pub fn with_match_id(mut self, match_id: impl Into<String>) -> Self {
        self.match_id = Some(match_id.into());
        self
    }

    /// Value of a numeric input column; `None` for text and derived columns.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Runs => self.runs,
            Column::BallsFaced => self.balls_faced,
            Column::Fours => self.fours,
            Column::Sixes => self.sixes,
            Column::StrikeRate => self.strike_rate,
            _ => None,
        }
    }

    /// Value of a text column.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Name => Some(self.name.as_str()),
            Column::MatchId => self.match_id.as_deref(),
            _ => None,
        }
    }
}
