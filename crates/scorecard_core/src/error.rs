use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorecardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required columns missing: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),
}

impl ScorecardError {
    /// Bad input or configuration, as opposed to a failure while writing.
    /// These abort the run before anything is written.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScorecardError::MissingColumns { .. }
                | ScorecardError::Csv(_)
                | ScorecardError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScorecardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_names() {
        let err = ScorecardError::MissingColumns {
            missing: vec!["name".to_string(), "runs".to_string()],
        };
        assert_eq!(err.to_string(), "Required columns missing: name, runs");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_io_error_is_not_input_error() {
        let err: ScorecardError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_invalid_config_is_input_error() {
        assert!(ScorecardError::InvalidConfig("leaderboard_size".into()).is_input_error());
    }
}
