//! Run manifest: what was read, with which settings, and what was written.

use crate::analysis::ScalarSummary;
use crate::config::StatsConfig;
use crate::data::LoadStats;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Input CSV path
    pub input: PathBuf,
    /// Creation time (RFC3339)
    pub created_at: String,
    pub config: StatsConfig,
    pub rows_loaded: u32,
    pub rows_skipped: u32,
    pub scalars: ScalarSummary,
    /// Files written by the run, in write order
    pub outputs: Vec<PathBuf>,
}

impl RunManifest {
    pub fn new(
        input: &Path,
        config: &StatsConfig,
        stats: LoadStats,
        scalars: ScalarSummary,
        outputs: Vec<PathBuf>,
    ) -> Self {
        Self {
            input: input.to_path_buf(),
            created_at: chrono::Utc::now().to_rfc3339(),
            config: config.clone(),
            rows_loaded: stats.loaded,
            rows_skipped: stats.skipped,
            scalars,
            outputs,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta/run.json");
        let manifest = RunManifest::new(
            Path::new("batting_card.csv"),
            &StatsConfig::default(),
            LoadStats {
                total_rows: 3,
                loaded: 2,
                skipped: 1,
            },
            ScalarSummary {
                average_runs: Some(40.0),
                total_runs: 80,
                total_boundaries: 8,
                total_boundary_runs: 34,
            },
            vec![PathBuf::from("out/top5_run_scorers.csv")],
        );

        manifest.save(&path).unwrap();
        let loaded = RunManifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert!(chrono::DateTime::parse_from_rfc3339(&loaded.created_at).is_ok());
    }
}
