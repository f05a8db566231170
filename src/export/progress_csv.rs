//! CSV export of evaluation wins over training
//!
//! One row per evaluation batch, baseline included, so the file can be
//! plotted directly as wins against epoch.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, pipeline::EpochSummary};

/// File name prefix for progress exports
pub const PROGRESS_FILE_PREFIX: &str = "agent_wins";

/// A single row in the progress export
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSample {
    pub epoch: usize,
    pub wins: usize,
    pub games: usize,
    pub win_rate: f64,
}

impl From<&EpochSummary> for ProgressSample {
    fn from(summary: &EpochSummary) -> Self {
        Self {
            epoch: summary.epoch,
            wins: summary.evaluation.agent_wins,
            games: summary.evaluation.games(),
            win_rate: summary.evaluation.win_rate(),
        }
    }
}

/// Win counts per evaluation batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSeries {
    samples: Vec<ProgressSample>,
}

impl ProgressSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_summaries(summaries: &[EpochSummary]) -> Self {
        Self {
            samples: summaries.iter().map(ProgressSample::from).collect(),
        }
    }

    pub fn push(&mut self, sample: ProgressSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[ProgressSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Write the series with header `epoch,wins,games,win_rate`
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;
        for sample in &self.samples {
            writer.serialize(sample)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = self.samples.len(), "wrote progress csv");
        Ok(())
    }

    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let samples = reader
            .deserialize()
            .collect::<std::result::Result<Vec<ProgressSample>, _>>()?;
        Ok(Self { samples })
    }
}

/// `<prefix>_YYYY-MM-DD_HH-MM-SS.csv` for the given local time
pub fn timestamped_file_name(prefix: &str, now: DateTime<Local>) -> String {
    format!("{prefix}_{}.csv", now.format("%Y-%m-%d_%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::pipeline::OutcomeTally;

    #[test]
    fn test_file_name_format() {
        let now = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(
            timestamped_file_name(PROGRESS_FILE_PREFIX, now),
            "agent_wins_2024-03-07_09-05-02.csv"
        );
    }

    #[test]
    fn test_write_and_read_csv() {
        let summaries = [
            EpochSummary {
                epoch: 0,
                episodes_trained: 0,
                epsilon: 0.1,
                evaluation: OutcomeTally {
                    agent_wins: 4,
                    opponent_wins: 4,
                    draws: 2,
                },
            },
            EpochSummary {
                epoch: 1,
                episodes_trained: 100,
                epsilon: 0.15,
                evaluation: OutcomeTally {
                    agent_wins: 9,
                    opponent_wins: 0,
                    draws: 1,
                },
            },
        ];
        let series = ProgressSeries::from_summaries(&summaries);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.csv");
        series.write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().next(), Some("epoch,wins,games,win_rate"));
        assert_eq!(contents.lines().nth(2), Some("1,9,10,0.9"));

        let loaded = ProgressSeries::read_csv(&path).unwrap();
        assert_eq!(loaded, series);
    }
}
