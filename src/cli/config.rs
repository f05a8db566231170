//! Run configuration files for CLI commands

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, pipeline::TrainingConfig, q_learning::AgentConfig};

/// Agent and training settings read from a JSON file
///
/// Every field is optional in the file; missing ones take their defaults.
///
/// ```json
/// {
///   "agent": { "learning_rate": 0.5, "rewards": { "draw": 0.0 } },
///   "training": { "epochs": 20, "epsilon_schedule": { "delta": -0.01 } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub agent: AgentConfig,
    pub training: TrainingConfig,
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the first validation error of either section.
    pub fn validate(&self) -> Result<()> {
        self.agent.validate()?;
        self.training.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"training": {"epochs": 3, "epsilon_schedule": {"delta": -0.02}}}"#,
        )
        .unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.training.epochs, 3);
        assert_eq!(config.training.episodes_per_epoch, 10_000);
        assert_eq!(config.training.epsilon_schedule.delta, -0.02);
        assert_eq!(config.training.epsilon_schedule.at_episode, 5_000);
        assert_eq!(config.agent, AgentConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let mut config = RunConfig::default();
        config.agent.epsilon = 0.4;
        config.training.seed = Some(5);

        config.save(&path).unwrap();
        assert_eq!(RunConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = RunConfig::load("/nonexistent/run.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/run.json"));
    }
}
