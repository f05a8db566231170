//! Serialization support for trained Q-learning agents.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{agent::QLearningAgent, config::AgentConfig, q_table::QTable},
};

/// Metadata about the training process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of training episodes played
    pub episodes_trained: Option<usize>,
    /// Number of epochs the episodes were split into
    pub epochs: Option<usize>,
    /// Opponent trained against
    pub opponent: Option<String>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Timestamp when saved (RFC 3339)
    pub saved_at: Option<String>,
}

impl TrainingMetadata {
    /// Stamp `saved_at` with the current local time
    pub fn stamped(mut self) -> Self {
        self.saved_at = Some(chrono::Local::now().to_rfc3339());
        self
    }
}

/// A trained agent as written to disk
///
/// The table is kept as its flat row-major `3^9 * 9` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub config: AgentConfig,
    /// Epsilon at the moment of saving (may differ from `config.epsilon`)
    pub epsilon: f64,
    q_table: QTable,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearningAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            config: agent.config().clone(),
            epsilon: agent.epsilon(),
            q_table: agent.q_table().clone(),
            metadata,
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Rebuild a live agent with the saved table and epsilon
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown format version or an invalid configuration.
    pub fn to_agent(&self) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        let mut agent = QLearningAgent::with_table(self.config.clone(), self.q_table.clone())?;
        agent.set_epsilon(self.epsilon);
        Ok(agent)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize agent to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {}", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).map_err(|e| Error::SerializationContext {
            operation: "serialize agent to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {}", path.display()),
            source,
        })?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Board;

    fn trained_agent() -> QLearningAgent {
        let mut agent = QLearningAgent::new(AgentConfig::new().with_seed(11)).unwrap();
        // Only (0,2) is open and it completes the top row
        let mut board = Board::from_string("XX./OOX/OXO").unwrap();
        agent.train_step(&mut board);
        agent.adjust_epsilon(0.25);
        agent
    }

    #[test]
    fn test_roundtrip_preserves_table_and_epsilon() -> Result<()> {
        let agent = trained_agent();
        assert!(agent.q_table().visited_states() > 0);

        let saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
        let loaded = SavedAgent::from_bytes(&saved.to_bytes()?)?;
        let restored = loaded.to_agent()?;

        assert_eq!(restored.q_table(), agent.q_table());
        assert!((restored.epsilon() - 0.35).abs() < 1e-12);
        assert_eq!(restored.config(), agent.config());
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut saved = SavedAgent::from_agent(&trained_agent(), TrainingMetadata::default());
        saved.version = 99;
        assert!(matches!(
            saved.to_agent(),
            Err(Error::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_stamped_metadata_has_timestamp() {
        let metadata = TrainingMetadata::default().stamped();
        let stamp = metadata.saved_at.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
