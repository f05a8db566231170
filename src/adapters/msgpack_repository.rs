//! MessagePack implementation of the agent repository.

use std::path::Path;

use tracing::debug;

use crate::{Result, ports::AgentRepository, q_learning::SavedAgent};

/// MessagePack-based agent repository.
///
/// Writes the agent, including its full value table, to a single file via
/// rmp_serde.
///
/// # Examples
///
/// ```no_run
/// use qtoe::adapters::MsgPackRepository;
/// use qtoe::ports::AgentRepository;
/// use qtoe::q_learning::{AgentConfig, QLearningAgent, SavedAgent, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let agent = QLearningAgent::new(AgentConfig::new())?;
/// let saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("agent.msgpack"))?;
/// let loaded = repo.load(Path::new("agent.msgpack"))?;
/// # Ok::<(), qtoe::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        agent.save_to_file(path)?;
        debug!(path = %path.display(), "saved agent");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let agent = SavedAgent::load_from_file(path)?;
        debug!(path = %path.display(), version = agent.version, "loaded agent");
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::q_learning::{AgentConfig, QLearningAgent, TrainingMetadata};

    fn saved_agent() -> SavedAgent {
        let agent = QLearningAgent::new(AgentConfig::new().with_seed(5)).unwrap();
        SavedAgent::from_agent(&agent, TrainingMetadata::default())
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("agent.msgpack");

        let repo = MsgPackRepository::new();
        let saved = saved_agent();

        repo.save(&saved, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new();
        let result = repo.load(&temp_dir.path().join("missing.msgpack"));
        assert!(matches!(result, Err(crate::Error::Io { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new();
        let path = temp_dir.path().join("no_such_dir").join("agent.msgpack");
        assert!(repo.save(&saved_agent(), &path).is_err());
    }
}
