//! In-memory agent repository for testing.
//!
//! Keeps serialized agents in a shared map so tests can exercise the
//! save/load path without touching the file system.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedAgent};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use qtoe::adapters::InMemoryRepository;
/// use qtoe::ports::AgentRepository;
/// use qtoe::q_learning::{AgentConfig, QLearningAgent, SavedAgent, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let agent = QLearningAgent::new(AgentConfig::new())?;
/// let saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("agent"))?;
/// let loaded = repo.load(Path::new("agent"))?;
/// assert_eq!(loaded, saved);
/// # Ok::<(), qtoe::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents currently stored
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let bytes = agent.to_bytes()?;
        self.storage().insert(Self::key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let key = Self::key(path);
        let storage = self.storage();
        let bytes = storage
            .get(&key)
            .ok_or_else(|| Error::NotFound { key: key.clone() })?;
        SavedAgent::from_bytes(bytes)
    }
}
