//! Repository port for agent persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedAgent};

/// Port for persisting and loading trained agents.
///
/// # Examples
///
/// ```no_run
/// use qtoe::ports::AgentRepository;
/// use qtoe::q_learning::SavedAgent;
/// use std::path::Path;
///
/// fn save_agent<R: AgentRepository>(
///     repo: &R,
///     agent: &SavedAgent,
///     path: &Path,
/// ) -> qtoe::Result<()> {
///     repo.save(agent, path)
/// }
/// ```
pub trait AgentRepository {
    /// Save a trained agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization fails.
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()>;

    /// Load a trained agent.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path` or the data is corrupted.
    fn load(&self, path: &Path) -> Result<SavedAgent>;
}
