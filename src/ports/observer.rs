//! Observer port - abstraction for training observation
//!
//! Observers collect progress data during training without coupling the
//! training loop to any particular output.

use crate::{Result, pipeline::EpochSummary, tictactoe::Outcome};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once
/// 2. For each epoch:
///    - `on_episode_end(...)` for every training episode
///    - `on_epoch_end(...)` after the epoch's evaluation batch
/// 3. `on_training_end()` - once
///
/// The baseline evaluation taken before any training is reported through
/// `on_epoch_end` with epoch number 0.
///
/// # Examples
///
/// ```no_run
/// use qtoe::{ports::Observer, tictactoe::Outcome};
///
/// struct WinCounter {
///     wins: usize,
/// }
///
/// impl Observer for WinCounter {
///     fn on_episode_end(&mut self, _episode: usize, outcome: Outcome) -> qtoe::Result<()> {
///         if outcome == Outcome::AgentWin {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called once before the baseline evaluation.
    ///
    /// # Parameters
    ///
    /// * `total_episodes` - Training episodes that will be played across all epochs
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every training episode.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the episode across the whole run (0-based)
    /// * `outcome` - How the episode ended
    fn on_episode_end(&mut self, _episode: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    /// Called after each evaluation batch, including the baseline.
    fn on_epoch_end(&mut self, _summary: &EpochSummary) -> Result<()> {
        Ok(())
    }

    /// Called once when training finishes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
