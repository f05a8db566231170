//! Observer implementations for the training pipeline
//!
//! Observers collect data during training without coupling the training loop
//! to a particular output.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    pipeline::{EpochSummary, OutcomeTally},
    ports::Observer,
    tictactoe::Outcome,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    tally: OutcomeTally,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            tally: OutcomeTally::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "{} D:{} L:{}",
            self.tally.agent_wins, self.tally.draws, self.tally.opponent_wins
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: Outcome) -> Result<()> {
        self.tally.record(outcome);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            // Throttled; on_training_end sets the final message
            if episode % 100 == 0 {
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training outcomes and evaluation history
#[derive(Debug, Default)]
pub struct MetricsObserver {
    training: OutcomeTally,
    epochs: Vec<EpochSummary>,
    first_training_win: Option<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn training(&self) -> OutcomeTally {
        self.training
    }

    pub fn epochs(&self) -> &[EpochSummary] {
        &self.epochs
    }

    /// Global index of the first training episode the agent won
    pub fn first_training_win(&self) -> Option<usize> {
        self.first_training_win
    }

    /// Evaluation batch with the most agent wins (earliest on ties)
    pub fn best_epoch(&self) -> Option<&EpochSummary> {
        self.epochs.iter().fold(None, |best, summary| match best {
            Some(b) if b.evaluation.agent_wins >= summary.evaluation.agent_wins => Some(b),
            _ => Some(summary),
        })
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, episode: usize, outcome: Outcome) -> Result<()> {
        self.training.record(outcome);
        if outcome == Outcome::AgentWin && self.first_training_win.is_none() {
            self.first_training_win = Some(episode);
        }
        Ok(())
    }

    fn on_epoch_end(&mut self, summary: &EpochSummary) -> Result<()> {
        self.epochs.push(*summary);
        Ok(())
    }
}

/// JSONL observer - Writes one JSON object per evaluation batch
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_epoch_end(&mut self, summary: &EpochSummary) -> Result<()> {
        serde_json::to_writer(&mut self.writer, summary)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
