//! Training pipeline for the Q-learning agent

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{episode::play_training_episode, evaluation::evaluate};
use crate::{
    Error, Result,
    pipeline::OutcomeTally,
    ports::{Observer, Opponent},
    q_learning::QLearningAgent,
    tictactoe::{Board, Side},
};

/// Signed epsilon step applied once per epoch
///
/// A positive `delta` makes the agent greedier as training goes on, a
/// negative one makes it explore more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpsilonSchedule {
    /// Amount added to epsilon (result clamped to [0, 1])
    pub delta: f64,
    /// Episode within each epoch (0-based) before which the step is applied
    pub at_episode: usize,
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self {
            delta: 0.05,
            at_episode: 5_000,
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of epochs, each followed by an evaluation batch
    pub epochs: usize,

    /// Training episodes per epoch
    pub episodes_per_epoch: usize,

    /// Games in each evaluation batch
    pub evaluation_games: usize,

    /// When and by how much epsilon moves
    pub epsilon_schedule: EpsilonSchedule,

    /// Which side opens the first game; openings then alternate
    pub first_side: Side,

    /// Random seed for the agent and opponent
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            episodes_per_epoch: 10_000,
            evaluation_games: 10,
            epsilon_schedule: EpsilonSchedule::default(),
            first_side: Side::Agent,
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn total_episodes(&self) -> usize {
        self.epochs * self.episodes_per_epoch
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a non-finite epsilon step.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon_schedule.delta.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "epsilon step {} must be finite",
                    self.epsilon_schedule.delta
                ),
            });
        }
        Ok(())
    }
}

/// Evaluation snapshot taken after an epoch (epoch 0 is the untrained baseline)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochSummary {
    pub epoch: usize,
    /// Training episodes played so far
    pub episodes_trained: usize,
    /// Epsilon in effect at evaluation time
    pub epsilon: f64,
    pub evaluation: OutcomeTally,
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// One entry per evaluation batch, baseline first
    pub epochs: Vec<EpochSummary>,

    /// Outcomes of the training episodes themselves
    pub training: OutcomeTally,

    /// Epsilon after the last epoch
    pub final_epsilon: f64,
}

impl TrainingReport {
    pub fn episodes_trained(&self) -> usize {
        self.training.games()
    }

    pub fn baseline(&self) -> Option<&EpochSummary> {
        self.epochs.first()
    }

    pub fn last(&self) -> Option<&EpochSummary> {
        self.epochs.last()
    }

    /// Save report to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Trains one agent against one opponent in epochs of episodes
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the baseline evaluation, then every epoch with its evaluation batch
    pub fn run(
        &mut self,
        agent: &mut QLearningAgent,
        opponent: &mut dyn Opponent,
    ) -> Result<TrainingReport> {
        self.config.validate()?;
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
            opponent.set_rng_seed(seed.wrapping_add(1));
        }
        if self.config.evaluation_games == 0 {
            warn!("evaluation batches are empty; progress will read as zero wins");
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.total_episodes())?;
        }

        let mut board = Board::new();
        let mut first = self.config.first_side;
        let mut training = OutcomeTally::default();
        let mut epochs = Vec::with_capacity(self.config.epochs + 1);

        let (evaluation, next) = evaluate(agent, opponent, self.config.evaluation_games, first);
        first = next;
        let baseline = EpochSummary {
            epoch: 0,
            episodes_trained: 0,
            epsilon: agent.epsilon(),
            evaluation,
        };
        info!(
            wins = evaluation.agent_wins,
            games = evaluation.games(),
            "baseline evaluation before training"
        );
        self.notify_epoch(&baseline)?;
        epochs.push(baseline);

        let schedule = self.config.epsilon_schedule;
        for epoch in 1..=self.config.epochs {
            for episode in 0..self.config.episodes_per_epoch {
                if episode == schedule.at_episode {
                    let epsilon = agent.adjust_epsilon(schedule.delta);
                    debug!(epoch, epsilon, "adjusted epsilon");
                }

                let outcome = play_training_episode(agent, opponent, &mut board, first);
                first = first.opponent();

                let global_episode = training.games();
                training.record(outcome);
                for observer in &mut self.observers {
                    observer.on_episode_end(global_episode, outcome)?;
                }
            }

            let (evaluation, next) =
                evaluate(agent, opponent, self.config.evaluation_games, first);
            first = next;
            let summary = EpochSummary {
                epoch,
                episodes_trained: training.games(),
                epsilon: agent.epsilon(),
                evaluation,
            };
            info!(
                epoch,
                wins = evaluation.agent_wins,
                games = evaluation.games(),
                epsilon = summary.epsilon,
                visited_states = agent.q_table().visited_states(),
                "epoch complete"
            );
            self.notify_epoch(&summary)?;
            epochs.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingReport {
            epochs,
            training,
            final_epsilon: agent.epsilon(),
        })
    }

    fn notify_epoch(&mut self, summary: &EpochSummary) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_epoch_end(summary)?;
        }
        Ok(())
    }
}
