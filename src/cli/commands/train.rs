//! Train command - Train a Q-learning agent against the random opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::{
    adapters::MsgPackRepository,
    cli::{
        commands::play::{DEFAULT_SESSION_GAMES, play_on_console},
        config::RunConfig,
        output::{format_number, print_epoch_table, print_kv, print_section, print_tally},
    },
    export::{PROGRESS_FILE_PREFIX, ProgressSeries, timestamped_file_name},
    pipeline::{
        JsonlObserver, Opponent, ProgressObserver, RandomOpponent, TrainingPipeline,
        TrainingReport,
    },
    ports::AgentRepository,
    q_learning::{QLearningAgent, SavedAgent, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// JSON run configuration; flags below override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Learning rate (eta)
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor (gamma)
    #[arg(long)]
    pub discount_factor: Option<f64>,

    /// Initial probability of exploiting the table
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Reward for winning
    #[arg(long)]
    pub win_reward: Option<f64>,

    /// Reward for a draw
    #[arg(long)]
    pub draw_reward: Option<f64>,

    /// Reward for losing
    #[arg(long)]
    pub loss_reward: Option<f64>,

    /// Number of epochs
    #[arg(long, short = 'e')]
    pub epochs: Option<usize>,

    /// Training episodes per epoch
    #[arg(long)]
    pub episodes: Option<usize>,

    /// Games in each evaluation batch
    #[arg(long)]
    pub eval_games: Option<usize>,

    /// Signed epsilon change applied once per epoch
    #[arg(long)]
    pub epsilon_step: Option<f64>,

    /// In-epoch episode at which the epsilon change is applied
    #[arg(long)]
    pub epsilon_step_at: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained agent
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Directory for the timestamped progress CSV
    #[arg(long)]
    pub progress_dir: Option<PathBuf>,

    /// Optional path for writing the training report as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL epoch observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Play a console session against the agent after training
    #[arg(long)]
    pub play: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl TrainArgs {
    /// Load the config file (or defaults) and apply flag overrides
    pub fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => RunConfig::default(),
        };

        let agent = &mut config.agent;
        if let Some(value) = self.learning_rate {
            agent.learning_rate = value;
        }
        if let Some(value) = self.discount_factor {
            agent.discount_factor = value;
        }
        if let Some(value) = self.epsilon {
            agent.epsilon = value;
        }
        if let Some(value) = self.win_reward {
            agent.rewards.win = value;
        }
        if let Some(value) = self.draw_reward {
            agent.rewards.draw = value;
        }
        if let Some(value) = self.loss_reward {
            agent.rewards.loss = value;
        }

        let training = &mut config.training;
        if let Some(value) = self.epochs {
            training.epochs = value;
        }
        if let Some(value) = self.episodes {
            training.episodes_per_epoch = value;
        }
        if let Some(value) = self.eval_games {
            training.evaluation_games = value;
        }
        if let Some(value) = self.epsilon_step {
            training.epsilon_schedule.delta = value;
        }
        if let Some(value) = self.epsilon_step_at {
            training.epsilon_schedule.at_episode = value;
        }
        if self.seed.is_some() {
            training.seed = self.seed;
            config.agent.seed = self.seed;
        }

        config.validate().context("invalid run configuration")?;
        Ok(config)
    }
}

/// Train, report, and write whatever outputs were requested
pub fn execute(args: TrainArgs) -> Result<TrainingReport> {
    let config = args.run_config()?;

    let mut agent = QLearningAgent::new(config.agent.clone())?;
    let mut opponent = RandomOpponent::new("Random");

    let mut pipeline = TrainingPipeline::new(config.training.clone());
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    print_section("Q-learning vs Random");
    print_kv("Learning rate", &config.agent.learning_rate.to_string());
    print_kv("Discount factor", &config.agent.discount_factor.to_string());
    print_kv("Epsilon", &config.agent.epsilon.to_string());
    print_kv("Epochs", &config.training.epochs.to_string());
    print_kv(
        "Episodes per epoch",
        &format_number(config.training.episodes_per_epoch),
    );

    let report = pipeline.run(&mut agent, &mut opponent)?;

    print_section("Evaluation wins per epoch");
    print_epoch_table(&report.epochs);
    print_section("Training episodes");
    print_tally(&report.training);
    print_kv("Final epsilon", &format!("{:.3}", report.final_epsilon));
    print_kv(
        "Visited states",
        &format_number(agent.q_table().visited_states()),
    );

    if let Some(dir) = &args.progress_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(timestamped_file_name(
            PROGRESS_FILE_PREFIX,
            chrono::Local::now(),
        ));
        ProgressSeries::from_summaries(&report.epochs)
            .write_csv(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nProgress written to {}", path.display());
    }

    if let Some(path) = &args.summary {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        report
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    if let Some(path) = &args.output {
        let metadata = TrainingMetadata {
            episodes_trained: Some(report.episodes_trained()),
            epochs: Some(config.training.epochs),
            opponent: Some(opponent.name().to_string()),
            seed: config.training.seed,
            saved_at: None,
        }
        .stamped();
        let saved = SavedAgent::from_agent(&agent, metadata);
        MsgPackRepository
            .save(&saved, path)
            .with_context(|| format!("failed to save agent to {}", path.display()))?;
        info!(path = %path.display(), "agent saved");
        println!("✓ Agent saved to: {}", path.display());
    }

    if args.play {
        play_on_console(&mut agent, DEFAULT_SESSION_GAMES)?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"agent": {"epsilon": 0.3}, "training": {"epochs": 4}}"#,
        )
        .unwrap();

        let args = TrainArgs::try_parse_from([
            "train",
            "--config",
            path.to_str().unwrap(),
            "--epochs",
            "2",
            "--epsilon-step",
            "-0.05",
            "--seed",
            "9",
        ])
        .unwrap();
        let config = args.run_config().unwrap();

        assert_eq!(config.agent.epsilon, 0.3);
        assert_eq!(config.training.epochs, 2);
        assert_eq!(config.training.epsilon_schedule.delta, -0.05);
        assert_eq!(config.agent.seed, Some(9));
        assert_eq!(config.training.seed, Some(9));
    }

    #[test]
    fn test_out_of_range_flag_is_rejected() {
        let args = TrainArgs::try_parse_from(["train", "--learning-rate", "1.5"]).unwrap();
        assert!(args.run_config().is_err());
    }
}
