//! Training and evaluation pipeline
//!
//! This module provides:
//! - Episode drivers that alternate agent and opponent turns
//! - Epoch-based training with an epsilon schedule
//! - Fixed-size evaluation batches
//! - Observers recording progress during training

pub mod episode;
pub mod evaluation;
pub mod observers;
pub mod opponents;
pub mod training;

pub use episode::{play_evaluation_episode, play_training_episode};
pub use evaluation::{OutcomeTally, evaluate};
// Re-export observer implementations (adapters)
pub use observers::{JsonlObserver, MetricsObserver, ProgressObserver};
pub use opponents::RandomOpponent;
pub use training::{
    EpochSummary, EpsilonSchedule, TrainingConfig, TrainingPipeline, TrainingReport,
};

pub use crate::ports::{Observer, Opponent};
