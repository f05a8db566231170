//! Hyperparameters and reward shaping for the Q-learning agent.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, tictactoe::Outcome};

/// Reward paid to the agent when an episode ends
///
/// Continuing moves always earn zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardScheme {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

impl RewardScheme {
    pub fn new(win: f64, draw: f64, loss: f64) -> Self {
        Self { win, draw, loss }
    }

    pub fn for_outcome(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::AgentWin => self.win,
            Outcome::OpponentWin => self.loss,
            Outcome::Draw => self.draw,
        }
    }

    /// Largest absolute reward any single step can receive
    pub fn max_magnitude(&self) -> f64 {
        self.win.abs().max(self.draw.abs()).max(self.loss.abs())
    }
}

impl Default for RewardScheme {
    fn default() -> Self {
        Self {
            win: 1.0,
            draw: 0.5,
            loss: 0.0,
        }
    }
}

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use qtoe::q_learning::{AgentConfig, RewardScheme};
///
/// let config = AgentConfig::new()
///     .with_learning_rate(0.5)
///     .with_discount_factor(0.9)
///     .with_epsilon(0.1)
///     .with_rewards(RewardScheme::new(1.0, 0.0, 0.0))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// η, the step size of every update (0.0 to 1.0)
    pub learning_rate: f64,
    /// γ, weight of the bootstrapped next-state value (0.0 exclusive to 1.0)
    pub discount_factor: f64,
    /// Probability of exploiting the table instead of moving at random
    pub epsilon: f64,
    /// Terminal rewards
    pub rewards: RewardScheme,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Defaults: η = 0.5, γ = 0.9, ε = 0.1, win/draw/loss = 1/0.5/0
    pub fn new() -> Self {
        Self {
            learning_rate: 0.5,
            discount_factor: 0.9,
            epsilon: 0.1,
            rewards: RewardScheme::default(),
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardScheme) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.learning_rate) {
            return Err(invalid(format!(
                "learning rate {} must be within [0, 1]",
                self.learning_rate
            )));
        }
        if !(self.discount_factor > 0.0 && self.discount_factor <= 1.0) {
            return Err(invalid(format!(
                "discount factor {} must be within (0, 1]",
                self.discount_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid(format!(
                "epsilon {} must be within [0, 1]",
                self.epsilon
            )));
        }
        let rewards = [self.rewards.win, self.rewards.draw, self.rewards.loss];
        if rewards.iter().any(|r| !r.is_finite()) {
            return Err(invalid("rewards must be finite".to_string()));
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
