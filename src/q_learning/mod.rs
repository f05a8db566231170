//! Tabular Q-learning
//!
//! The agent keeps one value per `(board, cell)` pair for every one of the
//! 3^9 encodable boards and learns online while it plays.
//!
//! ## Update rule
//!
//! After the agent moves from state `s` with action `a` and the board becomes
//! `s'`:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + η [ r + γ · max_a' Q(s',a') - Q(s,a) ]
//! ```
//!
//! `r` is the win or draw reward if the move ended the game and zero
//! otherwise. A move that does not end the game is remembered; if the
//! opponent's reply then wins or fills the board, the remembered entry gets
//! the loss or draw reward with the same rule, bootstrapping from the board
//! after that reply.
//!
//! ## Action selection
//!
//! | Situation | Choice |
//! |-----------|--------|
//! | Training, draw < 1 - ε | Uniform random legal move |
//! | Row for `s` is all zero | Uniform random legal move |
//! | Otherwise | Legal move with the strictly greatest value, first one on ties |
//!
//! Evaluation never takes the random-draw branch.
//!
//! ## Usage Example
//!
//! ```no_run
//! use qtoe::q_learning::{AgentConfig, QLearningAgent};
//! use qtoe::tictactoe::Board;
//!
//! let mut agent = QLearningAgent::new(AgentConfig::new().with_seed(1))?;
//! let mut board = Board::new();
//! agent.start_episode();
//! let done = agent.train_step(&mut board);
//! # Ok::<(), qtoe::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::{PendingTransition, QLearningAgent};
pub use config::{AgentConfig, RewardScheme};
pub use q_table::{QTable, TableKey};
pub use serialization::{SavedAgent, TrainingMetadata};
