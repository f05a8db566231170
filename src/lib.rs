//! Tabular Q-learning for tic-tac-toe
//!
//! This crate provides:
//! - A 3×3 board with a bijective base-3 state encoding
//! - A Q-learning agent with epsilon-greedy play and one-step TD updates
//! - A training pipeline against a uniform-random opponent
//! - Progress export, agent persistence and a console game

pub mod adapters;
pub mod cli;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
