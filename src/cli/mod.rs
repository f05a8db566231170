//! CLI infrastructure for the Q-learning tic-tac-toe agent
//!
//! This module provides the command-line interface for training an agent,
//! evaluating a saved one, and playing against it from the console.

pub mod commands;
pub mod config;
pub mod output;
