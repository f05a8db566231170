//! Subcommands of the `qtoe` binary

pub mod evaluate;
pub mod play;
pub mod train;
