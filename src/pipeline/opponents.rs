//! Built-in opponents

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    ports::Opponent,
    tictactoe::{Board, Position},
};

/// Uniform random opponent
///
/// Picks each empty cell with equal probability.
pub struct RandomOpponent {
    name: String,
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a random opponent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new("Random")
    }
}

impl Opponent for RandomOpponent {
    fn select_move(&mut self, board: &Board) -> Option<Position> {
        board.legal_moves().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
