//! Dense value table for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{ACTION_COUNT, ActionIndex, Position, STATE_COUNT, StateIndex},
};

/// A `(state, action)` address into the value table.
///
/// Both halves are range-checked types, so every key addresses a real entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableKey {
    pub state: StateIndex,
    pub action: ActionIndex,
}

impl TableKey {
    pub fn new(state: StateIndex, action: ActionIndex) -> Self {
        Self { state, action }
    }

    fn offset(self) -> usize {
        self.state.as_usize() * ACTION_COUNT + self.action.as_usize()
    }
}

/// Q-values for every encoded board and every cell, zero-initialised.
///
/// Stored as one flat row-major buffer of `3^9 * 9` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct QTable {
    values: Vec<f64>,
}

impl QTable {
    /// Number of entries in a full table
    pub const LEN: usize = STATE_COUNT * ACTION_COUNT;

    pub fn new() -> Self {
        Self {
            values: vec![0.0; Self::LEN],
        }
    }

    /// Rebuild a table from its flat row-major values
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.len() != Self::LEN {
            return Err(Error::TableSize {
                expected: Self::LEN,
                got: values.len(),
            });
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, key: TableKey) -> f64 {
        self.values[key.offset()]
    }

    pub fn set(&mut self, key: TableKey, value: f64) {
        self.values[key.offset()] = value;
    }

    /// All nine action values for a state
    pub fn row(&self, state: StateIndex) -> &[f64] {
        let start = state.as_usize() * ACTION_COUNT;
        &self.values[start..start + ACTION_COUNT]
    }

    /// Largest value in the state's row, over all nine actions
    pub fn max_value(&self, state: StateIndex) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// True when every value in the row is exactly zero
    pub fn is_unexplored(&self, state: StateIndex) -> bool {
        self.row(state).iter().all(|&q| q == 0.0)
    }

    /// Legal move with the strictly greatest value; the first one wins ties
    pub fn greedy_action(&self, state: StateIndex, legal_moves: &[Position]) -> Option<Position> {
        let row = self.row(state);
        let mut best: Option<(Position, f64)> = None;
        for &position in legal_moves {
            let q = row[position.action().as_usize()];
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((position, q)),
            }
        }
        best.map(|(position, _)| position)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + η[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Returns the change applied to the entry.
    pub fn q_learning_update(
        &mut self,
        key: TableKey,
        reward: f64,
        next_state: StateIndex,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current_q = self.get(key);
        let td_target = reward + discount_factor * self.max_value(next_state);
        let td_error = td_target - current_q;
        let delta = learning_rate * td_error;
        self.set(key, current_q + delta);
        delta
    }

    /// Number of states whose row holds a non-zero value
    pub fn visited_states(&self) -> usize {
        self.values
            .chunks(ACTION_COUNT)
            .filter(|row| row.iter().any(|&q| q != 0.0))
            .count()
    }

    /// Zero every entry
    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<f64>> for QTable {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_values(values)
    }
}

impl From<QTable> for Vec<f64> {
    fn from(table: QTable) -> Self {
        table.values
    }
}
