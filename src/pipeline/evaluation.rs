//! Fixed-size evaluation batches

use serde::{Deserialize, Serialize};

use super::episode::play_evaluation_episode;
use crate::{
    ports::Opponent,
    q_learning::QLearningAgent,
    tictactoe::{Board, Outcome, Side},
};

/// Win/draw/loss counts from the agent's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub agent_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::AgentWin => self.agent_wins += 1,
            Outcome::OpponentWin => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.agent_wins + self.opponent_wins + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.agent_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.opponent_wins)
    }

    fn rate(&self, count: usize) -> f64 {
        let games = self.games();
        if games > 0 {
            count as f64 / games as f64
        } else {
            0.0
        }
    }
}

/// Play `games` non-learning games, alternating who opens.
///
/// Returns the tally and the side that should open the next game, so that
/// callers can keep one alternation running across batches.
pub fn evaluate(
    agent: &mut QLearningAgent,
    opponent: &mut dyn Opponent,
    games: usize,
    first: Side,
) -> (OutcomeTally, Side) {
    let mut tally = OutcomeTally::default();
    let mut board = Board::new();
    let mut first = first;

    for _ in 0..games {
        tally.record(play_evaluation_episode(agent, opponent, &mut board, first));
        first = first.opponent();
    }

    (tally, first)
}
