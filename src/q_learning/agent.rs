//! Q-learning agent
//!
//! The agent learns online, one call per turn. Because the opponent replies
//! between two agent turns, the reward for a move that does not end the game
//! is only known later: the agent remembers that `(state, action)` pair as a
//! [`PendingTransition`] and settles it when the opponent wins or the board
//! fills up.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::trace;

use crate::{
    Result,
    q_learning::{
        config::AgentConfig,
        q_table::{QTable, TableKey},
    },
    tictactoe::{ActionIndex, Board, Outcome, Position, Side, StateIndex},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// The agent's most recent non-terminal move, waiting for its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingTransition {
    /// No move made yet this episode, or the last update was terminal
    #[default]
    Idle,
    /// A move was made and the opponent has not finished the game yet
    AwaitingOutcome {
        state: StateIndex,
        action: ActionIndex,
    },
}

/// Tabular Q-learning agent (off-policy TD control)
///
/// `epsilon` is the probability of exploiting the table: with probability
/// `1 - epsilon` the agent moves uniformly at random. Raising epsilon over
/// training therefore moves the agent toward pure exploitation.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    config: AgentConfig,
    epsilon: f64,
    pending: PendingTransition,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent with an all-zero table
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range.
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::with_table(config, QTable::new())
    }

    /// Create an agent around an existing table, e.g. one loaded from disk
    pub fn with_table(config: AgentConfig, q_table: QTable) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table,
            epsilon: config.epsilon,
            rng: build_rng(config.seed),
            pending: PendingTransition::Idle,
            config,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn pending(&self) -> PendingTransition {
        self.pending
    }

    pub fn value(&self, state: StateIndex, action: ActionIndex) -> f64 {
        self.q_table.get(TableKey::new(state, action))
    }

    /// Overwrite the current exploitation probability, clamped to [0, 1]
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    /// Step epsilon by a signed `delta`, clamped to [0, 1]. Returns the new value.
    pub fn adjust_epsilon(&mut self, delta: f64) -> f64 {
        self.set_epsilon(self.epsilon + delta);
        self.epsilon
    }

    /// Forget any pending transition; call before every new game
    pub fn start_episode(&mut self) {
        self.pending = PendingTransition::Idle;
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Play one agent turn and learn from it.
    ///
    /// Settles the pending transition if the opponent's last move ended the
    /// game, otherwise picks a move epsilon-greedily, applies it for
    /// [`Side::Agent`] and updates the chosen entry immediately.
    ///
    /// Returns `true` when the episode is over.
    pub fn train_step(&mut self, board: &mut Board) -> bool {
        let state = board.encode();

        match board.outcome() {
            Some(Outcome::AgentWin) => {
                // Already rewarded when the winning move was made
                self.pending = PendingTransition::Idle;
                return true;
            }
            Some(outcome) => {
                let reward = self.config.rewards.for_outcome(outcome);
                self.settle_pending(reward, state);
                return true;
            }
            None => {}
        }

        let legal_moves = board.legal_moves();
        let Some(position) = self.select_action(state, &legal_moves, true) else {
            self.pending = PendingTransition::Idle;
            return true;
        };

        board.apply_move(position, Side::Agent);
        let next_state = board.encode();
        let outcome = board.outcome();
        let reward = outcome.map_or(0.0, |o| self.config.rewards.for_outcome(o));

        let action = position.action();
        let delta = self.q_table.q_learning_update(
            TableKey::new(state, action),
            reward,
            next_state,
            self.config.learning_rate,
            self.config.discount_factor,
        );
        trace!(%state, %action, reward, delta, "updated move value");

        self.pending = if outcome.is_some() {
            PendingTransition::Idle
        } else {
            PendingTransition::AwaitingOutcome { state, action }
        };
        outcome.is_some()
    }

    /// Play one agent turn without learning.
    ///
    /// Greedy unless the state's row is still all zero, in which case the
    /// move is uniform random. Returns `true` when the episode is over.
    pub fn evaluate_step(&mut self, board: &mut Board) -> bool {
        self.pending = PendingTransition::Idle;
        if board.is_terminal() {
            return true;
        }

        let state = board.encode();
        let legal_moves = board.legal_moves();
        let Some(position) = self.select_action(state, &legal_moves, false) else {
            return true;
        };

        board.apply_move(position, Side::Agent);
        board.is_terminal()
    }

    /// Pick a move for the agent; `None` only when `legal_moves` is empty.
    ///
    /// With `explore` set, a uniform draw below `1 - epsilon` forces a random
    /// move. An all-zero row also falls back to random so that untrained
    /// states are not biased toward the first empty cell.
    pub fn select_action(
        &mut self,
        state: StateIndex,
        legal_moves: &[Position],
        explore: bool,
    ) -> Option<Position> {
        let explore_now = explore && self.rng.random::<f64>() < 1.0 - self.epsilon;
        if explore_now || self.q_table.is_unexplored(state) {
            legal_moves.choose(&mut self.rng).copied()
        } else {
            self.q_table.greedy_action(state, legal_moves)
        }
    }

    fn settle_pending(&mut self, reward: f64, state: StateIndex) {
        // No agent move yet this episode: nothing to credit
        if let PendingTransition::AwaitingOutcome {
            state: prev_state,
            action: prev_action,
        } = self.pending
        {
            let delta = self.q_table.q_learning_update(
                TableKey::new(prev_state, prev_action),
                reward,
                state,
                self.config.learning_rate,
                self.config.discount_factor,
            );
            trace!(state = %prev_state, action = %prev_action, reward, delta, "settled pending move");
        }
        self.pending = PendingTransition::Idle;
    }

    /// Zero the table and restore the configured epsilon and seed
    pub fn reset(&mut self) {
        self.q_table.reset();
        self.epsilon = self.config.epsilon;
        self.pending = PendingTransition::Idle;
        self.rng = build_rng(self.config.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::RewardScheme;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn agent(epsilon: f64) -> QLearningAgent {
        QLearningAgent::new(AgentConfig::new().with_epsilon(epsilon).with_seed(7)).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(QLearningAgent::new(AgentConfig::new().with_learning_rate(2.0)).is_err());
    }

    #[test]
    fn test_adjust_epsilon_clamps() {
        let mut agent = agent(0.95);
        assert_eq!(agent.adjust_epsilon(0.1), 1.0);
        assert!((agent.adjust_epsilon(-0.3) - 0.7).abs() < 1e-12);
        assert!((agent.adjust_epsilon(-2.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_terminal_move_sets_pending() {
        let mut agent = agent(0.1);
        let mut board = Board::new();

        let done = agent.train_step(&mut board);

        assert!(!done);
        assert_eq!(board.occupied_count(), 1);
        match agent.pending() {
            PendingTransition::AwaitingOutcome { state, .. } => {
                assert_eq!(state.as_usize(), 0);
            }
            PendingTransition::Idle => panic!("expected a pending transition"),
        }
    }

    #[test]
    fn test_opponent_win_without_prior_move_is_a_no_op() {
        let mut agent = agent(0.1);
        let mut board = Board::from_string("OOO/XX./...").unwrap();
        let before = agent.q_table().clone();

        assert!(agent.train_step(&mut board));
        assert_eq!(agent.q_table(), &before);
        assert_eq!(agent.pending(), PendingTransition::Idle);
    }

    #[test]
    fn test_opponent_win_settles_pending_with_loss_reward() {
        let config = AgentConfig::new()
            .with_rewards(RewardScheme::new(1.0, 0.5, -1.0))
            .with_seed(3);
        let mut agent = QLearningAgent::new(config).unwrap();

        // Agent answered at (1,0); opponent completes the top row next.
        let mut board = Board::from_string("OO./X../...").unwrap();
        let prev_state = Board::from_string("OO./.../...").unwrap().encode();
        let prev_action = pos(1, 0).action();
        agent.pending = PendingTransition::AwaitingOutcome {
            state: prev_state,
            action: prev_action,
        };

        board.apply_move(pos(0, 2), Side::Opponent);
        assert!(agent.train_step(&mut board));

        // 0 + 0.5 * (-1 + 0.9 * 0 - 0) = -0.5
        assert!((agent.value(prev_state, prev_action) + 0.5).abs() < 1e-12);
        assert_eq!(agent.pending(), PendingTransition::Idle);
    }

    #[test]
    fn test_evaluate_step_never_updates() {
        let mut agent = agent(1.0);
        let mut board = Board::new();
        let before = agent.q_table().clone();

        while !agent.evaluate_step(&mut board) {
            let reply = board.legal_moves()[0];
            board.apply_move(reply, Side::Opponent);
            if board.is_terminal() {
                break;
            }
        }

        assert_eq!(agent.q_table(), &before);
        assert!(board.is_terminal());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut agent = agent(0.2);
        // Only (0,2) is open and it completes the top row
        let mut board = Board::from_string("XX./OOX/OXO").unwrap();
        assert!(agent.train_step(&mut board));
        assert!(agent.q_table().visited_states() > 0);

        agent.reset();
        assert_eq!(agent.q_table().visited_states(), 0);
        assert_eq!(agent.epsilon(), 0.2);
    }
}
