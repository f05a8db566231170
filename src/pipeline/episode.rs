//! Single-game drivers shared by training, evaluation, and the console

use tracing::warn;

use crate::{
    ports::Opponent,
    q_learning::QLearningAgent,
    tictactoe::{Board, Outcome, Side},
};

/// Let the opponent place one mark, if it has a move
pub fn opponent_turn(opponent: &mut dyn Opponent, board: &mut Board) {
    let Some(position) = opponent.select_move(board) else {
        return;
    };
    if !board.apply_move(position, Side::Opponent) {
        warn!(opponent = opponent.name(), %position, "opponent chose an occupied cell");
    }
}

/// Play one learning game from an empty board.
///
/// The agent learns on each of its turns; the opponent replies between them.
pub fn play_training_episode(
    agent: &mut QLearningAgent,
    opponent: &mut dyn Opponent,
    board: &mut Board,
    first: Side,
) -> Outcome {
    board.reset();
    agent.start_episode();

    if first == Side::Opponent {
        opponent_turn(opponent, board);
    }
    while !agent.train_step(board) {
        opponent_turn(opponent, board);
    }

    // train_step only reports completion on a terminal board
    board.outcome().unwrap_or(Outcome::Draw)
}

/// Play one game without learning
pub fn play_evaluation_episode(
    agent: &mut QLearningAgent,
    opponent: &mut dyn Opponent,
    board: &mut Board,
    first: Side,
) -> Outcome {
    board.reset();
    agent.start_episode();

    if first == Side::Opponent {
        opponent_turn(opponent, board);
    }
    while !agent.evaluate_step(board) {
        opponent_turn(opponent, board);
    }

    board.outcome().unwrap_or(Outcome::Draw)
}
