//! Tic-tac-toe board and its table encoding

pub mod board;
pub mod encoding;
pub mod lines;

pub use board::{Board, Cell, Outcome, Side};
pub use encoding::{ACTION_COUNT, ActionIndex, CELL_COUNT, Position, STATE_COUNT, StateIndex};
pub use lines::{LineAnalyzer, WINNING_LINES};
