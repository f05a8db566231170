//! Opponent port - whoever plays the other side against the agent

use crate::tictactoe::{Board, Position};

/// Move source for the non-learning side of the board
///
/// The driver applies the returned position for
/// [`Side::Opponent`](crate::tictactoe::Side::Opponent); implementations only
/// choose.
///
/// # Examples
///
/// ```
/// use qtoe::{ports::Opponent, tictactoe::{Board, Position}};
///
/// /// Always takes the first free cell
/// struct FirstFree;
///
/// impl Opponent for FirstFree {
///     fn select_move(&mut self, board: &Board) -> Option<Position> {
///         board.legal_moves().first().copied()
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
///
/// let mut opponent = FirstFree;
/// assert_eq!(opponent.select_move(&Board::new()).unwrap().cell(), 0);
/// ```
pub trait Opponent {
    /// Choose a cell to play, or `None` if the board has no empty cell.
    fn select_move(&mut self, board: &Board) -> Option<Position>;

    /// Name used in reports and saved metadata.
    fn name(&self) -> &str;

    /// Seed the opponent's random number generator, if it has one.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for deterministic opponents.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
