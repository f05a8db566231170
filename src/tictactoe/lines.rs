//! Winning line analysis for tic-tac-toe

use super::{Cell, Side};

/// Winning line cell offsets on the 3x3 board (row-major)
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a side holds all three cells of any line
    pub fn has_won(cells: &[Cell; 9], side: Side) -> bool {
        let target = side.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[3] = Cell::Agent;
        cells[4] = Cell::Agent;
        cells[5] = Cell::Agent;

        assert!(LineAnalyzer::has_won(&cells, Side::Agent));
        assert!(!LineAnalyzer::has_won(&cells, Side::Opponent));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::Opponent;
        cells[5] = Cell::Opponent;
        cells[8] = Cell::Opponent;

        assert!(LineAnalyzer::has_won(&cells, Side::Opponent));
        assert!(!LineAnalyzer::has_won(&cells, Side::Agent));
    }

    #[test]
    fn test_has_won_anti_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::Agent;
        cells[4] = Cell::Agent;
        cells[6] = Cell::Agent;

        assert!(LineAnalyzer::has_won(&cells, Side::Agent));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Agent;
        cells[1] = Cell::Opponent;
        cells[2] = Cell::Agent;

        assert!(!LineAnalyzer::has_won(&cells, Side::Agent));
        assert!(!LineAnalyzer::has_won(&cells, Side::Opponent));
    }
}
