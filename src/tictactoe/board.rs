//! Board representation and the base-3 state encoding

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    encoding::{CELL_COUNT, Position, StateIndex},
    lines::LineAnalyzer,
};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Agent,
    Opponent,
}

impl Cell {
    /// Base-3 digit used by the state encoding
    pub fn digit(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::Agent => 1,
            Cell::Opponent => 2,
        }
    }

    fn from_digit(digit: usize) -> Cell {
        match digit {
            1 => Cell::Agent,
            2 => Cell::Opponent,
            _ => Cell::Empty,
        }
    }

    /// Console glyph: the agent plays `X`, the opponent `O`
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Agent => 'X',
            Cell::Opponent => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Agent),
            'O' | 'o' => Some(Cell::Opponent),
            _ => None,
        }
    }
}

/// Which participant places a mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Agent,
    Opponent,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Agent => Side::Opponent,
            Side::Opponent => Side::Agent,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Side::Agent => Cell::Agent,
            Side::Opponent => Cell::Opponent,
        }
    }
}

/// Result of a finished game, from the agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    AgentWin,
    OpponentWin,
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::AgentWin => Some(Side::Agent),
            Outcome::OpponentWin => Some(Side::Opponent),
            Outcome::Draw => None,
        }
    }
}

/// A 3x3 tic-tac-toe board, stored row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Parse a board from nine cell characters (`X`, `O`, `.`), row-major.
    ///
    /// Row separators (`|`, `/`, line breaks) are ignored, so
    /// `"XO./.X./..O"` and `"XO..X...O"` describe the same board.
    ///
    /// # Errors
    ///
    /// Returns error if there are not exactly nine cells or a character is invalid.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !matches!(c, '|' | '/' | '\n' | '\r'))
            .collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, position: Position) -> Cell {
        self.cells[position.cell()]
    }

    pub fn is_empty(&self, position: Position) -> bool {
        self.get(position) == Cell::Empty
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Mark `position` for `side`.
    ///
    /// Returns `false` and leaves the board untouched if the cell is occupied.
    pub fn apply_move(&mut self, position: Position, side: Side) -> bool {
        let cell = &mut self.cells[position.cell()];
        if *cell != Cell::Empty {
            return false;
        }
        *cell = side.to_cell();
        true
    }

    /// Empty cells in row-major order
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::all().filter(|&p| self.is_empty(p)).collect()
    }

    /// Base-3 index of the board: cell `(r, c)` contributes `digit * 3^(3r + c)`
    pub fn encode(&self) -> StateIndex {
        let index = self
            .cells
            .iter()
            .rev()
            .fold(0usize, |acc, cell| acc * 3 + cell.digit());
        StateIndex::from_encoded(index)
    }

    /// Rebuild the board a state index was encoded from
    pub fn decode(state: StateIndex) -> Self {
        let mut remaining = state.as_usize();
        let mut cells = [Cell::Empty; CELL_COUNT];
        for cell in &mut cells {
            *cell = Cell::from_digit(remaining % 3);
            remaining /= 3;
        }
        Self { cells }
    }

    pub fn has_won(&self, side: Side) -> bool {
        LineAnalyzer::has_won(&self.cells, side)
    }

    pub fn has_agent_won(&self) -> bool {
        self.has_won(Side::Agent)
    }

    pub fn has_opponent_won(&self) -> bool {
        self.has_won(Side::Opponent)
    }

    /// True when no empty cell remains.
    ///
    /// This does not look at lines: a full board that contains a win also
    /// reports `true`. Only read it as a draw after both [`Board::has_won`]
    /// checks have returned `false`, or use [`Board::outcome`], which applies
    /// that ordering.
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Final result, if the game is over. Wins are checked before the draw.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.has_agent_won() {
            Some(Outcome::AgentWin)
        } else if self.has_opponent_won() {
            Some(Outcome::OpponentWin)
        } else if self.is_draw() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Clear every cell, ready for the next game
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "------")?;
            }
            writeln!(
                f,
                "{}|{}|{}",
                chunk[0].to_char(),
                chunk[1].to_char(),
                chunk[2].to_char()
            )?;
        }
        Ok(())
    }
}
