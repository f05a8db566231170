//! Play command - Play against a trained agent from the console
//!
//! The agent is `X` and plays greedily without learning; the human is `O`
//! and enters moves as `row,col` with 0-based indices.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;

use crate::{
    adapters::MsgPackRepository,
    pipeline::OutcomeTally,
    ports::AgentRepository,
    q_learning::QLearningAgent,
    tictactoe::{Board, Cell, Outcome, Position, Side},
};

/// Games in a console session unless told otherwise
pub const DEFAULT_SESSION_GAMES: usize = 10;

/// Why a line typed by the human is not a usable move
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Sorry, your answer is in the wrong format. Please try again.")]
    Format,

    #[error("You have entered something that is not a number. Please try again.")]
    NotANumber,

    #[error("The input you have entered is out of range. Please try again.")]
    OutOfRange { row: usize, col: usize },

    #[error("Sorry, the move you requested is not a valid move. Please try again.")]
    Occupied { position: Position },
}

/// Parse `row,col` into a position.
///
/// Surrounding whitespace is ignored; what remains must be exactly three
/// characters with a single comma in the middle.
///
/// ```
/// use qtoe::cli::commands::play::{InputError, parse_move_input};
///
/// let position = parse_move_input(" 1,2\n").unwrap();
/// assert_eq!((position.row(), position.col()), (1, 2));
/// assert_eq!(parse_move_input("1, 2"), Err(InputError::Format));
/// ```
pub fn parse_move_input(input: &str) -> std::result::Result<Position, InputError> {
    let trimmed = input.trim();
    if trimmed.chars().count() != 3 {
        return Err(InputError::Format);
    }

    let Some((row, col)) = trimmed.split_once(',') else {
        return Err(InputError::Format);
    };
    if col.contains(',') {
        return Err(InputError::Format);
    }

    let row: usize = row.parse().map_err(|_| InputError::NotANumber)?;
    let col: usize = col.parse().map_err(|_| InputError::NotANumber)?;
    Position::new(row, col).map_err(|_| InputError::OutOfRange { row, col })
}

/// How a console session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// `opponent_wins` counts the human's wins
    pub tally: OutcomeTally,
    /// `false` if input ran out before every game was played
    pub completed: bool,
}

/// A series of games between a human and a frozen agent
///
/// Turns alternate strictly across the whole session, so whoever did not make
/// the final move of one game opens the next.
pub struct HumanSession<'a, R, W> {
    agent: &'a mut QLearningAgent,
    input: R,
    output: W,
    games: usize,
}

impl<'a, R: BufRead, W: Write> HumanSession<'a, R, W> {
    pub fn new(agent: &'a mut QLearningAgent, input: R, output: W) -> Self {
        Self {
            agent,
            input,
            output,
            games: DEFAULT_SESSION_GAMES,
        }
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn run(&mut self) -> crate::Result<SessionSummary> {
        writeln!(
            self.output,
            "Time to try your hand against the agent. Play {} games against it and see how you do.",
            self.games
        )?;
        writeln!(self.output, "Agent is 'X', you are 'O'.")?;

        let mut board = Board::new();
        self.agent.start_episode();
        write!(self.output, "{board}")?;

        let mut tally = OutcomeTally::default();
        let mut agent_turn = true;
        while tally.games() < self.games {
            if agent_turn {
                writeln!(self.output, "Agent's turn.")?;
                self.agent.evaluate_step(&mut board);
            } else {
                writeln!(self.output, "Your turn.\n")?;
                let Some(position) = self.read_move(&board)? else {
                    writeln!(self.output, "\nInput closed, ending the session.")?;
                    self.print_totals(&tally)?;
                    return Ok(SessionSummary {
                        tally,
                        completed: false,
                    });
                };
                board.apply_move(position, Side::Opponent);
            }
            write!(self.output, "{board}")?;

            if let Some(outcome) = board.outcome() {
                let message = match outcome {
                    Outcome::AgentWin => "Agent has won!",
                    Outcome::OpponentWin => "You won!",
                    Outcome::Draw => "It's a draw.",
                };
                writeln!(self.output, "{message}")?;
                tally.record(outcome);
                board.reset();
                self.agent.start_episode();
            }
            agent_turn = !agent_turn;
        }

        self.print_totals(&tally)?;
        Ok(SessionSummary {
            tally,
            completed: true,
        })
    }

    /// Prompt until a legal move is entered; `None` at end of input
    fn read_move(&mut self, board: &Board) -> crate::Result<Option<Position>> {
        loop {
            writeln!(
                self.output,
                "Please select the grid element you want by typing in the following format: row,col"
            )?;
            writeln!(
                self.output,
                "Remember that the grid is 0-based; e.g., row 1, column 1 would be '0,0'"
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let parsed = parse_move_input(&line).and_then(|position| {
                if board.get(position) == Cell::Empty {
                    Ok(position)
                } else {
                    Err(InputError::Occupied { position })
                }
            });
            match parsed {
                Ok(position) => return Ok(Some(position)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn print_totals(&mut self, tally: &OutcomeTally) -> crate::Result<()> {
        writeln!(self.output, "Agent won {} games.", tally.agent_wins)?;
        writeln!(self.output, "You won {} games.", tally.opponent_wins)?;
        writeln!(self.output, "{} games were a draw.", tally.draws)?;
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play against a trained agent")]
pub struct PlayArgs {
    /// Path to a saved agent
    pub agent: PathBuf,

    /// Number of games in the session
    #[arg(long, short = 'g', default_value_t = DEFAULT_SESSION_GAMES)]
    pub games: usize,
}

/// Console session on stdin/stdout
pub fn play_on_console(agent: &mut QLearningAgent, games: usize) -> Result<SessionSummary> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = HumanSession::new(agent, stdin.lock(), stdout.lock())
        .with_games(games)
        .run()
        .context("console session failed")?;
    Ok(summary)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let saved = MsgPackRepository
        .load(&args.agent)
        .with_context(|| format!("failed to load agent from {}", args.agent.display()))?;
    let mut agent = saved.to_agent()?;

    play_on_console(&mut agent, args.games)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::AgentConfig;

    #[test]
    fn test_parse_accepts_padded_input() {
        let position = parse_move_input("  2,0 \n").unwrap();
        assert_eq!((position.row(), position.col()), (2, 0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_move_input("11"), Err(InputError::Format));
        assert_eq!(parse_move_input("1,1,"), Err(InputError::Format));
        assert_eq!(parse_move_input("1;1"), Err(InputError::Format));
        assert_eq!(parse_move_input(",,,"), Err(InputError::Format));
        assert_eq!(parse_move_input("a,1"), Err(InputError::NotANumber));
        assert_eq!(parse_move_input("12,"), Err(InputError::NotANumber));
        assert_eq!(
            parse_move_input("3,0"),
            Err(InputError::OutOfRange { row: 3, col: 0 })
        );
    }

    #[test]
    fn test_session_ends_cleanly_at_end_of_input() {
        let mut agent = QLearningAgent::new(AgentConfig::new().with_seed(1)).unwrap();
        let mut output = Vec::new();

        let summary = HumanSession::new(&mut agent, &b""[..], &mut output)
            .run()
            .unwrap();

        assert!(!summary.completed);
        assert_eq!(summary.tally.games(), 0);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Agent's turn."));
        assert!(text.contains("Input closed"));
    }
}
