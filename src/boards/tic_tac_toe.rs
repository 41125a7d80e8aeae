use crate::error::{Error, Result};
use crate::game::{GameState, Outcome};
use std::fmt;
use std::str::FromStr;

/// The two participants of a tic-tac-toe game. `X` always moves first.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// An N×N tic-tac-toe board.
///
/// Cells are addressed by their row-major index, which is also the action type. A player wins
/// by filling a whole row, a whole column or one of the two main diagonals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeBoard {
    size: usize,
    cells: Vec<Option<Mark>>,
    current_player: Mark,
    outcome: Option<Outcome<Mark>>,
}

impl TicTacToeBoard {
    /// Creates an empty `size`×`size` board with `X` to move.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidBoardSize { size });
        }

        Ok(Self {
            size,
            cells: vec![None; size * size],
            current_player: Mark::X,
            outcome: None,
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The mark in the cell at `index`, if any.
    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    fn line_winner(&self, mut line: impl Iterator<Item = usize>) -> Option<Mark> {
        let first = self.cells[line.next()?]?;
        line.all(|index| self.cells[index] == Some(first))
            .then_some(first)
    }

    fn compute_outcome(&self) -> Option<Outcome<Mark>> {
        let n = self.size;
        for k in 0..n {
            let winner = self
                .line_winner((0..n).map(|col| k * n + col))
                .or_else(|| self.line_winner((0..n).map(|row| row * n + k)));
            if let Some(mark) = winner {
                return Some(Outcome::Win(mark));
            }
        }

        let diagonal = self
            .line_winner((0..n).map(|i| i * n + i))
            .or_else(|| self.line_winner((0..n).map(|i| i * n + (n - 1 - i))));
        if let Some(mark) = diagonal {
            return Some(Outcome::Win(mark));
        }

        if self.cells.iter().all(Option::is_some) {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl Default for TicTacToeBoard {
    /// Creates an empty 3×3 board with `X` to move.
    fn default() -> Self {
        Self {
            size: 3,
            cells: vec![None; 9],
            current_player: Mark::X,
            outcome: None,
        }
    }
}

impl GameState for TicTacToeBoard {
    type Action = usize;
    type Player = Mark;

    fn current_player(&self) -> Mark {
        self.current_player
    }

    fn opponent(&self, player: Mark) -> Mark {
        player.other()
    }

    fn legal_actions(&self, _player: Mark) -> Vec<usize> {
        if self.outcome.is_some() {
            return Vec::new();
        }

        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    fn apply(&self, action: &usize) -> Result<Self> {
        if self.outcome.is_some() {
            return Err(Error::GameOver);
        }
        if !matches!(self.cells.get(*action), Some(None)) {
            return Err(Error::illegal_action(action));
        }

        let mut next = self.clone();
        next.cells[*action] = Some(self.current_player);
        next.current_player = self.current_player.other();
        next.outcome = next.compute_outcome();
        Ok(next)
    }

    fn outcome(&self) -> Option<Outcome<Mark>> {
        self.outcome
    }
}

impl FromStr for TicTacToeBoard {
    type Err = Error;

    /// Parses a board from rows of `X`, `O` and `.`. Whitespace and `/` are ignored, so both
    /// `"XO./.X./..O"` and a multi-line grid are accepted. The side to move is derived from
    /// the number of marks.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let symbols = s.chars().filter(|c| !c.is_whitespace() && *c != '/');
        for (position, character) in symbols.enumerate() {
            let cell = match character {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' => None,
                _ => return Err(Error::InvalidCellCharacter { character, position }),
            };
            cells.push(cell);
        }

        let size = cells.len().isqrt();
        if size == 0 || size * size != cells.len() {
            return Err(Error::InvalidBoardLength { got: cells.len() });
        }

        let x_count = cells.iter().filter(|c| **c == Some(Mark::X)).count();
        let o_count = cells.iter().filter(|c| **c == Some(Mark::O)).count();
        let current_player = if x_count == o_count {
            Mark::X
        } else if x_count == o_count + 1 {
            Mark::O
        } else {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        };

        let mut board = Self {
            size,
            cells,
            current_player,
            outcome: None,
        };
        board.outcome = board.compute_outcome();
        Ok(board)
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                match cell {
                    Some(mark) => write!(f, "{mark}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
