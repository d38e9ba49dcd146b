use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult, ParseBoardError};
use crate::types::{BOARD_WIDTH, CellState, Scores, Side};

const BOARD_SIZE: usize = BOARD_WIDTH as usize;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Othello board state represented by two bitboards, bit index `row * 8 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    dark: u64,
    light: u64,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=light, (3,4)=dark, (4,3)=dark, (4,4)=light.
    pub fn new() -> Self {
        Self {
            dark: bit(28) | bit(35),
            light: bit(27) | bit(36),
        }
    }

    /// A board with no discs.
    pub fn empty() -> Self {
        Self { dark: 0, light: 0 }
    }

    /// Builds a board from raw occupancy masks. The masks must be disjoint.
    pub fn from_bitboards(dark: u64, light: u64) -> Self {
        debug_assert_eq!(dark & light, 0, "a square cannot hold two discs");
        Self { dark, light }
    }

    pub fn get(&self, row: u8, col: u8) -> EngineResult<CellState> {
        Ok(self.cell(square(row, col)?))
    }

    pub(crate) fn set(&mut self, row: u8, col: u8, state: CellState) -> EngineResult<()> {
        let idx = square(row, col)?;
        let mask = bit(idx);
        self.dark &= !mask;
        self.light &= !mask;
        match state {
            CellState::Empty => {}
            CellState::Occupied(Side::Dark) => self.dark |= mask,
            CellState::Occupied(Side::Light) => self.light |= mask,
        }
        Ok(())
    }

    /// Unchecked lookup by row-major index.
    pub(crate) fn cell(&self, idx: usize) -> CellState {
        let mask = bit(idx);
        if (self.dark & mask) != 0 {
            CellState::Occupied(Side::Dark)
        } else if (self.light & mask) != 0 {
            CellState::Occupied(Side::Light)
        } else {
            CellState::Empty
        }
    }

    pub fn count_discs(&self) -> Scores {
        Scores {
            dark: self.dark.count_ones() as u8,
            light: self.light.count_ones() as u8,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.count_discs().total()
    }

    /// The same position with every disc's color swapped.
    pub fn inverted(&self) -> Self {
        Self {
            dark: self.light,
            light: self.dark,
        }
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(idx).code();
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the board as a grid of `●` (dark), `○` (light) and `・` (empty).
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  0 1 2 3 4 5 6 7")?;
        for row in 0..BOARD_SIZE {
            write!(f, "\n{row} ")?;
            for col in 0..BOARD_SIZE {
                let symbol = match self.cell(row * BOARD_SIZE + col) {
                    CellState::Empty => '・',
                    CellState::Occupied(Side::Dark) => '●',
                    CellState::Occupied(Side::Light) => '○',
                };
                write!(f, "{symbol} ")?;
            }
        }
        Ok(())
    }
}

/// Parses eight lines of eight cells: `X`/`●` dark, `O`/`○` light, `.`/`・` empty.
/// Whitespace between cells and blank lines are ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(ParseBoardError::RowLength {
                    row,
                    found: cells.len(),
                });
            }
            for (col, symbol) in cells.into_iter().enumerate() {
                let mask = bit(row * BOARD_SIZE + col);
                match symbol {
                    'X' | 'x' | '●' => board.dark |= mask,
                    'O' | 'o' | '○' => board.light |= mask,
                    '.' | '・' => {}
                    _ => return Err(ParseBoardError::Symbol { row, symbol }),
                }
            }
        }
        Ok(board)
    }
}

fn bit(idx: usize) -> u64 {
    if idx < NUM_SQUARES { 1u64 << idx } else { 0 }
}

fn square(row: u8, col: u8) -> EngineResult<usize> {
    if row >= BOARD_WIDTH || col >= BOARD_WIDTH {
        return Err(EngineError::OutOfRange { row, col });
    }
    Ok(row as usize * BOARD_SIZE + col as usize)
}
