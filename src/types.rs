use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub(crate) const BOARD_WIDTH: u8 = 8;

/// One of the two players. Dark always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Dark,
    Light,
}

impl std::ops::Not for Side {
    type Output = Self;

    /// Gets the opponent.
    fn not(self) -> Self {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Dark => f.write_str("dark"),
            Side::Light => f.write_str("light"),
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Occupied(Side),
}

impl CellState {
    pub fn side(self) -> Option<Side> {
        match self {
            CellState::Empty => None,
            CellState::Occupied(side) => Some(side),
        }
    }

    /// 0 = empty, 1 = dark, 2 = light.
    pub fn code(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Occupied(Side::Dark) => 1,
            CellState::Occupied(Side::Light) => 2,
        }
    }
}

/// A board coordinate, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Builds a move, rejecting coordinates off the board.
    pub fn try_new(row: u8, col: u8) -> EngineResult<Self> {
        if row >= BOARD_WIDTH || col >= BOARD_WIDTH {
            return Err(EngineError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_WIDTH as usize) as u8,
            col: (idx % BOARD_WIDTH as usize) as u8,
        }
    }

    pub fn is_corner(self) -> bool {
        is_rim(self.row) && is_rim(self.col)
    }

    /// True for rim squares that are not corners.
    pub fn is_edge(self) -> bool {
        (is_rim(self.row) || is_rim(self.col)) && !self.is_corner()
    }
}

fn is_rim(coord: u8) -> bool {
    coord == 0 || coord == BOARD_WIDTH - 1
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Opponent discs flipped by one move, in direction order then distance.
pub type CaptureSet = Vec<Move>;

/// Disc counts per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Scores {
    pub dark: u8,
    pub light: u8,
}

impl Scores {
    pub fn total(self) -> u8 {
        self.dark + self.light
    }

    /// Side with more discs, `None` when level.
    pub fn leader(self) -> Option<Side> {
        match self.dark.cmp(&self.light) {
            std::cmp::Ordering::Greater => Some(Side::Dark),
            std::cmp::Ordering::Less => Some(Side::Light),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// What happened to the turn after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum TurnOutcome {
    /// The opponent is now to move.
    Continue,
    /// `skipped` had no legal move; the side that just moved goes again.
    Passed { skipped: Side },
    /// Neither side can move.
    Ended,
}

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ControllerState {
    AwaitingHumanMove,
    ComputingAiMove,
    /// Between applying a move and deriving the next phase.
    TurnComplete,
    GameOver,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ControllerState::AwaitingHumanMove => "awaiting a human move",
            ControllerState::ComputingAiMove => "computing an AI move",
            ControllerState::TurnComplete => "completing a turn",
            ControllerState::GameOver => "the game is over",
        };
        f.write_str(text)
    }
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `None` on a draw.
    pub winner: Option<Side>,
    pub scores: Scores,
}

impl GameResult {
    pub fn from_scores(scores: Scores) -> Self {
        Self {
            winner: scores.leader(),
            scores,
        }
    }
}

/// Public game state returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// 64 cells, row-major: 0 = empty, 1 = dark, 2 = light.
    pub board: Vec<u8>,
    pub current_side: Side,
    pub state: ControllerState,
    pub scores: Scores,
    pub is_game_over: bool,
    pub legal_moves: Vec<Move>,
}
