use crate::board::Board;
use crate::types::Side;

/// Whether play continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Ended,
}

/// Board plus turn bookkeeping. Only the rules engine advances it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) active_side: Side,
    pub(crate) status: GameStatus,
    pub(crate) computer_to_move: bool,
}

impl GameState {
    /// Starting position, dark to move.
    pub fn new() -> Self {
        Self::from_position(Board::new(), Side::Dark)
    }

    pub fn from_position(board: Board, active_side: Side) -> Self {
        Self {
            board,
            active_side,
            status: GameStatus::Ongoing,
            computer_to_move: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Ended
    }

    pub fn computer_to_move(&self) -> bool {
        self.computer_to_move
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
