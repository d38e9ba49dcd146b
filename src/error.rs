//! Error types for the engine.
//!
//! `IllegalMove`, `InvalidState` and `StaleTicket` are caller mistakes and
//! are meant to be shown to the player. `OutOfRange` and `InvalidMove` mean
//! the engine itself broke a contract.

use thiserror::Error;

use crate::types::ControllerState;

/// Errors that can occur in the rules engine or the controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the 8x8 board
    #[error("coordinate ({row}, {col}) is off the board")]
    OutOfRange { row: u8, col: u8 },

    /// Target occupied or nothing would be captured
    #[error("illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        row: u8,
        col: u8,
        reason: &'static str,
    },

    /// `apply_move` precondition violated
    #[error("invalid move at ({row}, {col}): it captures nothing")]
    InvalidMove { row: u8, col: u8 },

    /// Operation attempted while the controller is in the wrong state
    #[error("{operation} is not allowed while {state}")]
    InvalidState {
        operation: &'static str,
        state: ControllerState,
    },

    /// Thinking ticket was cancelled or replaced before completion
    #[error("the AI move was cancelled or superseded")]
    StaleTicket,
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error returned when a text board cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {found} cells, expected 8")]
    RowLength { row: usize, found: usize },

    #[error("unknown cell symbol {symbol:?} in row {row}")]
    Symbol { row: usize, symbol: char },
}
