//! Capture computation, move generation and turn advancement.

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::state::{GameState, GameStatus};
use crate::types::{BOARD_WIDTH, CaptureSet, CellState, Move, Side, TurnOutcome};

const NUM_SQUARES: usize = (BOARD_WIDTH as usize) * (BOARD_WIDTH as usize);
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Opponent discs that `side` would flip by playing `mv`.
///
/// Fails with `OutOfRange` for coordinates off the board and with
/// `IllegalMove` when the target square is already occupied. An empty
/// result means the square is empty but the move is not legal.
pub fn compute_captures(board: &Board, mv: Move, side: Side) -> EngineResult<CaptureSet> {
    if board.get(mv.row, mv.col)? != CellState::Empty {
        return Err(EngineError::IllegalMove {
            row: mv.row,
            col: mv.col,
            reason: "square is occupied",
        });
    }
    Ok(collect_captures(board, mv, side))
}

/// Every legal move for `side`, in row-major order.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    (0..NUM_SQUARES)
        .filter(|&idx| board.cell(idx) == CellState::Empty)
        .map(Move::from_index)
        .filter(|&mv| flanks_any(board, mv, side))
        .collect()
}

/// Whether `side` has at least one legal move.
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    (0..NUM_SQUARES)
        .filter(|&idx| board.cell(idx) == CellState::Empty)
        .any(|idx| flanks_any(board, Move::from_index(idx), side))
}

/// Places a disc for `side` at `mv` and flips the captured discs.
/// Returns the flipped squares.
///
/// The move must already be known legal. Calling this with a move that
/// captures nothing is a bug in the caller: it trips a debug assertion and
/// otherwise yields `InvalidMove` with the board untouched.
pub fn apply_move(board: &mut Board, mv: Move, side: Side) -> EngineResult<CaptureSet> {
    let captures = match compute_captures(board, mv, side) {
        Ok(captures) if !captures.is_empty() => captures,
        Ok(_) | Err(EngineError::IllegalMove { .. }) => {
            debug_assert!(false, "apply_move called with {mv}, which captures nothing");
            return Err(EngineError::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }
        Err(err) => return Err(err),
    };

    let disc = CellState::Occupied(side);
    board.set(mv.row, mv.col, disc)?;
    for flipped in &captures {
        board.set(flipped.row, flipped.col, disc)?;
    }
    Ok(captures)
}

/// Hands the turn to the opponent after a move, handling passes and game end.
///
/// If the opponent cannot move but the side that just moved can, the
/// opponent is skipped and the mover keeps the turn. If neither can move,
/// the state is marked ended and frozen.
pub fn advance_turn(state: &mut GameState) -> TurnOutcome {
    if state.is_over() {
        return TurnOutcome::Ended;
    }

    let mover = state.active_side;
    let next = !mover;
    state.active_side = next;

    if has_legal_move(&state.board, next) {
        TurnOutcome::Continue
    } else if has_legal_move(&state.board, mover) {
        state.active_side = mover;
        TurnOutcome::Passed { skipped: next }
    } else {
        state.status = GameStatus::Ended;
        TurnOutcome::Ended
    }
}

/// True when neither side has a legal move.
pub fn is_terminal(board: &Board) -> bool {
    !has_legal_move(board, Side::Dark) && !has_legal_move(board, Side::Light)
}

fn collect_captures(board: &Board, mv: Move, side: Side) -> CaptureSet {
    let mut captures = Vec::new();
    let mut line = Vec::new();

    for (dr, dc) in DIRECTIONS {
        line.clear();
        let mut r = mv.row as i32 + dr;
        let mut c = mv.col as i32 + dc;

        while in_bounds(r, c) {
            match board.cell(to_index(r, c)) {
                CellState::Occupied(owner) if owner != side => line.push(Move::new(r as u8, c as u8)),
                CellState::Occupied(_) => {
                    captures.append(&mut line);
                    break;
                }
                CellState::Empty => break,
            }
            r += dr;
            c += dc;
        }
    }

    captures
}

/// Early-exit variant of `collect_captures` for move generation.
fn flanks_any(board: &Board, mv: Move, side: Side) -> bool {
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let mut r = mv.row as i32 + dr;
        let mut c = mv.col as i32 + dc;
        let mut has_opponent = false;

        while in_bounds(r, c) {
            match board.cell(to_index(r, c)) {
                CellState::Occupied(owner) if owner != side => has_opponent = true,
                CellState::Occupied(_) => return has_opponent,
                CellState::Empty => return false,
            }
            r += dr;
            c += dc;
        }
        false
    })
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_WIDTH as i32).contains(&row) && (0..BOARD_WIDTH as i32).contains(&col)
}

fn to_index(row: i32, col: i32) -> usize {
    row as usize * BOARD_WIDTH as usize + col as usize
}
