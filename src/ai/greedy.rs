use crate::ai::Strategy;
use crate::board::Board;
use crate::rules;
use crate::types::{Move, Side};

/// Takes whichever move flips the most discs.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn select_move(&mut self, board: &Board, side: Side, legal_moves: &[Move]) -> Move {
        most_captures(board, side, legal_moves)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Move with the largest capture set. Ties go to the earliest move in
/// `legal_moves`, i.e. lowest row then lowest column.
pub(crate) fn most_captures(board: &Board, side: Side, legal_moves: &[Move]) -> Move {
    debug_assert!(
        !legal_moves.is_empty(),
        "most_captures() requires at least one legal move"
    );

    let mut best_move = legal_moves[0];
    let mut best_count = 0usize;

    for &mv in legal_moves {
        let count = match rules::compute_captures(board, mv, side) {
            Ok(captures) => captures.len(),
            Err(err) => {
                debug_assert!(false, "most_captures() given non-candidate {mv}: {err}");
                0
            }
        };
        if count > best_count {
            best_count = count;
            best_move = mv;
        }
    }

    best_move
}
