use crate::ai::Strategy;
use crate::ai::greedy::most_captures;
use crate::board::Board;
use crate::types::{Move, Side};

/// Corners first, then edges, then the greedy choice.
///
/// Capture counts are ignored whenever a corner or edge is available:
/// owning the rim matters more than the discs won this turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalStrategy;

impl Strategy for PositionalStrategy {
    fn select_move(&mut self, board: &Board, side: Side, legal_moves: &[Move]) -> Move {
        legal_moves
            .iter()
            .find(|mv| mv.is_corner())
            .or_else(|| legal_moves.iter().find(|mv| mv.is_edge()))
            .copied()
            .unwrap_or_else(|| most_captures(board, side, legal_moves))
    }

    fn name(&self) -> &'static str {
        "positional"
    }
}
