use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::ai::Strategy;
use crate::board::Board;
use crate::types::{Move, Side};

/// Uniform choice among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomStrategy<R = StdRng> {
    rng: R,
}

impl RandomStrategy<StdRng> {
    /// Seeded from the wall clock; use [`RandomStrategy::with_seed`] for
    /// reproducible games.
    pub fn new() -> Self {
        Self::with_seed(clock_seed())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomStrategy<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomStrategy<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Strategy for RandomStrategy<R> {
    fn select_move(&mut self, _board: &Board, _side: Side, legal_moves: &[Move]) -> Move {
        debug_assert!(
            !legal_moves.is_empty(),
            "select_move() requires at least one legal move"
        );
        legal_moves[self.rng.gen_range(0..legal_moves.len())]
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
