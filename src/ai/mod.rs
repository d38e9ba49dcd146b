//! Computer opponents.
//!
//! Every level is a one-ply policy: it looks at the current board and the
//! legal moves and picks one, without searching ahead.

mod greedy;
mod positional;
mod random;

pub use greedy::GreedyStrategy;
pub use positional::PositionalStrategy;
pub use random::RandomStrategy;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::board::Board;
use crate::types::{Move, Side};

/// Picks one move out of the legal moves for a position.
pub trait Strategy: Send {
    /// Caller contract: `legal_moves` is non-empty and in row-major order.
    fn select_move(&mut self, board: &Board, side: Side, legal_moves: &[Move]) -> Move;

    fn name(&self) -> &'static str;
}

/// Difficulty tier of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiLevel {
    #[serde(alias = "easy")]
    Random,
    #[default]
    #[serde(alias = "normal")]
    Greedy,
    #[serde(alias = "hard")]
    Positional,
}

impl AiLevel {
    /// Builds the strategy for this level. `seed` only affects [`AiLevel::Random`].
    pub fn strategy(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            AiLevel::Random => Box::new(match seed {
                Some(seed) => RandomStrategy::with_seed(seed),
                None => RandomStrategy::new(),
            }),
            AiLevel::Greedy => Box::new(GreedyStrategy),
            AiLevel::Positional => Box::new(PositionalStrategy),
        }
    }

    /// Artificial thinking time before the move is shown.
    pub fn default_thinking_delay(self) -> Duration {
        match self {
            AiLevel::Random => Duration::from_millis(500),
            AiLevel::Greedy => Duration::from_millis(1000),
            AiLevel::Positional => Duration::from_millis(1500),
        }
    }
}
