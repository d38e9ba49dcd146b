use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod logging;
pub mod rules;
pub mod schedule;
pub mod state;
pub mod types;
pub mod wasm;

pub use ai::{AiLevel, Strategy};
pub use board::Board;
pub use config::GameConfig;
pub use error::{EngineError, EngineResult, ParseBoardError};
pub use events::{EventLog, GameEvent, GameObserver};
pub use game::GameController;
pub use state::{GameState, GameStatus};
pub use types::{
    CaptureSet, CellState, ControllerState, GameResult, GameSnapshot, Move, Scores, Side,
    TurnOutcome,
};

/// Sets up console logging and panic reporting. Call once after loading the module.
#[wasm_bindgen(js_name = initEngine)]
pub fn init_engine() {
    logging::init_logging(log::Level::Debug);
}
