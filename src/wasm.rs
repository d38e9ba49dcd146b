//! JavaScript bindings for the browser UI.
//!
//! Values cross the boundary as plain objects via `serde-wasm-bindgen`;
//! engine errors become `JsError`s carrying the error message.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::config::GameConfig;
use crate::events::EventLog;
use crate::game::GameController;
use crate::types::Move;

#[wasm_bindgen]
pub struct WasmGame {
    controller: GameController,
    events: EventLog,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` may be `undefined` for a two-player game.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let events = EventLog::default();
        let mut controller = GameController::new(parse_config(config)?);
        controller.add_observer(Box::new(events.clone()));
        Ok(Self { controller, events })
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.controller.legal_moves())
    }

    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, row: u32, col: u32) -> Result<JsValue, JsError> {
        let outcome = self.controller.submit_move(board_move(row, col)?)?;
        to_js(&outcome)
    }

    /// Starts the thinking delay; returns milliseconds until `pollAiMove` will play.
    #[wasm_bindgen(js_name = scheduleAiMove)]
    pub fn schedule_ai_move(&mut self) -> Result<f64, JsError> {
        let now = Instant::now();
        let ticket = self.controller.schedule_ai_move(now)?;
        Ok(ticket.remaining(now).as_secs_f64() * 1000.0)
    }

    /// Plays the scheduled move if it is due; `undefined` otherwise.
    #[wasm_bindgen(js_name = pollAiMove)]
    pub fn poll_ai_move(&mut self) -> Result<JsValue, JsError> {
        let outcome = self.controller.poll_ai_move(Instant::now())?;
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = cancelAiMove)]
    pub fn cancel_ai_move(&mut self) -> bool {
        self.controller.cancel_ai_move()
    }

    pub fn restart(&mut self) {
        self.controller.restart();
    }

    pub fn configure(&mut self, config: JsValue) -> Result<(), JsError> {
        self.controller.configure(parse_config(config)?);
        Ok(())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.controller.snapshot())
    }

    /// Final result, or `undefined` while the game is running.
    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.controller.result())
    }

    /// Events since the previous call, oldest first.
    #[wasm_bindgen(js_name = takeEvents)]
    pub fn take_events(&self) -> Result<JsValue, JsError> {
        to_js(&self.events.drain())
    }
}

fn parse_config(config: JsValue) -> Result<GameConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(GameConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}

/// Coordinates too large for `u8` are rejected here rather than truncated;
/// the controller rejects the rest of the off-board range.
fn board_move(row: u32, col: u32) -> Result<Move, JsError> {
    match (u8::try_from(row), u8::try_from(col)) {
        (Ok(row), Ok(col)) => Ok(Move::new(row, col)),
        _ => Err(JsError::new(&format!(
            "illegal move at ({row}, {col}): square is off the board"
        ))),
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}
