//! Browser tests for the JavaScript bindings.
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use othello::wasm::WasmGame;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).expect("field must exist")
}

#[wasm_bindgen_test]
fn init_engine_can_be_called_twice() {
    othello::init_engine();
    othello::init_engine();
}

#[wasm_bindgen_test]
fn new_game_offers_four_moves() {
    let game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    let moves = Array::from(&game.legal_moves().unwrap());

    assert_eq!(moves.length(), 4);
    assert_eq!(field(&moves.get(0), "row").as_f64(), Some(2.0));
    assert_eq!(field(&moves.get(0), "col").as_f64(), Some(3.0));
}

#[wasm_bindgen_test]
fn submit_move_updates_state_and_queues_event() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    let outcome = game.submit_move(2, 3).unwrap();

    assert_eq!(
        field(&outcome, "outcome").as_string().as_deref(),
        Some("continue")
    );
    let state = game.state().unwrap();
    let scores = field(&state, "scores");
    assert_eq!(field(&scores, "dark").as_f64(), Some(4.0));
    assert_eq!(field(&scores, "light").as_f64(), Some(1.0));
    assert_eq!(
        field(&state, "currentSide").as_string().as_deref(),
        Some("light")
    );

    let events = Array::from(&game.take_events().unwrap());
    assert_eq!(events.length(), 1);
    assert_eq!(
        field(&events.get(0), "type").as_string().as_deref(),
        Some("moveApplied")
    );
    assert_eq!(Array::from(&game.take_events().unwrap()).length(), 0);
}

#[wasm_bindgen_test]
fn illegal_move_is_reported_as_error() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    assert!(game.submit_move(0, 0).is_err());
}

#[wasm_bindgen_test]
fn oversized_coordinates_are_not_truncated() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    assert!(game.submit_move(258, 3).is_err());
    assert!(game.submit_move(8, 3).is_err());

    let scores = field(&game.state().unwrap(), "scores");
    assert_eq!(field(&scores, "dark").as_f64(), Some(2.0));
    assert_eq!(Array::from(&game.take_events().unwrap()).length(), 0);
}

#[wasm_bindgen_test]
fn configure_accepts_difficulty_aliases() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();
    let config = js_sys::Object::new();
    Reflect::set(&config, &"aiSide".into(), &"dark".into()).unwrap();
    Reflect::set(&config, &"aiLevel".into(), &"hard".into()).unwrap();
    Reflect::set(&config, &"thinkingDelayMs".into(), &0.into()).unwrap();

    game.configure(config.into()).unwrap();

    assert_eq!(game.schedule_ai_move().unwrap(), 0.0);
    let outcome = game.poll_ai_move().unwrap();
    assert_eq!(
        field(&outcome, "outcome").as_string().as_deref(),
        Some("continue")
    );
    assert!(game.result().unwrap().is_undefined());
}

#[wasm_bindgen_test]
fn cancelled_ai_move_does_not_play() {
    let config = js_sys::Object::new();
    Reflect::set(&config, &"aiSide".into(), &"dark".into()).unwrap();
    let mut game = WasmGame::new(config.into()).unwrap();

    game.schedule_ai_move().unwrap();
    assert!(game.cancel_ai_move());

    assert!(game.poll_ai_move().unwrap().is_undefined());
    let scores = field(&game.state().unwrap(), "scores");
    assert_eq!(field(&scores, "dark").as_f64(), Some(2.0));
}
