//! Notifications from the controller to the presentation layer.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::types::{GameResult, Move, Side};

/// Something the presentation layer may want to animate or announce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A fresh game began (construction or restart).
    GameStarted { first: Side },
    /// `side` placed a disc at `at` and flipped `flipped`.
    MoveApplied {
        side: Side,
        at: Move,
        flipped: Vec<Move>,
    },
    /// `side` had no legal move and was skipped.
    SidePassed { side: Side },
    GameEnded { result: GameResult },
}

/// Receives controller events as they happen.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Observer that queues events for later draining. Clones share the queue.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    /// Removes and returns everything queued so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
