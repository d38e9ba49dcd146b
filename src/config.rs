use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::ai::AiLevel;
use crate::types::Side;

/// Game settings. Deserializes from the camelCase object the UI sends;
/// every field may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Side played by the computer; `None` for two human players.
    pub ai_side: Option<Side>,
    pub ai_level: AiLevel,
    /// Overrides the level's default thinking delay.
    pub thinking_delay_ms: Option<u64>,
    /// Seed for the random opponent.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Human against the computer, which plays `ai_side`.
    pub fn versus_computer(ai_side: Side, ai_level: AiLevel) -> Self {
        Self {
            ai_side: Some(ai_side),
            ai_level,
            ..Self::default()
        }
    }

    pub fn is_computer(&self, side: Side) -> bool {
        self.ai_side == Some(side)
    }

    pub fn thinking_delay(&self) -> Duration {
        self.thinking_delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.ai_level.default_thinking_delay())
    }
}
