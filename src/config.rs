//! Runtime game configuration.

use std::time::Duration;

use crate::constants::BOT_DELAY;
use crate::square::Color;

/// Settings fixed for the lifetime of a [`crate::game::Game`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Side that moves first.
    pub first_turn: Color,
    /// Sides played by the bot. Both, one, or neither.
    pub automated: Vec<Color>,
    /// Pause requested from the scheduler before each bot turn.
    pub bot_delay: Duration,
    /// Seed for the bot's random source; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_turn: Color::First,
            automated: vec![Color::Second],
            bot_delay: BOT_DELAY,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn is_automated(&self, color: Color) -> bool {
        self.automated.contains(&color)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_automated(mut self, automated: &[Color]) -> Self {
        self.automated = automated.to_vec();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.bot_delay = delay;
        self
    }
}
