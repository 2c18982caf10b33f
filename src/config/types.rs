// Treat Chase configuration types
// Every section falls back to defaults so partial files load

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::SpeedMode;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub treats: TreatConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub bots: BotConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
    // Board size in grid cells
    pub width: u32,
    pub height: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 24,
            height: 24,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TreatConfig {
    // Spawning stops once this many treats are on the board
    pub max_treats: usize,
}

impl Default for TreatConfig {
    fn default() -> Self {
        Self { max_treats: 5 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    // Milliseconds between ticks in each speed mode
    pub fast_interval_ms: u64,
    pub slow_interval_ms: u64,

    // Start in fast mode
    pub start_fast: bool,
}

impl TimingConfig {
    pub fn interval(&self, speed: SpeedMode) -> Duration {
        match speed {
            SpeedMode::Fast => Duration::from_millis(self.fast_interval_ms),
            SpeedMode::Slow => Duration::from_millis(self.slow_interval_ms),
        }
    }

    pub fn initial_speed(&self) -> SpeedMode {
        if self.start_fast {
            SpeedMode::Fast
        } else {
            SpeedMode::Slow
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fast_interval_ms: 100,
            slow_interval_ms: 300,
            start_fast: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    // Bots present when the game starts
    pub greedy: bool,
    pub stochastic: bool,

    // Fixed seed for reproducible runs (treat spawns and AI bot choices)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            greedy: true,
            stochastic: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Player colours (RGB values 0-255)
    pub greedy_color: [u8; 3],
    pub stochastic_color: [u8; 3],
    pub human_color: [u8; 3],

    // Treat colour
    pub treat_color: [u8; 3],

    // Grid dot colour
    pub grid_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            greedy_color: [204, 102, 204],    // #c6c
            stochastic_color: [51, 102, 170], // #36a
            human_color: [204, 51, 51],       // #c33
            treat_color: [51, 204, 51],       // #3c3
            grid_color: [153, 153, 153],      // #999
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Heading buttons
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,

    // Control buttons
    pub start: String,
    pub select: String,
    pub confirm: String,
    pub cancel: String,
    pub shoulder_left: String,
    pub shoulder_right: String,

    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "Up".to_string(),
            down: "Down".to_string(),
            left: "Left".to_string(),
            right: "Right".to_string(),
            start: "P".to_string(),
            select: "F".to_string(),
            confirm: "A".to_string(),
            cancel: "G".to_string(),
            shoulder_left: "R".to_string(),
            shoulder_right: "X".to_string(),
            quit: "Q".to_string(),
        }
    }
}
