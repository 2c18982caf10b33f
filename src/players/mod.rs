// Player controllers: bots and human input adapters

mod controller;
mod greedy_bot;
mod human;
mod stochastic_bot;
pub mod targeting;

pub use controller::{Controller, TickView};
pub use greedy_bot::GreedyBot;
pub use human::HumanPlayer;
pub use stochastic_bot::{
    decode_direction, encode_inputs, DirectionScorer, NoiseScorer, StochasticBot, INPUT_LEN,
    OUTPUT_LEN,
};

use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::game::{ColorToken, ControlHandle, WorldError};

/// Player variant selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Chases the nearest treat, vertical axis first
    GreedyBot,
    /// Scores directions from a normalized world vector (placeholder for a model)
    StochasticBot,
    /// Bound to an input device
    Human,
}

impl PlayerKind {
    /// Get display name for player kind
    pub fn display_name(&self) -> &str {
        match self {
            PlayerKind::GreedyBot => "Greedy",
            PlayerKind::StochasticBot => "AI",
            PlayerKind::Human => "Human",
        }
    }

    pub fn is_bot(&self) -> bool {
        !matches!(self, PlayerKind::Human)
    }

    /// Get all bot kinds
    pub fn bots() -> Vec<PlayerKind> {
        vec![PlayerKind::GreedyBot, PlayerKind::StochasticBot]
    }
}

/// Colours assigned to new players and treats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub greedy: ColorToken,
    pub stochastic: ColorToken,
    pub human: ColorToken,
    pub treat: ColorToken,
}

impl Palette {
    pub fn color_for(&self, kind: PlayerKind) -> ColorToken {
        match kind {
            PlayerKind::GreedyBot => self.greedy,
            PlayerKind::StochasticBot => self.stochastic,
            PlayerKind::Human => self.human,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            greedy: ColorToken::GREEDY,
            stochastic: ColorToken::STOCHASTIC,
            human: ColorToken::HUMAN,
            treat: ColorToken::TREAT,
        }
    }
}

impl From<&DisplayConfig> for Palette {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            greedy: ColorToken(display.greedy_color),
            stochastic: ColorToken(display.stochastic_color),
            human: ColorToken(display.human_color),
            treat: ColorToken(display.treat_color),
        }
    }
}

/// Create a controller for `kind`
///
/// Humans need both a device identity and a control handle; bots ignore them.
/// `seed` feeds the stochastic bot's scorer.
pub fn create_controller(
    kind: PlayerKind,
    palette: &Palette,
    device: Option<&str>,
    controls: Option<ControlHandle>,
    seed: u64,
) -> Result<Box<dyn Controller>, WorldError> {
    let color = palette.color_for(kind);
    let controller: Box<dyn Controller> = match kind {
        PlayerKind::GreedyBot => Box::new(GreedyBot::new(color)),
        PlayerKind::StochasticBot => Box::new(StochasticBot::seeded(color, seed)),
        PlayerKind::Human => {
            let device = device.ok_or(WorldError::MissingDevice)?;
            let controls = controls.ok_or_else(|| WorldError::MissingControlSurface {
                device: device.to_string(),
            })?;
            Box::new(HumanPlayer::new(device, color, controls))
        }
    };
    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_requires_device() {
        let (handle, _rx) = ControlHandle::channel();
        let result = create_controller(
            PlayerKind::Human,
            &Palette::default(),
            None,
            Some(handle),
            0,
        );
        assert!(matches!(result, Err(WorldError::MissingDevice)));
    }

    #[test]
    fn test_human_requires_control_surface() {
        let result = create_controller(
            PlayerKind::Human,
            &Palette::default(),
            Some("pad"),
            None,
            0,
        );
        assert!(matches!(
            result,
            Err(WorldError::MissingControlSurface { ref device }) if device == "pad"
        ));
    }

    #[test]
    fn test_factory_kinds_and_colors() {
        let palette = Palette::default();
        let (handle, _rx) = ControlHandle::channel();

        for kind in [
            PlayerKind::GreedyBot,
            PlayerKind::StochasticBot,
            PlayerKind::Human,
        ] {
            let controller =
                create_controller(kind, &palette, Some("pad"), Some(handle.clone()), 3).unwrap();
            assert_eq!(controller.kind(), kind);
            assert_eq!(controller.color(), palette.color_for(kind));
            assert!(controller.active());
            assert_eq!(controller.owns_input_source("pad"), kind == PlayerKind::Human);
        }
    }
}
