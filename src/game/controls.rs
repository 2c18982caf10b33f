// Control actions raised by human players and the driver-owned control state

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::players::PlayerKind;

/// One-shot UI actions a human player can trigger from its input device
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    Setup,
    Reset,
    Start,
    Pause,
    TogglePause,
    ToggleSpeed,
    ToggleStochasticBot,
    ToggleGreedyBot,
    Draw,
    /// Erase the marker of the player bound to `device`
    ClearPlayer { device: String },
}

/// Sending half handed to human players; the driver keeps the receiver
#[derive(Clone, Debug)]
pub struct ControlHandle {
    tx: Sender<ControlAction>,
}

impl ControlHandle {
    pub fn channel() -> (ControlHandle, Receiver<ControlAction>) {
        let (tx, rx) = mpsc::channel();
        (ControlHandle { tx }, rx)
    }

    /// Dispatch an action; a vanished driver is logged, not fatal
    pub fn send(&self, action: ControlAction) {
        if let Err(e) = self.tx.send(action) {
            tracing::warn!("control surface gone, dropping {:?}", e.0);
        }
    }
}

/// Tick pacing selected by the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedMode {
    Fast,
    Slow,
}

impl SpeedMode {
    pub fn toggled(self) -> Self {
        match self {
            SpeedMode::Fast => SpeedMode::Slow,
            SpeedMode::Slow => SpeedMode::Fast,
        }
    }
}

/// Work the driver must carry out on the world or renderer after an action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldCommand {
    Reset,
    ToggleBot(PlayerKind),
    Redraw,
    ClearPlayer { device: String },
}

/// Pause and speed state owned by the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub paused: bool,
    pub speed: SpeedMode,
}

impl Controls {
    pub fn new(speed: SpeedMode) -> Self {
        Self {
            paused: false,
            speed,
        }
    }

    /// Apply `action` to local state and return any world-level follow-up
    pub fn apply(&mut self, action: ControlAction) -> Option<WorldCommand> {
        tracing::debug!("control action {:?}", action);
        match action {
            ControlAction::Setup | ControlAction::Draw => Some(WorldCommand::Redraw),
            ControlAction::Reset => Some(WorldCommand::Reset),
            ControlAction::Start => {
                self.paused = false;
                None
            }
            ControlAction::Pause => {
                self.paused = true;
                None
            }
            ControlAction::TogglePause => {
                self.paused = !self.paused;
                None
            }
            ControlAction::ToggleSpeed => {
                self.speed = self.speed.toggled();
                None
            }
            ControlAction::ToggleStochasticBot => {
                Some(WorldCommand::ToggleBot(PlayerKind::StochasticBot))
            }
            ControlAction::ToggleGreedyBot => Some(WorldCommand::ToggleBot(PlayerKind::GreedyBot)),
            ControlAction::ClearPlayer { device } => Some(WorldCommand::ClearPlayer { device }),
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(SpeedMode::Fast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_toggles_and_explicit_states() {
        let mut controls = Controls::default();

        assert_eq!(controls.apply(ControlAction::TogglePause), None);
        assert!(controls.paused);
        controls.apply(ControlAction::TogglePause);
        assert!(!controls.paused);

        controls.apply(ControlAction::Pause);
        controls.apply(ControlAction::Pause);
        assert!(controls.paused);
        controls.apply(ControlAction::Start);
        assert!(!controls.paused);
    }

    #[test]
    fn test_speed_toggle() {
        let mut controls = Controls::new(SpeedMode::Fast);
        controls.apply(ControlAction::ToggleSpeed);
        assert_eq!(controls.speed, SpeedMode::Slow);
        controls.apply(ControlAction::ToggleSpeed);
        assert_eq!(controls.speed, SpeedMode::Fast);
    }

    #[test]
    fn test_world_level_actions_pass_through() {
        let mut controls = Controls::default();

        assert_eq!(controls.apply(ControlAction::Reset), Some(WorldCommand::Reset));
        assert_eq!(
            controls.apply(ControlAction::ToggleGreedyBot),
            Some(WorldCommand::ToggleBot(PlayerKind::GreedyBot))
        );
        assert_eq!(
            controls.apply(ControlAction::ToggleStochasticBot),
            Some(WorldCommand::ToggleBot(PlayerKind::StochasticBot))
        );
        assert_eq!(
            controls.apply(ControlAction::ClearPlayer {
                device: "pad".to_string()
            }),
            Some(WorldCommand::ClearPlayer {
                device: "pad".to_string()
            })
        );
        assert_eq!(controls, Controls::default());
    }

    #[test]
    fn test_handle_delivers_to_receiver() {
        let (handle, rx) = ControlHandle::channel();
        handle.send(ControlAction::ToggleSpeed);
        handle.clone().send(ControlAction::Reset);

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received, vec![ControlAction::ToggleSpeed, ControlAction::Reset]);
    }

    #[test]
    fn test_send_after_receiver_dropped_does_not_panic() {
        let (handle, rx) = ControlHandle::channel();
        drop(rx);
        handle.send(ControlAction::Pause);
    }
}
