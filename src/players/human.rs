// Human player - heading driven by button presses on one input device

use crate::game::{
    Button, ColorToken, ControlAction, ControlHandle, Direction, EdgeDetector, InputSource,
};

use super::{Controller, PlayerKind, TickView};

/// Player bound to a single input device
///
/// Direction buttons toggle the held heading on each fresh press: pressing the
/// current heading again stops, pressing another direction turns. The other
/// buttons raise control actions through the bound `ControlHandle`.
pub struct HumanPlayer {
    device: String,
    color: ColorToken,
    controls: ControlHandle,
    heading: Option<Direction>,
    edges: Option<EdgeDetector>,
    active: bool,
}

impl HumanPlayer {
    pub fn new(device: impl Into<String>, color: ColorToken, controls: ControlHandle) -> Self {
        Self {
            device: device.into(),
            color,
            controls,
            heading: None,
            edges: None,
            active: true,
        }
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    fn on_press(&mut self, button: Button) {
        let action = match button {
            Button::Up => return self.toggle_heading(Direction::Up),
            Button::Down => return self.toggle_heading(Direction::Down),
            Button::Left => return self.toggle_heading(Direction::Left),
            Button::Right => return self.toggle_heading(Direction::Right),
            Button::Start => ControlAction::TogglePause,
            Button::Select => ControlAction::ToggleSpeed,
            Button::Confirm => ControlAction::ToggleStochasticBot,
            Button::Cancel => ControlAction::ToggleGreedyBot,
            Button::ShoulderLeft => ControlAction::Reset,
            Button::ShoulderRight => {
                self.active = !self.active;
                tracing::info!("player on {} active: {}", self.device, self.active);
                if self.active {
                    ControlAction::Draw
                } else {
                    ControlAction::ClearPlayer {
                        device: self.device.clone(),
                    }
                }
            }
        };
        self.controls.send(action);
    }

    fn toggle_heading(&mut self, direction: Direction) {
        self.heading = if self.heading == Some(direction) {
            None
        } else {
            Some(direction)
        };
    }
}

impl Controller for HumanPlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn color(&self) -> ColorToken {
        self.color
    }

    fn active(&self) -> bool {
        self.active
    }

    fn handle_input_tick(&mut self, inputs: &dyn InputSource) {
        let Some(snapshot) = inputs.snapshot(&self.device) else {
            tracing::warn!("input device {} not available, keeping heading", self.device);
            return;
        };

        // The first snapshot only primes the detector so buttons held at
        // connect time do not fire
        let pressed = match self.edges.as_mut() {
            Some(edges) => edges.rising_edges(snapshot),
            None => {
                self.edges = Some(EdgeDetector::primed(snapshot));
                return;
            }
        };

        for button in pressed {
            self.on_press(button);
        }
    }

    fn decide(&mut self, _view: &TickView<'_>) -> Option<Direction> {
        self.heading
    }

    fn owns_input_source(&self, device: &str) -> bool {
        self.device == device
    }

    fn reset(&mut self) {
        self.heading = None;
    }
}
