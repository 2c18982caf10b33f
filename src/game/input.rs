use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use serde::{Deserialize, Serialize};

use crate::config::KeyBindings;

/// Logical buttons every input device exposes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Start,
    Select,
    Confirm,
    Cancel,
    ShoulderLeft,
    ShoulderRight,
}

impl Button {
    pub const ALL: [Button; 10] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Start,
        Button::Select,
        Button::Confirm,
        Button::Cancel,
        Button::ShoulderLeft,
        Button::ShoulderRight,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Raw pressed state of every button on one device at one instant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonSnapshot {
    pressed: [bool; Button::ALL.len()],
}

impl ButtonSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with exactly `buttons` held down
    pub fn with(buttons: &[Button]) -> Self {
        let mut snapshot = Self::new();
        for &button in buttons {
            snapshot.set(button, true);
        }
        snapshot
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        self.pressed[button.index()] = pressed;
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }
}

/// Tracks last-seen button state and reports only false -> true transitions
#[derive(Clone, Debug, Default)]
pub struct EdgeDetector {
    last: ButtonSnapshot,
}

impl EdgeDetector {
    /// Start from `initial` so buttons already held at bind time do not fire
    pub fn primed(initial: ButtonSnapshot) -> Self {
        Self { last: initial }
    }

    /// Buttons that went down since the previous call, in `Button::ALL` order
    pub fn rising_edges(&mut self, current: ButtonSnapshot) -> Vec<Button> {
        let edges = Button::ALL
            .iter()
            .copied()
            .filter(|&b| current.is_pressed(b) && !self.last.is_pressed(b))
            .collect();
        self.last = current;
        edges
    }
}

/// Source of per-device button snapshots, polled once per input tick
pub trait InputSource {
    /// Current snapshot for `device`, or `None` if it is no longer available
    fn snapshot(&self, device: &str) -> Option<ButtonSnapshot>;
}

/// Snapshots for every connected device, captured by the driver each frame
#[derive(Clone, Debug, Default)]
pub struct InputFrame {
    devices: HashMap<String, ButtonSnapshot>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device: impl Into<String>, snapshot: ButtonSnapshot) {
        self.devices.insert(device.into(), snapshot);
    }

    pub fn remove(&mut self, device: &str) {
        self.devices.remove(device);
    }
}

impl InputSource for InputFrame {
    fn snapshot(&self, device: &str) -> Option<ButtonSnapshot> {
        self.devices.get(device).copied()
    }
}

/// Device identity used for the terminal keyboard
pub const KEYBOARD_DEVICE: &str = "keyboard";

/// Result of draining pending terminal key events
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardPoll {
    pub snapshot: ButtonSnapshot,
    pub quit: bool,
}

/// Terminal keyboard as a button device
///
/// Terminals only report presses, so a key counts as held for the frame in
/// which its press arrived. Pressing again on a later frame is a new edge.
pub struct KeyboardSource {
    bindings: Vec<(KeyCode, Button)>,
    quit: Vec<KeyCode>,
}

impl KeyboardSource {
    pub fn new(keys: &KeyBindings) -> Self {
        let pairs = [
            (&keys.up, Button::Up),
            (&keys.down, Button::Down),
            (&keys.left, Button::Left),
            (&keys.right, Button::Right),
            (&keys.start, Button::Start),
            (&keys.select, Button::Select),
            (&keys.confirm, Button::Confirm),
            (&keys.cancel, Button::Cancel),
            (&keys.shoulder_left, Button::ShoulderLeft),
            (&keys.shoulder_right, Button::ShoulderRight),
        ];

        let mut bindings = Vec::new();
        for (name, button) in pairs {
            match parse_key(name) {
                Some(code) => bindings.push((code, button)),
                None => tracing::warn!("ignoring unknown key binding {:?} for {:?}", name, button),
            }
        }

        let mut quit = vec![KeyCode::Esc];
        if let Some(code) = parse_key(&keys.quit) {
            quit.push(code);
        }

        Self { bindings, quit }
    }

    /// Drain all pending key presses without blocking
    pub fn poll(&mut self) -> Result<KeyboardPoll, io::Error> {
        let mut result = KeyboardPoll::default();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let code = normalize(key.code);
                if self.quit.contains(&code) {
                    result.quit = true;
                }
                for (bound, button) in &self.bindings {
                    if *bound == code {
                        result.snapshot.set(*button, true);
                    }
                }
            }
        }

        Ok(result)
    }
}

/// Parse a key name from the config ("Up", "Enter", "W", ...)
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Esc,
        "Space" => KeyCode::Char(' '),
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c.to_ascii_lowercase()),
                _ => return None,
            }
        }
    };
    Some(code)
}

// Letter bindings match either case
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_fire_only_on_press() {
        let mut edges = EdgeDetector::default();

        assert_eq!(
            edges.rising_edges(ButtonSnapshot::with(&[Button::Up])),
            vec![Button::Up]
        );
        // Still held: no new edge
        assert!(edges.rising_edges(ButtonSnapshot::with(&[Button::Up])).is_empty());
        // Released
        assert!(edges.rising_edges(ButtonSnapshot::new()).is_empty());
        // Pressed again
        assert_eq!(
            edges.rising_edges(ButtonSnapshot::with(&[Button::Up])),
            vec![Button::Up]
        );
    }

    #[test]
    fn test_primed_detector_ignores_held_buttons() {
        let held = ButtonSnapshot::with(&[Button::Start]);
        let mut edges = EdgeDetector::primed(held);
        assert!(edges.rising_edges(held).is_empty());
    }

    #[test]
    fn test_multiple_edges_in_button_order() {
        let mut edges = EdgeDetector::default();
        let snapshot = ButtonSnapshot::with(&[Button::Cancel, Button::Down, Button::Start]);
        assert_eq!(
            edges.rising_edges(snapshot),
            vec![Button::Down, Button::Start, Button::Cancel]
        );
    }

    #[test]
    fn test_input_frame_lookup() {
        let mut frame = InputFrame::new();
        frame.insert("pad-1", ButtonSnapshot::with(&[Button::Left]));

        assert!(frame.snapshot("pad-1").unwrap().is_pressed(Button::Left));
        assert!(frame.snapshot("pad-2").is_none());

        frame.remove("pad-1");
        assert!(frame.snapshot("pad-1").is_none());
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("Up"), Some(KeyCode::Up));
        assert_eq!(parse_key("W"), Some(KeyCode::Char('w')));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("Nope"), None);
    }
}
