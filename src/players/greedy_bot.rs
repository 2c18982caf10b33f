// Greedy bot - walks straight at the nearest treat

use crate::game::{ColorToken, Direction};

use super::targeting::{find_target, step_toward};
use super::{Controller, PlayerKind, TickView};

/// Deterministic bot chasing the closest treat
///
/// - Targets the treat with the smallest Manhattan distance (first listed on ties)
/// - Heads for the board center when no treats are left
/// - Closes the vertical gap before the horizontal one
pub struct GreedyBot {
    color: ColorToken,
}

impl GreedyBot {
    pub fn new(color: ColorToken) -> Self {
        Self { color }
    }
}

impl Controller for GreedyBot {
    fn kind(&self) -> PlayerKind {
        PlayerKind::GreedyBot
    }

    fn color(&self) -> ColorToken {
        self.color
    }

    fn decide(&mut self, view: &TickView<'_>) -> Option<Direction> {
        let target = find_target(view.board, view.treats, view.position);
        step_toward(view.position, target)
    }
}
