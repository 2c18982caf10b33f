// Controller trait shared by every player variant

use crate::game::{Board, ColorToken, Direction, InputSource, Position};

use super::PlayerKind;

/// Read-only view of the world handed to a controller when it decides
#[derive(Debug, Clone, Copy)]
pub struct TickView<'a> {
    pub board: &'a Board,
    /// The deciding player's own authoritative position
    pub position: Position,
    pub treats: &'a [Position],
    /// Positions of the other active players
    pub others: &'a [Position],
}

/// Decision policy of a single player
///
/// Controllers never move themselves. Each tick the world calls
/// `handle_input_tick` on every player, then asks each active player to
/// `decide`, and commits the proposed step only if it stays on the board.
pub trait Controller {
    fn kind(&self) -> PlayerKind;

    /// Display identity, stable for the player's lifetime
    fn color(&self) -> ColorToken;

    /// Whether the player currently takes part in ticks
    fn active(&self) -> bool {
        true
    }

    /// Refresh internal command state from the input source
    fn handle_input_tick(&mut self, _inputs: &dyn InputSource) {}

    /// Propose a step for this tick
    ///
    /// # Returns
    /// * `Some(Direction)` - Move one cell that way
    /// * `None` - Stay in place
    fn decide(&mut self, view: &TickView<'_>) -> Option<Direction>;

    /// Whether this player is bound to the input device `device`
    fn owns_input_source(&self, _device: &str) -> bool {
        false
    }

    /// Clear per-round state (called when the world resets)
    fn reset(&mut self) {}
}
