pub mod controls;
pub mod geometry;
pub mod input;
pub mod scores;
pub mod spawn;
pub mod world;

pub use controls::{ControlAction, ControlHandle, Controls, SpeedMode, WorldCommand};
pub use geometry::{Board, ColorToken, Direction, Position};
pub use input::{
    Button, ButtonSnapshot, EdgeDetector, InputFrame, InputSource, KeyboardSource, KEYBOARD_DEVICE,
};
pub use scores::ScoreLedger;
pub use spawn::treat_spawn_probability;
pub use world::{
    Pickup, PlayerId, PlayerView, Removal, TickEvents, World, WorldError, WorldOptions,
    WorldSnapshot, MAX_TREATS,
};
