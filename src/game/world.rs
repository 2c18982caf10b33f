// The authoritative world: players, treats, scores and the tick step

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use crate::players::{create_controller, Controller, Palette, PlayerKind, TickView};

use super::controls::ControlHandle;
use super::geometry::{Board, ColorToken, Position};
use super::input::InputSource;
use super::scores::ScoreLedger;
use super::spawn::roll_treat;

/// Default cap on treats present at once
pub const MAX_TREATS: usize = 5;

/// Stable player identity, never reused within one world
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PlayerId(pub u64);

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("human players need an input device identity")]
    MissingDevice,
    #[error("human player on {device} needs a control surface")]
    MissingControlSurface { device: String },
    #[error("board must be at least 1x1, got {width}x{height}")]
    DegenerateBoard { width: u32, height: u32 },
    #[error("board of {width}x{height} exceeds the {max} cell limit per side")]
    OversizedBoard { width: u32, height: u32, max: u32 },
    #[error("{0:?} is not a bot kind")]
    NotABot(PlayerKind),
}

/// Construction options for a world
#[derive(Debug, Clone)]
pub struct WorldOptions {
    pub max_treats: usize,
    pub palette: Palette,
    /// Seed for treat spawning and stochastic bots; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            max_treats: MAX_TREATS,
            palette: Palette::default(),
            seed: None,
        }
    }
}

/// Which players `World::remove_players` drops
#[derive(Debug, Clone, Copy)]
pub enum Removal<'a> {
    /// Every player of this kind
    Kind(PlayerKind),
    /// The human bound to this device
    Device(&'a str),
}

struct Player {
    id: PlayerId,
    position: Position,
    controller: Box<dyn Controller>,
}

/// Per-player row for renderers and scoreboards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub kind: PlayerKind,
    pub position: Position,
    pub color: ColorToken,
    pub active: bool,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub width: u32,
    pub height: u32,
    pub tick: u64,
    pub players: Vec<PlayerView>,
    pub treats: Vec<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub player: PlayerId,
    pub position: Position,
    pub count: u32,
}

/// What happened during one tick
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickEvents {
    pub pickups: Vec<Pickup>,
    pub rejected_moves: Vec<PlayerId>,
    pub spawned: Option<Position>,
}

impl TickEvents {
    pub fn any(&self) -> bool {
        !self.pickups.is_empty() || !self.rejected_moves.is_empty() || self.spawned.is_some()
    }
}

pub struct World {
    board: Board,
    players: Vec<Player>,
    treats: Vec<Position>,
    scores: ScoreLedger,
    next_id: u64,
    max_treats: usize,
    palette: Palette,
    rng: StdRng,
    tick_count: u64,
}

impl World {
    pub fn new(board: Board, options: WorldOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            board,
            players: Vec::new(),
            treats: Vec::new(),
            scores: ScoreLedger::new(),
            next_id: 0,
            max_treats: options.max_treats,
            palette: options.palette,
            rng,
            tick_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Completed ticks since construction
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Add a player of `kind` at the origin with a zero score
    ///
    /// Humans need a `device` and a `controls` handle; bots ignore both.
    pub fn add_player(
        &mut self,
        kind: PlayerKind,
        device: Option<&str>,
        controls: Option<ControlHandle>,
    ) -> Result<PlayerId, WorldError> {
        let seed = self.rng.gen();
        let controller = create_controller(kind, &self.palette, device, controls, seed)?;
        Ok(self.add_controller(controller))
    }

    /// Add a player driven by a caller-built controller
    pub fn add_controller(&mut self, controller: Box<dyn Controller>) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;

        tracing::info!("player {:?} joined as {}", id, controller.kind().display_name());
        self.players.push(Player {
            id,
            position: Position::ORIGIN,
            controller,
        });
        self.scores.insert(id);
        id
    }

    /// Remove matching players and their scores; returns how many left
    pub fn remove_players(&mut self, removal: Removal<'_>) -> usize {
        let scores = &mut self.scores;
        let before = self.players.len();
        self.players.retain(|player| {
            let matches = match removal {
                Removal::Kind(kind) => player.controller.kind() == kind,
                Removal::Device(device) => player.controller.owns_input_source(device),
            };
            if matches {
                tracing::info!("player {:?} left", player.id);
                scores.remove(player.id);
            }
            !matches
        });
        before - self.players.len()
    }

    /// Bind a new human to `device` unless one is already bound
    pub fn connect_device(
        &mut self,
        device: &str,
        controls: ControlHandle,
    ) -> Result<Option<PlayerId>, WorldError> {
        if self.has_device(device) {
            tracing::debug!("device {} already has a player", device);
            return Ok(None);
        }
        self.add_player(PlayerKind::Human, Some(device), Some(controls))
            .map(Some)
    }

    pub fn disconnect_device(&mut self, device: &str) -> usize {
        self.remove_players(Removal::Device(device))
    }

    pub fn has_device(&self, device: &str) -> bool {
        self.players
            .iter()
            .any(|p| p.controller.owns_input_source(device))
    }

    /// Remove all bots of `kind` if any exist, otherwise add one
    pub fn toggle_bot(&mut self, kind: PlayerKind) -> Result<(), WorldError> {
        if !kind.is_bot() {
            return Err(WorldError::NotABot(kind));
        }
        if self.remove_players(Removal::Kind(kind)) == 0 {
            self.add_player(kind, None, None)?;
        }
        Ok(())
    }

    /// Let every player refresh its command state from `inputs`
    pub fn handle_inputs(&mut self, inputs: &dyn InputSource) {
        for player in &mut self.players {
            player.controller.handle_input_tick(inputs);
        }
    }

    /// Advance the world by one step
    ///
    /// Players resolve one at a time in join order. A player deciding later in
    /// the tick sees the already-committed positions of those before it.
    pub fn tick(&mut self, inputs: &dyn InputSource) -> TickEvents {
        self.handle_inputs(inputs);
        self.step()
    }

    /// Resolve moves, pickups and spawning for callers that already ran
    /// [`World::handle_inputs`] on this frame
    pub fn step(&mut self) -> TickEvents {
        let mut events = TickEvents::default();
        let board = self.board;

        for idx in 0..self.players.len() {
            if !self.players[idx].controller.active() {
                continue;
            }

            let others: Vec<Position> = self
                .players
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != idx && other.controller.active())
                .map(|(_, other)| other.position)
                .collect();

            let player = &mut self.players[idx];
            let view = TickView {
                board: &board,
                position: player.position,
                treats: &self.treats,
                others: &others,
            };

            if let Some(direction) = player.controller.decide(&view) {
                let candidate = player.position.step(direction);
                if board.contains(candidate) {
                    player.position = candidate;
                } else {
                    tracing::debug!(
                        "player {:?} move {:?} off board from {:?} rejected",
                        player.id,
                        direction,
                        player.position
                    );
                    events.rejected_moves.push(player.id);
                }
            }

            let (id, position) = (player.id, player.position);
            let before = self.treats.len();
            self.treats.retain(|treat| *treat != position);
            let count = (before - self.treats.len()) as u32;
            if count > 0 {
                self.scores.award(id, count);
                tracing::debug!("player {:?} picked up treat at {:?}", id, position);
                events.pickups.push(Pickup {
                    player: id,
                    position,
                    count,
                });
            }
        }

        if let Some(cell) = roll_treat(&mut self.rng, &board, self.treats.len(), self.max_treats) {
            if !self.treats.contains(&cell) {
                tracing::debug!("treat spawned at {:?}", cell);
                self.treats.push(cell);
                events.spawned = Some(cell);
            }
        }

        self.tick_count += 1;
        events
    }

    /// Keep only humans, back at the origin with zero scores; drop all treats
    pub fn reset(&mut self) {
        self.players.retain(|p| p.controller.kind() == PlayerKind::Human);
        let players = &self.players;
        self.scores.retain(|id| players.iter().any(|p| p.id == id));
        self.scores.reset_all();

        for player in &mut self.players {
            player.position = Position::ORIGIN;
            player.controller.reset();
        }
        self.treats.clear();
        tracing::info!("world reset, {} human player(s) kept", self.players.len());
    }

    /// Place a treat on an empty, on-board cell; returns whether it was added
    pub fn place_treat(&mut self, position: Position) -> bool {
        if !self.board.contains(position) || self.treats.contains(&position) {
            return false;
        }
        self.treats.push(position);
        true
    }

    /// Move a player to an on-board cell; returns whether it moved
    pub fn place_player(&mut self, id: PlayerId, position: Position) -> bool {
        if !self.board.contains(position) {
            return false;
        }
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.position = position;
                true
            }
            None => false,
        }
    }

    pub fn treats(&self) -> &[Position] {
        &self.treats
    }

    pub fn score(&self, id: PlayerId) -> Option<u32> {
        self.scores.get(id)
    }

    pub fn position(&self, id: PlayerId) -> Option<Position> {
        self.players.iter().find(|p| p.id == id).map(|p| p.position)
    }

    /// Player id bound to `device`, if any
    pub fn player_for_device(&self, device: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.controller.owns_input_source(device))
            .map(|p| p.id)
    }

    /// Players in join order
    pub fn players(&self) -> Vec<PlayerView> {
        self.players
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                kind: p.controller.kind(),
                position: p.position,
                color: p.controller.color(),
                active: p.controller.active(),
                score: self.scores.get(p.id).unwrap_or(0),
            })
            .collect()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            tick: self.tick_count,
            players: self.players(),
            treats: self.treats.clone(),
        }
    }
}
