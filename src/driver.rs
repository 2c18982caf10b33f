//! Drivers that own the tick cadence around a [`World`].
//!
//! The world itself has no notion of time. A [`Session`] pairs it with the
//! driver-owned [`Controls`] and the receiving end of the control channel;
//! the run loops decide when to call [`Session::advance`].

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::Terminal;

use crate::config::Config;
use crate::game::{
    Board, ColorToken, ControlAction, ControlHandle, Controls, InputFrame, KeyboardSource,
    TickEvents, World, WorldCommand, WorldOptions, WorldSnapshot, KEYBOARD_DEVICE,
};
use crate::players::{Palette, PlayerKind};
use crate::ui::{self, Hud, OverlayMessage};

const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_millis(1000 / TARGET_FPS);

/// A world plus the pause/speed state and control channel that steer it
pub struct Session {
    world: World,
    controls: Controls,
    handle: ControlHandle,
    actions: Receiver<ControlAction>,
    config: Config,
}

impl Session {
    /// Build the board from `config` and add the configured bots
    ///
    /// `seed` overrides `config.bots.seed` when given.
    pub fn new(config: Config, seed: Option<u64>) -> Result<Self> {
        let board = Board::new(config.board.width, config.board.height)
            .context("invalid board size in configuration")?;
        let options = WorldOptions {
            max_treats: config.treats.max_treats,
            palette: Palette::from(&config.display),
            seed: seed.or(config.bots.seed),
        };

        let (handle, actions) = ControlHandle::channel();
        let mut session = Self {
            world: World::new(board, options),
            controls: Controls::new(config.timing.initial_speed()),
            handle,
            actions,
            config,
        };
        session.add_configured_bots()?;
        Ok(session)
    }

    fn add_configured_bots(&mut self) -> Result<()> {
        let bots = &self.config.bots;
        let kinds: Vec<PlayerKind> = PlayerKind::bots()
            .into_iter()
            .filter(|kind| match kind {
                PlayerKind::GreedyBot => bots.greedy,
                PlayerKind::StochasticBot => bots.stochastic,
                PlayerKind::Human => false,
            })
            .collect();

        for kind in kinds {
            self.world.add_player(kind, None, None)?;
        }
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Bind a human to `device`
    pub fn connect(&mut self, device: &str) -> Result<()> {
        self.world
            .connect_device(device, self.handle.clone())
            .with_context(|| format!("failed to connect device {}", device))?;
        Ok(())
    }

    pub fn disconnect(&mut self, device: &str) {
        self.world.disconnect_device(device);
    }

    /// Tick interval for the current speed mode
    pub fn interval(&self) -> Duration {
        self.config.timing.interval(self.controls.speed)
    }

    /// Refresh player inputs and apply any control actions they raised
    pub fn handle_inputs(&mut self, inputs: &InputFrame) -> Result<()> {
        self.world.handle_inputs(inputs);
        self.apply_pending_actions()
    }

    /// Handle inputs, then tick unless paused
    pub fn advance(&mut self, inputs: &InputFrame) -> Result<Option<TickEvents>> {
        self.handle_inputs(inputs)?;
        if self.controls.paused {
            return Ok(None);
        }
        Ok(Some(self.world.step()))
    }

    /// Apply a control action as if a player had raised it
    pub fn dispatch(&mut self, action: ControlAction) -> Result<()> {
        if let Some(command) = self.controls.apply(action) {
            self.execute(command)?;
        }
        Ok(())
    }

    fn apply_pending_actions(&mut self) -> Result<()> {
        let pending: Vec<ControlAction> = self.actions.try_iter().collect();
        for action in pending {
            self.dispatch(action)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: WorldCommand) -> Result<()> {
        match command {
            WorldCommand::Reset => {
                // Bots are removed by the reset; bring back the kinds that were playing
                let playing: Vec<PlayerKind> = PlayerKind::bots()
                    .into_iter()
                    .filter(|kind| self.world.players().iter().any(|p| p.kind == *kind))
                    .collect();
                self.world.reset();
                for kind in playing {
                    self.world.add_player(kind, None, None)?;
                }
            }
            WorldCommand::ToggleBot(kind) => self.world.toggle_bot(kind)?,
            // The terminal renderer repaints every frame
            WorldCommand::Redraw => tracing::debug!("redraw requested"),
            WorldCommand::ClearPlayer { device } => {
                tracing::debug!("clearing marker for {}", device)
            }
        }
        Ok(())
    }

    fn hud(&self) -> Hud {
        let palette = self.world.palette();
        Hud {
            grid: ColorToken(self.config.display.grid_color),
            treat: palette.treat,
            paused: self.controls.paused,
            speed: self.controls.speed,
        }
    }
}

/// Play in the terminal with the keyboard as the human's device
pub fn run_terminal<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
    seed: Option<u64>,
) -> Result<WorldSnapshot> {
    let mut keyboard = KeyboardSource::new(&config.keybindings);
    let mut session = Session::new(config, seed)?;
    session.connect(KEYBOARD_DEVICE)?;
    tracing::info!("terminal session started");

    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        let poll = keyboard.poll().context("failed to read keyboard")?;
        if poll.quit {
            tracing::info!("quit after {} ticks", session.world().tick_count());
            return Ok(session.world().snapshot());
        }

        let mut inputs = InputFrame::new();
        inputs.insert(KEYBOARD_DEVICE, poll.snapshot);

        if last_tick.elapsed() >= session.interval() {
            last_tick = Instant::now();
            let events = session.advance(&inputs)?;
            if let Some(events) = events.filter(TickEvents::any) {
                tracing::debug!("tick {}: {:?}", session.world().tick_count(), events);
            }
        } else {
            session.handle_inputs(&inputs)?;
        }

        let snapshot = session.world().snapshot();
        let hud = session.hud();
        let sitting_out = snapshot
            .players
            .iter()
            .any(|p| p.kind == PlayerKind::Human && !p.active);
        let overlay = if hud.paused {
            Some(OverlayMessage::paused().with_title("Treat Chase".to_string()))
        } else if sitting_out {
            Some(OverlayMessage::warning(vec![
                "Sitting out".to_string(),
                "X to rejoin".to_string(),
            ]))
        } else {
            None
        };

        terminal
            .draw(|f| ui::render(f, &snapshot, &hud, overlay.as_ref()))
            .context("failed to draw frame")?;

        limit_frame_rate(frame_start);
    }
}

/// Run bots only for `ticks` steps as fast as possible
pub fn run_headless(config: Config, ticks: u64, seed: Option<u64>) -> Result<WorldSnapshot> {
    let mut session = Session::new(config, seed)?;
    let inputs = InputFrame::new();

    for _ in 0..ticks {
        if let Some(events) = session.advance(&inputs)? {
            for pickup in &events.pickups {
                tracing::info!(
                    "tick {}: player {:?} scored at {:?}",
                    session.world().tick_count(),
                    pickup.player,
                    pickup.position
                );
            }
        }
    }

    Ok(session.world().snapshot())
}

/// Sleep out the rest of the frame so the loop does not spin
pub fn limit_frame_rate(frame_start: Instant) {
    let elapsed = frame_start.elapsed();
    if elapsed < FRAME_DURATION {
        std::thread::sleep(FRAME_DURATION - elapsed);
    }
}
