//! Treat Chase: a grid game where human and bot players race to collect treats.
//!
//! [`game::World`] owns the board, players, treats and scores and advances
//! them one [`game::World::tick`] at a time. Players are steered by
//! [`players::Controller`] implementations: a greedy nearest-treat bot, a
//! stochastic bot with a pluggable scorer, and a human adapter fed by button
//! snapshots. [`driver`] supplies pacing, pause/speed controls and the
//! terminal front end.

pub mod config;
pub mod driver;
pub mod game;
pub mod logging;
pub mod players;
pub mod ui;
