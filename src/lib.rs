//! Scorched Ground - Artillery Duel Simulation Core
//!
//! A deterministic, fixed-timestep simulation of a turn-based artillery
//! duel on destructible 2D terrain, built on `bevy_ecs`. This crate is the
//! physics and collision core only: window setup, rendering, and turn
//! scheduling are external collaborators that queue commands into a
//! `DuelWorld` session and read snapshots back out of it.

pub mod api;
pub mod components;
pub mod config;
pub mod systems;
pub mod terrain;
pub mod world;

pub use api::DuelWorld;
pub use components::*;
pub use config::SimConfig;
pub use systems::*;
pub use terrain::{Rect, TerrainGrid, TerrainSnapshot};
pub use world::Snapshot;
