//! Core engine types: component ids, players, state, actions, RNG, configuration.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games plug into them through the [`Game`](crate::rules::Game) trait rather
//! than modifying the core.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionRecord, Applied, GameAction};
pub use config::{GameConfig, PhaseId, Visibility};
pub use entity::{ComponentId, Owner};
pub use player::{Observer, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, GameStatus};
