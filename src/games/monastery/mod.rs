//! Worker-placement monastery.
//!
//! Exercises budgeted turns and composite actions:
//! - Action points per area equal the piety of the player's monks there
//! - Taking a bonus token is mandatory and may open a Promote → Pray sequence
//! - The market visit is a one-step composite (buy, sell or do nothing)
//! - Pilgrimages draw from two finite hidden pools
//!
//! Supports 1-6 players.

mod actions;
mod board;
mod game;
mod params;
mod sequence;

pub use actions::MonasteryAction;
pub use board::{
    Area, BonusToken, Destination, MonasteryBoard, MonasteryCard, MonasteryGlobals, PlayerBoard, Resource, Route,
    Season, PLACE_MONKS, USE_MONKS,
};
pub use game::{Monastery, MonasteryHeuristic, MonasteryTurnOrder, Monk};
pub use params::MonasteryParams;
pub use sequence::{MonasterySequence, TokenStage};
