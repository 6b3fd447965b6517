//! Rules: the per-game contract and the forward model that drives it.
//!
//! Games implement [`Game`] to define:
//! - Setup of a fresh state
//! - Candidate actions for each state
//! - Scoring
//! - Turn-order hooks
//!
//! [`ForwardModel`] enumerates legal actions and applies them. The core
//! engine calls into `Game` but never interprets game-specific concepts
//! directly.

pub mod game;
pub mod model;

pub use game::{Evaluator, Game, GameResult};
pub use model::ForwardModel;
