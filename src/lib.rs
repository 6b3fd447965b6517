//! # tabletop-engine
//!
//! A game-agnostic engine for turn-based, multi-player games with hidden
//! information, built for search agents and learning pipelines.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Games define their components, actions, phases and
//!    scoring through the [`rules::Game`] trait. The engine knows none of it.
//!
//! 2. **N-Player First**: Every API takes the player count from the state.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Share Nothing, Copy to Fan Out**: A [`core::GameState`] is owned by
//!    one caller. Search branches each take a [`core::GameState::copy`].
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so copies are
//!   cheap enough to take at every search node.
//!
//! - **Redacted Copies**: A copy for one player reshuffles the decks that
//!   player cannot see and forgets other players' pending simultaneous
//!   choices. Redaction is derived from the state's seed and turn counter.
//!
//! - **Explicit In-Progress Stack**: Composite actions sit on a stack of
//!   pending sequences; while one is pending, only its continuations are
//!   legal.
//!
//! ## Modules
//!
//! - `core`: Ids, players, configuration, RNG, actions, game state
//! - `components`: Registry and the Deck, Counter, Token, Tracker containers
//! - `turn`: Turn state and the turn-order state machine
//! - `stack`: In-progress action stack
//! - `rules`: The `Game` contract and the forward model
//! - `observation`: Observation vectors and snapshots
//! - `games`: Reference games (cave, monastery)
//! - `error`: Error types

pub mod components;
pub mod core;
pub mod error;
pub mod games;
pub mod observation;
pub mod rules;
pub mod stack;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, Applied, ComponentId, GameAction, GameConfig, GameRng, GameRngState, GameState, GameStatus,
    Observer, Owner, PhaseId, PlayerId, PlayerMap, Visibility,
};

pub use crate::components::{
    BoundPolicy, Component, ComponentArena, ComponentData, ComponentKind, ComponentMeta, ComponentRoots, Counter,
    Deck, Token, Tracker,
};

pub use crate::error::{ComponentError, IllegalAction, InvariantViolation};

pub use crate::observation::{Snapshot, Vectorise};

pub use crate::rules::{Evaluator, ForwardModel, Game, GameResult};

pub use crate::stack::{ActionSequence, ActionStack, NoSequence, PendingAction};

pub use crate::turn::{TurnOrder, TurnState, MAX_EMPTY_TRANSITIONS};
