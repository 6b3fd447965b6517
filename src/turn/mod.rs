//! Turn order and phase state machine.
//!
//! - [`TurnState`]: counters, current player, action-point budget; lives in
//!   the game state
//! - [`TurnOrder`]: game hooks plus the provided transitions that move
//!   `TurnState` forward
//!
//! Phases, rounds and periods are nested: a phase segment ends when every
//! eligible player has acted, rounds and periods end when a game hook says
//! so. The engine assigns no meaning to any of them.

pub mod order;
pub mod state;

pub use order::{TurnOrder, MAX_EMPTY_TRANSITIONS};
pub use state::TurnState;
