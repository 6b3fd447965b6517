//! Error types.
//!
//! - [`IllegalAction`]: the caller supplied an action that is not legal in the
//!   current state. Returned before any mutation happens.
//! - [`InvariantViolation`]: the state is internally inconsistent. This is a
//!   defect, not a recoverable condition; the forward model panics on it.
//! - [`ComponentError`]: a container rejected a mutation.

use thiserror::Error;

use crate::core::{ComponentId, PlayerId};

/// An action whose preconditions do not hold against the current state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    /// The game has already ended.
    #[error("game is over")]
    GameOver,

    /// Someone other than the acting player tried to act.
    #[error("{player} cannot act, waiting on {expected}")]
    NotYourTurn {
        /// Seat that submitted the action.
        player: PlayerId,
        /// Seat the state is waiting on.
        expected: PlayerId,
    },

    /// Not enough action points left this turn.
    #[error("action costs {cost} action points but only {available} remain")]
    InsufficientActionPoints {
        /// Cost of the action.
        cost: i32,
        /// Remaining budget.
        available: i32,
    },

    /// An action is in progress and this action does not continue it.
    #[error("{action} does not continue the in-progress action {pending}")]
    NotAContinuation {
        /// Id of the pending action.
        pending: ComponentId,
        /// Debug rendering of the rejected action.
        action: String,
    },

    /// A game-specific precondition failed.
    #[error("{0}")]
    Precondition(String),
}

impl IllegalAction {
    /// Shorthand for a game-specific precondition failure.
    pub fn precondition(message: impl Into<String>) -> Self {
        IllegalAction::Precondition(message.into())
    }
}

/// Internal consistency failure in a game state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The same component id appears twice among the roots.
    #[error("{0} is referenced by more than one root")]
    DuplicateRoot(ComponentId),

    /// A root references an id the registry does not hold.
    #[error("root references unknown {0}")]
    UnknownRoot(ComponentId),

    /// A registered component is not reachable from any root.
    #[error("{0} is registered but unreachable from the state roots")]
    Orphan(ComponentId),

    /// A component is owned by a seat that does not exist.
    #[error("{id} is owned by seat {seat} but the match has {player_count} players")]
    DanglingOwner {
        /// Offending component.
        id: ComponentId,
        /// Owner seat index.
        seat: u8,
        /// Seats in the match.
        player_count: usize,
    },

    /// A component id at or beyond the next unallocated id.
    #[error("{id} was never allocated (next id is {next})")]
    UnallocatedId {
        /// Offending id.
        id: ComponentId,
        /// Registry's next id.
        next: u32,
    },
}

/// A rejected container mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// The requested value is outside the configured bounds.
    #[error("value {value} is outside [{min}, {max}]")]
    OutOfBounds {
        /// Requested value.
        value: i64,
        /// Lower bound (`i64::MIN` when unbounded).
        min: i64,
        /// Upper bound (`i64::MAX` when unbounded).
        max: i64,
    },

    /// A bounded deck is already full.
    #[error("deck is at capacity {capacity}")]
    CapacityExceeded {
        /// Maximum number of cards.
        capacity: usize,
    },
}
