//! The action contract.
//!
//! Games define their actions as plain values (usually an enum). The engine
//! needs three things from them:
//! - a precondition check that never mutates
//! - an effect application that reports what should happen next
//! - value equality, so the same action enumerated twice compares equal
//!
//! An action's effect may need further decisions before it is done (choose
//! a monk to promote, decide whether to pray). It asks for them by returning
//! [`Applied::Push`] with a sequence value; see [`crate::stack`].

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use super::player::PlayerId;
use super::state::GameState;
use crate::error::IllegalAction;
use crate::rules::Game;

/// What the forward model should do after an action has been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied<S> {
    /// Keep the turn going (subject to the action-point budget).
    Continue,
    /// End the acting player's turn once nothing is pending.
    EndTurn,
    /// Push an in-progress sequence that needs further decisions.
    Push(S),
}

/// A game action.
///
/// `check` must hold for every action the game offers; the forward model
/// calls it again before applying, so `apply` may assume it passed.
pub trait GameAction<G: Game>: Clone + Debug + PartialEq + Eq + Hash {
    /// Action-point cost. Zero by default.
    fn cost(&self, _state: &GameState<G>) -> i32 {
        0
    }

    /// Can `player` take this action in `state`?
    fn check(&self, state: &GameState<G>, player: PlayerId) -> Result<(), IllegalAction>;

    /// Apply the effects. Never called unless `check` passed.
    fn apply(&self, state: &mut GameState<G>, player: PlayerId) -> Applied<G::Sequence>;
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay and debugging
/// - Per-turn bookkeeping in games (who did what this round)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRecord<A> {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: A,

    /// Round number when the action was taken.
    pub round: u32,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl<A> ActionRecord<A> {
    #[must_use]
    pub fn new(player: PlayerId, action: A, round: u32, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(PlayerId::new(0), "sow", 1, 3, 5);

        assert_eq!(record.player, PlayerId::new(0));
        assert_eq!(record.action, "sow");
        assert_eq!(record.round, 1);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 5);
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(PlayerId::new(1), 7u32, 2, 2, 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord<u32> = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
