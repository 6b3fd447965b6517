//! In-progress action stack.
//!
//! Some actions cannot finish in one step: taking a bonus token may require
//! choosing which monk to promote and then deciding whether to pray. Such an
//! action returns [`Applied::Push`](crate::core::Applied::Push) with a
//! sequence value. The sequence sits on the state's [`ActionStack`] until it
//! reports completion.
//!
//! ## Rules
//!
//! - Only the top entry awaits a decision, from its acting player.
//! - While the stack is non-empty, the only legal actions are the top
//!   sequence's continuations. No fresh top-level choice is offered.
//! - After each continuation the forward model calls
//!   [`ActionSequence::after_action`], then pops every completed entry from
//!   the top.
//! - Each entry carries an id from the component registry. Ids are never
//!   reused, so "is entry 17 complete?" has a stable answer forever.
//!
//! ```
//! use tabletop_engine::core::{ComponentId, PlayerId};
//! use tabletop_engine::stack::{ActionStack, PendingAction};
//!
//! let mut stack: ActionStack<&str> = ActionStack::new();
//! stack.push(PendingAction::new(ComponentId(4), PlayerId::new(1), "promote"));
//!
//! assert!(stack.contains(ComponentId(4)));
//! assert_eq!(stack.top().map(|p| p.player), Some(PlayerId::new(1)));
//! assert!(stack.pop().is_some());
//! assert!(stack.is_empty());
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use crate::core::{ComponentId, GameState, PlayerId};
use crate::rules::Game;

/// A composite action awaiting further decisions.
///
/// The value carries its own stage; the game decides what stages exist.
pub trait ActionSequence<G: Game>: Clone + Debug + PartialEq + Eq + Hash {
    /// Who makes the next decision.
    fn acting_player(&self) -> PlayerId;

    /// The legal continuations for the current stage.
    ///
    /// Must not be empty while the sequence is incomplete.
    fn continuations(&self, state: &GameState<G>) -> Vec<G::Action>;

    /// Advance the stage after one of the continuations was applied.
    fn after_action(&mut self, state: &GameState<G>, action: &G::Action);

    /// Has the composite action fully resolved?
    fn is_complete(&self, state: &GameState<G>) -> bool;
}

/// Sequence type for games without composite actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoSequence {}

impl<G: Game> ActionSequence<G> for NoSequence {
    fn acting_player(&self) -> PlayerId {
        match *self {}
    }

    fn continuations(&self, _state: &GameState<G>) -> Vec<G::Action> {
        match *self {}
    }

    fn after_action(&mut self, _state: &GameState<G>, _action: &G::Action) {
        match *self {}
    }

    fn is_complete(&self, _state: &GameState<G>) -> bool {
        match *self {}
    }
}

/// An entry on the stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingAction<S> {
    /// Registry-issued identifier for this entry.
    pub id: ComponentId,

    /// Who started the composite action.
    pub player: PlayerId,

    /// The game's sequence value, including its stage.
    pub sequence: S,
}

impl<S> PendingAction<S> {
    #[must_use]
    pub fn new(id: ComponentId, player: PlayerId, sequence: S) -> Self {
        Self {
            id,
            player,
            sequence,
        }
    }
}

/// Stack of pending composite actions (last = top).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionStack<S: Clone> {
    entries: Vector<PendingAction<S>>,
}

impl<S: Clone> Default for ActionStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> ActionStack<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vector::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The entry awaiting a decision.
    #[must_use]
    pub fn top(&self) -> Option<&PendingAction<S>> {
        self.entries.back()
    }

    pub fn top_mut(&mut self) -> Option<&mut PendingAction<S>> {
        self.entries.back_mut()
    }

    pub fn push(&mut self, entry: PendingAction<S>) {
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<PendingAction<S>> {
        self.entries.pop_back()
    }

    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Entries bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &PendingAction<S>> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
