//! Turn-order bookkeeping carried by the game state.

use serde::{Deserialize, Serialize};

use crate::core::{PhaseId, PlayerId, PlayerMap};

/// Whose turn it is, where in the phase/round/period structure the match is,
/// and how many action points the acting player has left.
///
/// Mutated by [`TurnOrder`](super::TurnOrder) transitions and by the forward
/// model's action-point accounting. Games read it freely and may set
/// `phase` and `first_player` from their hooks.
///
/// ## Action points
///
/// `budget` is the remaining budget, `None` in unbudgeted phases. At any
/// point in a turn:
///
/// ```text
/// starting budget = remaining + spent - granted
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    /// Seat whose turn it is.
    pub current_player: PlayerId,

    /// Seat that opens each phase segment.
    pub first_player: PlayerId,

    /// Current phase (game-defined).
    pub phase: PhaseId,

    /// Completed rounds.
    pub round: u32,

    /// Completed periods (seasons, caves, eras).
    pub period: u32,

    /// Turns started so far in this match.
    pub turn_count: u32,

    budget: Option<i32>,
    spent: i32,
    granted: i32,
    acted: PlayerMap<bool>,
}

impl TurnState {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            current_player: PlayerId::new(0),
            first_player: PlayerId::new(0),
            phase: PhaseId::default(),
            round: 0,
            period: 0,
            turn_count: 0,
            budget: None,
            spent: 0,
            granted: 0,
            acted: PlayerMap::with_value(player_count, false),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.acted.player_count()
    }

    // === Action points ===

    /// Remaining action points, `None` when the phase is unbudgeted.
    #[must_use]
    pub fn remaining(&self) -> Option<i32> {
        self.budget
    }

    /// Points spent since the turn started.
    #[must_use]
    pub fn spent(&self) -> i32 {
        self.spent
    }

    /// Points granted by bonus effects since the turn started.
    #[must_use]
    pub fn granted(&self) -> i32 {
        self.granted
    }

    /// The budget the turn started with.
    #[must_use]
    pub fn starting_budget(&self) -> Option<i32> {
        self.budget.map(|remaining| remaining + self.spent - self.granted)
    }

    /// Replace the budget and reset the per-turn totals.
    pub fn set_budget(&mut self, budget: Option<i32>) {
        self.budget = budget;
        self.spent = 0;
        self.granted = 0;
    }

    #[must_use]
    pub fn can_afford(&self, cost: i32) -> bool {
        self.budget.map_or(true, |remaining| cost <= remaining)
    }

    /// Has a budgeted turn run out of points?
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.budget.is_some_and(|remaining| remaining <= 0)
    }

    pub fn spend(&mut self, cost: i32) {
        self.spent += cost;
        if let Some(remaining) = self.budget.as_mut() {
            *remaining -= cost;
        }
    }

    /// Add points from a bonus effect. Ignored in unbudgeted phases.
    pub fn grant(&mut self, amount: i32) {
        if let Some(remaining) = self.budget.as_mut() {
            *remaining += amount;
            self.granted += amount;
        }
    }

    // === Acted flags ===

    #[must_use]
    pub fn has_acted(&self, player: PlayerId) -> bool {
        self.acted[player]
    }

    pub fn mark_acted(&mut self, player: PlayerId) {
        self.acted[player] = true;
    }

    pub fn clear_acted(&mut self) {
        self.acted.fill_with(|_| false);
    }
}
