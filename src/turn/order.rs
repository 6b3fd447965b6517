//! Turn-order state machine.

use log::debug;

use crate::core::{GameState, PlayerId};
use crate::rules::Game;

/// Upper bound on phase transitions that start no turn, in a row.
///
/// A game whose hooks keep completing phases without ever making a player
/// eligible (and without ending the match) is broken; the machine panics
/// rather than spin.
pub const MAX_EMPTY_TRANSITIONS: usize = 64;

/// Turn-order contract.
///
/// Games implement the hooks; the transitions are provided. Hooks receive
/// the whole state and may mutate anything except the stack.
///
/// ## Flow
///
/// ```text
/// end_player_turn
///   ├─ next eligible seat after the current one (not yet acted) → start_turn
///   └─ none left → complete_phase
///                    on_phase_complete (game: switch phase, end_round, end_period ...)
///                    clear acted flags
///                    first eligible seat from first_player → start_turn
///                    (none → on_phase_complete again, bounded)
/// ```
///
/// Running out of eligible players is phase completion, never an error.
pub trait TurnOrder<G: Game> {
    // === Hooks ===

    /// May `player` take a turn in the current phase segment?
    fn is_eligible(&self, _state: &GameState<G>, _player: PlayerId) -> bool {
        true
    }

    /// Action points for `player`'s turn. `None` leaves the turn unbudgeted.
    fn turn_budget(&self, _state: &GameState<G>, _player: PlayerId) -> Option<i32> {
        None
    }

    /// Called after a new turn's player and budget are set.
    fn on_turn_start(&self, _state: &mut GameState<G>) {}

    /// Every eligible player has acted in the current segment.
    ///
    /// Typically switches `state.turn.phase`, or calls
    /// [`TurnOrder::end_round`] / [`TurnOrder::end_period`].
    fn on_phase_complete(&self, state: &mut GameState<G>);

    /// Called by [`TurnOrder::end_round`] after the counters moved.
    fn on_round_end(&self, _state: &mut GameState<G>) {}

    /// Called by [`TurnOrder::end_period`] after the counters moved.
    fn on_period_end(&self, _state: &mut GameState<G>) {}

    /// Do the eligible players submit their actions simultaneously in the
    /// current phase?
    fn is_simultaneous(&self, _state: &GameState<G>) -> bool {
        false
    }

    /// Called after every submitted simultaneous action has been applied.
    fn resolve_simultaneous(&self, _state: &mut GameState<G>) {}

    // === Provided transitions ===

    /// Next seat after the current one that is eligible and has not acted.
    fn next_eligible_player(&self, state: &GameState<G>) -> Option<PlayerId> {
        let current = state.turn.current_player;
        current
            .clockwise(state.player_count())
            .find(|&p| !state.turn.has_acted(p) && self.is_eligible(state, p))
    }

    /// First eligible seat that has not acted, starting at `first_player`.
    fn first_eligible_player(&self, state: &GameState<G>) -> Option<PlayerId> {
        let n = state.player_count();
        (0..n)
            .map(|offset| state.turn.first_player.rotate(offset, n))
            .find(|&p| !state.turn.has_acted(p) && self.is_eligible(state, p))
    }

    /// Hand the turn to `player`.
    fn start_turn(&self, state: &mut GameState<G>, player: PlayerId) {
        let budget = self.turn_budget(state, player);
        state.turn.current_player = player;
        state.turn.turn_count += 1;
        state.turn.set_budget(budget);
        debug!(
            "turn {} → {player} ({}, budget {budget:?})",
            state.turn.turn_count, state.turn.phase
        );
        self.on_turn_start(state);
    }

    /// Open the current phase segment: first eligible player, or phase
    /// completion if nobody is eligible.
    fn begin(&self, state: &mut GameState<G>) {
        match self.first_eligible_player(state) {
            Some(player) => self.start_turn(state, player),
            None => self.complete_phase(state),
        }
    }

    /// The current player is done.
    fn end_player_turn(&self, state: &mut GameState<G>) {
        let current = state.turn.current_player;
        state.turn.mark_acted(current);

        match self.next_eligible_player(state) {
            Some(next) => self.start_turn(state, next),
            None => self.complete_phase(state),
        }
    }

    /// Run phase completion until someone is eligible or the match ends.
    ///
    /// # Panics
    ///
    /// Panics after [`MAX_EMPTY_TRANSITIONS`] completions in a row that start
    /// no turn.
    fn complete_phase(&self, state: &mut GameState<G>) {
        for _ in 0..MAX_EMPTY_TRANSITIONS {
            self.on_phase_complete(state);
            if state.is_terminal() {
                return;
            }

            state.turn.clear_acted();
            if let Some(player) = self.first_eligible_player(state) {
                self.start_turn(state, player);
                return;
            }
            debug!("{} has no eligible players, completing it", state.turn.phase);
        }

        panic!(
            "{MAX_EMPTY_TRANSITIONS} phase transitions in a row without an eligible player (phase {}, round {})",
            state.turn.phase, state.turn.round
        );
    }

    /// Close the round: increment the counter, reset acted flags and the
    /// budget, then run [`TurnOrder::on_round_end`].
    fn end_round(&self, state: &mut GameState<G>) {
        state.turn.round += 1;
        state.turn.clear_acted();
        state.turn.set_budget(None);
        debug!("round {} ended", state.turn.round);
        self.on_round_end(state);
    }

    /// Close the period: increment the counter, reset acted flags and the
    /// budget, then run [`TurnOrder::on_period_end`].
    fn end_period(&self, state: &mut GameState<G>) {
        state.turn.period += 1;
        state.turn.clear_acted();
        state.turn.set_budget(None);
        debug!("period {} ended", state.turn.period);
        self.on_period_end(state);
    }
}
