//! The forward model: legal-action generation and action application.
//!
//! `ForwardModel` is a stateless operator over [`GameState`]. Everything it
//! decides follows from the state and the game's rules:
//!
//! ```text
//! compute_available_actions          next(action)
//!   terminal     → [no_op]             validate (nothing mutated on error)
//!   in progress  → continuations       simultaneous phase? store slot, maybe resolve
//!   otherwise    → top-level           apply → spend cost → record
//!   filtered by check + budget         advance pending stage, pop completed
//!   empty        → [no_op]             end turn on request / exhausted budget
//! ```

use log::{debug, trace};

use crate::core::{Applied, ComponentId, GameAction, GameConfig, GameState, PlayerId};
use crate::error::IllegalAction;
use crate::rules::Game;
use crate::stack::{ActionSequence, PendingAction};
use crate::turn::TurnOrder;

/// Forward model for game `G`.
///
/// ## Usage
///
/// ```
/// use tabletop_engine::core::GameConfig;
/// use tabletop_engine::games::cave::Cave;
/// use tabletop_engine::rules::ForwardModel;
///
/// let model = ForwardModel::new(Cave::default());
/// let mut state = model.new_state(GameConfig::new(3).with_seed(7));
///
/// while !state.is_terminal() {
///     let actions = model.compute_available_actions(&state);
///     model.next(&mut state, &actions[0]).unwrap();
/// }
/// assert!(state.result().is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ForwardModel<G: Game> {
    game: G,
}

impl<G: Game> ForwardModel<G> {
    #[must_use]
    pub fn new(game: G) -> Self {
        Self { game }
    }

    #[must_use]
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Create and set up a state for `config`.
    #[must_use]
    pub fn new_state(&self, config: GameConfig) -> GameState<G> {
        let mut state = GameState::new(config);
        self.setup(&mut state);
        state
    }

    /// Reset `state`, run the game's setup and open the first turn.
    ///
    /// # Panics
    ///
    /// Panics if the game's setup leaves the roots and the registry out of
    /// agreement.
    pub fn setup(&self, state: &mut GameState<G>) {
        state.reset();
        self.game.setup(state);

        if let Err(violation) = state.check_invariants() {
            panic!("setup produced an inconsistent state: {violation}");
        }
        debug!(
            "set up {} players with {} components",
            state.player_count(),
            state.components.len()
        );

        self.game.turn_order().begin(state);
    }

    /// Legal actions for the acting player. Never empty.
    #[must_use]
    pub fn compute_available_actions(&self, state: &GameState<G>) -> Vec<G::Action> {
        if state.is_terminal() {
            return vec![G::no_op()];
        }

        let player = state.acting_player();
        let pending = state.action_in_progress();
        let candidates = match pending {
            Some(pending) => pending.sequence.continuations(state),
            None => self.game.top_level_actions(state, player),
        };

        let mut actions: Vec<G::Action> = candidates
            .into_iter()
            .filter(|action| self.passes_rules(state, player, action))
            .collect();

        if actions.is_empty() {
            if let Some(pending) = pending {
                panic!("in-progress action {} offers no legal continuation", pending.id);
            }
            actions.push(G::no_op());
        }

        trace!("{} legal actions for {player}", actions.len());
        actions
    }

    fn passes_rules(&self, state: &GameState<G>, player: PlayerId, action: &G::Action) -> bool {
        action.check(state, player).is_ok() && state.turn.can_afford(action.cost(state))
    }

    /// Would `next_for(state, player, action)` succeed?
    pub fn validate(
        &self,
        state: &GameState<G>,
        player: PlayerId,
        action: &G::Action,
    ) -> Result<(), IllegalAction> {
        if state.is_terminal() {
            return Err(IllegalAction::GameOver);
        }

        let expected = state.acting_player();
        let may_act = if self.is_simultaneous_turn(state) {
            // Any eligible seat may submit, in any order, once.
            state.submission(player).is_none()
                && self.game.turn_order().is_eligible(state, player)
        } else {
            player == expected
        };
        if !may_act {
            return Err(IllegalAction::NotYourTurn { player, expected });
        }

        if let Some(pending) = state.action_in_progress() {
            if !pending.sequence.continuations(state).contains(action) {
                return Err(IllegalAction::NotAContinuation {
                    pending: pending.id,
                    action: format!("{action:?}"),
                });
            }
        }

        action.check(state, player)?;

        let cost = action.cost(state);
        if !state.turn.can_afford(cost) {
            return Err(IllegalAction::InsufficientActionPoints {
                cost,
                available: state.turn.remaining().unwrap_or(0),
            });
        }

        Ok(())
    }

    /// Apply `action` for the acting player.
    pub fn next(&self, state: &mut GameState<G>, action: &G::Action) -> Result<(), IllegalAction> {
        let player = state.acting_player();
        self.next_for(state, player, action)
    }

    /// Apply `action` on behalf of `player`.
    ///
    /// Validation happens before any mutation: on `Err` the state is
    /// untouched.
    pub fn next_for(
        &self,
        state: &mut GameState<G>,
        player: PlayerId,
        action: &G::Action,
    ) -> Result<(), IllegalAction> {
        self.validate(state, player, action)?;

        if self.is_simultaneous_turn(state) {
            self.submit(state, player, action);
        } else {
            self.apply(state, player, action);
        }

        if cfg!(debug_assertions) {
            if let Err(violation) = state.check_invariants() {
                panic!("{action:?} left an inconsistent state: {violation}");
            }
        }
        Ok(())
    }

    /// Has the in-progress action `id` fully resolved?
    ///
    /// True once the entry has left the stack. Ids are never reused, so the
    /// answer never reverts. Ids that never named a pending action report
    /// true as soon as they are issued.
    #[must_use]
    pub fn execution_complete(&self, state: &GameState<G>, id: ComponentId) -> bool {
        state.components.was_issued(id) && !state.stack().contains(id)
    }

    fn is_simultaneous_turn(&self, state: &GameState<G>) -> bool {
        !state.is_action_in_progress() && self.game.turn_order().is_simultaneous(state)
    }

    fn apply(&self, state: &mut GameState<G>, player: PlayerId, action: &G::Action) {
        let cost = action.cost(state);
        let continuing = state.is_action_in_progress();

        debug!("{player} plays {action:?} (cost {cost})");
        let applied = action.apply(state, player);
        state.turn.spend(cost);
        state.record(player, action.clone());

        if continuing {
            Self::advance_pending(state, action);
        }

        let end_requested = matches!(applied, Applied::EndTurn);
        if let Applied::Push(sequence) = applied {
            let id = state.components.allocate_id();
            debug!("{player} starts in-progress action {id}: {sequence:?}");
            state
                .stack_mut()
                .push(PendingAction::new(id, player, sequence));
        }
        Self::pop_completed(state);

        if state.is_terminal() || state.is_action_in_progress() {
            return;
        }
        if end_requested || state.turn.is_exhausted() {
            self.game.turn_order().end_player_turn(state);
        }
    }

    fn advance_pending(state: &mut GameState<G>, action: &G::Action) {
        let Some(mut pending) = state.action_in_progress().cloned() else {
            return;
        };
        pending.sequence.after_action(state, action);
        trace!("in-progress action {} now at {:?}", pending.id, pending.sequence);
        if let Some(top) = state.stack_mut().top_mut() {
            *top = pending;
        }
    }

    fn pop_completed(state: &mut GameState<G>) {
        while let Some(top) = state.action_in_progress() {
            if !top.sequence.is_complete(state) {
                break;
            }
            let id = top.id;
            state.stack_mut().pop();
            debug!("in-progress action {id} complete");
        }
    }

    /// Store a simultaneous submission; resolve once every eligible slot is
    /// filled.
    fn submit(&self, state: &mut GameState<G>, player: PlayerId, action: &G::Action) {
        let turns = self.game.turn_order();
        debug!("{player} submits {action:?}");
        state.submissions_mut()[player] = Some(action.clone());

        let n = state.player_count();
        let current = state.turn.current_player;
        let waiting_on = (0..n)
            .map(|offset| current.rotate(offset, n))
            .find(|&p| state.submission(p).is_none() && turns.is_eligible(state, p));
        match waiting_on {
            Some(next) if next == current => return,
            Some(next) => {
                turns.start_turn(state, next);
                return;
            }
            None => {}
        }

        let submitted: Vec<(PlayerId, G::Action)> = state
            .submissions_mut()
            .iter_mut()
            .filter_map(|(p, slot)| slot.take().map(|a| (p, a)))
            .collect();
        debug!("resolving {} simultaneous actions", submitted.len());

        for (p, submitted_action) in submitted {
            let cost = submitted_action.cost(state);
            if let Applied::Push(sequence) = submitted_action.apply(state, p) {
                panic!("simultaneous action {submitted_action:?} tried to start {sequence:?}");
            }
            state.turn.spend(cost);
            state.record(p, submitted_action);
        }

        turns.resolve_simultaneous(state);
        if !state.is_terminal() {
            turns.complete_phase(state);
        }
    }
}
