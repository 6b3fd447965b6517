//! Game state: the single owner of a match's mutable data.
//!
//! ## GameState
//!
//! Aggregate root holding:
//! - Configuration (seats, seed, observability)
//! - The component registry (decks, counters, tokens, trackers)
//! - Turn-order state (current player, phase, counters, action points)
//! - The in-progress action stack
//! - Simultaneous-turn submission slots
//! - Per-game globals (scalars and root component ids)
//! - The state-carried RNG
//! - Terminal status and action history
//!
//! Every collection is an `im` persistent structure, so `clone` is O(1) and
//! copies never alias: the first write on either side copies the touched path.
//!
//! ## Copying for an observer
//!
//! [`GameState::copy`] with [`Observer::Full`] is a plain clone. For
//! [`Observer::Player`] in a partially observable match, decks the observer
//! cannot see are reshuffled and other players' pending simultaneous
//! submissions are dropped.
//!
//! The reshuffle is *seed-linked*: its stream derives from the state's seed
//! and turn counter only. Two consecutive copies of an unchanged state are
//! identical. Each hidden deck is sorted before it is reshuffled, so the
//! redacted order depends on the deck's contents and never on the true
//! order. Once the turn counter moves, the redacted order is derived afresh.

use im::Vector;
use log::{debug, info};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

use super::action::ActionRecord;
use super::config::GameConfig;
use super::entity::{ComponentId, Owner};
use super::player::{Observer, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::components::{Component, ComponentArena, ComponentRoots};
use crate::error::InvariantViolation;
use crate::rules::{Evaluator, Game, GameResult};
use crate::stack::{ActionStack, PendingAction};
use crate::turn::TurnState;

use serde::{Deserialize, Serialize};

/// Whether the match is still being played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Ended(GameResult),
}

/// Complete state of one match of game `G`.
pub struct GameState<G: Game> {
    config: GameConfig,

    /// Every mutable game object, keyed by id.
    pub components: ComponentArena<G::Card>,

    /// Whose turn, which phase, how many action points.
    pub turn: TurnState,

    /// Game-defined scalars and root component ids.
    pub globals: G::Globals,

    /// The only source of randomness for rules code.
    pub rng: GameRng,

    stack: ActionStack<G::Sequence>,
    submissions: PlayerMap<Option<G::Action>>,
    status: GameStatus,
    history: Vector<ActionRecord<G::Action>>,
}

impl<G: Game> GameState<G> {
    /// Create an unpopulated state for `config`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let player_count = config.player_count;
        let rng = GameRng::new(config.seed);

        Self {
            config,
            components: ComponentArena::new(),
            turn: TurnState::new(player_count),
            globals: G::Globals::default(),
            rng,
            stack: ActionStack::new(),
            submissions: PlayerMap::with_value(player_count, None),
            status: GameStatus::Ongoing,
            history: Vector::new(),
        }
    }

    /// Return to an unpopulated shell, ready for setup.
    ///
    /// The registry, globals, turn state, stack, submissions and history are
    /// emptied and the RNG is reseeded from the configured seed.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        *self = Self::new(config);
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player
    }

    /// Seat that must decide next: the top pending action's player if one
    /// is in progress, otherwise the current player.
    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        use crate::stack::ActionSequence;

        self.stack
            .top()
            .map_or(self.turn.current_player, |pending| pending.sequence.acting_player())
    }

    // === Status ===

    #[must_use]
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, GameStatus::Ended(_))
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        match &self.status {
            GameStatus::Ended(result) => Some(result),
            GameStatus::Ongoing => None,
        }
    }

    /// Mark the match as finished.
    pub fn end_game(&mut self, result: GameResult) {
        info!(
            "game over after {} rounds, {} turns: {result:?}",
            self.turn.round, self.turn.turn_count
        );
        self.status = GameStatus::Ended(result);
    }

    /// End the match with the result implied by the game scores.
    pub fn end_game_by_score(&mut self) {
        let scores: Vec<_> = self.player_ids().map(|p| (p, G::game_score(self, p))).collect();
        self.end_game(GameResult::from_scores(&scores));
    }

    // === In-progress actions ===

    #[must_use]
    pub fn stack(&self) -> &ActionStack<G::Sequence> {
        &self.stack
    }

    #[must_use]
    pub fn is_action_in_progress(&self) -> bool {
        !self.stack.is_empty()
    }

    /// The pending action awaiting a decision, if any.
    #[must_use]
    pub fn action_in_progress(&self) -> Option<&PendingAction<G::Sequence>> {
        self.stack.top()
    }

    pub(crate) fn stack_mut(&mut self) -> &mut ActionStack<G::Sequence> {
        &mut self.stack
    }

    // === Simultaneous submissions ===

    /// The action `player` has submitted for the current simultaneous turn.
    #[must_use]
    pub fn submission(&self, player: PlayerId) -> Option<&G::Action> {
        self.submissions[player].as_ref()
    }

    pub(crate) fn submissions_mut(&mut self) -> &mut PlayerMap<Option<G::Action>> {
        &mut self.submissions
    }

    // === History ===

    /// Every applied action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<G::Action>> {
        &self.history
    }

    pub(crate) fn record(&mut self, player: PlayerId, action: G::Action) {
        let turn = self.turn.turn_count;
        let sequence = match self.history.back() {
            Some(last) if last.turn == turn => last.sequence + 1,
            _ => 0,
        };
        self.history
            .push_back(ActionRecord::new(player, action, self.turn.round, turn, sequence));
    }

    // === Components ===

    /// Every registered component, in id order.
    pub fn all_components(&self) -> impl Iterator<Item = &Component<G::Card>> {
        self.components.iter()
    }

    /// Value of a counter.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a counter.
    #[must_use]
    pub fn counter_value(&self, id: ComponentId) -> i64 {
        self.components.counter(id).value()
    }

    /// Add `delta` to a counter and return the new value.
    ///
    /// # Panics
    ///
    /// Panics if the counter rejects the change. Rules code calls this only
    /// after its precondition check has established the change is legal.
    pub fn adjust_counter(&mut self, id: ComponentId, delta: i64) -> i64 {
        match self.components.counter_mut(id).add(delta) {
            Ok(value) => value,
            Err(err) => panic!("rejected change of {delta} to {id}: {err}"),
        }
    }

    // === Copying ===

    /// Decks whose order `observer` may not see, in id order.
    ///
    /// Empty for [`Observer::Full`] and for fully observable matches.
    #[must_use]
    pub fn hidden_components(&self, observer: Observer) -> Vec<ComponentId> {
        let Some(viewer) = observer.player() else {
            return Vec::new();
        };
        if !self.config.partial_observable {
            return Vec::new();
        }
        self.components
            .iter()
            .filter(|component| component.is_hidden_deck_for(viewer))
            .map(Component::id)
            .collect()
    }

    /// Copy this state for `observer`.
    ///
    /// The source is never mutated. See the module docs for redaction.
    ///
    /// ```
    /// use tabletop_engine::core::{GameConfig, Observer, PlayerId};
    /// use tabletop_engine::games::cave::Cave;
    /// use tabletop_engine::rules::ForwardModel;
    ///
    /// let model = ForwardModel::new(Cave::default());
    /// let state = model.new_state(GameConfig::new(3).with_seed(1).partially_observable());
    ///
    /// assert_eq!(state.copy(Observer::Full), state);
    ///
    /// let a = state.copy(Observer::Player(PlayerId::new(0)));
    /// let b = state.copy(Observer::Player(PlayerId::new(0)));
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn copy(&self, observer: Observer) -> Self {
        let mut copy = self.clone();

        let Some(viewer) = observer.player() else {
            return copy;
        };
        if !self.config.partial_observable {
            return copy;
        }
        let hidden = self.hidden_components(observer);

        // Sorting first makes the redacted order a function of the deck's
        // contents, seed and turn counter, never of the true order.
        let turn_count = self.turn.turn_count;
        let mut redaction = self.rng.for_context(("redact", turn_count));
        for &id in &hidden {
            let deck = copy.components.deck_mut(id);
            deck.sort();
            deck.shuffle(&mut redaction);
        }

        for (player, slot) in copy.submissions.iter_mut() {
            if player != viewer {
                *slot = None;
            }
        }

        // Future draws on the copy must not replay the true stream.
        copy.rng = self.rng.for_context(("observer", turn_count));

        debug!(
            "redacted copy for {viewer}: {} hidden decks reshuffled",
            hidden.len()
        );
        copy
    }

    // === Consistency ===

    /// Check that the globals' roots and the registry agree and that every
    /// owner and pending-action id is valid.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = FxHashSet::default();
        for id in self.globals.roots() {
            if !seen.insert(id) {
                return Err(InvariantViolation::DuplicateRoot(id));
            }
            if !self.components.contains(id) {
                return Err(InvariantViolation::UnknownRoot(id));
            }
        }

        let next = self.components.next_id();
        let player_count = self.player_count();
        for component in self.components.iter() {
            let id = component.id();
            if !seen.contains(&id) {
                return Err(InvariantViolation::Orphan(id));
            }
            if !self.components.was_issued(id) {
                return Err(InvariantViolation::UnallocatedId { id, next });
            }
            if let Owner::Player(seat) = component.meta.owner {
                if seat.index() >= player_count {
                    return Err(InvariantViolation::DanglingOwner {
                        id,
                        seat: seat.0,
                        player_count,
                    });
                }
            }
        }

        for pending in self.stack.iter() {
            if !self.components.was_issued(pending.id) {
                return Err(InvariantViolation::UnallocatedId { id: pending.id, next });
            }
        }

        Ok(())
    }

    // === Scoring ===

    #[must_use]
    pub fn game_score(&self, player: PlayerId) -> f64 {
        G::game_score(self, player)
    }

    #[must_use]
    pub fn heuristic_score(&self, player: PlayerId) -> f64 {
        G::heuristic_score(self, player)
    }

    /// Score `player` with a custom evaluator.
    #[must_use]
    pub fn heuristic_score_with(&self, evaluator: &impl Evaluator<G>, player: PlayerId) -> f64 {
        evaluator.evaluate(self, player)
    }

    /// Players from best to worst game score, ties broken by seat.
    #[must_use]
    pub fn ranking(&self) -> SmallVec<[PlayerId; 4]> {
        let mut scored: SmallVec<[(PlayerId, f64); 4]> =
            self.player_ids().map(|p| (p, G::game_score(self, p))).collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.into_iter().map(|(p, _)| p).collect()
    }

    /// 1-based position of `player`; tied players share a position.
    #[must_use]
    pub fn ordinal_position(&self, player: PlayerId) -> usize {
        let score = G::game_score(self, player);
        1 + self
            .player_ids()
            .filter(|&p| G::game_score(self, p) > score)
            .count()
    }
}

impl<G: Game> Clone for GameState<G> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            components: self.components.clone(),
            turn: self.turn.clone(),
            globals: self.globals.clone(),
            rng: self.rng.clone(),
            stack: self.stack.clone(),
            submissions: self.submissions.clone(),
            status: self.status.clone(),
            history: self.history.clone(),
        }
    }
}

impl<G: Game> std::fmt::Debug for GameState<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("config", &self.config)
            .field("turn", &self.turn)
            .field("status", &self.status)
            .field("globals", &self.globals)
            .field("stack", &self.stack)
            .field("components", &self.components.len())
            .field("history", &self.history.len())
            .finish()
    }
}

// RNG position and history are bookkeeping: two states that got to the same
// position by different routes compare equal.
impl<G: Game> PartialEq for GameState<G> {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.turn == other.turn
            && self.status == other.status
            && self.globals == other.globals
            && self.stack == other.stack
            && self.submissions == other.submissions
            && self.components == other.components
    }
}

impl<G: Game> Eq for GameState<G> {}

impl<G: Game> Hash for GameState<G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.config.hash(state);
        self.turn.hash(state);
        self.status.hash(state);
        self.globals.hash(state);
        self.stack.hash(state);
        self.submissions.hash(state);
        self.components.hash(state);
    }
}
