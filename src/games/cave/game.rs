//! Cave rules: setup, turn order, resolution.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::actions::CaveAction;
use super::params::{CaveParams, TREASURE_VALUES};
use crate::components::{ComponentRoots, Counter, Deck, Tracker};
use crate::core::{ComponentId, GameState, Owner, PhaseId, PlayerId, Visibility};
use crate::rules::{Evaluator, Game};
use crate::stack::NoSequence;
use crate::turn::TurnOrder;

/// The single, simultaneous phase: everyone in the cave decides together.
pub const EXPLORE: PhaseId = PhaseId::new(0);

/// Hazard kinds. A second hazard of the same kind on the path ends the cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hazard {
    Explosion,
    PoisonGas,
    Rockfall,
    Scorpions,
    Snakes,
}

impl Hazard {
    pub const ALL: [Hazard; 5] = [
        Hazard::Explosion,
        Hazard::PoisonGas,
        Hazard::Rockfall,
        Hazard::Scorpions,
        Hazard::Snakes,
    ];
}

/// A card of the cave deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CaveCard {
    Treasure(u8),
    Hazard(Hazard),
}

impl CaveCard {
    /// Gems printed on the card; hazards carry none.
    #[must_use]
    pub fn gems(self) -> u8 {
        match self {
            CaveCard::Treasure(gems) => gems,
            CaveCard::Hazard(_) => 0,
        }
    }
}

/// Component ids of a set-up cave match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaveBoard {
    /// Face-down draw pile.
    pub main_deck: ComponentId,
    /// Hazards removed from play.
    pub discard: ComponentId,
    /// Cards revealed in the current cave, oldest on top.
    pub path: ComponentId,
    /// Gems left over on the path after uneven splits.
    pub path_gems: ComponentId,
    /// Gems carried by each explorer (lost to a repeated hazard).
    pub hands: Vec<ComponentId>,
    /// Gems banked by each player.
    pub chests: Vec<ComponentId>,
    /// Whether each player is still in the current cave.
    pub in_cave: Vec<ComponentId>,
}

/// Per-match scalars and root ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CaveGlobals {
    pub params: CaveParams,
    pub board: Option<CaveBoard>,
    /// Explorers who chose to leave in the decision being resolved.
    pub leaving: SmallVec<[PlayerId; 4]>,
}

impl CaveGlobals {
    /// # Panics
    ///
    /// Panics if the state has not been set up.
    #[must_use]
    pub fn board(&self) -> &CaveBoard {
        match &self.board {
            Some(board) => board,
            None => panic!("cave state used before setup"),
        }
    }
}

impl ComponentRoots for CaveGlobals {
    fn roots(&self) -> Vec<ComponentId> {
        let Some(board) = &self.board else {
            return Vec::new();
        };
        let mut roots = vec![board.main_deck, board.discard, board.path, board.path_gems];
        roots.extend(&board.hands);
        roots.extend(&board.chests);
        roots.extend(&board.in_cave);
        roots
    }
}

/// Push-your-luck cave exploration with simultaneous decisions.
///
/// Each decision round, every explorer still in the cave secretly chooses
/// to continue or leave. Leavers split the gems left on the path and bank
/// everything they carry. Then the next card is revealed: treasure is split
/// among the remaining explorers, a second hazard of a kind sends them home
/// empty-handed. After the configured number of caves, the fullest chest wins.
#[derive(Clone, Debug, Default)]
pub struct Cave {
    params: CaveParams,
    turns: CaveTurnOrder,
}

impl Cave {
    #[must_use]
    pub fn new(params: CaveParams) -> Self {
        Self {
            params,
            turns: CaveTurnOrder,
        }
    }

    #[must_use]
    pub fn params(&self) -> &CaveParams {
        &self.params
    }

    /// Gems a player has banked.
    #[must_use]
    pub fn chest(state: &GameState<Cave>, player: PlayerId) -> i64 {
        state.counter_value(state.globals.board().chests[player.index()])
    }

    /// Gems a player carries in the current cave.
    #[must_use]
    pub fn hand(state: &GameState<Cave>, player: PlayerId) -> i64 {
        state.counter_value(state.globals.board().hands[player.index()])
    }

    #[must_use]
    pub fn is_in_cave(state: &GameState<Cave>, player: PlayerId) -> bool {
        state
            .components
            .tracker(state.globals.board().in_cave[player.index()])
            .is_set()
    }

    /// Players still exploring, in seat order.
    #[must_use]
    pub fn explorers(state: &GameState<Cave>) -> SmallVec<[PlayerId; 4]> {
        state.player_ids().filter(|&p| Cave::is_in_cave(state, p)).collect()
    }

    /// Gems lying on the path.
    #[must_use]
    pub fn path_gems(state: &GameState<Cave>) -> i64 {
        state.counter_value(state.globals.board().path_gems)
    }

    /// Hazards of `kind` revealed in the current cave.
    #[must_use]
    pub fn hazards_on_path(state: &GameState<Cave>, kind: Hazard) -> usize {
        state
            .components
            .deck(state.globals.board().path)
            .count(|&card| card == CaveCard::Hazard(kind))
    }

    /// Caves completed so far.
    #[must_use]
    pub fn caves_completed(state: &GameState<Cave>) -> u32 {
        state.turn.period
    }
}

impl Game for Cave {
    type Card = CaveCard;
    type Action = CaveAction;
    type Sequence = NoSequence;
    type Globals = CaveGlobals;
    type Turns = CaveTurnOrder;

    fn turn_order(&self) -> &CaveTurnOrder {
        &self.turns
    }

    fn setup(&self, state: &mut GameState<Self>) {
        let n = state.player_count();
        let mut cards: Vec<CaveCard> = TREASURE_VALUES.iter().map(|&v| CaveCard::Treasure(v)).collect();
        for hazard in Hazard::ALL {
            cards.extend(std::iter::repeat(CaveCard::Hazard(hazard)).take(usize::from(self.params.hazard_copies)));
        }

        let components = &mut state.components;
        let main_deck = components.register("main deck", Owner::Shared, Visibility::Hidden, Deck::from_cards(cards));
        let discard = components.register("discard", Owner::Shared, Visibility::Public, Deck::<CaveCard>::new());
        let path = components.register("path", Owner::Shared, Visibility::Public, Deck::<CaveCard>::new());
        let path_gems = components.register("path gems", Owner::Shared, Visibility::Public, Counter::new(0).with_min(0));

        let mut board = CaveBoard {
            main_deck,
            discard,
            path,
            path_gems,
            hands: Vec::with_capacity(n),
            chests: Vec::with_capacity(n),
            in_cave: Vec::with_capacity(n),
        };
        for p in PlayerId::all(n) {
            board.hands.push(components.register(
                format!("hand {p}"),
                p.into(),
                Visibility::Public,
                Counter::new(0).with_min(0),
            ));
            board.chests.push(components.register(
                format!("chest {p}"),
                p.into(),
                Visibility::Public,
                Counter::new(0).with_min(0),
            ));
            board.in_cave.push(components.register(
                format!("in cave {p}"),
                p.into(),
                Visibility::Public,
                Tracker::flag(true),
            ));
        }

        state.globals = CaveGlobals {
            params: self.params,
            board: Some(board),
            leaving: SmallVec::new(),
        };
        state.turn.phase = EXPLORE;

        state.components.deck_mut(main_deck).shuffle(&mut state.rng);

        reveal_card(state);
    }

    fn top_level_actions(&self, state: &GameState<Self>, player: PlayerId) -> Vec<CaveAction> {
        if Cave::is_in_cave(state, player) {
            vec![CaveAction::Continue, CaveAction::Exit]
        } else {
            vec![CaveAction::Rest]
        }
    }

    fn no_op() -> CaveAction {
        CaveAction::Rest
    }

    fn game_score(state: &GameState<Self>, player: PlayerId) -> f64 {
        Cave::chest(state, player) as f64
    }

    fn heuristic_score(state: &GameState<Self>, player: PlayerId) -> f64 {
        CaveHeuristic.evaluate(state, player)
    }
}

/// Turn order: one simultaneous decision per revealed card.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaveTurnOrder;

impl TurnOrder<Cave> for CaveTurnOrder {
    fn is_eligible(&self, state: &GameState<Cave>, player: PlayerId) -> bool {
        Cave::is_in_cave(state, player)
    }

    fn on_phase_complete(&self, _state: &mut GameState<Cave>) {}

    fn on_period_end(&self, state: &mut GameState<Cave>) {
        if state.turn.period >= state.globals.params.caves {
            state.end_game_by_score();
            return;
        }
        debug!("entering cave {}", state.turn.period + 1);
        reveal_card(state);
    }

    fn is_simultaneous(&self, _state: &GameState<Cave>) -> bool {
        true
    }

    fn resolve_simultaneous(&self, state: &mut GameState<Cave>) {
        let board = state.globals.board().clone();
        let leaving = std::mem::take(&mut state.globals.leaving);

        if !leaving.is_empty() {
            let gems = state.counter_value(board.path_gems);
            let count = leaving.len() as i64;
            let share = gems / count;
            state.adjust_counter(board.path_gems, -(share * count));

            for p in leaving {
                let carried = state.counter_value(board.hands[p.index()]);
                state.adjust_counter(board.hands[p.index()], -carried);
                state.adjust_counter(board.chests[p.index()], carried + share);
                debug!("{p} leaves the cave banking {}", carried + share);
            }
        }

        if Cave::explorers(state).is_empty() {
            end_cave(state, None);
        } else {
            reveal_card(state);
        }
    }
}

/// Reveal the next card onto the path and apply it to the explorers.
fn reveal_card(state: &mut GameState<Cave>) {
    let board = state.globals.board().clone();
    let Some(card) = state.components.deck_mut(board.main_deck).draw() else {
        end_cave(state, None);
        return;
    };

    let repeated = match card {
        CaveCard::Hazard(kind) => Cave::hazards_on_path(state, kind) > 0,
        CaveCard::Treasure(_) => false,
    };
    state.components.deck_mut(board.path).add_to_bottom(card);
    debug!("revealed {card:?}");

    let explorers = Cave::explorers(state);
    match card {
        CaveCard::Treasure(gems) => {
            let gems = i64::from(gems);
            let count = explorers.len() as i64;
            for &p in &explorers {
                state.adjust_counter(board.hands[p.index()], gems / count);
            }
            state.adjust_counter(board.path_gems, gems % count);
        }
        CaveCard::Hazard(kind) if repeated => {
            for &p in &explorers {
                let carried = state.counter_value(board.hands[p.index()]);
                state.adjust_counter(board.hands[p.index()], -carried);
            }
            debug!("second {kind:?}: {} explorers flee empty-handed", explorers.len());
            end_cave(state, Some(kind));
        }
        CaveCard::Hazard(_) => {}
    }
}

/// Return the path to the deck (minus one copy of a repeated hazard),
/// reset the explorers and close the period.
fn end_cave(state: &mut GameState<Cave>, repeated: Option<Hazard>) {
    let board = state.globals.board().clone();

    let mut to_discard = repeated.map(CaveCard::Hazard);
    for card in state.components.deck_mut(board.path).take_all() {
        if to_discard == Some(card) {
            state.components.deck_mut(board.discard).add_to_top(card);
            to_discard = None;
        } else {
            state.components.deck_mut(board.main_deck).add_to_bottom(card);
        }
    }

    state.components.deck_mut(board.main_deck).shuffle(&mut state.rng);

    let leftover = state.counter_value(board.path_gems);
    state.adjust_counter(board.path_gems, -leftover);
    for p in state.player_ids().collect::<SmallVec<[PlayerId; 4]>>() {
        let carried = state.counter_value(board.hands[p.index()]);
        state.adjust_counter(board.hands[p.index()], -carried);
        state.components.tracker_mut(board.in_cave[p.index()]).set_flag(true);
    }

    CaveTurnOrder.end_period(state);
}

/// Chest plus carried gems discounted by the chance the next card is a
/// repeated hazard.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaveHeuristic;

impl Evaluator<Cave> for CaveHeuristic {
    fn evaluate(&self, state: &GameState<Cave>, player: PlayerId) -> f64 {
        let board = state.globals.board();
        let deck = state.components.deck(board.main_deck);
        let deadly = deck.count(|card| match *card {
            CaveCard::Hazard(kind) => Cave::hazards_on_path(state, kind) > 0,
            CaveCard::Treasure(_) => false,
        });
        let risk = if deck.is_empty() {
            0.0
        } else {
            deadly as f64 / deck.len() as f64
        };

        Cave::chest(state, player) as f64 + Cave::hand(state, player) as f64 * (1.0 - risk)
    }
}
