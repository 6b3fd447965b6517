//! Monastery rules: setup, seasons, feeding.

use log::debug;
use smallvec::SmallVec;

use super::actions::MonasteryAction;
use super::board::{
    Area, BonusToken, Destination, MonasteryBoard, MonasteryCard, MonasteryGlobals, PlayerBoard,
    Resource, Route, Season, PLACE_MONKS, USE_MONKS,
};
use super::params::MonasteryParams;
use super::sequence::MonasterySequence;
use crate::components::{Counter, Deck, Token};
use crate::core::{ComponentId, GameState, Owner, PlayerId, Visibility};
use crate::rules::{Evaluator, Game};
use crate::turn::TurnOrder;

/// A monk: token id plus its piety.
pub type Monk = (ComponentId, i64);

/// Worker-placement monastery game.
///
/// Each season, players place their monks one at a time on the working
/// areas, then the areas are worked in order. A player's action points in an
/// area equal the total piety of their monks there. Winter has no placement:
/// monks eat, pilgrims come home promoted and a new year begins. After the
/// configured number of years, the most victory points wins.
#[derive(Clone, Debug, Default)]
pub struct Monastery {
    params: MonasteryParams,
    turns: MonasteryTurnOrder,
}

impl Monastery {
    #[must_use]
    pub fn new(params: MonasteryParams) -> Self {
        Self {
            params,
            turns: MonasteryTurnOrder,
        }
    }

    #[must_use]
    pub fn params(&self) -> &MonasteryParams {
        &self.params
    }

    fn player_board(state: &GameState<Monastery>, player: PlayerId) -> &PlayerBoard {
        &state.globals.board().players[player.index()]
    }

    #[must_use]
    pub fn resource(state: &GameState<Monastery>, player: PlayerId, resource: Resource) -> i64 {
        state.counter_value(Monastery::player_board(state, player).resource(resource))
    }

    pub fn adjust_resource(state: &mut GameState<Monastery>, player: PlayerId, resource: Resource, delta: i64) {
        let id = Monastery::player_board(state, player).resource(resource);
        state.adjust_counter(id, delta);
    }

    #[must_use]
    pub fn vp(state: &GameState<Monastery>, player: PlayerId) -> i64 {
        state.counter_value(Monastery::player_board(state, player).vp)
    }

    pub fn adjust_vp(state: &mut GameState<Monastery>, player: PlayerId, delta: i64) {
        let id = Monastery::player_board(state, player).vp;
        state.adjust_counter(id, delta);
    }

    /// Grain sown in the player's meadow.
    #[must_use]
    pub fn meadow_grain(state: &GameState<Monastery>, player: PlayerId) -> i64 {
        state.counter_value(Monastery::player_board(state, player).meadow_grain)
    }

    /// Skeps the player has placed in the meadow.
    #[must_use]
    pub fn meadow_skeps(state: &GameState<Monastery>, player: PlayerId) -> i64 {
        state.counter_value(Monastery::player_board(state, player).meadow_skeps)
    }

    /// Where a monk is.
    ///
    /// # Panics
    ///
    /// Panics if the token's location is not an area.
    #[must_use]
    pub fn monk_area(state: &GameState<Monastery>, monk: ComponentId) -> Area {
        let location = state.components.token(monk).location;
        Area::from_location(location)
            .unwrap_or_else(|| panic!("{monk} is at unknown location {location}"))
    }

    /// A player's monks in `area`, in id order.
    #[must_use]
    pub fn monks_in(state: &GameState<Monastery>, player: PlayerId, area: Area) -> SmallVec<[Monk; 8]> {
        state
            .globals
            .board()
            .monks
            .iter()
            .filter(|&&id| state.components.meta(id).owner.is_player(player))
            .map(|&id| (id, state.components.token(id)))
            .filter(|(_, token)| token.is_at(area.location()))
            .map(|(id, token)| (id, token.value))
            .collect()
    }

    /// First of the player's monks in `area` with exactly `piety`.
    #[must_use]
    pub fn find_monk(state: &GameState<Monastery>, player: PlayerId, area: Area, piety: i64) -> Option<ComponentId> {
        Monastery::monks_in(state, player, area)
            .into_iter()
            .find(|&(_, p)| p == piety)
            .map(|(id, _)| id)
    }

    /// Distinct piety values among the player's monks in `area`, ascending.
    #[must_use]
    pub fn pieties_in(state: &GameState<Monastery>, player: PlayerId, area: Area) -> SmallVec<[i64; 8]> {
        let mut pieties: SmallVec<[i64; 8]> = Monastery::monks_in(state, player, area)
            .into_iter()
            .map(|(_, piety)| piety)
            .collect();
        pieties.sort_unstable();
        pieties.dedup();
        pieties
    }

    /// Total piety of the player's monks in `area`.
    #[must_use]
    pub fn area_piety(state: &GameState<Monastery>, player: PlayerId, area: Area) -> i64 {
        Monastery::monks_in(state, player, area).iter().map(|&(_, piety)| piety).sum()
    }

    /// Bonus tokens still waiting on a working area.
    #[must_use]
    pub fn tokens_left(state: &GameState<Monastery>, area: Area) -> usize {
        state.components.deck(state.globals.board().tokens(area)).len()
    }

    /// Must the current player take a bonus token before anything else?
    #[must_use]
    pub fn must_take_token(state: &GameState<Monastery>) -> bool {
        state.turn.phase == USE_MONKS
            && !state.globals.token_taken
            && Monastery::tokens_left(state, state.globals.area) > 0
    }

    /// Can the player spend prayer tokens for action points here?
    #[must_use]
    pub fn can_pray(state: &GameState<Monastery>, player: PlayerId) -> bool {
        state.turn.phase == USE_MONKS
            && state.globals.area != Area::Chapel
            && Monastery::resource(state, player, Resource::Prayer) > 0
    }

    /// Piety values of the player's monks in the current area that can
    /// still be promoted.
    #[must_use]
    pub fn promotable(state: &GameState<Monastery>, player: PlayerId) -> SmallVec<[i64; 8]> {
        let max = state.globals.params.max_piety;
        let mut pieties = Monastery::pieties_in(state, player, state.globals.area);
        pieties.retain(|piety| *piety < max);
        pieties
    }

    /// Recruit a new monk.
    pub fn add_monk(state: &mut GameState<Monastery>, player: PlayerId, piety: i64, area: Area) -> ComponentId {
        let id = state.components.register(
            format!("monk {player}"),
            player.into(),
            Visibility::Public,
            Token::new(piety, area.location()),
        );
        state.globals.board_mut().monks.push(id);
        id
    }

    /// Raise a monk's piety by one; at maximum piety the monk retires.
    pub fn promote(state: &mut GameState<Monastery>, monk: ComponentId) {
        let max = state.globals.params.max_piety;
        let token = state.components.token_mut(monk);
        token.value += 1;
        if token.value < max {
            return;
        }

        token.move_to(Area::Retired.location());
        if let Owner::Player(player) = state.components.meta(monk).owner {
            let reward = state.globals.params.retirement_vp;
            Monastery::adjust_vp(state, player, reward);
            debug!("{monk} of {player} retires");
        }
    }

    /// Move a monk.
    pub fn move_monk(state: &mut GameState<Monastery>, monk: ComponentId, area: Area) {
        state.components.token_mut(monk).move_to(area.location());
    }
}

fn starting_amount(params: &MonasteryParams, resource: Resource) -> i64 {
    match resource {
        Resource::Grain => params.starting_grain,
        Resource::Honey => params.starting_honey,
        Resource::Wax => params.starting_wax,
        Resource::Skep => params.starting_skeps,
        Resource::Bread => params.starting_bread,
        Resource::Shilling => params.starting_shillings,
        Resource::Beer | Resource::Candle | Resource::Prayer => 0,
    }
}

fn pilgrimage_pool(route: Route, size: usize) -> Vec<MonasteryCard> {
    let destinations = match route {
        Route::Short => [Destination::Rome, Destination::Santiago],
        Route::Long => [Destination::Jerusalem, Destination::Alexandria],
    };
    (0..size)
        .map(|i| MonasteryCard::Pilgrimage(destinations[i % 2]))
        .collect()
}

impl Game for Monastery {
    type Card = MonasteryCard;
    type Action = MonasteryAction;
    type Sequence = MonasterySequence;
    type Globals = MonasteryGlobals;
    type Turns = MonasteryTurnOrder;

    fn turn_order(&self) -> &MonasteryTurnOrder {
        &self.turns
    }

    fn setup(&self, state: &mut GameState<Self>) {
        let n = state.player_count();
        let params = self.params;
        let components = &mut state.components;

        let mut players = Vec::with_capacity(n);
        let mut monks = Vec::with_capacity(n * params.starting_piety.len());
        for p in PlayerId::all(n) {
            let storeroom = Resource::ALL
                .iter()
                .map(|&r| {
                    components.register(
                        format!("{r:?} {p}"),
                        p.into(),
                        Visibility::Public,
                        Counter::new(starting_amount(&params, r)).with_min(0),
                    )
                })
                .collect();
            let vp = components.register(format!("vp {p}"), p.into(), Visibility::Public, Counter::new(0));
            let meadow_grain = components.register(
                format!("meadow grain {p}"),
                p.into(),
                Visibility::Public,
                Counter::new(0).with_min(0),
            );
            let meadow_skeps = components.register(
                format!("meadow skeps {p}"),
                p.into(),
                Visibility::Public,
                Counter::new(0).with_min(0),
            );
            players.push(PlayerBoard {
                storeroom,
                vp,
                meadow_grain,
                meadow_skeps,
            });

            for &piety in &params.starting_piety {
                monks.push(components.register(
                    format!("monk {p}"),
                    p.into(),
                    Visibility::Public,
                    Token::new(piety, Area::Dormitory.location()),
                ));
            }
        }

        let bag: Vec<MonasteryCard> = BonusToken::ALL
            .iter()
            .flat_map(|&t| std::iter::repeat(MonasteryCard::Bonus(t)).take(params.tokens_per_kind))
            .collect();
        let bonus_bag = components.register("bonus bag", Owner::Shared, Visibility::Hidden, Deck::from_cards(bag));
        let area_tokens = Area::WORKING
            .iter()
            .map(|area| {
                components.register(
                    format!("{area:?} tokens"),
                    Owner::Shared,
                    Visibility::Public,
                    Deck::<MonasteryCard>::new(),
                )
            })
            .collect();
        let used_tokens = components.register("used tokens", Owner::Shared, Visibility::Public, Deck::<MonasteryCard>::new());
        let short_pool = components.register(
            "short pilgrimages",
            Owner::Shared,
            Visibility::Hidden,
            Deck::from_cards(pilgrimage_pool(Route::Short, params.pilgrimages_per_route)),
        );
        let long_pool = components.register(
            "long pilgrimages",
            Owner::Shared,
            Visibility::Hidden,
            Deck::from_cards(pilgrimage_pool(Route::Long, params.pilgrimages_per_route)),
        );
        let pilgrimages = components.register("pilgrimages", Owner::Shared, Visibility::Public, Deck::<MonasteryCard>::new());

        state.globals = MonasteryGlobals {
            params,
            season: Season::Spring,
            area: Area::Meadow,
            board: Some(MonasteryBoard {
                players,
                monks,
                bonus_bag,
                area_tokens,
                used_tokens,
                short_pool,
                long_pool,
                pilgrimages,
            }),
            token_taken: false,
            prayed: false,
        };

        for deck in [bonus_bag, short_pool, long_pool] {
            state.components.deck_mut(deck).shuffle(&mut state.rng);
        }
        start_season(state);
    }

    fn top_level_actions(&self, state: &GameState<Self>, player: PlayerId) -> Vec<MonasteryAction> {
        if state.turn.phase == PLACE_MONKS {
            let mut actions = Vec::new();
            for piety in Monastery::pieties_in(state, player, Area::Dormitory) {
                actions.extend(Area::WORKING.iter().map(|&area| MonasteryAction::PlaceMonk { area, piety }));
            }
            return actions;
        }

        if Monastery::must_take_token(state) {
            return vec![MonasteryAction::TakeToken];
        }

        let mut actions = MonasteryAction::area_candidates(state, player);
        if !state.globals.token_taken && !state.globals.prayed {
            let prayers = Monastery::resource(state, player, Resource::Prayer);
            let prayers = u8::try_from(prayers).unwrap_or(u8::MAX);
            actions.extend((1..=prayers).map(MonasteryAction::Pray));
        }
        actions.push(MonasteryAction::Pass);
        actions
    }

    fn no_op() -> MonasteryAction {
        MonasteryAction::Pass
    }

    fn game_score(state: &GameState<Self>, player: PlayerId) -> f64 {
        Monastery::vp(state, player) as f64
    }

    fn heuristic_score(state: &GameState<Self>, player: PlayerId) -> f64 {
        MonasteryHeuristic.evaluate(state, player)
    }
}

/// Turn order: placement laps, then one turn per player per working area.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonasteryTurnOrder;

impl TurnOrder<Monastery> for MonasteryTurnOrder {
    fn is_eligible(&self, state: &GameState<Monastery>, player: PlayerId) -> bool {
        let area = if state.turn.phase == PLACE_MONKS {
            Area::Dormitory
        } else {
            state.globals.area
        };
        !Monastery::monks_in(state, player, area).is_empty()
    }

    fn turn_budget(&self, state: &GameState<Monastery>, player: PlayerId) -> Option<i32> {
        if state.turn.phase == PLACE_MONKS {
            return None;
        }
        let piety = Monastery::area_piety(state, player, state.globals.area);
        Some(i32::try_from(piety).unwrap_or(i32::MAX))
    }

    fn on_turn_start(&self, state: &mut GameState<Monastery>) {
        state.globals.token_taken = false;
        state.globals.prayed = false;
    }

    fn on_phase_complete(&self, state: &mut GameState<Monastery>) {
        if state.turn.phase == PLACE_MONKS {
            let unplaced = state
                .player_ids()
                .any(|p| !Monastery::monks_in(state, p, Area::Dormitory).is_empty());
            if unplaced {
                return;
            }
            state.turn.phase = USE_MONKS;
            state.globals.area = Area::Meadow;
            return;
        }

        match state.globals.area.next_working() {
            Some(next) => state.globals.area = next,
            None => self.end_period(state),
        }
    }

    fn on_period_end(&self, state: &mut GameState<Monastery>) {
        return_to_dormitory(state);
        collect_tokens(state);

        state.globals.season = state.globals.season.next();
        if state.globals.season == Season::Winter {
            winter(state);
            self.end_round(state);
        } else {
            start_season(state);
        }
    }

    fn on_round_end(&self, state: &mut GameState<Monastery>) {
        if state.turn.round >= state.globals.params.years {
            state.end_game_by_score();
            return;
        }
        state.globals.season = Season::Spring;
        state.turn.first_player = state.turn.first_player.rotate(1, state.player_count());
        start_season(state);
    }
}

/// Deal bonus tokens and open the placement phase.
fn start_season(state: &mut GameState<Monastery>) {
    deal_tokens(state);
    state.turn.phase = PLACE_MONKS;
    state.globals.area = Area::Meadow;
    debug!("{:?} of year {}", state.globals.season, state.turn.round + 1);
}

fn deal_tokens(state: &mut GameState<Monastery>) {
    let board = state.globals.board();
    let bag = board.bonus_bag;
    let areas = board.area_tokens.clone();
    let per_area = state.globals.params.tokens_per_area;

    for deck in areas {
        for _ in 0..per_area {
            let Some(token) = state.components.deck_mut(bag).draw() else {
                return;
            };
            state.components.deck_mut(deck).add_to_bottom(token);
        }
    }
}

/// Put every bonus token back in the bag and shake it.
fn collect_tokens(state: &mut GameState<Monastery>) {
    let board = state.globals.board();
    let bag = board.bonus_bag;
    let mut decks = board.area_tokens.clone();
    decks.push(board.used_tokens);

    for deck in decks {
        for token in state.components.deck_mut(deck).take_all() {
            state.components.deck_mut(bag).add_to_bottom(token);
        }
    }
    state.components.deck_mut(bag).shuffle(&mut state.rng);
}

fn return_to_dormitory(state: &mut GameState<Monastery>) {
    let monks = state.globals.board().monks.clone();
    for monk in monks {
        if Monastery::monk_area(state, monk).working_index().is_some() {
            Monastery::move_monk(state, monk, Area::Dormitory);
        }
    }
}

/// Feeding, unharvested crops, returning pilgrims.
fn winter(state: &mut GameState<Monastery>) {
    let penalty = state.globals.params.unfed_penalty;

    for p in state.player_ids().collect::<SmallVec<[PlayerId; 4]>>() {
        let mouths = Monastery::monks_in(state, p, Area::Dormitory).len();
        let mut unfed = 0;
        for _ in 0..mouths {
            let food = Resource::FOOD
                .into_iter()
                .find(|&r| Monastery::resource(state, p, r) > 0);
            match food {
                Some(food) => Monastery::adjust_resource(state, p, food, -1),
                None => unfed += 1,
            }
        }
        if unfed > 0 {
            Monastery::adjust_vp(state, p, -penalty * unfed);
            debug!("{p} could not feed {unfed} monks");
        }

        let board = Monastery::player_board(state, p).clone();
        let grain = state.counter_value(board.meadow_grain);
        state.adjust_counter(board.meadow_grain, -grain);
        let skeps = state.counter_value(board.meadow_skeps);
        state.adjust_counter(board.meadow_skeps, -skeps);
        state.adjust_counter(board.resource(Resource::Skep), skeps);
    }

    let monks = state.globals.board().monks.clone();
    for monk in monks {
        if Monastery::monk_area(state, monk) == Area::Pilgrimage {
            Monastery::move_monk(state, monk, Area::Dormitory);
            Monastery::promote(state, monk);
        }
    }
}

/// Victory points plus a little for everything in the storeroom.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonasteryHeuristic;

impl Evaluator<Monastery> for MonasteryHeuristic {
    fn evaluate(&self, state: &GameState<Monastery>, player: PlayerId) -> f64 {
        let goods: i64 = Resource::ALL
            .iter()
            .map(|&r| Monastery::resource(state, player, r))
            .sum();
        Monastery::vp(state, player) as f64 + 0.1 * goods as f64
    }
}
