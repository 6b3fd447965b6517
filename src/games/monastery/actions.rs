//! Monastery actions.

use log::debug;
use serde::{Deserialize, Serialize};

use super::board::{Area, BonusToken, MonasteryCard, Resource, Route, Season, PLACE_MONKS, USE_MONKS};
use super::game::Monastery;
use super::sequence::{MonasterySequence, TokenStage};
use crate::core::{Applied, GameAction, GameState, PlayerId};
use crate::error::IllegalAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonasteryAction {
    // === Placement ===
    /// Send a monk of this piety from the dormitory to a working area.
    PlaceMonk { area: Area, piety: i64 },

    // === Every working area ===
    /// Take the next bonus token of the area. Mandatory while any remain.
    TakeToken,
    /// Promote one of your monks in the area (promotion token).
    PromoteMonk { piety: i64 },
    /// Spend prayer tokens for action points; `Pray(0)` declines.
    Pray(u8),
    /// End the turn.
    Pass,

    // === Meadow ===
    /// Sow one grain from the general supply.
    SowWheat,
    /// Reap one sown grain into two in the storeroom.
    HarvestWheat,
    PlaceSkep,
    /// Bring meadow skeps home with their honey and wax.
    CollectSkeps,
    Forage,

    // === Kitchen ===
    BakeBread,
    BrewBeer,

    // === Workshop ===
    WeaveSkep,
    MakeCandle,

    // === Gatehouse ===
    BegForAlms(u8),
    VisitMarket,
    Buy(Resource),
    Sell(Resource),
    /// Leave the market empty-handed.
    DoNothing,
    HireNovice,
    GoOnPilgrimage { route: Route, piety: i64 },

    // === Chapel ===
    PromoteAllMonks,
}

fn require(condition: bool, reason: impl FnOnce() -> String) -> Result<(), IllegalAction> {
    if condition {
        Ok(())
    } else {
        Err(IllegalAction::precondition(reason()))
    }
}

impl MonasteryAction {
    /// The working area this action belongs to, if it is an area action.
    #[must_use]
    pub fn area(self) -> Option<Area> {
        use MonasteryAction::*;
        match self {
            SowWheat | HarvestWheat | PlaceSkep | CollectSkeps | Forage => Some(Area::Meadow),
            BakeBread | BrewBeer => Some(Area::Kitchen),
            WeaveSkep | MakeCandle => Some(Area::Workshop),
            BegForAlms(_) | VisitMarket | HireNovice | GoOnPilgrimage { .. } => Some(Area::Gatehouse),
            PromoteAllMonks => Some(Area::Chapel),
            PlaceMonk { .. } | TakeToken | PromoteMonk { .. } | Pray(_) | Pass | Buy(_) | Sell(_) | DoNothing => {
                None
            }
        }
    }

    /// Only legal as a continuation of a pending sequence.
    #[must_use]
    pub fn is_continuation_only(self) -> bool {
        matches!(
            self,
            MonasteryAction::PromoteMonk { .. }
                | MonasteryAction::Pray(0)
                | MonasteryAction::Buy(_)
                | MonasteryAction::Sell(_)
                | MonasteryAction::DoNothing
        )
    }

    /// Candidate area actions for the current area. Legality is checked
    /// by the forward model.
    #[must_use]
    pub fn area_candidates(state: &GameState<Monastery>, player: PlayerId) -> Vec<MonasteryAction> {
        use MonasteryAction::*;
        match state.globals.area {
            Area::Meadow => vec![SowWheat, HarvestWheat, PlaceSkep, CollectSkeps, Forage],
            Area::Kitchen => vec![BakeBread, BrewBeer],
            Area::Workshop => vec![WeaveSkep, MakeCandle],
            Area::Gatehouse => {
                let budget = state.turn.remaining().unwrap_or(0).max(0);
                let budget = u8::try_from(budget).unwrap_or(u8::MAX);
                let mut actions: Vec<MonasteryAction> = (1..=budget).map(BegForAlms).collect();
                actions.extend([VisitMarket, HireNovice]);
                for piety in Monastery::pieties_in(state, player, Area::Gatehouse) {
                    actions.push(GoOnPilgrimage { route: Route::Short, piety });
                    actions.push(GoOnPilgrimage { route: Route::Long, piety });
                }
                actions
            }
            Area::Chapel => vec![PromoteAllMonks],
            Area::Dormitory | Area::Pilgrimage | Area::Retired => Vec::new(),
        }
    }

    fn check_area_action(self, state: &GameState<Monastery>, player: PlayerId) -> Result<(), IllegalAction> {
        use MonasteryAction::*;
        let season = state.globals.season;
        let params = &state.globals.params;
        let has = |resource: Resource, amount: i64| Monastery::resource(state, player, resource) >= amount;

        match self {
            SowWheat => require(season == Season::Spring, || "wheat is sown in spring".into()),
            HarvestWheat => {
                require(matches!(season, Season::Summer | Season::Autumn), || {
                    "wheat is harvested in summer and autumn".into()
                })?;
                require(Monastery::meadow_grain(state, player) > 0, || "nothing sown".into())
            }
            PlaceSkep => {
                require(season == Season::Spring, || "skeps are placed in spring".into())?;
                require(has(Resource::Skep, 1), || "no skep in the storeroom".into())
            }
            CollectSkeps => {
                require(matches!(season, Season::Summer | Season::Autumn), || {
                    "skeps are collected in summer and autumn".into()
                })?;
                require(Monastery::meadow_skeps(state, player) > 0, || "no skeps in the meadow".into())
            }
            BakeBread | BrewBeer => require(has(Resource::Grain, 1), || "no grain".into()),
            MakeCandle => require(has(Resource::Wax, 1), || "no wax".into()),
            BegForAlms(n) => require(n > 0, || "beg for at least one shilling".into()),
            HireNovice => require(has(Resource::Shilling, params.novice_cost), || {
                format!("a novice costs {} shillings", params.novice_cost)
            }),
            GoOnPilgrimage { route, piety } => {
                let (min_piety, price) = match route {
                    Route::Short => (params.short_min_piety, params.short_cost),
                    Route::Long => (params.long_min_piety, params.long_cost),
                };
                require(piety >= min_piety, || format!("{route:?} pilgrimages need piety {min_piety}"))?;
                require(
                    Monastery::find_monk(state, player, Area::Gatehouse, piety).is_some(),
                    || format!("no monk of piety {piety} at the gatehouse"),
                )?;
                require(has(Resource::Shilling, price), || format!("{route:?} pilgrimages cost {price}"))?;
                let pool = state.globals.board().pool(route);
                require(!state.components.deck(pool).is_empty(), || {
                    format!("no {route:?} pilgrimages left")
                })
            }
            PromoteAllMonks => require(
                !Monastery::promotable(state, player).is_empty(),
                || "no monk to promote".into(),
            ),
            _ => Ok(()),
        }
    }

    fn apply_area_action(self, state: &mut GameState<Monastery>, player: PlayerId) -> Applied<MonasterySequence> {
        use MonasteryAction::*;
        let board = state.globals.board().players[player.index()].clone();
        let resource = |r: Resource| board.resource(r);

        match self {
            SowWheat => {
                state.adjust_counter(board.meadow_grain, 1);
            }
            HarvestWheat => {
                state.adjust_counter(board.meadow_grain, -1);
                state.adjust_counter(resource(Resource::Grain), 2);
            }
            PlaceSkep => {
                state.adjust_counter(resource(Resource::Skep), -1);
                state.adjust_counter(board.meadow_skeps, 1);
            }
            CollectSkeps => {
                let skeps = state.counter_value(board.meadow_skeps);
                state.adjust_counter(board.meadow_skeps, -skeps);
                state.adjust_counter(resource(Resource::Skep), skeps);
                state.adjust_counter(resource(Resource::Honey), skeps);
                state.adjust_counter(resource(Resource::Wax), skeps);
            }
            Forage => match state.rng.gen_range(0..3) {
                0 => {
                    state.adjust_counter(resource(Resource::Honey), 1);
                }
                1 => {
                    state.adjust_counter(resource(Resource::Grain), 1);
                }
                _ => debug!("{player} forages nothing"),
            },
            BakeBread => {
                state.adjust_counter(resource(Resource::Grain), -1);
                state.adjust_counter(resource(Resource::Bread), 2);
            }
            BrewBeer => {
                state.adjust_counter(resource(Resource::Grain), -1);
                state.adjust_counter(resource(Resource::Beer), 1);
            }
            WeaveSkep => {
                state.adjust_counter(resource(Resource::Skep), 1);
            }
            MakeCandle => {
                state.adjust_counter(resource(Resource::Wax), -1);
                state.adjust_counter(resource(Resource::Candle), 1);
            }
            BegForAlms(n) => {
                state.adjust_counter(resource(Resource::Shilling), i64::from(n));
            }
            VisitMarket => return Applied::Push(MonasterySequence::Market { player, done: false }),
            HireNovice => {
                let cost = state.globals.params.novice_cost;
                state.adjust_counter(resource(Resource::Shilling), -cost);
                let monk = Monastery::add_monk(state, player, 1, Area::Dormitory);
                debug!("{player} hires novice {monk}");
            }
            GoOnPilgrimage { route, piety } => go_on_pilgrimage(state, player, route, piety),
            PromoteAllMonks => {
                let max = state.globals.params.max_piety;
                for (monk, piety) in Monastery::monks_in(state, player, Area::Chapel) {
                    if piety < max {
                        Monastery::promote(state, monk);
                    }
                }
            }
            _ => {}
        }
        Applied::Continue
    }
}

fn go_on_pilgrimage(state: &mut GameState<Monastery>, player: PlayerId, route: Route, piety: i64) {
    let params = state.globals.params;
    let price = match route {
        Route::Short => params.short_cost,
        Route::Long => params.long_cost,
    };
    let (pool, started) = {
        let board = state.globals.board();
        (board.pool(route), board.pilgrimages)
    };

    let Some(card) = state.components.deck_mut(pool).draw() else {
        return;
    };
    state.components.deck_mut(started).add_to_bottom(card);
    Monastery::adjust_resource(state, player, Resource::Shilling, -price);

    if let Some(monk) = Monastery::find_monk(state, player, Area::Gatehouse, piety) {
        Monastery::move_monk(state, monk, Area::Pilgrimage);
    }
    if let MonasteryCard::Pilgrimage(destination) = card {
        Monastery::adjust_vp(state, player, destination.vp());
        debug!("{player} sets out for {destination:?}");
    }
}

impl GameAction<Monastery> for MonasteryAction {
    fn cost(&self, state: &GameState<Monastery>) -> i32 {
        use MonasteryAction::*;
        match *self {
            SowWheat | HarvestWheat | PlaceSkep | CollectSkeps | Forage | VisitMarket | PromoteAllMonks => 1,
            BakeBread | BrewBeer | WeaveSkep | MakeCandle => 2,
            BegForAlms(n) => i32::from(n),
            HireNovice => state.globals.params.novice_ap,
            GoOnPilgrimage { piety, .. } => i32::try_from(piety).unwrap_or(i32::MAX),
            PlaceMonk { .. } | TakeToken | PromoteMonk { .. } | Pray(_) | Pass | Buy(_) | Sell(_) | DoNothing => 0,
        }
    }

    fn check(&self, state: &GameState<Monastery>, player: PlayerId) -> Result<(), IllegalAction> {
        use MonasteryAction::*;
        let action = *self;

        if action.is_continuation_only() {
            require(state.is_action_in_progress(), || format!("{action:?} continues a pending action"))?;
        }

        match action {
            Pass => Ok(()),
            PlaceMonk { area, piety } => {
                require(state.turn.phase == PLACE_MONKS, || "monks are placed in the placement phase".into())?;
                require(area.working_index().is_some(), || format!("{area:?} is not a working area"))?;
                require(
                    Monastery::find_monk(state, player, Area::Dormitory, piety).is_some(),
                    || format!("no monk of piety {piety} in the dormitory"),
                )
            }
            TakeToken => {
                require(state.turn.phase == USE_MONKS, || "no tokens during placement".into())?;
                require(!state.globals.token_taken, || "one token per turn".into())?;
                require(Monastery::tokens_left(state, state.globals.area) > 0, || "no tokens left".into())
            }
            PromoteMonk { piety } => require(
                Monastery::promotable(state, player).contains(&piety),
                || format!("no promotable monk of piety {piety}"),
            ),
            Pray(0) | DoNothing => Ok(()),
            Pray(n) => {
                require(Monastery::can_pray(state, player), || "cannot pray here".into())?;
                require(!Monastery::must_take_token(state), || "take the bonus token first".into())?;
                require(
                    state.is_action_in_progress() || !state.globals.prayed,
                    || "already prayed this turn".into(),
                )?;
                require(
                    Monastery::resource(state, player, Resource::Prayer) >= i64::from(n),
                    || format!("fewer than {n} prayer tokens"),
                )
            }
            Buy(resource) => {
                let shillings = Monastery::resource(state, player, Resource::Shilling);
                require(resource.buy_price().is_some_and(|price| price <= shillings), || {
                    format!("cannot buy {resource:?}")
                })
            }
            Sell(resource) => require(
                resource.sell_price().is_some() && Monastery::resource(state, player, resource) > 0,
                || format!("cannot sell {resource:?}"),
            ),
            _ => {
                let Some(area) = action.area() else {
                    return Ok(());
                };
                require(state.turn.phase == USE_MONKS, || "areas are worked after placement".into())?;
                require(state.globals.area == area, || format!("{action:?} is a {area:?} action"))?;
                require(!Monastery::must_take_token(state), || "take the bonus token first".into())?;
                action.check_area_action(state, player)
            }
        }
    }

    fn apply(&self, state: &mut GameState<Monastery>, player: PlayerId) -> Applied<MonasterySequence> {
        use MonasteryAction::*;
        match *self {
            PlaceMonk { area, piety } => {
                if let Some(monk) = Monastery::find_monk(state, player, Area::Dormitory, piety) {
                    Monastery::move_monk(state, monk, area);
                }
                Applied::EndTurn
            }
            Pass => Applied::EndTurn,
            TakeToken => take_token(state, player),
            PromoteMonk { piety } => {
                let area = state.globals.area;
                if let Some(monk) = Monastery::find_monk(state, player, area, piety) {
                    Monastery::promote(state, monk);
                    // A retired monk takes its extra point of piety with it.
                    if Monastery::monk_area(state, monk) == area {
                        state.turn.grant(1);
                    }
                }
                Applied::Continue
            }
            Pray(n) => {
                if n > 0 {
                    Monastery::adjust_resource(state, player, Resource::Prayer, -i64::from(n));
                    let per_prayer = state.globals.params.ap_per_prayer;
                    state.turn.grant(per_prayer * i32::from(n));
                    state.globals.prayed = true;
                }
                Applied::Continue
            }
            Buy(resource) => {
                let price = resource.buy_price().unwrap_or(0);
                Monastery::adjust_resource(state, player, Resource::Shilling, -price);
                Monastery::adjust_resource(state, player, resource, 1);
                Applied::Continue
            }
            Sell(resource) => {
                let price = resource.sell_price().unwrap_or(0);
                Monastery::adjust_resource(state, player, resource, -1);
                Monastery::adjust_resource(state, player, Resource::Shilling, price);
                Applied::Continue
            }
            DoNothing => Applied::Continue,
            action => action.apply_area_action(state, player),
        }
    }
}

fn take_token(state: &mut GameState<Monastery>, player: PlayerId) -> Applied<MonasterySequence> {
    let (deck, used) = {
        let board = state.globals.board();
        (board.tokens(state.globals.area), board.used_tokens)
    };
    let Some(card) = state.components.deck_mut(deck).draw() else {
        return Applied::Continue;
    };
    state.components.deck_mut(used).add_to_bottom(card);
    state.globals.token_taken = true;

    let MonasteryCard::Bonus(token) = card else {
        panic!("{card:?} found among the bonus tokens");
    };
    debug!("{player} takes {token:?}");
    match token {
        BonusToken::Devotion => Monastery::adjust_resource(state, player, Resource::Prayer, 1),
        BonusToken::Prestige => Monastery::adjust_vp(state, player, 1),
        BonusToken::Donation => Monastery::adjust_resource(state, player, Resource::Shilling, 1),
        BonusToken::Promotion => {}
    }

    match TokenStage::first(state, player, token) {
        Some(stage) => Applied::Push(MonasterySequence::Token { player, stage }),
        None => Applied::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_of_actions() {
        assert_eq!(MonasteryAction::SowWheat.area(), Some(Area::Meadow));
        assert_eq!(MonasteryAction::BegForAlms(2).area(), Some(Area::Gatehouse));
        assert_eq!(MonasteryAction::PromoteAllMonks.area(), Some(Area::Chapel));
        assert_eq!(MonasteryAction::Pass.area(), None);
    }

    #[test]
    fn test_continuation_only() {
        assert!(MonasteryAction::Pray(0).is_continuation_only());
        assert!(!MonasteryAction::Pray(1).is_continuation_only());
        assert!(MonasteryAction::DoNothing.is_continuation_only());
        assert!(!MonasteryAction::VisitMarket.is_continuation_only());
    }
}
